//! Event kinds - control events, control kinds and gesture kinds

use std::fmt;

/// Events a control can emit
///
/// The last three variants are group masks: binding one of them routes every
/// member event to the same closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlEvent {
    TouchDown,
    TouchDownRepeat,
    TouchDragInside,
    TouchDragOutside,
    TouchDragEnter,
    TouchDragExit,
    TouchUpInside,
    TouchUpOutside,
    TouchCancel,
    ValueChanged,
    PrimaryActionTriggered,
    EditingDidBegin,
    EditingChanged,
    EditingDidEnd,
    EditingDidEndOnExit,
    /// Every touch event
    AllTouchEvents,
    /// Every editing event
    AllEditingEvents,
    /// Every event
    AllEvents,
}

impl ControlEvent {
    /// Every control event, masks included
    pub const ALL: [ControlEvent; 18] = [
        ControlEvent::TouchDown,
        ControlEvent::TouchDownRepeat,
        ControlEvent::TouchDragInside,
        ControlEvent::TouchDragOutside,
        ControlEvent::TouchDragEnter,
        ControlEvent::TouchDragExit,
        ControlEvent::TouchUpInside,
        ControlEvent::TouchUpOutside,
        ControlEvent::TouchCancel,
        ControlEvent::ValueChanged,
        ControlEvent::PrimaryActionTriggered,
        ControlEvent::EditingDidBegin,
        ControlEvent::EditingChanged,
        ControlEvent::EditingDidEnd,
        ControlEvent::EditingDidEndOnExit,
        ControlEvent::AllTouchEvents,
        ControlEvent::AllEditingEvents,
        ControlEvent::AllEvents,
    ];

    /// Whether this is a group mask rather than a single event
    pub fn is_mask(self) -> bool {
        matches!(
            self,
            ControlEvent::AllTouchEvents | ControlEvent::AllEditingEvents | ControlEvent::AllEvents
        )
    }

    pub fn is_touch(self) -> bool {
        matches!(
            self,
            ControlEvent::TouchDown
                | ControlEvent::TouchDownRepeat
                | ControlEvent::TouchDragInside
                | ControlEvent::TouchDragOutside
                | ControlEvent::TouchDragEnter
                | ControlEvent::TouchDragExit
                | ControlEvent::TouchUpInside
                | ControlEvent::TouchUpOutside
                | ControlEvent::TouchCancel
        )
    }

    pub fn is_editing(self) -> bool {
        matches!(
            self,
            ControlEvent::EditingDidBegin
                | ControlEvent::EditingChanged
                | ControlEvent::EditingDidEnd
                | ControlEvent::EditingDidEndOnExit
        )
    }

    /// Whether a fired event should be delivered to a binding on `self`
    pub fn contains(self, fired: ControlEvent) -> bool {
        match self {
            ControlEvent::AllEvents => true,
            ControlEvent::AllTouchEvents => fired == self || fired.is_touch(),
            ControlEvent::AllEditingEvents => fired == self || fired.is_editing(),
            _ => fired == self,
        }
    }

    /// Stable name used in logs
    pub fn name(self) -> &'static str {
        match self {
            ControlEvent::TouchDown => "touch-down",
            ControlEvent::TouchDownRepeat => "touch-down-repeat",
            ControlEvent::TouchDragInside => "touch-drag-inside",
            ControlEvent::TouchDragOutside => "touch-drag-outside",
            ControlEvent::TouchDragEnter => "touch-drag-enter",
            ControlEvent::TouchDragExit => "touch-drag-exit",
            ControlEvent::TouchUpInside => "touch-up-inside",
            ControlEvent::TouchUpOutside => "touch-up-outside",
            ControlEvent::TouchCancel => "touch-cancel",
            ControlEvent::ValueChanged => "value-changed",
            ControlEvent::PrimaryActionTriggered => "primary-action-triggered",
            ControlEvent::EditingDidBegin => "editing-did-begin",
            ControlEvent::EditingChanged => "editing-changed",
            ControlEvent::EditingDidEnd => "editing-did-end",
            ControlEvent::EditingDidEndOnExit => "editing-did-end-on-exit",
            ControlEvent::AllTouchEvents => "all-touch-events",
            ControlEvent::AllEditingEvents => "all-editing-events",
            ControlEvent::AllEvents => "all-events",
        }
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete control types of the kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Button,
    LoadingButton,
    TextField,
    Switch,
    Stepper,
    Slider,
    SegmentedControl,
}

/// Touch patterns a gesture recognizer can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    LongPress,
    Pan,
    Swipe,
    Pinch,
    Rotation,
}

/// Recognizer state reported when a gesture fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    Began,
    Changed,
    #[default]
    Ended,
    Cancelled,
}
