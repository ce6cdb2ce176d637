//! Interactive objects - controls, gesture recognizers and command items
//!
//! Each object is issued an [`ObjectId`] by the router when it is created and
//! tears down all of its bindings when dropped. Objects never own their
//! closures; the router does.

use crate::action::Action;
use crate::event::{ControlEvent, ControlKind, GestureKind, GestureState};
use crate::handle::ObjectId;
use crate::router::ActionRouter;
use std::cell::{Cell, RefCell};
use std::fmt;

/// A control that emits [`ControlEvent`]s (button, switch, text field, ...)
pub struct Control {
    id: ObjectId,
    kind: ControlKind,
    label: String,
    enabled: Cell<bool>,
    value: Cell<f64>,
    text: RefCell<String>,
    router: ActionRouter,
}

impl Control {
    pub fn new(router: &ActionRouter, kind: ControlKind) -> Self {
        Self::labeled(router, kind, "")
    }

    pub fn labeled(router: &ActionRouter, kind: ControlKind, label: impl Into<String>) -> Self {
        Self {
            id: router.allocate(),
            kind,
            label: label.into(),
            enabled: Cell::new(true),
            value: Cell::new(0.0),
            text: RefCell::new(String::new()),
            router: router.clone(),
        }
    }

    pub fn button(router: &ActionRouter, label: impl Into<String>) -> Self {
        Self::labeled(router, ControlKind::Button, label)
    }

    pub fn text_field(router: &ActionRouter, placeholder: impl Into<String>) -> Self {
        Self::labeled(router, ControlKind::TextField, placeholder)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Disabled controls receive no events from the host
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Current value (switch on = 1.0, stepper count, slider position)
    pub fn value(&self) -> f64 {
        self.value.get()
    }

    pub fn set_value(&self, value: f64) {
        self.value.set(value);
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Add an action for `event`
    pub fn add_action(&self, event: ControlEvent, action: Action<Control>) {
        self.router.bind(self, event, action);
    }

    /// Replace whatever action `event` had
    pub fn set_action(&self, event: ControlEvent, action: Action<Control>) {
        self.router.rebind(self, event, action);
    }

    pub fn remove_action(&self, event: ControlEvent) {
        self.router.unbind(self, event);
    }

    /// Remove every action of this control
    pub fn clear_actions(&self) {
        self.router.teardown(self.id);
    }
}

impl Drop for Control {
    fn drop(&mut self) {
        self.router.teardown(self.id);
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("enabled", &self.enabled.get())
            .finish()
    }
}

/// A gesture recognizer carrying any number of named actions
pub struct Gesture {
    id: ObjectId,
    kind: GestureKind,
    state: Cell<GestureState>,
    location: Cell<(f32, f32)>,
    router: ActionRouter,
}

impl Gesture {
    pub fn new(router: &ActionRouter, kind: GestureKind) -> Self {
        Self {
            id: router.allocate(),
            kind,
            state: Cell::new(GestureState::default()),
            location: Cell::new((0.0, 0.0)),
            router: router.clone(),
        }
    }

    /// Create a recognizer with one action already bound under `name`
    pub fn with_action(
        router: &ActionRouter,
        kind: GestureKind,
        name: impl Into<String>,
        action: Action<Gesture>,
    ) -> Self {
        let gesture = Self::new(router, kind);
        gesture.add_action(name, action);
        gesture
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn state(&self) -> GestureState {
        self.state.get()
    }

    pub fn location(&self) -> (f32, f32) {
        self.location.get()
    }

    /// Update recognizer state before the host fires it
    pub fn recognize(&self, state: GestureState, location: (f32, f32)) {
        self.state.set(state);
        self.location.set(location);
    }

    /// Bind an action under `name`; other names are untouched
    pub fn add_action(&self, name: impl Into<String>, action: Action<Gesture>) {
        self.router.bind(self, name, action);
    }

    pub fn remove_action(&self, name: impl Into<String>) {
        self.router.unbind(self, name);
    }

    /// Names currently bound on this recognizer
    pub fn names(&self) -> Vec<String> {
        self.router.gesture_names(self)
    }

    pub fn clear_actions(&self) {
        self.router.teardown(self.id);
    }
}

impl Drop for Gesture {
    fn drop(&mut self) {
        self.router.teardown(self.id);
    }
}

impl fmt::Debug for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gesture")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state.get())
            .finish()
    }
}

/// A single-action item such as a toolbar button
pub struct CommandItem {
    id: ObjectId,
    title: String,
    router: ActionRouter,
}

impl CommandItem {
    pub fn new(router: &ActionRouter, title: impl Into<String>) -> Self {
        Self {
            id: router.allocate(),
            title: title.into(),
            router: router.clone(),
        }
    }

    /// Create an item with its action already bound
    pub fn with_action(
        router: &ActionRouter,
        title: impl Into<String>,
        action: Action<CommandItem>,
    ) -> Self {
        let item = Self::new(router, title);
        item.set_action(action);
        item
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_action(&self, action: Action<CommandItem>) {
        self.router.bind(self, (), action);
    }

    pub fn clear_actions(&self) {
        self.router.teardown(self.id);
    }
}

impl Drop for CommandItem {
    fn drop(&mut self) {
        self.router.teardown(self.id);
    }
}

impl fmt::Debug for CommandItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandItem")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish()
    }
}
