//! Headless host - an in-process stand-in for the native UI framework
//!
//! Records which events the router asked it to route and fires them the way
//! a native framework would: only routed events are delivered, disabled
//! controls get nothing, and a fired control event reaches every routed
//! event kind whose mask contains it.

use crate::bridge::NativeBridge;
use crate::config::RouterConfig;
use crate::controls::{CommandItem, Control, Gesture};
use crate::event::{ControlEvent, GestureState};
use crate::handle::ObjectId;
use crate::router::ActionRouter;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Default)]
struct Wiring {
    controls: HashMap<ObjectId, BTreeSet<ControlEvent>>,
    gestures: HashSet<ObjectId>,
    commands: HashSet<ObjectId>,
}

struct WiringBridge(Rc<RefCell<Wiring>>);

impl NativeBridge for WiringBridge {
    fn route_control(&mut self, control: ObjectId, event: ControlEvent) {
        self.0
            .borrow_mut()
            .controls
            .entry(control)
            .or_default()
            .insert(event);
    }

    fn unroute_control(&mut self, control: ObjectId, event: ControlEvent) {
        let mut wiring = self.0.borrow_mut();
        if let Some(events) = wiring.controls.get_mut(&control) {
            events.remove(&event);
            if events.is_empty() {
                wiring.controls.remove(&control);
            }
        }
    }

    fn route_gesture(&mut self, gesture: ObjectId) {
        self.0.borrow_mut().gestures.insert(gesture);
    }

    fn unroute_gesture(&mut self, gesture: ObjectId) {
        self.0.borrow_mut().gestures.remove(&gesture);
    }

    fn route_command(&mut self, item: ObjectId) {
        self.0.borrow_mut().commands.insert(item);
    }

    fn unroute_command(&mut self, item: ObjectId) {
        self.0.borrow_mut().commands.remove(&item);
    }
}

/// Host framework simulation that owns the app's router
pub struct HeadlessHost {
    wiring: Rc<RefCell<Wiring>>,
    router: ActionRouter,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        let wiring = Rc::new(RefCell::new(Wiring::default()));
        let router = ActionRouter::with_config(config, WiringBridge(wiring.clone()));
        Self { wiring, router }
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    /// Whether `event` on `control` is routed to the dispatcher
    pub fn is_routed(&self, control: ObjectId, event: ControlEvent) -> bool {
        self.wiring
            .borrow()
            .controls
            .get(&control)
            .is_some_and(|events| events.contains(&event))
    }

    /// Every event kind routed for a control
    pub fn routed_events(&self, control: ObjectId) -> Vec<ControlEvent> {
        self.wiring
            .borrow()
            .controls
            .get(&control)
            .map(|events| events.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_gesture_routed(&self, gesture: ObjectId) -> bool {
        self.wiring.borrow().gestures.contains(&gesture)
    }

    pub fn is_command_routed(&self, item: ObjectId) -> bool {
        self.wiring.borrow().commands.contains(&item)
    }

    /// Number of objects with any routed event
    pub fn routed_object_count(&self) -> usize {
        let wiring = self.wiring.borrow();
        wiring.controls.len() + wiring.gestures.len() + wiring.commands.len()
    }

    /// Fire a control event, returns how many routed targets it reached
    pub fn send_control_event(&self, control: &Control, fired: ControlEvent) -> usize {
        if !control.is_enabled() {
            trace!(object = %control.id(), event = %fired, "control disabled, event dropped");
            return 0;
        }

        let targets: Vec<ControlEvent> = self
            .routed_events(control.id())
            .into_iter()
            .filter(|routed| routed.contains(fired))
            .collect();

        for target in &targets {
            self.router.dispatch_control(control, *target);
        }
        targets.len()
    }

    /// Move a switch/stepper/slider to `value` and fire `ValueChanged`
    pub fn change_value(&self, control: &Control, value: f64) -> usize {
        control.set_value(value);
        self.send_control_event(control, ControlEvent::ValueChanged)
    }

    /// Replace a text field's text and fire `EditingChanged`
    pub fn edit_text(&self, control: &Control, text: &str) -> usize {
        control.set_text(text);
        self.send_control_event(control, ControlEvent::EditingChanged)
    }

    /// A full tap: touch down then touch up inside
    pub fn tap(&self, control: &Control) -> usize {
        self.send_control_event(control, ControlEvent::TouchDown)
            + self.send_control_event(control, ControlEvent::TouchUpInside)
    }

    /// Fire a gesture in `state`, returns whether it was routed
    pub fn send_gesture(&self, gesture: &Gesture, state: GestureState, location: (f32, f32)) -> bool {
        if !self.is_gesture_routed(gesture.id()) {
            return false;
        }
        gesture.recognize(state, location);
        self.router.dispatch_gesture(gesture);
        true
    }

    /// Fire a command item, returns whether it was routed
    pub fn send_command(&self, item: &CommandItem) -> bool {
        if !self.is_command_routed(item.id()) {
            return false;
        }
        self.router.dispatch_command(item);
        true
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}
