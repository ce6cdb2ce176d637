//! Action router - binding API and shared dispatcher target
//!
//! One router is created at app start and handed to every interactive object.
//! Cloning it is cheap and every clone refers to the same registry, so all
//! controls, gestures and command items share one dispatcher.
//!
//! # Example
//!
//! ```ignore
//! let router = ActionRouter::new();
//! let buy = Control::button(&router, "Buy");
//! router.bind(&buy, ControlEvent::TouchUpInside, Action::new(|| place_order()));
//!
//! // Host delivers the tap
//! router.dispatch_control(&buy, ControlEvent::TouchUpInside);
//! ```
//!
//! Dispatch resolves closures and releases the registry before running them,
//! so a closure may bind, rebind or tear down objects (itself included).

use crate::action::{Action, ActionClosure, Argument, Sender};
use crate::bridge::{NativeBridge, NullBridge};
use crate::config::RouterConfig;
use crate::controls::{CommandItem, Control, Gesture};
use crate::event::ControlEvent;
use crate::handle::{HandleAllocator, ObjectId};
use crate::key::ControlKey;
use crate::registry::ControlEventRegistry;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// An object closures can be bound to
///
/// `Slot` is what selects one binding on the object: an event kind for
/// controls, a name for gestures, nothing for command items.
pub trait Bindable: Sender {
    type Slot;

    fn object_id(&self) -> ObjectId;

    fn key(&self, slot: Self::Slot) -> ControlKey;
}

impl Bindable for Control {
    type Slot = ControlEvent;

    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn key(&self, event: ControlEvent) -> ControlKey {
        ControlKey::Control(self.id(), event)
    }
}

impl Bindable for Gesture {
    type Slot = String;

    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn key(&self, name: String) -> ControlKey {
        ControlKey::Gesture(self.id(), name)
    }
}

impl Bindable for CommandItem {
    type Slot = ();

    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn key(&self, _: ()) -> ControlKey {
        ControlKey::CommandItem(self.id())
    }
}

struct Shared {
    registry: RefCell<ControlEventRegistry>,
    bridge: RefCell<Box<dyn NativeBridge>>,
    handles: HandleAllocator,
}

/// Shared handle to the process-wide binding registry
#[derive(Clone)]
pub struct ActionRouter {
    shared: Rc<Shared>,
}

impl ActionRouter {
    /// Router with default config and no host wiring
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default(), NullBridge)
    }

    /// Router that reports wiring to a host bridge
    pub fn with_bridge(bridge: impl NativeBridge + 'static) -> Self {
        Self::with_config(RouterConfig::default(), bridge)
    }

    pub fn with_config(config: RouterConfig, bridge: impl NativeBridge + 'static) -> Self {
        debug!(strict_shapes = config.strict_shapes, "action router initialized");
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(ControlEventRegistry::with_config(&config)),
                bridge: RefCell::new(Box::new(bridge)),
                handles: HandleAllocator::new(),
            }),
        }
    }

    /// Issue an id for a new object
    pub fn allocate(&self) -> ObjectId {
        self.shared.handles.allocate()
    }

    /// Bind `action` to one slot of `object`, replacing any previous binding
    pub fn bind<T: Bindable>(&self, object: &T, slot: impl Into<T::Slot>, action: Action<T>) {
        let key = object.key(slot.into());
        self.register(key, action.into_closure());
    }

    /// Unbind then bind, so the slot holds exactly the new action
    pub fn rebind<T: Bindable>(&self, object: &T, slot: impl Into<T::Slot>, action: Action<T>) {
        let key = object.key(slot.into());
        self.unregister(&key);
        self.register(key, action.into_closure());
    }

    /// Remove the binding on one slot of `object`
    pub fn unbind<T: Bindable>(&self, object: &T, slot: impl Into<T::Slot>) {
        let key = object.key(slot.into());
        self.unregister(&key);
    }

    /// Remove every binding of an object
    ///
    /// Called automatically when an object is dropped or removed from a
    /// [`ViewHierarchy`](crate::ViewHierarchy).
    pub fn teardown(&self, id: ObjectId) {
        let removed = self.shared.registry.borrow_mut().clear_all(id);
        if removed.is_empty() {
            return;
        }

        debug!(object = %id, count = removed.len(), "tore down bindings");
        let mut bridge = self.shared.bridge.borrow_mut();
        let mut gesture_routed = false;
        for (key, _) in &removed {
            match key {
                ControlKey::Control(id, event) => bridge.unroute_control(*id, *event),
                ControlKey::Gesture(..) => gesture_routed = true,
                ControlKey::CommandItem(id) => bridge.unroute_command(*id),
            }
        }
        if gesture_routed {
            bridge.unroute_gesture(id);
        }
        drop(bridge);
        drop(removed);
    }

    /// Low-level insert of a raw closure
    ///
    /// The closure's shape is not checked against the key; a mismatch is
    /// caught at dispatch. Prefer [`bind`](Self::bind).
    pub fn register(&self, key: ControlKey, closure: ActionClosure) {
        debug!(key = %key, shape = %closure.shape(), "bound action");
        let replaced = self.shared.registry.borrow_mut().register(key.clone(), closure);

        let mut bridge = self.shared.bridge.borrow_mut();
        match key {
            ControlKey::Control(id, event) => bridge.route_control(id, event),
            ControlKey::Gesture(id, _) => bridge.route_gesture(id),
            ControlKey::CommandItem(id) => bridge.route_command(id),
        }
        drop(bridge);
        drop(replaced);
    }

    /// Low-level removal of one key. Absent keys are a no-op.
    pub fn unregister(&self, key: &ControlKey) {
        let removed = self.shared.registry.borrow_mut().unregister(key);
        if removed.is_none() {
            return;
        }

        debug!(key = %key, "unbound action");
        let gesture_emptied = match key {
            ControlKey::Gesture(id, _) => !self.shared.registry.borrow().gesture_index().contains(*id),
            _ => false,
        };

        let mut bridge = self.shared.bridge.borrow_mut();
        match key {
            ControlKey::Control(id, event) => bridge.unroute_control(*id, *event),
            ControlKey::Gesture(id, _) if gesture_emptied => bridge.unroute_gesture(*id),
            ControlKey::Gesture(..) => {}
            ControlKey::CommandItem(id) => bridge.unroute_command(*id),
        }
        drop(bridge);
        drop(removed);
    }

    /// Shared dispatcher entry point for control events
    pub fn dispatch_control(&self, control: &Control, event: ControlEvent) {
        let closure = self.shared.registry.borrow().resolve_control(control.id(), event);
        if let Some(closure) = closure {
            trace!(object = %control.id(), event = %event, "dispatching control event");
            closure.invoke(Argument::Control(control), self.strict_shapes());
        }
    }

    /// Shared dispatcher entry point for gestures; fires every named binding
    ///
    /// Names are snapshotted up front and each closure is looked up just
    /// before it runs, so a name unbound by an earlier closure is skipped and
    /// a rebound name runs its replacement.
    pub fn dispatch_gesture(&self, gesture: &Gesture) {
        let names = self.shared.registry.borrow().gesture_names(gesture.id());
        let strict = self.strict_shapes();
        for name in names {
            let closure = self.shared.registry.borrow().resolve_gesture(gesture.id(), &name);
            if let Some(closure) = closure {
                trace!(object = %gesture.id(), name = %name, "dispatching gesture");
                closure.invoke(Argument::Gesture(gesture), strict);
            }
        }
    }

    /// Shared dispatcher entry point for command items
    pub fn dispatch_command(&self, item: &CommandItem) {
        let closure = self.shared.registry.borrow().resolve_command(item.id());
        if let Some(closure) = closure {
            trace!(object = %item.id(), "dispatching command item");
            closure.invoke(Argument::CommandItem(item), self.strict_shapes());
        }
    }

    /// Total number of bindings
    pub fn binding_count(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    pub fn is_bound(&self, key: &ControlKey) -> bool {
        self.shared.registry.borrow().contains(key)
    }

    /// Names currently bound on a gesture
    pub fn gesture_names(&self, gesture: &Gesture) -> Vec<String> {
        self.shared.registry.borrow().gesture_names(gesture.id())
    }

    /// Keys currently bound on an object
    pub fn keys_for(&self, id: ObjectId) -> Vec<ControlKey> {
        self.shared.registry.borrow().keys_for(id)
    }

    pub fn strict_shapes(&self) -> bool {
        self.shared.registry.borrow().strict_shapes()
    }

    /// Whether two handles refer to the same router
    pub fn ptr_eq(&self, other: &ActionRouter) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Default for ActionRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRouter")
            .field("bindings", &self.binding_count())
            .field("issued", &self.shared.handles.issued())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ControlKind, GestureKind};
    use std::cell::Cell;

    fn counter(step: u32) -> (Rc<Cell<u32>>, Action<Control>) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, Action::new(move || sink.set(sink.get() + step)))
    }

    #[test]
    fn test_tap_then_rebind_replaces() {
        let router = ActionRouter::new();
        let button = Control::button(&router, "Pay");

        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        router.bind(
            &button,
            ControlEvent::TouchUpInside,
            Action::new(move || sink.set(sink.get() + 1)),
        );
        for _ in 0..3 {
            router.dispatch_control(&button, ControlEvent::TouchUpInside);
        }
        assert_eq!(count.get(), 3);

        let sink = count.clone();
        router.rebind(
            &button,
            ControlEvent::TouchUpInside,
            Action::new(move || sink.set(sink.get() + 10)),
        );
        router.dispatch_control(&button, ControlEvent::TouchUpInside);
        assert_eq!(count.get(), 13);
        assert_eq!(router.binding_count(), 1);
    }

    #[test]
    fn test_bind_twice_keeps_latest() {
        let router = ActionRouter::new();
        let button = Control::button(&router, "Add");
        let (first, c1) = counter(1);
        let (second, c2) = counter(1);

        router.bind(&button, ControlEvent::TouchUpInside, c1);
        router.bind(&button, ControlEvent::TouchUpInside, c2);
        router.dispatch_control(&button, ControlEvent::TouchUpInside);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_identity_keying() {
        let router = ActionRouter::new();
        let left = Control::button(&router, "Left");
        let right = Control::button(&router, "Right");
        let (l, cl) = counter(1);
        let (r, cr) = counter(1);

        router.bind(&left, ControlEvent::TouchUpInside, cl);
        router.bind(&right, ControlEvent::TouchUpInside, cr);
        router.dispatch_control(&left, ControlEvent::TouchUpInside);

        assert_eq!(l.get(), 1);
        assert_eq!(r.get(), 0);
    }

    #[test]
    fn test_unbind_and_noop_unbind() {
        let router = ActionRouter::new();
        let toggle = Control::new(&router, ControlKind::Switch);
        let (count, c) = counter(1);

        router.unbind(&toggle, ControlEvent::ValueChanged);
        assert_eq!(router.binding_count(), 0);

        router.bind(&toggle, ControlEvent::ValueChanged, c);
        router.unbind(&toggle, ControlEvent::ValueChanged);
        router.dispatch_control(&toggle, ControlEvent::ValueChanged);

        assert_eq!(count.get(), 0);
        assert_eq!(router.binding_count(), 0);
    }

    #[test]
    fn test_teardown_removes_exactly_object_bindings() {
        let router = ActionRouter::new();
        let field = Control::new(&router, ControlKind::TextField);
        let keep = Control::button(&router, "Keep");
        let (count, _) = counter(1);

        let events = [
            ControlEvent::EditingDidBegin,
            ControlEvent::EditingChanged,
            ControlEvent::EditingDidEnd,
            ControlEvent::EditingDidEndOnExit,
        ];
        for event in events {
            let sink = count.clone();
            router.bind(&field, event, Action::new(move || sink.set(sink.get() + 1)));
        }
        router.bind(&keep, ControlEvent::TouchUpInside, Action::new(|| {}));

        let before = router.binding_count();
        router.teardown(field.id());
        assert_eq!(router.binding_count(), before - events.len());

        for event in events {
            router.dispatch_control(&field, event);
        }
        assert_eq!(count.get(), 0);
        assert!(router.is_bound(&ControlKey::control(keep.id(), ControlEvent::TouchUpInside)));
    }

    #[test]
    fn test_gesture_multiplicity() {
        let router = ActionRouter::new();
        let gesture = Gesture::new(&router, GestureKind::Tap);
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));

        let sink = a.clone();
        router.bind(&gesture, "a", Action::new(move || sink.set(sink.get() + 1)));
        let sink = b.clone();
        router.bind(
            &gesture,
            "b",
            Action::with_sender(move |g: &Gesture| {
                assert_eq!(g.kind(), GestureKind::Tap);
                sink.set(sink.get() + 1);
            }),
        );

        router.dispatch_gesture(&gesture);
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);
        assert_eq!(router.gesture_names(&gesture), vec!["a", "b"]);
    }

    #[test]
    fn test_command_item_binding() {
        let router = ActionRouter::new();
        let item = CommandItem::new(&router, "Close");
        let hits = Rc::new(Cell::new(0));

        let sink = hits.clone();
        router.bind(&item, (), Action::new(move || sink.set(sink.get() + 1)));
        router.dispatch_command(&item);
        router.unbind(&item, ());
        router.dispatch_command(&item);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_closure_can_rebind_itself() {
        let router = ActionRouter::new();
        let button = Control::button(&router, "Once");
        let hits = Rc::new(Cell::new(0));

        let inner_router = router.clone();
        let sink = hits.clone();
        router.bind(
            &button,
            ControlEvent::TouchUpInside,
            Action::with_sender(move |control: &Control| {
                sink.set(sink.get() + 1);
                inner_router.rebind(control, ControlEvent::TouchUpInside, Action::new(|| {}));
            }),
        );

        router.dispatch_control(&button, ControlEvent::TouchUpInside);
        router.dispatch_control(&button, ControlEvent::TouchUpInside);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_closure_can_tear_down_its_object() {
        let router = ActionRouter::new();
        let button = Control::button(&router, "Dismiss");

        let inner_router = router.clone();
        router.bind(
            &button,
            ControlEvent::TouchUpInside,
            Action::with_sender(move |control: &Control| inner_router.teardown(control.id())),
        );
        router.bind(&button, ControlEvent::TouchDown, Action::new(|| {}));

        router.dispatch_control(&button, ControlEvent::TouchUpInside);
        assert_eq!(router.binding_count(), 0);
    }

    fn gesture_counter() -> (Rc<Cell<u32>>, Action<Gesture>) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, Action::new(move || sink.set(sink.get() + 1)))
    }

    #[test]
    fn test_gesture_name_unbound_mid_dispatch_is_skipped() {
        let router = ActionRouter::new();
        let tap = Gesture::new(&router, GestureKind::Tap);
        let (b, cb) = gesture_counter();

        let inner_router = router.clone();
        router.bind(
            &tap,
            "a",
            Action::with_sender(move |g: &Gesture| inner_router.unbind(g, "b")),
        );
        router.bind(&tap, "b", cb);

        router.dispatch_gesture(&tap);
        assert_eq!(b.get(), 0);
        assert_eq!(router.gesture_names(&tap), vec!["a"]);
    }

    #[test]
    fn test_gesture_torn_down_mid_dispatch_stops() {
        let router = ActionRouter::new();
        let tap = Gesture::new(&router, GestureKind::Tap);
        let (b, cb) = gesture_counter();

        let inner_router = router.clone();
        router.bind(
            &tap,
            "a",
            Action::with_sender(move |g: &Gesture| inner_router.teardown(g.id())),
        );
        router.bind(&tap, "b", cb);

        router.dispatch_gesture(&tap);
        assert_eq!(b.get(), 0);
        assert_eq!(router.binding_count(), 0);
    }

    #[test]
    fn test_sibling_rebound_mid_dispatch_runs_replacement() {
        let router = ActionRouter::new();
        let tap = Gesture::new(&router, GestureKind::Tap);
        let (old, c_old) = gesture_counter();
        let (new, c_new) = gesture_counter();

        let inner_router = router.clone();
        let replacement = RefCell::new(Some(c_new));
        router.bind(
            &tap,
            "a",
            Action::with_sender(move |g: &Gesture| {
                if let Some(action) = replacement.borrow_mut().take() {
                    inner_router.rebind(g, "b", action);
                }
            }),
        );
        router.bind(&tap, "b", c_old);

        router.dispatch_gesture(&tap);
        assert_eq!(old.get(), 0);
        assert_eq!(new.get(), 1);
    }

    #[test]
    fn test_gesture_closure_changes_own_bindings() {
        let router = ActionRouter::new();
        let hold = Gesture::new(&router, GestureKind::LongPress);
        let (extra, c_extra) = gesture_counter();

        let inner_router = router.clone();
        let pending = RefCell::new(Some(c_extra));
        router.bind(
            &hold,
            "main",
            Action::with_sender(move |g: &Gesture| {
                inner_router.unbind(g, "main");
                if let Some(action) = pending.borrow_mut().take() {
                    inner_router.bind(g, "extra", action);
                }
            }),
        );

        // Names bound during a dispatch wait for the next one
        router.dispatch_gesture(&hold);
        assert_eq!(extra.get(), 0);
        assert_eq!(router.gesture_names(&hold), vec!["extra"]);

        router.dispatch_gesture(&hold);
        assert_eq!(extra.get(), 1);
    }

    #[test]
    fn test_gesture_rebound_to_same_name_fires_new_closure_next_time() {
        let router = ActionRouter::new();
        let swipe = Gesture::new(&router, GestureKind::Swipe);
        let old = Rc::new(Cell::new(0));
        let (new, c_new) = gesture_counter();

        let inner_router = router.clone();
        let replacement = RefCell::new(Some(c_new));
        let sink = old.clone();
        router.bind(
            &swipe,
            "b",
            Action::with_sender(move |g: &Gesture| {
                sink.set(sink.get() + 1);
                if let Some(action) = replacement.borrow_mut().take() {
                    inner_router.rebind(g, "b", action);
                }
            }),
        );

        router.dispatch_gesture(&swipe);
        assert_eq!(old.get(), 1);
        assert_eq!(new.get(), 0);

        router.dispatch_gesture(&swipe);
        assert_eq!(old.get(), 1);
        assert_eq!(new.get(), 1);
    }

    #[test]
    fn test_dropping_closure_that_owns_a_control() {
        let router = ActionRouter::new();
        let owner = Control::button(&router, "Owner");
        let captured = Control::button(&router, "Captured");
        router.bind(&captured, ControlEvent::TouchDown, Action::new(|| {}));

        // Replacing the closure drops `captured`, whose Drop re-enters the router
        router.bind(&owner, ControlEvent::TouchUpInside, Action::new(move || {
            let _ = captured.label();
        }));
        router.rebind(&owner, ControlEvent::TouchUpInside, Action::new(|| {}));

        assert_eq!(router.binding_count(), 1);
    }

    #[test]
    fn test_lenient_router_skips_mismatch() {
        let router = ActionRouter::with_config(RouterConfig::new().with_strict_shapes(false), NullBridge);
        let button = Control::button(&router, "Odd");
        let hits = Rc::new(Cell::new(0));

        let sink = hits.clone();
        router.register(
            ControlKey::control(button.id(), ControlEvent::TouchUpInside),
            ActionClosure::with_command_item(move |_| sink.set(sink.get() + 1)),
        );
        router.dispatch_control(&button, ControlEvent::TouchUpInside);

        assert_eq!(hits.get(), 0);
    }

    #[test]
    #[should_panic(expected = "closure shape mismatch")]
    fn test_strict_router_panics_on_mismatch() {
        let router = ActionRouter::with_config(RouterConfig::new().with_strict_shapes(true), NullBridge);
        let gesture = Gesture::new(&router, GestureKind::Pinch);

        router.register(
            ControlKey::gesture(gesture.id(), "zoom"),
            ActionClosure::with_control(|_| {}),
        );
        router.dispatch_gesture(&gesture);
    }

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl NativeBridge for Recorder {
        fn route_control(&mut self, control: ObjectId, event: ControlEvent) {
            self.log.borrow_mut().push(format!("route {control} {event}"));
        }

        fn unroute_control(&mut self, control: ObjectId, event: ControlEvent) {
            self.log.borrow_mut().push(format!("unroute {control} {event}"));
        }

        fn route_gesture(&mut self, gesture: ObjectId) {
            self.log.borrow_mut().push(format!("gesture {gesture}"));
        }

        fn unroute_gesture(&mut self, gesture: ObjectId) {
            self.log.borrow_mut().push(format!("ungesture {gesture}"));
        }

        fn route_command(&mut self, item: ObjectId) {
            self.log.borrow_mut().push(format!("command {item}"));
        }

        fn unroute_command(&mut self, item: ObjectId) {
            self.log.borrow_mut().push(format!("uncommand {item}"));
        }
    }

    #[test]
    fn test_bridge_sees_wiring() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let router = ActionRouter::with_bridge(Recorder { log: log.clone() });
        let button = Control::button(&router, "Go");
        let gesture = Gesture::new(&router, GestureKind::Tap);

        router.bind(&button, ControlEvent::TouchUpInside, Action::new(|| {}));
        router.bind(&gesture, "", Action::new(|| {}));
        router.unbind(&button, ControlEvent::TouchUpInside);
        router.unbind(&gesture, "");

        assert_eq!(
            *log.borrow(),
            vec![
                "route #1 touch-up-inside".to_string(),
                "gesture #2".to_string(),
                "unroute #1 touch-up-inside".to_string(),
                "ungesture #2".to_string(),
            ]
        );
    }

    #[test]
    fn test_gesture_unrouted_only_when_last_name_goes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let router = ActionRouter::with_bridge(Recorder { log: log.clone() });
        let pan = Gesture::new(&router, GestureKind::Pan);

        router.bind(&pan, "drag", Action::new(|| {}));
        router.bind(&pan, "analytics", Action::new(|| {}));
        router.unbind(&pan, "drag");
        assert!(!log.borrow().contains(&"ungesture #1".to_string()));

        router.unbind(&pan, "analytics");
        assert_eq!(log.borrow().last().map(String::as_str), Some("ungesture #1"));
    }

    #[test]
    fn test_teardown_unroutes_gestures_and_commands() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let router = ActionRouter::with_bridge(Recorder { log: log.clone() });
        let swipe = Gesture::new(&router, GestureKind::Swipe);
        let item = CommandItem::new(&router, "Close");

        router.bind(&swipe, "dismiss", Action::new(|| {}));
        router.bind(&swipe, "analytics", Action::new(|| {}));
        router.bind(&item, (), Action::new(|| {}));
        log.borrow_mut().clear();

        router.teardown(swipe.id());
        router.teardown(item.id());
        router.teardown(item.id());

        assert_eq!(
            *log.borrow(),
            vec!["ungesture #1".to_string(), "uncommand #2".to_string()]
        );
    }
}
