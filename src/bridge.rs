//! Native bridge - how the router tells the host framework where to send events
//!
//! The host owns the real event sources. Binding a closure asks the host to
//! deliver that event to the router's shared dispatcher; the host later calls
//! [`ActionRouter::dispatch_control`](crate::ActionRouter::dispatch_control)
//! and friends with the originating object.

use crate::event::ControlEvent;
use crate::handle::ObjectId;

/// Host-side event wiring
pub trait NativeBridge {
    /// Route `event` on `control` to the shared dispatcher
    fn route_control(&mut self, control: ObjectId, event: ControlEvent);

    /// Stop routing `event` on `control`
    fn unroute_control(&mut self, control: ObjectId, event: ControlEvent);

    /// Route the gesture's action to the shared dispatcher
    fn route_gesture(&mut self, gesture: ObjectId);

    /// Stop routing the gesture once it has no named actions left
    fn unroute_gesture(&mut self, gesture: ObjectId);

    /// Route the command item's action to the shared dispatcher
    fn route_command(&mut self, item: ObjectId);

    fn unroute_command(&mut self, item: ObjectId);
}

/// Bridge that wires nothing, for hosts that route every event unconditionally
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBridge;

impl NativeBridge for NullBridge {
    fn route_control(&mut self, _control: ObjectId, _event: ControlEvent) {}

    fn unroute_control(&mut self, _control: ObjectId, _event: ControlEvent) {}

    fn route_gesture(&mut self, _gesture: ObjectId) {}

    fn unroute_gesture(&mut self, _gesture: ObjectId) {}

    fn route_command(&mut self, _item: ObjectId) {}

    fn unroute_command(&mut self, _item: ObjectId) {}
}
