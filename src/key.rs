//! Composite registry keys

use crate::event::ControlEvent;
use crate::handle::ObjectId;
use std::fmt;

/// Identifies one binding slot in the registry
///
/// Two keys are equal iff they share a tag and the same embedded tuple.
/// Only the object's id is hashed, never the object itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// A control and one of its events
    Control(ObjectId, ControlEvent),
    /// A gesture recognizer and a binding name
    Gesture(ObjectId, String),
    /// A command item (one binding per item)
    CommandItem(ObjectId),
}

impl ControlKey {
    pub fn control(id: ObjectId, event: ControlEvent) -> Self {
        ControlKey::Control(id, event)
    }

    pub fn gesture(id: ObjectId, name: impl Into<String>) -> Self {
        ControlKey::Gesture(id, name.into())
    }

    pub fn command_item(id: ObjectId) -> Self {
        ControlKey::CommandItem(id)
    }

    /// The object this key belongs to
    pub fn object(&self) -> ObjectId {
        match self {
            ControlKey::Control(id, _) | ControlKey::Gesture(id, _) | ControlKey::CommandItem(id) => {
                *id
            }
        }
    }

    /// Gesture name, if this is a gesture key
    pub fn gesture_name(&self) -> Option<&str> {
        match self {
            ControlKey::Gesture(_, name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKey::Control(id, event) => write!(f, "control {id}/{event}"),
            ControlKey::Gesture(id, name) => write!(f, "gesture {id}/{name:?}"),
            ControlKey::CommandItem(id) => write!(f, "command {id}"),
        }
    }
}
