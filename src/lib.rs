//! storefront-ui - control-event routing for the storefront UI kit
//!
//! Lets buttons, switches, text fields, gesture recognizers and toolbar
//! command items run closures without subclassing:
//! - One shared dispatcher ([`ActionRouter`]) for every object type
//! - Bindings keyed on stable object ids, not live object references
//! - Typed actions: a closure's argument always matches its sender
//! - Bindings released automatically on drop or removal from the view tree

pub mod action;
pub mod bridge;
pub mod config;
pub mod controls;
pub mod event;
pub mod handle;
pub mod hierarchy;
pub mod host;
pub mod key;
pub mod registry;
pub mod router;

// Re-export commonly used types
pub use action::{Action, ActionClosure, Argument, Sender, Shape};
pub use bridge::{NativeBridge, NullBridge};
pub use config::RouterConfig;
pub use controls::{CommandItem, Control, Gesture};
pub use event::{ControlEvent, ControlKind, GestureKind, GestureState};
pub use handle::{HandleAllocator, ObjectId};
pub use hierarchy::ViewHierarchy;
pub use host::HeadlessHost;
pub use key::ControlKey;
pub use registry::{ControlEventRegistry, GestureNameIndex};
pub use router::{ActionRouter, Bindable};
