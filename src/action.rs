//! Action closures - the callback shapes a binding can carry
//!
//! [`ActionClosure`] is the raw stored form. It is what the registry holds and
//! what gets shape-checked at dispatch time. [`Action<S>`] is the typed form
//! used by the binding API: the sender type `S` fixes which argument the
//! closure may take, so a gesture closure can never end up on a control.

use crate::controls::{CommandItem, Control, Gesture};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A stored callback
#[derive(Clone)]
pub enum ActionClosure {
    NoArgs(Rc<dyn Fn()>),
    WithControl(Rc<dyn Fn(&Control)>),
    WithGesture(Rc<dyn Fn(&Gesture)>),
    WithCommandItem(Rc<dyn Fn(&CommandItem)>),
}

/// Shape tag of an [`ActionClosure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    NoArgs,
    WithControl,
    WithGesture,
    WithCommandItem,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::NoArgs => "no-args",
            Shape::WithControl => "with-control",
            Shape::WithGesture => "with-gesture",
            Shape::WithCommandItem => "with-command-item",
        };
        f.write_str(name)
    }
}

/// The originating object handed to a closure at dispatch
#[derive(Clone, Copy)]
pub enum Argument<'a> {
    Control(&'a Control),
    Gesture(&'a Gesture),
    CommandItem(&'a CommandItem),
}

impl Argument<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Argument::Control(_) => "control",
            Argument::Gesture(_) => "gesture",
            Argument::CommandItem(_) => "command item",
        }
    }
}

impl ActionClosure {
    pub fn no_args(f: impl Fn() + 'static) -> Self {
        ActionClosure::NoArgs(Rc::new(f))
    }

    pub fn with_control(f: impl Fn(&Control) + 'static) -> Self {
        ActionClosure::WithControl(Rc::new(f))
    }

    pub fn with_gesture(f: impl Fn(&Gesture) + 'static) -> Self {
        ActionClosure::WithGesture(Rc::new(f))
    }

    pub fn with_command_item(f: impl Fn(&CommandItem) + 'static) -> Self {
        ActionClosure::WithCommandItem(Rc::new(f))
    }

    pub fn shape(&self) -> Shape {
        match self {
            ActionClosure::NoArgs(_) => Shape::NoArgs,
            ActionClosure::WithControl(_) => Shape::WithControl,
            ActionClosure::WithGesture(_) => Shape::WithGesture,
            ActionClosure::WithCommandItem(_) => Shape::WithCommandItem,
        }
    }

    /// Whether this closure can be invoked for `arg`
    pub fn accepts(&self, arg: &Argument<'_>) -> bool {
        matches!(
            (self, arg),
            (ActionClosure::NoArgs(_), _)
                | (ActionClosure::WithControl(_), Argument::Control(_))
                | (ActionClosure::WithGesture(_), Argument::Gesture(_))
                | (ActionClosure::WithCommandItem(_), Argument::CommandItem(_))
        )
    }

    /// Invoke with the originating object, returns whether the closure ran
    ///
    /// A shape that does not accept `arg` is a caller bug: it panics when
    /// `strict` is set and is skipped with a warning otherwise.
    pub fn invoke(&self, arg: Argument<'_>, strict: bool) -> bool {
        match (self, arg) {
            (ActionClosure::NoArgs(f), _) => f(),
            (ActionClosure::WithControl(f), Argument::Control(control)) => f(control),
            (ActionClosure::WithGesture(f), Argument::Gesture(gesture)) => f(gesture),
            (ActionClosure::WithCommandItem(f), Argument::CommandItem(item)) => f(item),
            _ => {
                if strict {
                    panic!(
                        "closure shape mismatch: {} closure dispatched for a {}",
                        self.shape(),
                        arg.describe()
                    );
                }
                tracing::warn!(
                    shape = %self.shape(),
                    argument = arg.describe(),
                    "closure shape mismatch, skipping invocation"
                );
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for ActionClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionClosure").field(&self.shape()).finish()
    }
}

/// An object type that can be handed to a closure as its sender
pub trait Sender: Sized + 'static {
    /// Wrap a sender-taking closure into its stored shape
    fn wrap(f: Rc<dyn Fn(&Self)>) -> ActionClosure;
}

impl Sender for Control {
    fn wrap(f: Rc<dyn Fn(&Self)>) -> ActionClosure {
        ActionClosure::WithControl(f)
    }
}

impl Sender for Gesture {
    fn wrap(f: Rc<dyn Fn(&Self)>) -> ActionClosure {
        ActionClosure::WithGesture(f)
    }
}

impl Sender for CommandItem {
    fn wrap(f: Rc<dyn Fn(&Self)>) -> ActionClosure {
        ActionClosure::WithCommandItem(f)
    }
}

/// A closure whose argument, if any, is the sender type `S`
pub struct Action<S: Sender> {
    closure: ActionClosure,
    _sender: PhantomData<fn(&S)>,
}

impl<S: Sender> Action<S> {
    /// Closure that ignores its sender
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self {
            closure: ActionClosure::NoArgs(Rc::new(f)),
            _sender: PhantomData,
        }
    }

    /// Closure that receives the originating object
    pub fn with_sender(f: impl Fn(&S) + 'static) -> Self {
        let f: Rc<dyn Fn(&S)> = Rc::new(f);
        Self {
            closure: S::wrap(f),
            _sender: PhantomData,
        }
    }

    pub fn shape(&self) -> Shape {
        self.closure.shape()
    }

    pub fn into_closure(self) -> ActionClosure {
        self.closure
    }
}

impl<S: Sender> From<Action<S>> for ActionClosure {
    fn from(action: Action<S>) -> Self {
        action.into_closure()
    }
}

impl<S: Sender> fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.shape()).finish()
    }
}
