//! Messages delivered to the node tree
//!
//! A [`Message`] is broadcast to the whole (sub)tree on every dispatch.
//! Control messages that are aimed at specific nodes carry their targets and
//! expose `is_recipient`, so each node decides for itself whether to react.

use crossterm::event::{KeyEvent, MouseEvent};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ArborError;
use crate::id::NodeId;

/// Requests that the listed nodes begin their shutdown sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutDown {
    pub targets: Vec<NodeId>,
}

impl ShutDown {
    pub fn is_recipient(&self, id: &NodeId) -> bool {
        self.targets.contains(id)
    }
}

/// Sent by a node to itself once its shutdown work has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleFinished {
    pub target: NodeId,
}

impl LifecycleFinished {
    pub fn is_recipient(&self, id: &NodeId) -> bool {
        &self.target == id
    }
}

/// Moves focus to `target`; every other node drops focus. A `None` target
/// leaves no node focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFocus {
    pub target: Option<NodeId>,
}

impl SetFocus {
    pub fn is_recipient(&self, id: &NodeId) -> bool {
        self.target.as_ref() == Some(id)
    }
}

/// Redefines the set of disabled nodes: listed nodes become disabled and all
/// others become enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDisabled {
    pub targets: Vec<NodeId>,
}

impl SetDisabled {
    pub fn is_recipient(&self, id: &NodeId) -> bool {
        self.targets.contains(id)
    }
}

/// Type-erased application message.
#[derive(Clone)]
pub struct AppMessage {
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl AppMessage {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            payload: Arc::new(payload),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AppMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppMessage({})", self.type_name)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ShutDown(ShutDown),
    LifecycleFinished(LifecycleFinished),
    SetFocus(SetFocus),
    SetDisabled(SetDisabled),
    /// A runtime error; travels to the root which treats it as fatal.
    Error(Arc<ArborError>),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// Intercepted by the driver, which stops issuing cycles.
    Quit,
    App(AppMessage),
}

impl Message {
    pub fn shut_down<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Message::ShutDown(ShutDown {
            targets: targets.into_iter().collect(),
        })
    }

    pub fn lifecycle_finished(target: NodeId) -> Self {
        Message::LifecycleFinished(LifecycleFinished { target })
    }

    pub fn set_focus(target: NodeId) -> Self {
        Message::SetFocus(SetFocus {
            target: Some(target),
        })
    }

    pub fn clear_focus() -> Self {
        Message::SetFocus(SetFocus { target: None })
    }

    pub fn set_disabled<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Message::SetDisabled(SetDisabled {
            targets: targets.into_iter().collect(),
        })
    }

    pub fn error(err: impl Into<ArborError>) -> Self {
        Message::Error(Arc::new(err.into()))
    }

    pub fn app<T: Any + Send + Sync>(payload: T) -> Self {
        Message::App(AppMessage::new(payload))
    }

    /// Borrow the application payload if this is an app message of type `T`.
    pub fn app_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Message::App(app) => app.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Property messages are evaluated even by disabled nodes.
    pub fn is_property_change(&self) -> bool {
        matches!(self, Message::SetFocus(_) | Message::SetDisabled(_))
    }

    /// Keyboard and mouse input, meant for the focused node only.
    pub fn is_input(&self) -> bool {
        matches!(self, Message::Key(_) | Message::Mouse(_))
    }

    /// Short name used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ShutDown(_) => "ShutDown",
            Message::LifecycleFinished(_) => "LifecycleFinished",
            Message::SetFocus(_) => "SetFocus",
            Message::SetDisabled(_) => "SetDisabled",
            Message::Error(_) => "Error",
            Message::Key(_) => "Key",
            Message::Mouse(_) => "Mouse",
            Message::Resize { .. } => "Resize",
            Message::Quit => "Quit",
            Message::App(app) => app.type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);

    #[test]
    fn test_recipients() {
        let a = NodeId::from("a");
        let b = NodeId::from("b");

        let shutdown = ShutDown {
            targets: vec![a.clone()],
        };
        assert!(shutdown.is_recipient(&a));
        assert!(!shutdown.is_recipient(&b));

        let focus = SetFocus {
            target: Some(b.clone()),
        };
        assert!(focus.is_recipient(&b));
        assert!(!focus.is_recipient(&a));

        let nobody = SetFocus { target: None };
        assert!(!nobody.is_recipient(&a));

        let finished = LifecycleFinished { target: a.clone() };
        assert!(finished.is_recipient(&a));
        assert!(!finished.is_recipient(&b));
    }

    #[test]
    fn test_app_message_downcast() {
        let msg = Message::app(Ping(7));
        assert_eq!(msg.app_ref::<Ping>(), Some(&Ping(7)));
        assert!(msg.app_ref::<String>().is_none());
        assert!(msg.kind().ends_with("Ping"));
    }

    #[test]
    fn test_message_classes() {
        assert!(Message::clear_focus().is_property_change());
        assert!(Message::set_disabled(Vec::new()).is_property_change());
        assert!(!Message::Quit.is_property_change());
        assert!(!Message::Resize { width: 1, height: 1 }.is_input());
    }
}
