//! The node contract
//!
//! Every component implements [`Node`]. Components without children add
//! [`LeafNode`], components that group children add [`BranchNode`], and the
//! single component driven by the terminal loop implements [`RootNode`].
//! Registries hold children as a [`Child`], a closed sum over the leaf and
//! branch shapes, so a registry entry that is neither cannot exist.
//!
//! Updates are functional: `update` borrows the current value and returns a
//! new one, which the parent stores in place of the old.

use async_trait::async_trait;
use std::sync::Arc;

use crate::command::Command;
use crate::common::Common;
use crate::error::ArborError;
use crate::id::NodeId;
use crate::lifecycle::{LifecycleState, Properties};
use crate::message::Message;
use crate::registry::Registry;

pub trait Node: Send + Sync + 'static {
    /// Shared id, state, properties and cancellation handle.
    fn common(&self) -> &Common;

    /// Startup effect, run once by the driver.
    fn init(&self) -> Command {
        Command::none()
    }

    /// Body of the node within a `width` x `height` area.
    fn view(&self, _width: u16, _height: u16) -> String {
        String::new()
    }

    /// Short text for the header section of the composed screen.
    fn view_header(&self, _width: u16, _height: u16) -> String {
        String::new()
    }

    /// Short text for the footer section of the composed screen.
    fn view_footer(&self, _width: u16, _height: u16) -> String {
        String::new()
    }

    fn cancel(&self) {
        self.common().cancel();
    }

    fn id(&self) -> &NodeId {
        self.common().id()
    }

    fn state(&self) -> LifecycleState {
        self.common().state()
    }

    fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    fn is_inactive(&self) -> bool {
        self.state() == LifecycleState::Inactive
    }

    fn is_shutting_down(&self) -> bool {
        self.state() == LifecycleState::ShuttingDown
    }

    fn is_finished(&self) -> bool {
        self.state() == LifecycleState::Finished
    }

    fn properties(&self) -> Properties {
        self.common().properties()
    }

    fn is_disabled(&self) -> bool {
        self.common().is_disabled()
    }

    fn is_focused(&self) -> bool {
        self.common().is_focused()
    }
}

/// A node without children.
pub trait LeafNode: Node {
    fn update(&self, msg: &Message) -> (Arc<dyn LeafNode>, Command);
}

/// A node that owns a registry of children and fans messages out to them.
#[async_trait]
pub trait BranchNode: Node {
    async fn update(&self, msg: &Message) -> (Arc<dyn BranchNode>, Command);

    fn registry(&self) -> &Registry;
}

/// The one node driven directly by the terminal loop.
#[async_trait]
pub trait RootNode: Send + Sized + 'static {
    fn init(&self) -> Command;

    async fn update(self, msg: Message) -> (Self, Command);

    /// The whole screen; the root tracks the terminal size itself.
    fn view(&self) -> String;

    /// Set once the root has asked the driver to stop.
    fn is_quitting(&self) -> bool;

    /// The error that terminated the program, if any.
    fn last_error(&self) -> Option<Arc<ArborError>>;
}

/// A registry entry.
#[derive(Clone)]
pub enum Child {
    Leaf(Arc<dyn LeafNode>),
    Branch(Arc<dyn BranchNode>),
}

impl Child {
    pub fn leaf(node: impl LeafNode) -> Self {
        Child::Leaf(Arc::new(node))
    }

    pub fn branch(node: impl BranchNode) -> Self {
        Child::Branch(Arc::new(node))
    }

    pub async fn update(&self, msg: &Message) -> (Child, Command) {
        match self {
            Child::Leaf(node) => {
                let (next, cmd) = node.update(msg);
                (Child::Leaf(next), cmd)
            }
            Child::Branch(node) => {
                let (next, cmd) = node.update(msg).await;
                (Child::Branch(next), cmd)
            }
        }
    }

    pub fn common(&self) -> &Common {
        match self {
            Child::Leaf(node) => node.common(),
            Child::Branch(node) => node.common(),
        }
    }

    pub fn init(&self) -> Command {
        match self {
            Child::Leaf(node) => node.init(),
            Child::Branch(node) => node.init(),
        }
    }

    pub fn view(&self, width: u16, height: u16) -> String {
        match self {
            Child::Leaf(node) => node.view(width, height),
            Child::Branch(node) => node.view(width, height),
        }
    }

    pub fn view_header(&self, width: u16, height: u16) -> String {
        match self {
            Child::Leaf(node) => node.view_header(width, height),
            Child::Branch(node) => node.view_header(width, height),
        }
    }

    pub fn view_footer(&self, width: u16, height: u16) -> String {
        match self {
            Child::Leaf(node) => node.view_footer(width, height),
            Child::Branch(node) => node.view_footer(width, height),
        }
    }

    pub fn id(&self) -> &NodeId {
        self.common().id()
    }

    pub fn state(&self) -> LifecycleState {
        self.common().state()
    }

    pub fn properties(&self) -> Properties {
        self.common().properties()
    }

    pub fn is_focused(&self) -> bool {
        self.common().is_focused()
    }

    pub fn is_disabled(&self) -> bool {
        self.common().is_disabled()
    }

    pub fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    pub fn is_finished(&self) -> bool {
        self.state() == LifecycleState::Finished
    }

    /// The registry of a branch child.
    pub fn registry(&self) -> Option<&Registry> {
        match self {
            Child::Leaf(_) => None,
            Child::Branch(node) => Some(node.registry()),
        }
    }
}

impl std::fmt::Debug for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Child::Leaf(_) => "Leaf",
            Child::Branch(_) => "Branch",
        };
        f.debug_struct(kind)
            .field("id", self.id())
            .field("state", &self.state())
            .field("properties", &self.properties())
            .finish()
    }
}
