// Common test utilities for node tree integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use arbor_core::{
    Activation, ArborError, Child, Command, Common, DefaultBranch, DefaultLeaf, Flow, LeafNode,
    Message, Node, NodeId, RootCore,
};

/// Application message telling the scripted leaf its configuration is done
#[derive(Debug)]
pub struct ConfigReady;

/// Application message making the scripted leaf report an error
#[derive(Debug)]
pub struct Explode;

/// Leaf that shuts itself down on `ConfigReady` and fails on `Explode`.
#[derive(Debug, Clone)]
pub struct ScriptedLeaf {
    pub common: Common,
}

impl ScriptedLeaf {
    pub fn new(id: &str, activation: Activation) -> Self {
        Self {
            common: Common::new(NodeId::from(id)).with_activation(activation),
        }
    }
}

impl Node for ScriptedLeaf {
    fn common(&self) -> &Common {
        &self.common
    }
}

impl LeafNode for ScriptedLeaf {
    fn update(&self, msg: &Message) -> (Arc<dyn LeafNode>, Command) {
        let mut next = self.clone();
        let cmd = match next.common.update(msg) {
            Flow::Disabled => return (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => cmd,
        };

        let own = if !next.is_active() {
            Command::none()
        } else if msg.app_ref::<ConfigReady>().is_some() {
            Command::shut_down([next.id().clone()])
        } else if msg.app_ref::<Explode>().is_some() {
            Command::error(ArborError::node(next.id(), "exploded on request"))
        } else {
            Command::none()
        };

        (Arc::new(next), Command::batch([cmd, own]))
    }
}

pub fn leaf(id: &str, activation: Activation) -> Child {
    Child::leaf(DefaultLeaf::new(
        Common::new(NodeId::from(id)).with_activation(activation),
    ))
}

pub fn branch(id: &str, activation: Activation, children: Vec<Child>) -> Child {
    let node = DefaultBranch::new(Common::new(NodeId::from(id)).with_activation(activation));
    for child in children {
        node.link(child);
    }
    Child::branch(node)
}

pub fn resize() -> Message {
    Message::Resize {
        width: 80,
        height: 24,
    }
}

/// Run a single cycle through `core` and return the produced messages.
pub async fn cycle(core: &mut RootCore, msg: Message) -> Vec<Message> {
    core.update(&msg).await.drain().await
}

/// Deliver `msg` and everything it produces, first in first out, until the
/// queue empties, a `Quit` comes out, or `max_cycles` is reached. Returns
/// true when `Quit` was seen.
pub async fn pump(core: &mut RootCore, msg: Message, max_cycles: usize) -> bool {
    let mut queue = VecDeque::from([msg]);
    for _ in 0..max_cycles {
        let Some(next) = queue.pop_front() else {
            return false;
        };
        if matches!(next, Message::Quit) {
            return true;
        }
        queue.extend(cycle(core, next).await);
    }
    false
}
