//! Protocol-only branch node

use async_trait::async_trait;
use std::sync::Arc;

use crate::command::Command;
use crate::common::{Common, Flow};
use crate::fanout::fan_out;
use crate::id::NodeId;
use crate::message::Message;
use crate::node::{BranchNode, Child, Node};
use crate::registry::Registry;

/// A branch that applies the shared protocol rules to itself and then fans
/// the message out to its children.
///
/// A disabled branch keeps non-property messages from its whole subtree;
/// property messages always reach every descendant so that focus and the
/// disabled set stay consistent tree-wide.
#[derive(Debug, Clone)]
pub struct DefaultBranch {
    pub common: Common,
    registry: Registry,
}

impl DefaultBranch {
    pub fn new(common: Common) -> Self {
        Self {
            common,
            registry: Registry::new(),
        }
    }

    /// Link a child at assembly time.
    pub fn link(&self, child: Child) -> NodeId {
        self.registry.link(child)
    }

    pub fn must_get(&self, id: &str) -> Child {
        self.registry.must_get(id)
    }

    /// Deliver `msg` to the children only.
    pub async fn update_children(&self, msg: &Message) -> Command {
        fan_out(&self.registry, msg).await
    }
}

impl Node for DefaultBranch {
    fn common(&self) -> &Common {
        &self.common
    }

    fn init(&self) -> Command {
        self.registry.init_all()
    }
}

#[async_trait]
impl BranchNode for DefaultBranch {
    async fn update(&self, msg: &Message) -> (Arc<dyn BranchNode>, Command) {
        let mut next = self.clone();
        let own = match next.common.update(msg) {
            Flow::Disabled => return (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => cmd,
        };
        let children = next.update_children(msg).await;
        (Arc::new(next), Command::batch([own, children]))
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }
}
