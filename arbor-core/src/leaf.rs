//! Protocol-only leaf node

use std::sync::Arc;

use crate::command::Command;
use crate::common::{Common, Flow};
use crate::message::Message;
use crate::node::{LeafNode, Node};

/// A leaf with no behaviour beyond the shared lifecycle and property rules.
///
/// Useful as a placeholder while assembling a tree and as the building block
/// concrete leaves delegate to.
#[derive(Debug, Clone)]
pub struct DefaultLeaf {
    pub common: Common,
}

impl DefaultLeaf {
    pub fn new(common: Common) -> Self {
        Self { common }
    }
}

impl Node for DefaultLeaf {
    fn common(&self) -> &Common {
        &self.common
    }
}

impl LeafNode for DefaultLeaf {
    fn update(&self, msg: &Message) -> (Arc<dyn LeafNode>, Command) {
        let mut next = self.clone();
        match next.common.update(msg) {
            Flow::Disabled => (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => (Arc::new(next), cmd),
        }
    }
}
