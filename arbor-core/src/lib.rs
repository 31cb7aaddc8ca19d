//! Hierarchical component runtime for terminal applications
//!
//! Programs are trees of nodes. A root owns branches and leaves, every node
//! follows a four-state lifecycle, and each message the driver receives is
//! fanned out concurrently through the tree. Nodes answer with a
//! [`Command`], a batch of deferred effects whose resulting messages come
//! back through the root on later cycles.

pub mod branch;
pub mod cancel;
pub mod command;
pub mod common;
pub mod config;
pub mod error;
pub mod fanout;
pub mod id;
pub mod leaf;
pub mod lifecycle;
pub mod message;
pub mod node;
pub mod observability;
pub mod registry;
pub mod root;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use branch::DefaultBranch;
pub use cancel::CancelHandle;
pub use command::Command;
pub use common::{Activation, Common, Flow};
pub use config::RuntimeConfig;
pub use error::{ArborError, ArborResult};
pub use fanout::fan_out;
pub use id::{IdGenerator, NodeId};
pub use leaf::DefaultLeaf;
pub use lifecycle::{LifecycleState, Properties};
pub use message::{AppMessage, Message};
pub use node::{BranchNode, Child, LeafNode, Node, RootNode};
pub use registry::Registry;
pub use root::{DefaultRoot, RootCore};
