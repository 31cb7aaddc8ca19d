//! Per-node cancellation handle

use tokio_util::sync::CancellationToken;

/// Cancellation scope owned by a single node.
///
/// Copies of a node share the same handle, so cancelling through any copy is
/// visible to every command that was handed a [`token`](Self::token).
/// Handles of distinct nodes are independent.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Returns `false` if the handle was already
    /// cancelled, in which case nothing happens.
    pub fn cancel(&self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A token for asynchronous work tied to this node.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
