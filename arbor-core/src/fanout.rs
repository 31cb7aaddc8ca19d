//! Concurrent message fan-out
//!
//! A branch or root hands the message it is processing to every direct
//! child at once: one task per child, all joined before the parent returns.
//! Each task stores its child's new value back into the registry and yields
//! the child's command; the commands are batched for the parent's caller.
//! No ordering holds between siblings.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug_span, error, Instrument};

use crate::command::Command;
use crate::message::Message;
use crate::registry::Registry;

/// Deliver `msg` to every child in `registry` and batch their commands.
///
/// A panic inside a child's update is re-raised here once observed.
pub async fn fan_out(registry: &Registry, msg: &Message) -> Command {
    let children = registry.snapshot();
    if children.is_empty() {
        return Command::none();
    }

    let span = debug_span!("fan_out", children = children.len(), kind = msg.kind());
    let msg = Arc::new(msg.clone());
    let mut tasks = JoinSet::new();

    for child in children {
        let registry = registry.clone();
        let msg = Arc::clone(&msg);
        tasks.spawn(
            async move {
                let (next, cmd) = child.update(&msg).await;
                registry.store(next);
                cmd
            }
            .instrument(span.clone()),
        );
    }

    let mut cmds = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(cmd) => cmds.push(cmd),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => error!(error = %err, "Child update task was cancelled"),
        }
    }

    Command::batch(cmds)
}
