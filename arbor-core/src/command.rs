//! Deferred effects returned from `init` and `update`
//!
//! A [`Command`] is a batch of zero or more tasks. Each task is a future that
//! resolves to at most one [`Message`]; the driver runs them off the update
//! path and feeds the produced messages back into the tree on later cycles.
//! Constructing a command does no work: nothing happens until the driver
//! polls the task.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

use crate::error::ArborError;
use crate::id::NodeId;
use crate::message::Message;

pub type Task = BoxFuture<'static, Option<Message>>;

#[derive(Default)]
pub struct Command {
    tasks: Vec<Task>,
}

impl Command {
    /// A command with no effect.
    pub fn none() -> Self {
        Self::default()
    }

    /// Produce `msg` as soon as the driver runs the command.
    pub fn message(msg: Message) -> Self {
        Self::future(future::ready(msg))
    }

    pub fn future<F>(fut: F) -> Self
    where
        F: Future<Output = Message> + Send + 'static,
    {
        Self::optional(fut.map(Some))
    }

    /// A task that may finish without producing a message, e.g. when it was
    /// cancelled.
    pub fn optional<F>(fut: F) -> Self
    where
        F: Future<Output = Option<Message>> + Send + 'static,
    {
        Self {
            tasks: vec![fut.boxed()],
        }
    }

    /// Flatten several commands into one, dropping empty ones.
    pub fn batch<I>(cmds: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        let tasks = cmds.into_iter().flat_map(|cmd| cmd.tasks).collect();
        Self { tasks }
    }

    pub fn shut_down<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self::message(Message::shut_down(targets))
    }

    pub fn lifecycle_finished(target: NodeId) -> Self {
        Self::message(Message::lifecycle_finished(target))
    }

    pub fn set_focus(target: NodeId) -> Self {
        Self::message(Message::set_focus(target))
    }

    pub fn clear_focus() -> Self {
        Self::message(Message::clear_focus())
    }

    pub fn set_disabled<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self::message(Message::set_disabled(targets))
    }

    pub fn error(err: impl Into<ArborError>) -> Self {
        Self::message(Message::error(err))
    }

    /// Ask the driver to stop the program.
    pub fn quit() -> Self {
        Self::message(Message::Quit)
    }

    /// Number of tasks in the batch.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Run every task concurrently and collect the messages they produce.
    pub async fn drain(self) -> Vec<Message> {
        future::join_all(self.tasks)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
