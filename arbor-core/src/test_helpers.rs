//! Test utilities for driving a node tree without a terminal
//!
//! [`Harness`] plays the role of the terminal driver: it runs the root's
//! update, awaits every task of the returned command and queues the
//! produced messages. `Quit` stops it the way it stops the real driver.

use std::collections::VecDeque;

use crate::command::Command;
use crate::message::Message;
use crate::node::RootNode;

pub struct Harness<R: RootNode> {
    root: Option<R>,
    processed: Vec<&'static str>,
    stopped: bool,
}

impl<R: RootNode> Harness<R> {
    pub fn new(root: R) -> Self {
        Self {
            root: Some(root),
            processed: Vec::new(),
            stopped: false,
        }
    }

    pub fn root(&self) -> &R {
        self.root.as_ref().expect("harness root taken mid-update")
    }

    /// True once a `Quit` message was pumped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Kinds of every message delivered so far, in delivery order.
    pub fn processed(&self) -> &[&'static str] {
        &self.processed
    }

    /// Run the root's `init` command and return what it produced.
    pub async fn init(&mut self) -> Vec<Message> {
        self.root().init().drain().await
    }

    /// One update cycle. Returns the messages produced by the command.
    pub async fn deliver(&mut self, msg: Message) -> Vec<Message> {
        self.update(msg).await.drain().await
    }

    /// Deliver `msg` and then every message its commands produce, first in
    /// first out, for at most `max_cycles` cycles. Returns the messages
    /// still queued when it stopped.
    pub async fn pump(&mut self, msg: Message, max_cycles: usize) -> Vec<Message> {
        let mut queue = VecDeque::from([msg]);
        let mut cycles = 0;
        while cycles < max_cycles {
            let Some(next) = queue.pop_front() else {
                break;
            };
            if matches!(next, Message::Quit) {
                self.stopped = true;
                break;
            }
            queue.extend(self.deliver(next).await);
            cycles += 1;
        }
        queue.into()
    }

    async fn update(&mut self, msg: Message) -> Command {
        let root = self.root.take().expect("harness root taken mid-update");
        self.processed.push(msg.kind());
        let (root, cmd) = root.update(msg).await;
        self.root = Some(root);
        cmd
    }
}
