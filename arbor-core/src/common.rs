//! State and behaviour shared by every node
//!
//! [`Common`] carries a node's id, lifecycle state, property flags and
//! cancellation handle, and implements the protocol rules that every node
//! follows regardless of its position in the tree:
//!
//! 1. `SetDisabled` / `SetFocus` update the property flags. These are always
//!    evaluated, even on a disabled node.
//! 2. A disabled node ignores everything else ([`Flow::Disabled`]).
//! 3. The node's activation trigger moves it from `Inactive` to `Active`.
//! 4. `ShutDown` addressed to an active node moves it to `ShuttingDown`,
//!    cancels its handle and emits `LifecycleFinished` for itself.
//! 5. `LifecycleFinished` addressed to a shutting-down node moves it to
//!    `Finished`.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cancel::CancelHandle;
use crate::command::Command;
use crate::id::NodeId;
use crate::lifecycle::{LifecycleState, Properties};
use crate::message::Message;

/// What moves a node from `Inactive` to `Active`.
#[derive(Debug, Clone, Copy)]
pub enum Activation {
    /// The first terminal size notice.
    OnResize,
    /// Gaining focus.
    OnFocus,
    /// Any message accepted by the predicate.
    Custom(fn(&Message) -> bool),
}

impl Activation {
    /// Activate on an application message carrying a `T`.
    pub fn on_app<T: std::any::Any>() -> Self {
        Activation::Custom(|msg| msg.app_ref::<T>().is_some())
    }

    fn matches(&self, msg: &Message, id: &NodeId) -> bool {
        match self {
            Activation::OnResize => matches!(msg, Message::Resize { .. }),
            Activation::OnFocus => matches!(msg, Message::SetFocus(m) if m.is_recipient(id)),
            Activation::Custom(predicate) => predicate(msg),
        }
    }
}

/// Outcome of the common protocol step.
#[must_use]
#[derive(Debug)]
pub enum Flow {
    /// The node is disabled and the message is not a property change: the
    /// caller must return the node unchanged with no command.
    Disabled,
    /// Continue with node-specific handling, keeping this command.
    Continue(Command),
}

#[derive(Debug, Clone)]
pub struct Common {
    id: NodeId,
    state: LifecycleState,
    properties: Properties,
    cancel: CancelHandle,
    activation: Option<Activation>,
}

impl Common {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            state: LifecycleState::Inactive,
            properties: Properties::empty(),
            cancel: CancelHandle::new(),
            activation: None,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = Some(activation);
        self
    }

    /// Start out with the `Disabled` property set.
    pub fn disabled(mut self) -> Self {
        self.properties.insert(Properties::DISABLED);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn properties(&self) -> Properties {
        self.properties
    }

    pub fn is_disabled(&self) -> bool {
        self.properties.contains(Properties::DISABLED)
    }

    pub fn is_focused(&self) -> bool {
        self.properties.contains(Properties::FOCUSED)
    }

    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    /// Token handed to asynchronous commands that must stop when this node
    /// shuts down.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.token()
    }

    pub fn cancel(&self) {
        if self.cancel.cancel() {
            info!(node_id = %self.id, "Cancelling node context");
        } else {
            warn!(node_id = %self.id, "Node context already cancelled");
        }
    }

    /// Move to `next` if it is the immediate successor of the current state.
    pub fn advance(&mut self, next: LifecycleState, msg: &Message) -> bool {
        if !self.state.can_advance_to(next) {
            return false;
        }
        self.state = next;
        self.log_state_change(msg);
        true
    }

    pub fn activate(&mut self, msg: &Message) -> bool {
        self.advance(LifecycleState::Active, msg)
    }

    pub fn update(&mut self, msg: &Message) -> Flow {
        match msg {
            Message::SetDisabled(m) => {
                let wanted = m.is_recipient(&self.id);
                self.apply_property(Properties::DISABLED, wanted, msg);
            }
            Message::SetFocus(m) => {
                let wanted = m.is_recipient(&self.id);
                self.apply_property(Properties::FOCUSED, wanted, msg);
            }
            _ => {}
        }

        if self.is_disabled() {
            if msg.is_property_change() {
                return Flow::Continue(Command::none());
            }
            return Flow::Disabled;
        }

        if self.state == LifecycleState::Inactive
            && self
                .activation
                .is_some_and(|activation| activation.matches(msg, &self.id))
        {
            self.activate(msg);
        }

        let cmd = match msg {
            Message::ShutDown(m) if m.is_recipient(&self.id) => self.begin_shutdown(msg),
            Message::LifecycleFinished(m) if m.is_recipient(&self.id) => {
                self.advance(LifecycleState::Finished, msg);
                Command::none()
            }
            _ => Command::none(),
        };
        Flow::Continue(cmd)
    }

    fn begin_shutdown(&mut self, msg: &Message) -> Command {
        match self.state {
            LifecycleState::Active => {
                self.advance(LifecycleState::ShuttingDown, msg);
                self.cancel();
                self.log_action(msg, "Requesting lifecycle finished");
                Command::lifecycle_finished(self.id.clone())
            }
            LifecycleState::Inactive => {
                self.log_notice(msg, "Shutdown requested before activation, ignored");
                Command::none()
            }
            LifecycleState::ShuttingDown | LifecycleState::Finished => Command::none(),
        }
    }

    fn apply_property(&mut self, flag: Properties, wanted: bool, msg: &Message) {
        let held = self.properties.contains(flag);
        if wanted == held {
            return;
        }
        let (old, new) = if wanted {
            self.properties.set_flag(flag)
        } else {
            self.properties.unset_flag(flag)
        };
        self.log_property_change(msg, old, new);
    }

    pub fn log_state_change(&self, msg: &Message) {
        info!(
            node_id = %self.id,
            new_state = %self.state,
            on_msg = msg.kind(),
            "Node state change"
        );
    }

    pub fn log_property_change(&self, msg: &Message, old: Properties, new: Properties) {
        info!(
            node_id = %self.id,
            properties = %format_args!("{} -> {}", old, new),
            on_msg = msg.kind(),
            "Node property change"
        );
    }

    pub fn log_action(&self, msg: &Message, action: &str) {
        info!(node_id = %self.id, action, on_msg = msg.kind(), "Node action");
    }

    pub fn log_notice(&self, msg: &Message, notice: &str) {
        info!(node_id = %self.id, notice, on_msg = msg.kind(), "Node notification");
    }
}
