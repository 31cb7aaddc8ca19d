//! The core application: profile summary and heartbeat

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEventKind};
use std::sync::Arc;

use arbor_core::{
    fan_out, Activation, BranchNode, Child, Command, Common, Flow, Message, Node, NodeId,
    Registry,
};

use super::ConfigReady;
use crate::config::Profile;

#[derive(Debug, Clone)]
pub struct Dashboard {
    common: Common,
    registry: Registry,
    profile: Option<Profile>,
}

impl Dashboard {
    pub fn new(id: NodeId) -> Self {
        Self {
            common: Common::new(id).with_activation(Activation::on_app::<ConfigReady>()),
            registry: Registry::new(),
            profile: None,
        }
    }

    pub fn link(&self, child: Child) -> NodeId {
        self.registry.link(child)
    }

    /// Shut down this node and every child.
    fn shut_down_all(&self, msg: &Message) -> Command {
        self.common.log_action(msg, "Shutting down dashboard");
        let mut targets = vec![self.id().clone()];
        targets.extend(self.registry.ids());
        Command::shut_down(targets)
    }
}

impl Node for Dashboard {
    fn common(&self) -> &Common {
        &self.common
    }

    fn init(&self) -> Command {
        self.registry.init_all()
    }

    fn view_header(&self, _width: u16, _height: u16) -> String {
        format!("arbor v{} | {}", env!("CARGO_PKG_VERSION"), self.id())
    }

    fn view(&self, width: u16, height: u16) -> String {
        let mut lines = vec!["Profile".to_string()];
        match &self.profile {
            Some(profile) => lines.extend(
                profile
                    .fields()
                    .iter()
                    .map(|(label, value)| format!("  {}: {}", label, value)),
            ),
            None => lines.push("  (not loaded)".to_string()),
        }
        lines.push(String::new());

        let mut children = self.registry.snapshot();
        children.sort_by(|a, b| a.id().cmp(b.id()));
        lines.extend(children.iter().map(|child| child.view(width, height)));
        lines.join("\n")
    }

    fn view_footer(&self, _width: u16, _height: u16) -> String {
        format!("{} | s shut down  Esc quit", self.state())
    }
}

#[async_trait]
impl BranchNode for Dashboard {
    async fn update(&self, msg: &Message) -> (Arc<dyn BranchNode>, Command) {
        let mut next = self.clone();
        let own = match next.common.update(msg) {
            Flow::Disabled => return (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => cmd,
        };

        let mut cmds = vec![own];
        if let Some(ConfigReady(config)) = msg.app_ref::<ConfigReady>() {
            next.profile = Some(config.profile.clone());
        }
        if msg.is_input() && next.is_focused() && next.is_active() {
            if let Message::Key(key) = msg {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('s') {
                    cmds.push(next.shut_down_all(msg));
                }
            }
        }

        cmds.push(fan_out(&next.registry, msg).await);
        (Arc::new(next), Command::batch(cmds))
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }
}
