//! Application root

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;

use arbor_core::{
    ArborError, Child, Command, IdGenerator, Message, NodeId, RootCore, RootNode, RuntimeConfig,
};

use super::{ConfigReady, ConfigSource, Configurator, Dashboard, Heartbeat};

/// Focuses the configurator at startup and the dashboard once the
/// configuration is ready. The program ends on `Ctrl+C`/`Esc`, on an error,
/// or when the dashboard finishes.
#[derive(Debug)]
pub struct AppRoot {
    core: RootCore,
    configurator: NodeId,
    dashboard: NodeId,
}

impl AppRoot {
    pub fn assemble(source: ConfigSource, runtime: RuntimeConfig) -> Self {
        let mut ids = IdGenerator::new();
        let heartbeat_every = runtime.heartbeat();
        let mut core = RootCore::new().with_runtime_config(runtime);

        let configurator = core.link(Child::leaf(Configurator::new(
            ids.next("configurator"),
            source,
        )));

        let dashboard = Dashboard::new(ids.next("dashboard"));
        dashboard.link(Child::leaf(Heartbeat::new(
            ids.next("heartbeat"),
            heartbeat_every,
        )));
        let dashboard = core.link_core_app(Child::branch(dashboard));

        Self {
            core,
            configurator,
            dashboard,
        }
    }

    pub fn core(&self) -> &RootCore {
        &self.core
    }

    pub fn configurator_id(&self) -> &NodeId {
        &self.configurator
    }

    pub fn dashboard_id(&self) -> &NodeId {
        &self.dashboard
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && (key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

#[async_trait]
impl RootNode for AppRoot {
    fn init(&self) -> Command {
        Command::batch([
            self.core.init(),
            Command::set_focus(self.configurator.clone()),
        ])
    }

    async fn update(mut self, msg: Message) -> (Self, Command) {
        if let Message::Key(key) = &msg {
            if is_quit_key(key) {
                tracing::info!("Quit requested from keyboard");
                let cmd = self.core.quit();
                return (self, cmd);
            }
        }

        let mut cmds = Vec::new();
        if msg.app_ref::<ConfigReady>().is_some() {
            cmds.push(Command::set_focus(self.dashboard.clone()));
        }
        cmds.push(self.core.update(&msg).await);
        (self, Command::batch(cmds))
    }

    fn view(&self) -> String {
        if !self.core.is_ready() {
            return String::new();
        }
        if self.core.is_quitting() {
            return self.core.quitting_view();
        }
        self.core
            .timed_view(|| self.core.focused_view().unwrap_or_default())
    }

    fn is_quitting(&self) -> bool {
        self.core.is_quitting()
    }

    fn last_error(&self) -> Option<Arc<ArborError>> {
        self.core.last_error()
    }
}
