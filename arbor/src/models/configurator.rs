//! Configuration loader and form
//!
//! Activates when it gains focus and loads the configuration file. A
//! complete file produces `ConfigReady` straight away; otherwise the node
//! opens a form for the profile fields and saves it on Enter. Once the
//! configuration is ready the configurator shuts itself down.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;

use arbor_core::{Activation, Command, Common, Flow, LeafNode, Message, Node, NodeId};

use super::{ConfigMissing, ConfigReady, ConfigSource};
use crate::config::AppConfig;

const FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Loading,
    Editing,
    Saving,
    Done,
}

#[derive(Debug, Clone)]
pub struct Configurator {
    common: Common,
    source: ConfigSource,
    stage: Stage,
    loaded: AppConfig,
    values: [String; FIELDS],
    cursor: usize,
    error: Option<String>,
}

impl Configurator {
    pub fn new(id: NodeId, source: ConfigSource) -> Self {
        Self {
            common: Common::new(id).with_activation(Activation::OnFocus),
            source,
            stage: Stage::Loading,
            loaded: AppConfig::default(),
            values: Default::default(),
            cursor: 0,
            error: None,
        }
    }

    fn open_form(&mut self, loaded: &AppConfig) {
        self.loaded = loaded.clone();
        self.values = [
            loaded.profile.name.clone(),
            loaded.profile.role.clone(),
            loaded.profile.team.clone(),
        ];
        self.cursor = 0;
        self.error = None;
        self.stage = Stage::Editing;
    }

    fn handle_key(&mut self, key: &KeyEvent, msg: &Message) -> Command {
        if key.kind != KeyEventKind::Press {
            return Command::none();
        }
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.values[self.cursor].push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.values[self.cursor].pop();
            }
            KeyCode::Tab | KeyCode::Down => self.cursor = (self.cursor + 1) % FIELDS,
            KeyCode::BackTab | KeyCode::Up => self.cursor = (self.cursor + FIELDS - 1) % FIELDS,
            KeyCode::Enter => return self.submit(msg),
            _ => {}
        }
        Command::none()
    }

    fn submit(&mut self, msg: &Message) -> Command {
        let mut config = self.loaded.clone();
        let [name, role, team] = self.values.clone().map(|v| v.trim().to_string());
        config.profile.name = name;
        config.profile.role = role;
        config.profile.team = team;

        if let Some((label, _)) = config
            .profile
            .fields()
            .into_iter()
            .find(|(_, value)| value.is_empty())
        {
            self.error = Some(format!("{} must not be empty", label));
            self.common.log_notice(msg, "Rejected incomplete configuration");
            return Command::none();
        }

        self.stage = Stage::Saving;
        self.error = None;
        self.common.log_action(msg, "Saving configuration");
        self.source.save(config)
    }
}

impl Node for Configurator {
    fn common(&self) -> &Common {
        &self.common
    }

    fn view_header(&self, _width: u16, _height: u16) -> String {
        "arbor configuration".to_string()
    }

    fn view(&self, _width: u16, _height: u16) -> String {
        match self.stage {
            Stage::Loading => "Loading configuration...".to_string(),
            Stage::Saving => "Saving configuration...".to_string(),
            Stage::Done => "Configuration ready.".to_string(),
            Stage::Editing => {
                let mut lines = vec![format!("Editing {}", self.source.path.display()), String::new()];
                for (i, label) in ["Name", "Role", "Team"].iter().enumerate() {
                    let marker = if i == self.cursor { ">" } else { " " };
                    lines.push(format!("{} {}: {}", marker, label, self.values[i]));
                }
                lines.join("\n")
            }
        }
    }

    fn view_footer(&self, _width: u16, _height: u16) -> String {
        match (&self.error, self.stage) {
            (Some(error), _) => format!("error: {}", error),
            (None, Stage::Editing) => "Tab/Up/Down move  Enter save  Esc quit".to_string(),
            (None, _) => "Esc quit".to_string(),
        }
    }
}

impl LeafNode for Configurator {
    fn update(&self, msg: &Message) -> (Arc<dyn LeafNode>, Command) {
        let mut next = self.clone();
        let was_inactive = next.is_inactive();
        let cmd = match next.common.update(msg) {
            Flow::Disabled => return (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => cmd,
        };

        let mut cmds = vec![cmd];
        if was_inactive && next.is_active() {
            next.common.log_action(msg, "Loading configuration");
            cmds.push(next.source.load());
        }

        if next.is_active() {
            if let Some(ConfigMissing(loaded)) = msg.app_ref::<ConfigMissing>() {
                next.open_form(loaded);
            } else if msg.app_ref::<ConfigReady>().is_some() {
                next.stage = Stage::Done;
                next.common.log_action(msg, "Configuration ready, shutting down");
                cmds.push(Command::shut_down([next.id().clone()]));
            } else if msg.is_input() && next.is_focused() && next.stage == Stage::Editing {
                if let Message::Key(key) = msg {
                    cmds.push(next.handle_key(key, msg));
                }
            }
        }

        (Arc::new(next), Command::batch(cmds))
    }
}
