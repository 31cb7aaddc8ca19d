//! Root of the node tree
//!
//! [`RootCore`] holds what every program root needs: the registry of its
//! direct children, the terminal size, the focused id, and the termination
//! bookkeeping. An application root embeds a `RootCore`, handles its own
//! messages, and then calls [`RootCore::update`]. [`DefaultRoot`] is a root
//! with no application logic.

use async_trait::async_trait;
use std::cell::Cell;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::command::Command;
use crate::config::RuntimeConfig;
use crate::error::ArborError;
use crate::fanout::fan_out;
use crate::id::NodeId;
use crate::message::Message;
use crate::node::{Child, RootNode};
use crate::registry::Registry;

#[derive(Debug, Default)]
pub struct RootCore {
    registry: Registry,
    err: Option<Arc<ArborError>>,
    quitting: bool,
    ready: bool,
    width: u16,
    height: u16,
    focused: Option<NodeId>,
    core_app: Option<NodeId>,
    runtime: RuntimeConfig,
    /// Time spent in the last update, consumed by the next view
    update_runtime: Cell<Duration>,
}

impl RootCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_config(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn link(&self, child: Child) -> NodeId {
        self.registry.link(child)
    }

    /// Link the child whose `Finished` state ends the program.
    pub fn link_core_app(&mut self, child: Child) -> NodeId {
        let id = self.registry.link(child);
        self.core_app = Some(id.clone());
        id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn must_get(&self, id: &str) -> Child {
        self.registry.must_get(id)
    }

    pub fn init(&self) -> Command {
        self.registry.init_all()
    }

    /// True once the first terminal size is known.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn screen(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    pub fn core_app(&self) -> Option<&NodeId> {
        self.core_app.as_ref()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn last_error(&self) -> Option<Arc<ArborError>> {
        self.err.clone()
    }

    /// Enter the quitting state and ask the driver to stop.
    pub fn quit(&mut self) -> Command {
        self.quitting = true;
        Command::quit()
    }

    /// Root-level handling followed by fan-out to every child.
    ///
    /// An `Error` message is recorded and ends the program without being
    /// forwarded. The program also ends once the core application child
    /// reports `Finished`.
    pub async fn update(&mut self, msg: &Message) -> Command {
        let started = Instant::now();

        match msg {
            Message::Error(err) => {
                self.err = Some(Arc::clone(err));
                error!(error = %err, "Terminating on node error");
                return self.quit();
            }
            Message::Resize { width, height } => {
                self.width = *width;
                self.height = *height;
                self.ready = true;
            }
            Message::SetFocus(focus) => {
                self.focused = focus.target.clone();
            }
            _ => {}
        }

        let mut cmds = vec![fan_out(&self.registry, msg).await];

        if !self.quitting && self.core_app_finished() {
            info!(core_app = ?self.core_app, "Core application finished, quitting");
            cmds.push(self.quit());
        }

        self.update_runtime.set(started.elapsed());
        Command::batch(cmds)
    }

    fn core_app_finished(&self) -> bool {
        self.core_app
            .as_ref()
            .is_some_and(|id| self.registry.must_get(id.as_str()).is_finished())
    }

    /// Render with `render` and warn when update plus view exceeded the
    /// iteration budget. The recorded update time is consumed, so later
    /// redraws only count their own rendering.
    pub fn timed_view(&self, render: impl FnOnce() -> String) -> String {
        let started = Instant::now();
        let view = render();
        let view_runtime = started.elapsed();
        let update_runtime = self.update_runtime.take();
        if update_runtime + view_runtime > self.runtime.max_iteration() {
            warn!(
                update = ?update_runtime,
                view = ?view_runtime,
                "Update/view iteration took too long"
            );
        }
        view
    }

    /// Screen shown while the program winds down.
    pub fn quitting_view(&self) -> String {
        let body = match &self.err {
            Some(err) => format!("application error: {}", err),
            None => "See you later!".to_string(),
        };
        // Too small for a header, keep the message itself
        if self.height < 2 {
            return body;
        }
        compose("Quitting", &body, "", self.width, self.height)
    }

    /// The focused child's header, body and footer.
    pub fn focused_view(&self) -> Option<String> {
        let child = self.registry.get(self.focused.as_ref()?.as_str())?;
        let header = child.view_header(self.width, self.height);
        let footer = child.view_footer(self.width, self.height);
        let chrome = header.lines().count() + footer.lines().count();
        let body_height = self.height.saturating_sub(chrome as u16);
        let body = child.view(self.width, body_height);
        Some(compose(&header, &body, &footer, self.width, self.height))
    }
}

/// Stack header, body and footer, truncating lines to `width` and padding
/// the body so the footer lands on the last row.
pub fn compose(header: &str, body: &str, footer: &str, width: u16, height: u16) -> String {
    let width = width as usize;
    let clip = |line: &str| line.chars().take(width).collect::<String>();

    let mut lines: Vec<String> = header.lines().map(clip).collect();
    let footer_lines: Vec<String> = footer.lines().map(clip).collect();
    let room = (height as usize).saturating_sub(lines.len() + footer_lines.len());

    let body_lines: Vec<String> = body.lines().map(clip).take(room).collect();
    let padding = room - body_lines.len();
    lines.extend(body_lines);
    lines.extend(std::iter::repeat(String::new()).take(padding));
    lines.extend(footer_lines);
    lines.join("\n")
}

/// A root without application behaviour.
#[derive(Debug, Default)]
pub struct DefaultRoot {
    pub core: RootCore,
}

impl DefaultRoot {
    pub fn new(core: RootCore) -> Self {
        Self { core }
    }
}

#[async_trait]
impl RootNode for DefaultRoot {
    fn init(&self) -> Command {
        self.core.init()
    }

    async fn update(mut self, msg: Message) -> (Self, Command) {
        let cmd = self.core.update(&msg).await;
        (self, cmd)
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
