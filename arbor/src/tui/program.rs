//! Terminal driver
//!
//! Owns the terminal for the lifetime of a run. Messages arrive on one
//! unbounded channel, from the input reader and from executed commands, and
//! are handed to the root one at a time: draw, receive, update, execute.

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, info};

use arbor_core::{ArborResult, Command, Message, RootNode, RuntimeConfig};

use super::events::InputReader;
use super::ui;

/// Raw mode and the alternate screen, restored on drop even when the run
/// fails part way.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> ArborResult<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
    }
}

pub struct Program<R: RootNode> {
    root: R,
    runtime: RuntimeConfig,
}

impl<R: RootNode> Program<R> {
    pub fn new(root: R, runtime: RuntimeConfig) -> Self {
        Self { root, runtime }
    }

    /// Run until the root asks to quit. Returns the final root so the
    /// caller can inspect its error.
    pub async fn run(self) -> ArborResult<R> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        // Fallible setup happens before the reader task exists
        let size = terminal.size()?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let reader = InputReader::new(self.runtime.tick_rate());
        let input = reader.spawn(sender.clone());

        let _ = sender.send(Message::Resize {
            width: size.width,
            height: size.height,
        });
        execute_command(&sender, self.root.init());

        let result = event_loop(&mut terminal, self.root, &sender, receiver).await;

        reader.stop();
        let _ = input.await;
        result
    }
}

async fn event_loop<R: RootNode>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut root: R,
    sender: &mpsc::UnboundedSender<Message>,
    mut receiver: mpsc::UnboundedReceiver<Message>,
) -> ArborResult<R> {
    info!("Event loop started");
    loop {
        let screen = root.view();
        terminal.draw(|frame| ui::render(frame, &screen))?;

        let Some(msg) = receiver.recv().await else {
            break;
        };
        if matches!(msg, Message::Quit) {
            info!("Quit received, stopping event loop");
            break;
        }

        debug!(kind = msg.kind(), "Dispatching message");
        let (next, cmd) = root.update(msg).await;
        root = next;
        execute_command(sender, cmd);
    }

    // Last frame shows the quitting view
    let screen = root.view();
    terminal.draw(|frame| ui::render(frame, &screen))?;
    Ok(root)
}

/// Run every task of `cmd` in the background, feeding produced messages
/// back into the channel.
fn execute_command(sender: &mpsc::UnboundedSender<Message>, cmd: Command) {
    for task in cmd.into_tasks() {
        let sender = sender.clone();
        tokio::spawn(async move {
            if let Some(msg) = task.await {
                let _ = sender.send(msg);
            }
        });
    }
}
