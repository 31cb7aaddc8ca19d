use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use arbor_core::{ArborError, Message};

/// Reads terminal input and forwards it into the program's message channel
///
/// Polls crossterm with a timeout of `tick_rate` on a blocking thread, so
/// the async runtime is never stalled by terminal reads. The reader stops
/// when its token is cancelled or the channel closes.
pub struct InputReader {
    tick_rate: Duration,
    cancel: CancellationToken,
}

impl InputReader {
    /// Create a reader polling every `tick_rate`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::tui::events::InputReader;
    /// use std::time::Duration;
    ///
    /// let reader = InputReader::new(Duration::from_millis(250));
    /// reader.stop();
    /// ```
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            cancel: CancellationToken::new(),
        }
    }

    /// Start reading on a blocking task
    pub fn spawn(&self, sender: mpsc::UnboundedSender<Message>) -> JoinHandle<()> {
        let tick_rate = self.tick_rate;
        let cancel = self.cancel.clone();
        tokio::task::spawn_blocking(move || {
            while !cancel.is_cancelled() {
                let msg = match next_message(tick_rate) {
                    Ok(Some(msg)) => msg,
                    Ok(None) => continue,
                    Err(err) => {
                        let _ = sender.send(Message::error(err));
                        break;
                    }
                };
                if sender.send(msg).is_err() {
                    break;
                }
            }
            tracing::debug!("Input reader stopped");
        })
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn next_message(timeout: Duration) -> Result<Option<Message>, ArborError> {
    let ready = event::poll(timeout).map_err(|e| ArborError::Terminal {
        message: format!("Failed to poll events: {}", e),
    })?;
    if !ready {
        return Ok(None);
    }
    let event = event::read().map_err(|e| ArborError::Terminal {
        message: format!("Failed to read event: {}", e),
    })?;
    Ok(translate(event))
}

/// Map a terminal event onto a tree message
///
/// Key releases and repeats, focus changes and paste events are dropped.
pub fn translate(event: CrosstermEvent) -> Option<Message> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Message::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Message::Resize { width, height }),
        _ => None,
    }
}
