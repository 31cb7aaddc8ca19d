//! Periodic heartbeat shown on the dashboard

use std::sync::Arc;
use std::time::Duration;

use arbor_core::{Activation, Command, Common, Flow, LeafNode, Message, Node, NodeId};

use super::{Beat, ConfigReady};

#[derive(Debug, Clone)]
pub struct Heartbeat {
    common: Common,
    interval: Duration,
    beats: u64,
}

impl Heartbeat {
    pub fn new(id: NodeId, interval: Duration) -> Self {
        Self {
            common: Common::new(id).with_activation(Activation::on_app::<ConfigReady>()),
            interval,
            beats: 0,
        }
    }

    /// Sleep for one interval, or resolve to nothing once the node is
    /// cancelled.
    fn tick(&self) -> Command {
        let token = self.common.cancel_token();
        let interval = self.interval;
        let target = self.id().clone();
        Command::optional(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                _ = tokio::time::sleep(interval) => Some(Message::app(Beat { target })),
            }
        })
    }
}

impl Node for Heartbeat {
    fn common(&self) -> &Common {
        &self.common
    }

    fn view(&self, _width: u16, _height: u16) -> String {
        format!(
            "heartbeat {}: {} beats, every {} ms",
            self.id(),
            self.beats,
            self.interval.as_millis()
        )
    }
}

impl LeafNode for Heartbeat {
    fn update(&self, msg: &Message) -> (Arc<dyn LeafNode>, Command) {
        let mut next = self.clone();
        let was_inactive = next.is_inactive();
        let cmd = match next.common.update(msg) {
            Flow::Disabled => return (Arc::new(self.clone()), Command::none()),
            Flow::Continue(cmd) => cmd,
        };

        let mut cmds = vec![cmd];
        if let Some(ConfigReady(config)) = msg.app_ref::<ConfigReady>() {
            next.interval = config.heartbeat(next.interval);
        }
        if was_inactive && next.is_active() {
            next.common.log_action(msg, "Starting heartbeat");
            cmds.push(next.tick());
        }
        if let Some(beat) = msg.app_ref::<Beat>() {
            if &beat.target == next.id() && next.is_active() {
                next.beats += 1;
                cmds.push(next.tick());
            }
        }

        (Arc::new(next), Command::batch(cmds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn ready() -> Message {
        Message::app(ConfigReady(AppConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_activation() {
        let heartbeat = Heartbeat::new(NodeId::from("hb"), Duration::from_millis(100));
        let (next, cmd) = heartbeat.update(&ready());
        assert!(next.is_active());

        let msgs = cmd.drain().await;
        assert_eq!(msgs.len(), 1);
        let (next, cmd) = next.update(&msgs[0]);
        assert!(next.view(80, 1).contains("1 beats"));
        assert_eq!(cmd.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_tick_produces_nothing() {
        let heartbeat = Heartbeat::new(NodeId::from("hb"), Duration::from_secs(60));
        let (next, cmd) = heartbeat.update(&ready());

        let (stopped, _) = next.update(&Message::shut_down([NodeId::from("hb")]));
        assert!(stopped.is_shutting_down());
        assert!(cmd.drain().await.is_empty());
    }

    #[test]
    fn test_beat_for_other_heartbeat_is_ignored() {
        let heartbeat = Heartbeat::new(NodeId::from("hb"), Duration::from_millis(100));
        let (next, _) = heartbeat.update(&ready());
        let (next, cmd) = next.update(&Message::app(Beat {
            target: NodeId::from("other"),
        }));
        assert!(cmd.is_empty());
        assert!(next.view(80, 1).contains("0 beats"));
    }
}
