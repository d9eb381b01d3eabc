//! Timer drivers
//!
//! Three tasks feed the node from the async runtime:
//! - decay: fixed-period level decay
//! - blink: polls the blink schedule
//! - restore: one-shot wakeups at override deadlines, requested by the node
//!   over an unbounded channel so the audio path never waits

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use emote_core::FaceTime;

use crate::{FaceHandle, RuntimeConfig};

/// Running timer tasks
#[derive(Debug)]
pub struct DriverHandles {
    tasks: Vec<JoinHandle<()>>,
}

impl DriverHandles {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Stop every task
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        tracing::debug!(tasks = self.tasks.len(), "face drivers stopped");
    }
}

/// Start the timer tasks on the current tokio runtime
///
/// The node's clock should follow tokio time (`TokioClock`) so deadlines
/// and sleeps agree.
pub fn spawn(handle: FaceHandle, config: &RuntimeConfig) -> DriverHandles {
    let mut tasks = Vec::with_capacity(3);

    let (restore_tx, restore_rx) = mpsc::unbounded_channel();
    handle.attach_restore_timer(restore_tx);
    tasks.push(tokio::spawn(restore_loop(handle.clone(), restore_rx)));

    tasks.push(tokio::spawn(periodic(
        handle.clone(),
        config.decay.tick_interval,
        |h| {
            h.decay_tick();
        },
    )));

    if config.blink.enabled {
        tasks.push(tokio::spawn(periodic(
            handle.clone(),
            config.blink.poll_interval,
            |h| {
                h.blink_tick();
            },
        )));
    }

    tracing::debug!(
        tasks = tasks.len(),
        decay_ms = config.decay.tick_interval.as_millis() as u64,
        blink_poll_ms = config.blink.poll_interval.as_millis() as u64,
        "face drivers started"
    );
    DriverHandles { tasks }
}

async fn periodic(handle: FaceHandle, period: Duration, mut tick: impl FnMut(&FaceHandle)) {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        tick(&handle);
    }
}

async fn restore_loop(handle: FaceHandle, mut requests: mpsc::UnboundedReceiver<FaceTime>) {
    // One sleeper per deadline; a short override requested after a long one
    // still fires on time. Aborting this task drops the set and every
    // pending sleeper with it.
    let mut sleepers = JoinSet::new();
    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(deadline) = request else { break };
                let handle = handle.clone();
                sleepers.spawn(async move {
                    tokio::time::sleep(deadline.since(handle.now())).await;
                    handle.expire_overrides();
                });
            }
            Some(_) = sleepers.join_next(), if !sleepers.is_empty() => {}
        }
    }
    while sleepers.join_next().await.is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingSink, TokioClock};
    use emote_audio::AudioFrame;
    use emote_core::{ConnectionState, Expression};
    use std::sync::Arc;

    fn handle(config: &RuntimeConfig) -> (FaceHandle, RecordingSink) {
        let sink = RecordingSink::new();
        let handle = FaceHandle::new(
            config.clone(),
            Arc::new(TokioClock::new()),
            Box::new(sink.clone()),
        );
        (handle, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_announce_restores_on_timer() {
        let config = RuntimeConfig {
            seed: Some(3),
            ..Default::default()
        };
        let (handle, sink) = handle(&config);
        let drivers = spawn(handle.clone(), &config);

        handle.on_connection(ConnectionState::Connected);
        assert_eq!(handle.snapshot().expression, Expression::Happy);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(handle.snapshot().expression, Expression::Idle);
        assert_eq!(sink.expressions(), vec![Expression::Happy, Expression::Idle]);

        drivers.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_cycle() {
        let config = RuntimeConfig {
            seed: Some(3),
            ..Default::default()
        };
        let (handle, sink) = handle(&config);
        let drivers = spawn(handle.clone(), &config);

        handle.on_connection(ConnectionState::Connected);
        tokio::time::sleep(Duration::from_millis(3500)).await;

        assert_eq!(
            sink.expressions(),
            vec![
                Expression::Happy,
                Expression::Idle,
                Expression::Wink,
                Expression::Idle
            ]
        );
        assert_eq!(handle.stats().blinks, 1);

        drivers.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_decay_settles_to_idle() {
        let mut config = RuntimeConfig::default();
        config.blink.enabled = false;
        let (handle, sink) = handle(&config);
        let drivers = spawn(handle.clone(), &config);
        assert_eq!(drivers.len(), 2);

        handle.on_connection(ConnectionState::Connected);
        tokio::time::sleep(Duration::from_millis(300)).await;

        let loud = AudioFrame::from_mono(&[29_000; 512]);
        assert_eq!(
            handle.on_frame(&loud).map(|c| c.to),
            Some(Expression::Excited)
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        let snap = handle.snapshot();
        assert_eq!(snap.expression, Expression::Idle);
        assert!(snap.level.is_below(0.01));
        assert_eq!(sink.expressions().last(), Some(&Expression::Idle));
        assert!(sink.expressions().contains(&Expression::Neutral));

        drivers.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_restore() {
        let mut config = RuntimeConfig::default();
        config.blink.enabled = false;
        let (handle, sink) = handle(&config);
        let drivers = spawn(handle.clone(), &config);

        handle.on_connection(ConnectionState::Connected);
        // Let the restore loop pick up the 200ms deadline
        tokio::time::sleep(Duration::from_millis(50)).await;
        drivers.shutdown();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(handle.snapshot().expression, Expression::Happy);
        assert_eq!(sink.expressions(), vec![Expression::Happy]);
    }
}
