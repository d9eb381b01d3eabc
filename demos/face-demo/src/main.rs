//! Emote Face Demo
//!
//! Runs a face node against a simulated Bluetooth source. Expression
//! changes go to the log, a fake backlight, and a watch channel.
//!
//! Usage: face-demo [config.toml] [seconds]

mod source;

use std::sync::Arc;
use std::time::Duration;

use emote_face::Backlight;
use emote_runtime::{
    driver, init_logging, BacklightSink, ChannelSink, FaceHandle, FanoutSink, LogSink,
    RuntimeConfig, RuntimeError, TokioClock,
};

use crate::source::SimulatedSource;

#[tokio::main]
async fn main() -> Result<(), RuntimeError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => RuntimeConfig::load(&path)?,
        _ => RuntimeConfig::default(),
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    init_logging(&config.logging)?;
    tracing::info!(device = %config.device_name, seconds, "face demo starting");

    let (channel, mut changes) = ChannelSink::new();
    let sink = FanoutSink::new()
        .with(LogSink::new(config.device_name.clone()))
        .with(BacklightSink::new(Backlight::default(), |duty| {
            tracing::debug!(duty, "backlight");
        }))
        .with(channel);

    let handle = FaceHandle::new(config.clone(), Arc::new(TokioClock::new()), Box::new(sink));
    let drivers = driver::spawn(handle.clone(), &config);

    let watcher = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            if let Some(change) = *changes.borrow_and_update() {
                tracing::trace!(expression = %change.to, speaking = change.speaking, "watch");
            }
        }
    });

    SimulatedSource::new(handle.clone())
        .run(Duration::from_secs(seconds))
        .await;

    drivers.shutdown();
    watcher.abort();
    let stats = handle.stats();

    tracing::info!(
        frames = stats.frames_received,
        levels = stats.levels_analyzed,
        changes = stats.expression_changes,
        blinks = stats.blinks,
        "face demo finished"
    );
    Ok(())
}
