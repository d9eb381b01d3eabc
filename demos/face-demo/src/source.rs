//! Simulated Bluetooth audio source
//!
//! Walks the link through connect, streams a level sweep as PCM, then
//! disconnects.

use std::time::Duration;

use emote_core::ConnectionState;
use emote_runtime::FaceHandle;
use emote_test::{signal, LevelSweep};

/// Level update period of the sweep
pub const SWEEP_PERIOD: Duration = Duration::from_millis(50);

/// Stereo frames per PCM callback
const FRAMES_PER_CALLBACK: usize = 512;

pub struct SimulatedSource {
    handle: FaceHandle,
    connect_delay: Duration,
}

impl SimulatedSource {
    pub fn new(handle: FaceHandle) -> Self {
        SimulatedSource {
            handle,
            connect_delay: Duration::from_millis(800),
        }
    }

    /// Run one session of `play_for` audio
    pub async fn run(self, play_for: Duration) {
        tokio::time::sleep(Duration::from_millis(500)).await;
        self.handle.on_connection(ConnectionState::Connecting);
        tokio::time::sleep(self.connect_delay).await;
        self.handle.on_connection(ConnectionState::Connected);

        let mut sweep = LevelSweep::default();
        let mut ticker = tokio::time::interval(SWEEP_PERIOD);
        let deadline = tokio::time::Instant::now() + play_for;

        while tokio::time::Instant::now() < deadline {
            ticker.tick().await;
            let level = sweep.next().map(|l| l.value()).unwrap_or(0.0);
            let pcm = signal::square(FRAMES_PER_CALLBACK, level);
            self.handle.on_audio(pcm.as_bytes());
        }

        // Let the face settle before the link drops
        tokio::time::sleep(Duration::from_secs(2)).await;
        self.handle.on_connection(ConnectionState::Disconnecting);
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.handle.on_connection(ConnectionState::Disconnected);
    }
}
