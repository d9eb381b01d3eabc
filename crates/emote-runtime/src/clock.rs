//! Clock on the async runtime's timeline

use emote_core::FaceTime;
use emote_time::Clock;

/// Clock that follows `tokio::time`, including paused test time
///
/// Timer tasks sleep on tokio time; deadlines they compare against must come
/// from the same timeline.
#[derive(Debug, Clone)]
pub struct TokioClock {
    reference: tokio::time::Instant,
}

impl TokioClock {
    /// Create a clock starting at zero. Must be called inside a runtime
    /// when time is paused.
    pub fn new() -> Self {
        TokioClock {
            reference: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> FaceTime {
        FaceTime::from_micros(self.reference.elapsed().as_micros() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_follows_paused_time() {
        let clock = TokioClock::new();
        assert_eq!(clock.now(), FaceTime::ZERO);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(clock.now().as_millis(), 250);
    }
}
