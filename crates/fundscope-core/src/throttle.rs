use std::time::Duration;

/// Fixed courtesy pause awaited before every outbound EDGAR call.
///
/// EDGAR's fair-access policy asks clients to space out requests; the
/// pause is an explicit sequential step in the pipeline rather than a
/// hidden timing side effect, so tests can set it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No pause at all; for tests and offline fakes.
    pub const fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
