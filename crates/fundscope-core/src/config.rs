use std::time::Duration;

use crate::throttle::Throttle;

pub const DEFAULT_USER_AGENT: &str = "fundscope/0.1.0 (holdings lookup; contact: ops@fundscope.dev)";
pub const DEFAULT_SUBMISSIONS_BASE: &str = "https://data.sec.gov/submissions";
pub const DEFAULT_ARCHIVES_BASE: &str = "https://www.sec.gov/Archives";

/// Connection settings for EDGAR.
///
/// EDGAR rejects anonymous traffic, so every request carries the
/// identifying `User-Agent` and an `Accept` header; a 403 from the
/// service almost always means the identification is missing or
/// blocked. Base URLs are configurable so tests never touch the
/// network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarConfig {
    pub user_agent: String,
    pub submissions_base: String,
    pub archives_base: String,
    pub timeout: Duration,
    pub throttle: Throttle,
}

impl EdgarConfig {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Zero courtesy pause; for tests driving fake transports.
    pub fn for_tests() -> Self {
        Self {
            throttle: Throttle::none(),
            ..Self::default()
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: String::from(DEFAULT_USER_AGENT),
            submissions_base: String::from(DEFAULT_SUBMISSIONS_BASE),
            archives_base: String::from(DEFAULT_ARCHIVES_BASE),
            timeout: Duration::from_secs(10),
            throttle: Throttle::default(),
        }
    }
}
