use std::time::Duration;

/// Per-executor request pacing
///
/// Every executor owns one limiter and calls [`RateLimiter::throttle`]
/// before each request, which suspends the task for `1/rate` seconds.
/// Steady-state request rate per executor is therefore bounded by `rate`
/// requests per second, and the aggregate rate across N workers by
/// `N × rate`. Worker count must be sized with that product in mind.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
}

impl RateLimiter {
    /// Creates a limiter for the given target rate in requests per second
    ///
    /// `requests_per_sec` must be positive; the config validator enforces
    /// this before a limiter is ever built.
    pub fn new(requests_per_sec: f64) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / requests_per_sec),
        }
    }

    /// Suspends the calling task for one inter-request interval
    pub async fn throttle(&self) {
        tokio::time::sleep(self.interval).await;
    }

    /// Returns the enforced minimum spacing between requests
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
