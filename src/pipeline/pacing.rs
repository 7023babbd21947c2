use std::time::Duration;

/// Pause between successive list-page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);
/// Pause between successive per-item stock lookups.
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(50);

/// Fixed courtesy delay inserted between requests.
///
/// Not adaptive: the delay is the same whether the previous call succeeded
/// or failed. A zero delay disables pacing entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    pub async fn pause(&self) {
        if !self.is_disabled() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_disabled_pacer_returns_immediately() {
        let pacer = Pacer::disabled();
        assert!(pacer.is_disabled());
        let start = Instant::now();
        pacer.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_waits_for_delay() {
        let pacer = Pacer::from_millis(30);
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(start.elapsed() < Duration::from_millis(60));
    }
}
