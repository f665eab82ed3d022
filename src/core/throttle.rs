//! Fixed-delay pacing between calls to the remote API and asset
//! hosts. The delay does not adapt to response headers; it is a
//! single configured pause applied uniformly.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Throttle: Send + Sync {
    /// Pause before the next external call.
    async fn wait(&self);
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(Duration);

impl FixedDelay {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn wait(&self) {}
}
