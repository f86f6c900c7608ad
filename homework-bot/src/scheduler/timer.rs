//! Sleep abstraction used between poll iterations

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, period: Duration);
}

/// Sleeps on the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}
