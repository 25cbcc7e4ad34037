//! Rate-limit delays between external calls

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Blocking pause inserted on the critical path before rate-limited calls.
///
/// A pause is never cancelled once started.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioThrottle;

#[async_trait]
impl Throttle for TokioThrottle {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self, _delay: Duration) {}
}

/// Records requested delays without sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingThrottle {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().clone()
    }
}

#[async_trait]
impl Throttle for RecordingThrottle {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().push(delay);
    }
}
