//! Pacing for catalog writes.
//!
//! The catalog store throttles review creation, so successive writes are
//! spaced by a minimum interval. The gate is a trait so the pipeline can be
//! driven without wall-clock delay in tests.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Waits, if needed, before the next write is allowed to go out.
pub trait WriteGate {
    /// Resolves once the next write may be sent, and records it as sent.
    fn ready(&mut self) -> impl Future<Output = ()> + Send;
}

/// Enforces a minimum interval between the starts of successive writes.
///
/// The gate is shared by every product in a run: the first write of a
/// product waits on the last write of the previous one, and no delay is
/// added after the final write.
#[derive(Debug)]
pub struct MinIntervalGate {
    interval: Duration,
    last_write: Option<Instant>,
}

impl MinIntervalGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_write: None,
        }
    }

    #[must_use]
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }
}

impl WriteGate for MinIntervalGate {
    async fn ready(&mut self) {
        if let Some(last) = self.last_write {
            tokio::time::sleep_until(last + self.interval).await;
        }
        self.last_write = Some(Instant::now());
    }
}

/// Gate that never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unpaced;

impl WriteGate for Unpaced {
    async fn ready(&mut self) {}
}
