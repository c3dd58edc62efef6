//! Request pacing between page fetches
//!
//! The resolver is a polite, strictly sequential client: one request in
//! flight, and a fixed pause between consecutive fetch attempts. Cache hits
//! never touch the network and never pause.

use std::time::Duration;

/// Imposes a fixed delay between consecutive fetch attempts
///
/// The first fetch of a run goes out immediately; every later fetch waits
/// `delay` first. Nothing waits after the last fetch.
#[derive(Debug)]
pub struct RequestPacer {
    /// Pause between two fetch attempts
    delay: Duration,

    /// Number of fetch attempts granted so far
    fetches: u64,
}

impl RequestPacer {
    /// Creates a new pacer
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fetches: 0,
        }
    }

    /// Waits until the next fetch attempt may start
    ///
    /// Call this immediately before each fetch.
    pub async fn wait_turn(&mut self) {
        if self.fetches > 0 && !self.delay.is_zero() {
            tracing::trace!("Pacing: waiting {:?} before next fetch", self.delay);
            tokio::time::sleep(self.delay).await;
        }

        self.fetches += 1;
    }
}
