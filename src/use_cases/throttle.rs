// Leading-edge rate limiter for noisy paths (dropped-event warnings,
// invalid-frame logs). The first call fires, later calls are suppressed
// until the window elapses.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    /// True when the caller may fire now; arms the window when it does.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }
}
