use std::thread;
use std::time::{Duration, Instant};

/// Time source behind the estimation loop.
///
/// The loop never calls `Instant::now()` directly: production wiring
/// hands it a [`MonotonicClock`], while tests hand it a [`ManualClock`]
/// and step a whole pour cycle through in microseconds. Session
/// timestamps are milliseconds measured from an epoch `Instant` via
/// `ms_since`.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);

    /// Whole milliseconds since `epoch`; 0 when `epoch` lies ahead of now.
    fn ms_since(&self, epoch: Instant) -> u64 {
        let dur = self.now().saturating_duration_since(epoch);
        dur.as_millis() as u64
    }
}

/// Real-time clock over `std::time::Instant`; what the CLI wires in.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}

/// Clock that moves only when told to.
///
/// `sleep` bumps an internal offset instead of blocking, and clones
/// share that offset, so a test can hold one handle while the loop
/// under test holds another. Lives here rather than behind `cfg(test)`
/// because downstream crates drive their estimation tests with it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: std::sync::Arc<std::sync::Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: std::sync::Arc::new(std::sync::Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `d`.
    pub fn advance(&self, d: Duration) {
        if let Ok(mut off) = self.offset.lock() {
            *off = off.saturating_add(d);
        }
    }

    /// Jump to an absolute offset from the origin.
    pub fn set_offset(&self, d: Duration) {
        if let Ok(mut off) = self.offset.lock() {
            *off = d;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let off = self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO);
        self.origin + off
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}
