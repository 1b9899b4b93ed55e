use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use std::{thread, time::{Duration, Instant}};
use crate::constants::{CANCEL_POLL_MS, DEFAULT_INTERVAL_MS, DEFAULT_REPEAT};

/// How often a command is repeated on the bus and how long to wait between sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitPolicy {
    repeat: u32,
    interval: Duration,
}

impl Default for TransmitPolicy {
    /// 20000 sends, 1ms apart.
    fn default() -> Self {
        Self {
            repeat: DEFAULT_REPEAT,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl TransmitPolicy {
    #[inline]
    pub const fn new(repeat: u32, interval: Duration) -> Self {
        Self { repeat, interval }
    }

    #[inline]
    pub const fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[inline]
    pub const fn repeat(&self) -> u32 {
        self.repeat
    }

    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

/// Shared flag that stops a running hold before its next send.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sleep for `duration`, waking early once cancelled.
    ///
    /// Returns whether the token is cancelled.
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let poll = Duration::from_millis(CANCEL_POLL_MS);
        while !self.is_cancelled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            thread::sleep(remaining.min(poll));
        }
        self.is_cancelled()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoldReport {
    /// Frames accepted by the bus.
    pub sent: u32,
    pub cancelled: bool,
}
