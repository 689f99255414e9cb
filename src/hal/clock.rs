//! Monotonic Time and Busy Polling
//!
//! Busy-bit waits are bounded by elapsed time on an injected monotonic clock,
//! never by an iteration count, so a slow transport cannot stretch the bound
//! and a test clock can drive a timeout without sleeping.

use embedded_hal::delay::DelayNs;

use crate::driver::error::Result;

/// Monotonic microsecond clock with a blocking delay
///
/// `now_us` must never go backwards. The delay is used for the pause between
/// two busy-bit samples.
pub trait Clock: DelayNs {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&mut self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_us(&mut self) -> u64 {
        (**self).now_us()
    }
}

/// Outcome of a bounded busy poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollResult {
    /// The busy condition cleared
    Ready,
    /// The bound elapsed with the condition still set
    TimedOut,
}

/// Start time and bound of one wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start_us: u64,
    timeout_us: u64,
}

impl Deadline {
    /// Bound reached
    pub fn expired<C: Clock + ?Sized>(&self, clock: &mut C) -> bool {
        clock.now_us().saturating_sub(self.start_us) >= self.timeout_us
    }
}

/// Time-bounded busy poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusyPoll {
    timeout_us: u64,
    interval_us: u32,
}

impl BusyPoll {
    /// Poll for at most `timeout_ms`, pausing `interval_us` between samples
    pub const fn new(timeout_ms: u32, interval_us: u32) -> Self {
        Self {
            timeout_us: timeout_ms as u64 * 1_000,
            interval_us,
        }
    }

    /// Bound in microseconds
    pub const fn timeout_us(&self) -> u64 {
        self.timeout_us
    }

    /// Start the clock on a wait
    pub fn start<C: Clock + ?Sized>(&self, clock: &mut C) -> Deadline {
        Deadline {
            start_us: clock.now_us(),
            timeout_us: self.timeout_us,
        }
    }

    /// Pause between two samples
    pub fn pause<C: Clock + ?Sized>(&self, clock: &mut C) {
        clock.delay_us(self.interval_us);
    }

    /// Sample `busy` until it reports `false` or the bound elapses
    ///
    /// The condition is always sampled at least once, and once more after
    /// the bound is reached, so a wait that clears right at the deadline is
    /// not reported as a timeout. Errors from `busy` abort the poll.
    ///
    /// Callers whose sample itself needs the clock drive [`start`](Self::start)
    /// and [`pause`](Self::pause) directly in the same order.
    pub fn run<C, F>(&self, clock: &mut C, mut busy: F) -> Result<PollResult>
    where
        C: Clock + ?Sized,
        F: FnMut() -> Result<bool>,
    {
        let deadline = self.start(clock);

        loop {
            let expired = deadline.expired(clock);

            if !busy()? {
                return Ok(PollResult::Ready);
            }
            if expired {
                return Ok(PollResult::TimedOut);
            }

            self.pause(clock);
        }
    }
}
