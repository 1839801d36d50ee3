//! Millisecond delays
//!
//! Two independent timers share one clock: a blocking delay that spins until
//! the time has passed, and a polled delay that callers check from their own
//! loop. Elapsed time is always `now.wrapping_sub(stamp)`, so both keep
//! working when the millisecond counter wraps.

use tinywatt_hal::Millis;

/// Delay service over a millisecond clock
pub struct Delay<C> {
    clock: C,
    /// Time of the last blocking delay start
    blocking_since: u32,
    /// Time the polled delay last fired
    poll_since: u32,
}

impl<C: Millis> Delay<C> {
    /// Create a delay service with both timestamps at zero
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            blocking_since: 0,
            poll_since: 0,
        }
    }

    /// Busy-wait for `duration_ms` milliseconds
    pub fn delay_ms(&mut self, duration_ms: u32) {
        self.blocking_since = self.clock.millis();
        while self.clock.millis().wrapping_sub(self.blocking_since) < duration_ms {}
    }

    /// Check whether more than `duration_ms` milliseconds passed since the
    /// last time this returned `true`
    ///
    /// Restarts the window when it fires. A zero duration never fires on the
    /// same tick it was armed.
    pub fn poll(&mut self, duration_ms: u32) -> bool {
        let now = self.clock.millis();
        if now.wrapping_sub(self.poll_since) > duration_ms {
            self.poll_since = now;
            true
        } else {
            false
        }
    }

    /// Restart the polled window from the current time
    pub fn reset_poll(&mut self) {
        self.poll_since = self.clock.millis();
    }

    /// Underlying millisecond clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Release the clock
    pub fn free(self) -> C {
        self.clock
    }
}
