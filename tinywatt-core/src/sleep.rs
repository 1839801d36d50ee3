//! Low-power sleep manager
//!
//! The periodic interrupt timer runs from the 1.024 kHz internal oscillator
//! and is the only wake-up source. Its interrupt handler must call
//! [`on_wake`]; it carries no data back to the code that went to sleep.
//!
//! ```ignore
//! #[avr_device::interrupt(attiny1614)]
//! fn RTC_PIT() {
//!     tinywatt_core::on_wake(&mut unsafe { Rtc::steal() });
//! }
//! ```

use tinywatt_hal::{
    Adc, PeriodicTimer, PullupControl, RtcClock, SleepController, SleepInterval, SleepMode,
};

/// Wake-up interrupt handler body: acknowledge the periodic interrupt
pub fn on_wake<T: PeriodicTimer>(timer: &mut T) {
    timer.clear_interrupt();
}

/// Sleep manager owning the peripherals involved in a sleep cycle
pub struct SleepManager<T, A, S, P> {
    timer: T,
    adc: A,
    sleep: S,
    pullups: P,
    interval: Option<SleepInterval>,
}

impl<T, A, S, P> SleepManager<T, A, S, P>
where
    T: PeriodicTimer,
    A: Adc,
    S: SleepController,
    P: PullupControl,
{
    /// Create an unconfigured sleep manager
    ///
    /// [`SleepManager::configure`] must run before the first
    /// [`SleepManager::sleep`], otherwise nothing wakes the CPU.
    pub fn new(timer: T, adc: A, sleep: S, pullups: P) -> Self {
        Self {
            timer,
            adc,
            sleep,
            pullups,
            interval: None,
        }
    }

    /// Program the wake-up period and prepare the chip for power-down sleep
    ///
    /// Calling this again only changes the period; pull-ups stay enabled.
    pub fn configure(&mut self, interval: SleepInterval) {
        self.timer.select_clock(RtcClock::Internal1k);
        while self.timer.is_syncing() {}
        self.timer.enable_interrupt();
        self.timer.start(interval);

        self.pullups.enable_all_pullups();
        self.sleep.enable();
        self.interval = Some(interval);

        #[cfg(feature = "defmt")]
        defmt::debug!("sleep: PIT period {} (~{} ms)", interval, interval.approx_ms());
    }

    /// Configure from a raw interval index, out-of-range values select 1 s
    pub fn configure_raw(&mut self, index: u8) {
        self.configure(SleepInterval::from_index(index));
    }

    /// Interval programmed by the last [`SleepManager::configure`]
    pub fn interval(&self) -> Option<SleepInterval> {
        self.interval
    }

    /// Sleep for `cycles` wake-up periods in power-down mode
    ///
    /// The ADC is powered off for the whole call. Zero cycles sleeps once.
    pub fn sleep(&mut self, cycles: u8) {
        self.adc.disable();
        self.sleep.set_mode(SleepMode::PowerDown);

        for _ in 0..cycles.max(1) {
            self.sleep.sleep();
        }

        self.adc.enable();
    }

    /// Access the ADC between sleep cycles
    pub fn adc(&mut self) -> &mut A {
        &mut self.adc
    }

    /// Access the periodic timer
    pub fn timer(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Release the owned peripherals
    pub fn free(self) -> (T, A, S, P) {
        (self.timer, self.adc, self.sleep, self.pullups)
    }
}
