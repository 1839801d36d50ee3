//! RTC periodic interrupt timer

use avr_device::attiny1614::{Peripherals, RTC};
use tinywatt_hal::{PeriodicTimer, RtcClock, SleepInterval};

/// The RTC block, used only for its periodic interrupt timer
pub struct Rtc {
    rtc: RTC,
}

impl Rtc {
    pub fn new(rtc: RTC) -> Self {
        Self { rtc }
    }

    /// Handle for use inside the `RTC_PIT` interrupt
    ///
    /// # Safety
    ///
    /// Aliases the RTC owned by the main-line [`Rtc`]. Only
    /// [`PeriodicTimer::clear_interrupt`] and [`PeriodicTimer::is_pending`]
    /// may be used through it; both touch only the write-one-to-clear
    /// PITINTFLAGS register.
    pub unsafe fn steal() -> Self {
        Self {
            rtc: Peripherals::steal().RTC,
        }
    }

    /// Release the peripheral
    pub fn free(self) -> RTC {
        self.rtc
    }
}

impl PeriodicTimer for Rtc {
    fn select_clock(&mut self, clock: RtcClock) {
        self.rtc.clksel.write(|w| match clock {
            RtcClock::Internal32k => w.clksel().int32k(),
            RtcClock::Internal1k => w.clksel().int1k(),
            RtcClock::Crystal32k => w.clksel().tosc32k(),
            RtcClock::External => w.clksel().extclk(),
        });
    }

    fn is_syncing(&self) -> bool {
        self.rtc.status.read().bits() != 0 || self.rtc.pitstatus.read().ctrlbusy().bit_is_set()
    }

    fn enable_interrupt(&mut self) {
        self.rtc.pitintctrl.write(|w| w.pi().set_bit());
    }

    fn start(&mut self, interval: SleepInterval) {
        self.rtc.pitctrla.write(|w| {
            let period = w.period();
            match interval {
                SleepInterval::Ms4 => period.cyc4(),
                SleepInterval::Ms8 => period.cyc8(),
                SleepInterval::Ms16 => period.cyc16(),
                SleepInterval::Ms31 => period.cyc32(),
                SleepInterval::Ms62 => period.cyc64(),
                SleepInterval::Ms125 => period.cyc128(),
                SleepInterval::Ms250 => period.cyc256(),
                SleepInterval::Ms500 => period.cyc512(),
                SleepInterval::S1 => period.cyc1024(),
                SleepInterval::S2 => period.cyc2048(),
                SleepInterval::S4 => period.cyc4096(),
                SleepInterval::S8 => period.cyc8192(),
                SleepInterval::S16 => period.cyc16384(),
                SleepInterval::S32 => period.cyc32768(),
            }
            .piten()
            .set_bit()
        });
    }

    fn clear_interrupt(&mut self) {
        // Write-one-to-clear
        self.rtc.pitintflags.write(|w| w.pi().set_bit());
    }

    fn is_pending(&self) -> bool {
        self.rtc.pitintflags.read().pi().bit_is_set()
    }
}
