//! Periodic wake-up timer abstractions
//!
//! The real-time counter of tinyAVR parts has a periodic interrupt timer
//! (PIT) that keeps running in power-down sleep and is the only thing that
//! wakes the CPU again. The period is a power-of-two number of cycles of the
//! 1.024 kHz internal oscillator.

/// Clock source of the real-time counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcClock {
    /// Internal 32.768 kHz oscillator
    Internal32k,
    /// Internal 32.768 kHz oscillator divided by 32 (1.024 kHz)
    Internal1k,
    /// External 32.768 kHz crystal
    Crystal32k,
    /// External clock input
    External,
}

/// Period of the wake-up interrupt
///
/// Discriminants are the raw selection index used by callers that pass
/// plain numbers; anything past [`SleepInterval::S32`] is clamped to
/// [`SleepInterval::S1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SleepInterval {
    /// 4 RTC cycles, ~4 ms
    Ms4 = 0,
    /// ~8 ms
    Ms8 = 1,
    /// ~16 ms
    Ms16 = 2,
    /// ~31 ms
    Ms31 = 3,
    /// ~62 ms
    Ms62 = 4,
    /// ~125 ms
    Ms125 = 5,
    /// ~250 ms
    Ms250 = 6,
    /// 512 cycles, ~500 ms
    Ms500 = 7,
    /// 1024 cycles, 1 s
    #[default]
    S1 = 8,
    /// 2 s
    S2 = 9,
    /// 4 s
    S4 = 10,
    /// 8 s
    S8 = 11,
    /// 16 s
    S16 = 12,
    /// 32768 cycles, 32 s
    S32 = 13,
}

impl SleepInterval {
    /// Longest supported interval
    pub const MAX: Self = Self::S32;

    /// Select an interval by raw index, clamping out-of-range values to 1 s
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Ms4,
            1 => Self::Ms8,
            2 => Self::Ms16,
            3 => Self::Ms31,
            4 => Self::Ms62,
            5 => Self::Ms125,
            6 => Self::Ms250,
            7 => Self::Ms500,
            9 => Self::S2,
            10 => Self::S4,
            11 => Self::S8,
            12 => Self::S16,
            13 => Self::S32,
            _ => Self::S1,
        }
    }

    /// Raw selection index
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Value of the PIT period field (`CYC4` is 1, `CYC32768` is 14)
    pub const fn period_field(self) -> u8 {
        self as u8 + 1
    }

    /// Number of 1.024 kHz RTC cycles per interrupt
    pub const fn rtc_cycles(self) -> u32 {
        4 << (self as u32)
    }

    /// Approximate period in milliseconds
    pub const fn approx_ms(self) -> u32 {
        // 1024 cycles per second
        self.rtc_cycles() * 1000 / 1024
    }
}

impl From<u8> for SleepInterval {
    fn from(index: u8) -> Self {
        Self::from_index(index)
    }
}

/// Periodic interrupt timer
///
/// Implementations wrap the RTC/PIT registers of the specific chip. The
/// interrupt handler of the timer must call [`PeriodicTimer::clear_interrupt`]
/// and nothing else.
pub trait PeriodicTimer {
    /// Select the counter clock source
    fn select_clock(&mut self, clock: RtcClock);

    /// Whether any timer register is still synchronizing to the RTC clock domain
    fn is_syncing(&self) -> bool;

    /// Enable the periodic interrupt
    fn enable_interrupt(&mut self);

    /// Program the period and enable the periodic timer
    fn start(&mut self, interval: SleepInterval);

    /// Acknowledge a pending periodic interrupt
    fn clear_interrupt(&mut self);

    /// Whether a periodic interrupt is pending
    fn is_pending(&self) -> bool;
}
