//! Sleep and leakage control abstractions

/// CPU sleep mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepMode {
    /// CPU halted, peripherals running
    Idle,
    /// Selected peripherals keep running
    Standby,
    /// Deepest mode; only the RTC/PIT and pin-change logic stay alive
    PowerDown,
}

/// Sleep controller of the CPU
pub trait SleepController {
    /// Select the mode entered by [`SleepController::sleep`]
    fn set_mode(&mut self, mode: SleepMode);

    /// Arm the sleep-enable bit
    fn enable(&mut self);

    /// Execute one sleep instruction
    ///
    /// Returns once an interrupt has woken the CPU and its handler has run.
    fn sleep(&mut self);
}

/// Capability to put every general-purpose pin in its reduced-leakage state
///
/// Enabling all pull-ups is idempotent and has no teardown; pins stay
/// pulled up after wake.
pub trait PullupControl {
    /// Enable the pull-up of every general-purpose pin
    fn enable_all_pullups(&mut self);
}
