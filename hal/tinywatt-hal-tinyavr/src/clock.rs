//! Millisecond counter and busy-wait delay
//!
//! TCB0 runs in periodic interrupt mode at 1 kHz. Its interrupt handler
//! calls [`on_tick`]:
//!
//! ```ignore
//! #[avr_device::interrupt(attiny1614)]
//! fn TCB0_INT() {
//!     tinywatt_hal_tinyavr::clock::on_tick();
//! }
//! ```

use avr_device::attiny1614::TCB0;
use portable_atomic::{AtomicU32, Ordering};
use tinywatt_hal::{DelayNs, Millis};

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// TCB0 interrupt handler body: acknowledge and count one millisecond
pub fn on_tick() {
    // Only the write-one-to-clear flag register is touched
    let tcb = unsafe { &*TCB0::ptr() };
    tcb.intflags.write(|w| w.capt().set_bit());
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

/// TCB0 compare value for a 1 ms period at `f_cpu` with the /2 prescaler
pub const fn tick_top(f_cpu: u32) -> u16 {
    let top = f_cpu / 2 / 1000;
    if top == 0 {
        0
    } else if top > u16::MAX as u32 + 1 {
        u16::MAX
    } else {
        (top - 1) as u16
    }
}

/// Millisecond clock driven by TCB0
pub struct SystemClock {
    tcb: TCB0,
}

impl SystemClock {
    /// Start TCB0 as a 1 kHz periodic interrupt
    ///
    /// Interrupts must be enabled globally for the counter to advance.
    pub fn start(tcb: TCB0, f_cpu: u32) -> Self {
        let top = tick_top(f_cpu);

        tcb.ctrla.write(|w| w.enable().clear_bit());
        tcb.ctrlb.write(|w| w.cntmode().int());
        tcb.ccmp.write(|w| unsafe { w.bits(top) });
        tcb.intctrl.write(|w| w.capt().set_bit());
        tcb.ctrla.write(|w| w.clksel().clkdiv2().enable().set_bit());

        Self { tcb }
    }

    /// Stop the counter and release the timer
    pub fn free(self) -> TCB0 {
        self.tcb.intctrl.write(|w| w.capt().clear_bit());
        self.tcb.ctrla.write(|w| w.enable().clear_bit());
        self.tcb
    }
}

impl Millis for SystemClock {
    fn millis(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}

/// Calibrated `nop` busy-wait for a CPU clock of `F_CPU` Hz
///
/// Interrupts lengthen the delay, never shorten it. Everything is scaled at
/// compile time; the loops only count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDelay<const F_CPU: u32>;

impl<const F_CPU: u32> CycleDelay<F_CPU> {
    /// Approximate cycles spent per inner loop iteration
    const CYCLES_PER_ITERATION: u32 = 4;

    /// Inner loop iterations per microsecond
    const ITERATIONS_PER_US: u32 = F_CPU / 1_000_000 / Self::CYCLES_PER_ITERATION;

    pub const fn new() -> Self {
        Self
    }
}

impl<const F_CPU: u32> DelayNs for CycleDelay<F_CPU> {
    /// Rounded up to whole microseconds
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            for _ in 0..Self::ITERATIONS_PER_US {
                avr_device::asm::nop();
            }
        }
    }
}
