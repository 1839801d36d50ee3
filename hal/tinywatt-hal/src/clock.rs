//! Time sources
//!
//! The millisecond counter is owned by the chip support (usually a timer
//! overflow interrupt); microsecond busy-waits use the `embedded-hal`
//! [`DelayNs`] trait.

pub use embedded_hal::delay::DelayNs;

/// Free-running millisecond counter
///
/// The counter wraps silently at `u32::MAX`. Consumers must compute elapsed
/// time with wrapping subtraction.
pub trait Millis {
    /// Milliseconds since start-up, modulo 2^32
    fn millis(&self) -> u32;
}

impl<T: Millis + ?Sized> Millis for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}
