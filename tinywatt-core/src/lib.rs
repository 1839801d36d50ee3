//! Board-agnostic logic for Tinywatt low-power utilities
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Blocking and polled millisecond delays
//! - Bit-banged I2C master built on two flexible GPIO pins
//! - Low-power sleep manager driven by the periodic wake-up timer
//! - Supply voltage estimate through the internal voltage reference
//!
//! Hardware access goes through the traits in `tinywatt-hal`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod delay;
pub mod i2c;
pub mod sleep;
pub mod vdd;

pub use delay::Delay;
pub use i2c::{SoftI2c, SoftI2cError, I2C_DELAY_US};
pub use sleep::{on_wake, SleepManager};
pub use vdd::{read_vdd, VddError};
