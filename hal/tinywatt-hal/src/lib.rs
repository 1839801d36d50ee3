//! Tinywatt Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (tinyAVR 0/1-series, host fakes, etc.). The board
//! agnostic logic in `tinywatt-core` only ever talks to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / tinywatt-core            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tinywatt-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ tinywatt-hal- │
//!             │    tinyavr    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`clock::Millis`] - Free-running millisecond counter
//! - [`rtc::PeriodicTimer`] - Periodic wake-up interrupt timer
//! - [`adc::Adc`] - Analog-to-digital converter
//! - [`power::SleepController`], [`power::PullupControl`] - Sleep and leakage control
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod power;
pub mod rtc;

// Re-export key traits at crate root for convenience
pub use adc::{Adc, AdcInput, InternalReference, Reference};
pub use clock::{DelayNs, Millis};
pub use gpio::{FlexPin, InputPin, OutputPin, PinDirection};
pub use i2c::I2cBus;
pub use power::{PullupControl, SleepController, SleepMode};
pub use rtc::{PeriodicTimer, RtcClock, SleepInterval};
