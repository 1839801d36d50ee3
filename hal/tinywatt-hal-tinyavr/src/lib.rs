//! tinyAVR 0/1-series adapter for the Tinywatt HAL
//!
//! Implements the `tinywatt-hal` traits on the `avr-device` peripheral
//! access crate for the ATtiny1614 family:
//!
//! - [`gpio::PortPin`] - any PORTA/PORTB/PORTC pin as a [`tinywatt_hal::FlexPin`]
//! - [`rtc::Rtc`] - the RTC periodic interrupt timer
//! - [`adc::Adc0`] - ADC0 with the VREF reference selection
//! - [`power::Slpctrl`] and [`power::Ports`] - sleep controller and pull-ups
//! - [`clock`] - TCB0 millisecond counter and a cycle-counting delay
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Each handle takes ownership of its PAC peripheral out of
//! `avr_device::attiny1614::Peripherals` at start-up and is handed to
//! `tinywatt-core`.

#![no_std]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod power;
pub mod rtc;

pub use adc::Adc0;
pub use clock::{CycleDelay, SystemClock};
pub use gpio::{parse_pin_name, Port, PortPin};
pub use power::{Ports, Slpctrl};
pub use rtc::Rtc;
