//! Bit-banged I2C master
//!
//! The master drives SCL at all times and switches SDA between driving the
//! line and releasing it to the pull-up whenever a slave may pull it low.
//! Bus timing comes purely from [`DelayNs`] busy-waits, so every byte-level
//! operation runs inside a critical section; an interrupt in the middle of a
//! bit would stretch the waveform.
//!
//! Byte-level operations keep no state between calls. The caller sequences
//! `start()`, `write_byte()`/`read_byte()` and `stop()`, or uses the
//! address-level helpers (`probe`, `scan`, the `I2cBus` trait and
//! `embedded_hal::i2c::I2c`).

mod bus;
#[cfg(test)]
mod sim;

pub use bus::SoftI2cError;

use tinywatt_hal::{DelayNs, FlexPin};

/// Default bit delay in microseconds (a few hundred kHz SCL)
pub const I2C_DELAY_US: u32 = 3;

/// Software I2C master on two GPIO pins
///
/// `DELAY_US` is the settle time after a clock edge and the single knob that
/// sets the bus speed.
pub struct SoftI2c<SCL, SDA, D, const DELAY_US: u32 = I2C_DELAY_US> {
    scl: SCL,
    sda: SDA,
    delay: D,
}

impl<SCL, SDA, D> SoftI2c<SCL, SDA, D, I2C_DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    /// Create a master with the default bit delay and idle the bus
    pub fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        Self::with_bit_delay(scl, sda, delay)
    }
}

impl<SCL, SDA, D, const DELAY_US: u32> SoftI2c<SCL, SDA, D, DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    /// Create a master with a custom bit delay and idle the bus
    ///
    /// Both latches go high first so neither line glitches low when it
    /// starts being driven. SDA is left released, SCL driven high.
    pub fn with_bit_delay(mut scl: SCL, mut sda: SDA, delay: D) -> Self {
        scl.set_high();
        sda.set_high();
        sda.set_input_pullup();
        scl.set_output();

        Self { scl, sda, delay }
    }

    /// Issue a start (or repeated start) condition
    pub fn start(&mut self) {
        self.drive_start();
    }

    /// Issue a stop condition, leaving both lines high
    pub fn stop(&mut self) {
        self.drive_stop();
    }

    /// Clock out one byte MSB first and sample the acknowledgment
    ///
    /// Returns `true` if the slave pulled SDA low in the ninth clock.
    pub fn write_byte(&mut self, data: u8) -> bool {
        critical_section::with(|_| self.shift_out(data))
    }

    /// Clock in one byte MSB first
    ///
    /// With `ack` the master pulls SDA low in the ninth clock to ask for
    /// another byte; without it SDA stays high to end the read.
    pub fn read_byte(&mut self, ack: bool) -> u8 {
        critical_section::with(|_| self.shift_in(ack))
    }

    /// Release the pins and the delay provider
    pub fn free(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    fn shift_out(&mut self, mut data: u8) -> bool {
        self.sda.set_output();

        for _ in 0..7 {
            self.sda.set_state(data & 0x80 != 0);
            data <<= 1;
            self.pulse_clock();
        }

        if data & 0x80 != 0 {
            // Release before the edge: the slave pulls low for the ACK right
            // after the falling edge and must not fight a driven high.
            self.sda.set_high();
            self.sda.set_input_pullup();
            self.clock_high();
            self.clock_low();
        } else {
            self.sda.set_low();
            self.pulse_clock();
            self.sda.set_input_pullup();
        }

        self.scl.set_high();
        let ack = self.sda.is_low();
        self.bit_delay();
        self.scl.set_low();

        ack
    }

    fn shift_in(&mut self, ack: bool) -> u8 {
        let mut data = 0u8;
        let mut mask = 0x80u8;

        while mask != 0 {
            self.bit_delay();
            self.scl.set_high();
            if self.sda.is_high() {
                data |= mask;
            }
            self.bit_delay();
            self.scl.set_low();
            mask >>= 1;
        }

        if ack {
            self.sda.set_low();
            self.sda.set_output();
            self.pulse_clock();
            self.sda.set_input_pullup();
        } else {
            self.pulse_clock();
        }

        data
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(DELAY_US);
    }

    fn clock_high(&mut self) {
        self.scl.set_high();
        self.bit_delay();
    }

    fn clock_low(&mut self) {
        self.scl.set_low();
        self.bit_delay();
    }

    /// One full clock: settle, high, settle, low
    fn pulse_clock(&mut self) {
        self.bit_delay();
        self.scl.set_high();
        self.bit_delay();
        self.scl.set_low();
    }

    /// SDA falls while SCL is high
    fn drive_start(&mut self) {
        self.scl.set_high();
        self.sda.set_output();
        self.sda.set_low();
        self.bit_delay();
        self.scl.set_low();
    }

    /// SDA rises while SCL is high
    fn drive_stop(&mut self) {
        self.sda.set_output();
        self.sda.set_low();
        self.bit_delay();
        self.clock_high();
        self.sda.set_high();
    }
}
