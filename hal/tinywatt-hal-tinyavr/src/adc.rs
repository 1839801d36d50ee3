//! ADC0 in 10-bit single conversion mode

use avr_device::attiny1614::{ADC0, VREF};
use tinywatt_hal::{Adc, AdcInput, InternalReference, Reference};

/// ADC0 and the VREF block feeding it
pub struct Adc0 {
    adc: ADC0,
    vref: VREF,
}

impl Adc0 {
    /// Take ADC0 and power it up
    ///
    /// CLK_PER/16 keeps the ADC clock within 50 kHz..1.5 MHz for every
    /// CPU clock up to 20 MHz. The reduced sampling capacitance suits
    /// references above 1 V, which covers both the supply and the 1.5 V
    /// reading.
    pub fn new(adc: ADC0, vref: VREF) -> Self {
        adc.ctrlc
            .write(|w| w.presc().div16().refsel().vddref().sampcap().set_bit());
        adc.ctrla.write(|w| w.enable().set_bit());
        Self { adc, vref }
    }

    /// Release the peripherals
    pub fn free(self) -> (ADC0, VREF) {
        (self.adc, self.vref)
    }
}

impl Adc for Adc0 {
    const FULL_SCALE: u16 = 1023;

    fn enable(&mut self) {
        self.adc.ctrla.modify(|_, w| w.enable().set_bit());
    }

    fn disable(&mut self) {
        self.adc.ctrla.modify(|_, w| w.enable().clear_bit());
    }

    fn is_enabled(&self) -> bool {
        self.adc.ctrla.read().enable().bit_is_set()
    }

    fn set_reference(&mut self, reference: Reference) {
        self.adc.ctrlc.modify(|_, w| match reference {
            Reference::Internal => w.refsel().intref(),
            Reference::Vdd => w.refsel().vddref(),
        });
    }

    fn set_internal_reference(&mut self, level: InternalReference) {
        self.vref.ctrla.modify(|_, w| {
            let refsel = w.adc0refsel();
            match level {
                InternalReference::V0_55 => refsel._0v55(),
                InternalReference::V1_1 => refsel._1v1(),
                InternalReference::V1_5 => refsel._1v5(),
                InternalReference::V2_5 => refsel._2v5(),
                InternalReference::V4_3 => refsel._4v34(),
            }
        });
    }

    /// Blocks until the conversion completes; the converter must be enabled
    fn read(&mut self, input: AdcInput) -> u16 {
        self.adc.muxpos.write(|w| match input {
            // AIN0..AIN11
            AdcInput::Channel(ain) => unsafe { w.muxpos().bits(ain & 0x1F) },
            AdcInput::InternalReference => w.muxpos().intref(),
            AdcInput::Temperature => w.muxpos().tempsense(),
            AdcInput::Ground => w.muxpos().gnd(),
        });
        self.adc.command.write(|w| w.stconv().set_bit());
        while self.adc.intflags.read().resrdy().bit_is_clear() {}

        // Reading RES clears RESRDY
        self.adc.res.read().bits()
    }
}
