//! Analog-to-digital converter abstractions
//!
//! Only what the board-agnostic code needs: power gating around sleep and a
//! blocking single conversion against a selectable reference.

/// ADC conversion reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// Supply voltage
    Vdd,
    /// Internal voltage reference (see [`InternalReference`])
    Internal,
}

/// Level of the internal voltage reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InternalReference {
    /// 0.55 V
    V0_55,
    /// 1.1 V
    V1_1,
    /// 1.5 V
    V1_5,
    /// 2.5 V
    V2_5,
    /// 4.3 V
    V4_3,
}

impl InternalReference {
    /// Nominal level in millivolts
    pub const fn millivolts(self) -> u16 {
        match self {
            InternalReference::V0_55 => 550,
            InternalReference::V1_1 => 1100,
            InternalReference::V1_5 => 1500,
            InternalReference::V2_5 => 2500,
            InternalReference::V4_3 => 4300,
        }
    }
}

/// ADC input multiplexer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcInput {
    /// External analog channel by number
    Channel(u8),
    /// The internal voltage reference
    InternalReference,
    /// On-die temperature sensor
    Temperature,
    /// Ground
    Ground,
}

/// Analog-to-digital converter
pub trait Adc {
    /// Highest raw value a conversion can return (1023 for 10-bit converters)
    const FULL_SCALE: u16;

    /// Power up the converter
    fn enable(&mut self);

    /// Power down the converter
    fn disable(&mut self);

    /// Whether the converter is powered
    fn is_enabled(&self) -> bool;

    /// Select the conversion reference
    fn set_reference(&mut self, reference: Reference);

    /// Select the level of the internal voltage reference
    fn set_internal_reference(&mut self, level: InternalReference);

    /// Run one conversion and block until the result is available
    fn read(&mut self, input: AdcInput) -> u16;
}
