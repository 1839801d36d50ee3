//! Supply voltage estimate
//!
//! Converts the fixed 1.5 V internal reference with Vdd as the ADC
//! reference. The lower Vdd is, the larger the reading:
//! `Vdd = 1.5 V * FULL_SCALE / reading`.

use tinywatt_hal::{Adc, AdcInput, InternalReference, Reference};

/// Internal reference measured against Vdd
const MEASURED_REFERENCE: InternalReference = InternalReference::V1_5;

/// Error from a supply voltage reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VddError {
    /// The converter returned zero, so the ratio is undefined
    ZeroReading,
}

/// Estimate Vdd in millivolts
///
/// The first conversion after switching references is discarded while the
/// reference settles. Values above `u16::MAX` saturate. A powered-down
/// converter is enabled for the reading and powered down again afterwards.
pub fn read_vdd_millivolts<A: Adc>(adc: &mut A) -> Result<u16, VddError> {
    let was_enabled = adc.is_enabled();
    if !was_enabled {
        adc.enable();
    }

    adc.set_reference(Reference::Vdd);
    adc.set_internal_reference(MEASURED_REFERENCE);

    let _ = adc.read(AdcInput::InternalReference);
    let reading = adc.read(AdcInput::InternalReference);

    if !was_enabled {
        adc.disable();
    }

    millivolts_from_reading(A::FULL_SCALE, reading)
}

/// Estimate Vdd in tenths of a volt (33 for 3.3 V)
pub fn read_vdd<A: Adc>(adc: &mut A) -> Result<u8, VddError> {
    let millivolts = read_vdd_millivolts(adc)?;
    Ok(u8::try_from(millivolts / 100).unwrap_or(u8::MAX))
}

fn millivolts_from_reading(full_scale: u16, reading: u16) -> Result<u16, VddError> {
    if reading == 0 {
        #[cfg(feature = "defmt")]
        defmt::warn!("vdd: zero ADC reading");
        return Err(VddError::ZeroReading);
    }

    let scaled = u32::from(full_scale) * u32::from(MEASURED_REFERENCE.millivolts());
    Ok(u16::try_from(scaled / u32::from(reading)).unwrap_or(u16::MAX))
}
