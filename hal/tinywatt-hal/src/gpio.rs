//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. Bit-banged buses additionally need to switch a pin
//! between driving the line and releasing it to its pull-up, which is what
//! [`FlexPin`] adds.

/// Direction of a pin that can change roles at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Actively driven to the output latch level
    Output,
    /// Not driven, weakly pulled towards high
    InputPullUp,
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the output latch is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the output latch is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that can switch between driving and sensing the line
///
/// The output latch is kept while the pin is an input, so writing a level
/// before switching to [`PinDirection::Output`] decides what gets driven.
/// Direction and level changes are expected to take a few cycles and touch
/// nothing but this pin.
pub trait FlexPin: OutputPin + InputPin {
    /// Change the pin direction
    fn set_direction(&mut self, direction: PinDirection);

    /// Current pin direction
    fn direction(&self) -> PinDirection;

    /// Drive the line from the output latch
    fn set_output(&mut self) {
        self.set_direction(PinDirection::Output);
    }

    /// Release the line to its pull-up
    fn set_input_pullup(&mut self) {
        self.set_direction(PinDirection::InputPullUp);
    }
}
