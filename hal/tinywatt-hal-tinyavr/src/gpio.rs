//! GPIO pins for tinyAVR 0/1-series
//!
//! Each pin is driven through the port's SET/CLR strobe registers, so a
//! level or direction change never disturbs other pins on the same port.

use avr_device::attiny1614::{PORTA, PORTB, PORTC};
use tinywatt_hal::{FlexPin, InputPin, OutputPin, PinDirection};

/// I/O port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    /// Number of bonded pins on the largest package
    pub const fn pin_count(self) -> u8 {
        match self {
            Port::A => 8,
            Port::B => 6,
            Port::C => 4,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Port::A),
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            _ => None,
        }
    }
}

/// Run `$body` with `$p` bound to the register block of `$port`
macro_rules! with_port {
    ($port:expr, |$p:ident| $body:expr) => {
        match $port {
            Port::A => {
                let $p = unsafe { &*PORTA::ptr() };
                $body
            }
            Port::B => {
                let $p = unsafe { &*PORTB::ptr() };
                $body
            }
            Port::C => {
                let $p = unsafe { &*PORTC::ptr() };
                $body
            }
        }
    };
}

/// Parse a pin name such as `"PA3"` or `"PB0"`
///
/// Returns `None` for unknown ports and for pins the port does not have.
pub fn parse_pin_name(s: &str) -> Option<(Port, u8)> {
    let s = s.trim();
    let rest = s.strip_prefix('P')?;

    let mut chars = rest.chars();
    let port = Port::from_letter(chars.next()?)?;
    let pin: u8 = chars.as_str().parse().ok()?;
    if pin >= port.pin_count() {
        return None;
    }

    Some((port, pin))
}

/// A single port pin with switchable direction
#[derive(Debug)]
pub struct PortPin {
    port: Port,
    pin: u8,
}

impl PortPin {
    /// Take a pin, `None` if the port has no such pin
    ///
    /// The caller must not create two handles for the same pin. Handles
    /// for different pins of one port are independent.
    pub fn new(port: Port, pin: u8) -> Option<Self> {
        (pin < port.pin_count()).then_some(Self { port, pin })
    }

    /// Take a pin by name, see [`parse_pin_name`]
    pub fn from_name(name: &str) -> Option<Self> {
        let (port, pin) = parse_pin_name(name)?;
        Self::new(port, pin)
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    fn mask(&self) -> u8 {
        1 << self.pin
    }

    fn enable_pullup(&self) {
        let pin = self.pin;
        with_port!(self.port, |p| match pin {
            0 => p.pin0ctrl.modify(|_, w| w.pullupen().set_bit()),
            1 => p.pin1ctrl.modify(|_, w| w.pullupen().set_bit()),
            2 => p.pin2ctrl.modify(|_, w| w.pullupen().set_bit()),
            3 => p.pin3ctrl.modify(|_, w| w.pullupen().set_bit()),
            4 => p.pin4ctrl.modify(|_, w| w.pullupen().set_bit()),
            5 => p.pin5ctrl.modify(|_, w| w.pullupen().set_bit()),
            6 => p.pin6ctrl.modify(|_, w| w.pullupen().set_bit()),
            7 => p.pin7ctrl.modify(|_, w| w.pullupen().set_bit()),
            _ => {}
        });
    }
}

impl OutputPin for PortPin {
    fn set_high(&mut self) {
        let mask = self.mask();
        with_port!(self.port, |p| p.outset.write(|w| unsafe { w.bits(mask) }));
    }

    fn set_low(&mut self) {
        let mask = self.mask();
        with_port!(self.port, |p| p.outclr.write(|w| unsafe { w.bits(mask) }));
    }

    fn toggle(&mut self) {
        let mask = self.mask();
        with_port!(self.port, |p| p.outtgl.write(|w| unsafe { w.bits(mask) }));
    }

    fn is_set_high(&self) -> bool {
        let out = with_port!(self.port, |p| p.out.read().bits());
        out & self.mask() != 0
    }
}

impl InputPin for PortPin {
    fn is_high(&self) -> bool {
        let levels = with_port!(self.port, |p| p.in_.read().bits());
        levels & self.mask() != 0
    }
}

impl FlexPin for PortPin {
    fn set_direction(&mut self, direction: PinDirection) {
        let mask = self.mask();
        match direction {
            PinDirection::Output => {
                with_port!(self.port, |p| p.dirset.write(|w| unsafe { w.bits(mask) }));
            }
            PinDirection::InputPullUp => {
                with_port!(self.port, |p| p.dirclr.write(|w| unsafe { w.bits(mask) }));
                self.enable_pullup();
            }
        }
    }

    fn direction(&self) -> PinDirection {
        let dir = with_port!(self.port, |p| p.dir.read().bits());
        if dir & self.mask() != 0 {
            PinDirection::Output
        } else {
            PinDirection::InputPullUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_name() {
        assert_eq!(parse_pin_name("PA0"), Some((Port::A, 0)));
        assert_eq!(parse_pin_name(" PB5 "), Some((Port::B, 5)));
        assert_eq!(parse_pin_name("PC3"), Some((Port::C, 3)));
    }

    #[test]
    fn test_parse_pin_name_rejects_missing_pins() {
        assert_eq!(parse_pin_name("PA8"), None);
        assert_eq!(parse_pin_name("PB6"), None);
        assert_eq!(parse_pin_name("PC4"), None);
        assert_eq!(parse_pin_name("PD0"), None);
        assert_eq!(parse_pin_name("A0"), None);
        assert_eq!(parse_pin_name("P"), None);
        assert_eq!(parse_pin_name("PA"), None);
    }

    #[test]
    fn test_new_checks_pin_count() {
        assert!(PortPin::new(Port::A, 7).is_some());
        assert!(PortPin::new(Port::C, 4).is_none());
        assert_eq!(PortPin::from_name("PB2").map(|p| p.pin()), Some(2));
    }
}
