//! Sleep controller and port pull-ups

use avr_device::attiny1614::{PORTA, PORTB, PORTC, SLPCTRL};
use tinywatt_hal::{PullupControl, SleepController, SleepMode};

/// The sleep controller
pub struct Slpctrl {
    slpctrl: SLPCTRL,
}

impl Slpctrl {
    pub fn new(slpctrl: SLPCTRL) -> Self {
        Self { slpctrl }
    }
}

impl SleepController for Slpctrl {
    fn set_mode(&mut self, mode: SleepMode) {
        self.slpctrl.ctrla.modify(|_, w| match mode {
            SleepMode::Idle => w.smode().idle(),
            SleepMode::Standby => w.smode().stdby(),
            SleepMode::PowerDown => w.smode().pdown(),
        });
    }

    fn enable(&mut self) {
        self.slpctrl.ctrla.modify(|_, w| w.sen().set_bit());
    }

    fn sleep(&mut self) {
        avr_device::asm::sleep();
    }
}

/// Set PULLUPEN in each listed PINnCTRL, leaving input sense and inversion alone
macro_rules! enable_pullups {
    ($port:expr, $($pinctrl:ident),+) => {
        $( $port.$pinctrl.modify(|_, w| w.pullupen().set_bit()); )+
    };
}

/// Pull-up control over every port pin
pub struct Ports {
    porta: PORTA,
    portb: PORTB,
    portc: PORTC,
}

impl Ports {
    pub fn new(porta: PORTA, portb: PORTB, portc: PORTC) -> Self {
        Self {
            porta,
            portb,
            portc,
        }
    }
}

impl PullupControl for Ports {
    fn enable_all_pullups(&mut self) {
        enable_pullups!(
            self.porta, pin0ctrl, pin1ctrl, pin2ctrl, pin3ctrl, pin4ctrl, pin5ctrl, pin6ctrl,
            pin7ctrl
        );
        enable_pullups!(self.portb, pin0ctrl, pin1ctrl, pin2ctrl, pin3ctrl, pin4ctrl, pin5ctrl);
        enable_pullups!(self.portc, pin0ctrl, pin1ctrl, pin2ctrl, pin3ctrl);
    }
}
