//! Simulated open-drain bus for host tests
//!
//! Every pin operation and delay is recorded together with the resulting
//! line levels. A line is low when anyone drives it low: the master through
//! its pin, a scripted pattern indexed by clock pulse, or an attached
//! [`Device`] that decodes the waveform like a real slave.

use core::cell::RefCell;

use tinywatt_hal::{DelayNs, FlexPin, InputPin, OutputPin, PinDirection};

use super::SoftI2c;

pub type SimI2c<'a> = SoftI2c<SimPin<'a>, SimPin<'a>, SimDelay<'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Scl,
    Sda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Level(Line, bool),
    Drive(Line),
    Release(Line),
    Sample(Line),
    Delay(u32),
}

/// Bus state after one recorded operation
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub op: Op,
    pub scl: bool,
    pub sda: bool,
    pub sda_driven: bool,
    pub scl_rose: bool,
    pub sda_fell: bool,
    pub sda_rose: bool,
}

#[derive(Debug, Clone, Copy)]
struct PinState {
    latch: bool,
    direction: PinDirection,
}

impl PinState {
    fn driven(&self) -> bool {
        self.direction == PinDirection::Output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceState {
    Idle,
    Address,
    AddressAck { read: bool },
    WriteData,
    WriteAck,
    ReadData,
    ReadAck,
    Ignored,
}

/// Slave that decodes start, stop, address and data from the waveform
#[derive(Debug)]
pub struct Device {
    address: u8,
    state: DeviceState,
    shift: u8,
    bits: u8,
    drive_low: bool,
    tx: u8,
    transmit: Vec<u8>,
    sent: usize,
    nack_after: Option<usize>,
    master_ack: bool,
    pub received: Vec<u8>,
    pub master_acks: Vec<bool>,
    pub starts: usize,
    pub stops: usize,
}

impl Device {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            state: DeviceState::Idle,
            shift: 0,
            bits: 0,
            drive_low: false,
            tx: 0xFF,
            transmit: Vec::new(),
            sent: 0,
            nack_after: None,
            master_ack: false,
            received: Vec::new(),
            master_acks: Vec::new(),
            starts: 0,
            stops: 0,
        }
    }

    /// Bytes returned to the master on reads, then 0xFF
    pub fn with_transmit(mut self, data: &[u8]) -> Self {
        self.transmit = data.to_vec();
        self
    }

    /// Acknowledge only the first `count` data bytes of a write
    pub fn nack_after(mut self, count: usize) -> Self {
        self.nack_after = Some(count);
        self
    }

    fn on_start(&mut self) {
        self.starts += 1;
        self.state = DeviceState::Address;
        self.shift = 0;
        self.bits = 0;
        self.drive_low = false;
    }

    fn on_stop(&mut self) {
        self.stops += 1;
        self.state = DeviceState::Idle;
        self.drive_low = false;
    }

    fn on_rising(&mut self, sda: bool) {
        match self.state {
            DeviceState::Address | DeviceState::WriteData => {
                self.shift = (self.shift << 1) | sda as u8;
                self.bits += 1;
            }
            DeviceState::ReadAck => {
                self.master_ack = !sda;
                self.master_acks.push(self.master_ack);
            }
            _ => {}
        }
    }

    fn on_falling(&mut self) {
        match self.state {
            DeviceState::Address if self.bits == 8 => {
                if self.shift >> 1 == self.address {
                    self.drive_low = true;
                    self.state = DeviceState::AddressAck {
                        read: self.shift & 1 != 0,
                    };
                } else {
                    self.drive_low = false;
                    self.state = DeviceState::Ignored;
                }
            }
            DeviceState::AddressAck { read: true } => self.load_next(),
            DeviceState::AddressAck { read: false } | DeviceState::WriteAck => {
                self.state = DeviceState::WriteData;
                self.shift = 0;
                self.bits = 0;
                self.drive_low = false;
            }
            DeviceState::WriteData if self.bits == 8 => {
                self.received.push(self.shift);
                self.drive_low = self
                    .nack_after
                    .map_or(true, |count| self.received.len() <= count);
                self.state = DeviceState::WriteAck;
            }
            DeviceState::ReadData => {
                self.bits += 1;
                if self.bits == 8 {
                    self.drive_low = false;
                    self.state = DeviceState::ReadAck;
                } else {
                    self.present_bit();
                }
            }
            DeviceState::ReadAck => {
                if self.master_ack {
                    self.load_next();
                } else {
                    self.drive_low = false;
                    self.state = DeviceState::Ignored;
                }
            }
            _ => {}
        }
    }

    fn load_next(&mut self) {
        self.tx = self.transmit.get(self.sent).copied().unwrap_or(0xFF);
        self.sent += 1;
        self.bits = 0;
        self.state = DeviceState::ReadData;
        self.present_bit();
    }

    fn present_bit(&mut self) {
        self.drive_low = self.tx & (0x80 >> self.bits) == 0;
    }
}

struct State {
    scl: PinState,
    sda: PinState,
    edges: usize,
    pattern_low: Vec<usize>,
    device: Option<Device>,
    trace: Vec<Step>,
}

impl State {
    fn pin_mut(&mut self, line: Line) -> &mut PinState {
        match line {
            Line::Scl => &mut self.scl,
            Line::Sda => &mut self.sda,
        }
    }

    fn scl_line(&self) -> bool {
        !self.scl.driven() || self.scl.latch
    }

    fn pattern_holds_low(&self) -> bool {
        let pulse = if self.scl_line() {
            self.edges.wrapping_sub(1)
        } else {
            self.edges
        };
        self.pattern_low.contains(&pulse)
    }

    fn sda_line(&self) -> bool {
        let master = !self.sda.driven() || self.sda.latch;
        let device = self.device.as_ref().map_or(false, |d| d.drive_low);
        master && !device && !self.pattern_holds_low()
    }
}

/// Simulated two-wire bus
pub struct SimBus {
    state: RefCell<State>,
}

impl SimBus {
    /// Both lines released and pulled high, no slave attached
    pub fn new() -> Self {
        let released = PinState {
            latch: false,
            direction: PinDirection::InputPullUp,
        };
        Self {
            state: RefCell::new(State {
                scl: released,
                sda: released,
                edges: 0,
                pattern_low: Vec::new(),
                device: None,
                trace: Vec::new(),
            }),
        }
    }

    pub fn with_device(device: Device) -> Self {
        let bus = Self::new();
        bus.state.borrow_mut().device = Some(device);
        bus
    }

    pub fn master(&self) -> SimI2c<'_> {
        SoftI2c::new(self.pin(Line::Scl), self.pin(Line::Sda), self.delay())
    }

    pub fn pin(&self, line: Line) -> SimPin<'_> {
        SimPin { bus: self, line }
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { bus: self }
    }

    fn record(&self, op: Op, change: impl FnOnce(&mut State)) -> bool {
        let mut s = self.state.borrow_mut();
        let scl_before = s.scl_line();
        let sda_before = s.sda_line();

        change(&mut s);

        let scl = s.scl_line();
        let scl_rose = !scl_before && scl;
        if scl_rose {
            s.edges += 1;
        }
        if scl_before && !scl {
            if let Some(device) = s.device.as_mut() {
                device.on_falling();
            }
        }

        let sda = s.sda_line();
        let sda_fell = sda_before && !sda;
        let sda_rose = !sda_before && sda;

        if let Some(device) = s.device.as_mut() {
            if scl_before && scl {
                if sda_fell {
                    device.on_start();
                } else if sda_rose {
                    device.on_stop();
                }
            }
            if scl_rose {
                device.on_rising(sda);
            }
        }

        let sda_driven = s.sda.driven();
        s.trace.push(Step {
            op,
            scl,
            sda,
            sda_driven,
            scl_rose,
            sda_fell,
            sda_rose,
        });

        match op {
            Op::Sample(Line::Scl) => scl,
            _ => sda,
        }
    }

    pub fn scl_line(&self) -> bool {
        self.state.borrow().scl_line()
    }

    pub fn sda_line(&self) -> bool {
        self.state.borrow().sda_line()
    }

    pub fn scl_driven(&self) -> bool {
        self.state.borrow().scl.driven()
    }

    pub fn sda_driven(&self) -> bool {
        self.state.borrow().sda.driven()
    }

    pub fn trace(&self) -> Vec<Step> {
        self.state.borrow().trace.clone()
    }

    pub fn clear_trace(&self) {
        self.state.borrow_mut().trace.clear();
    }

    /// Restart pulse numbering for scripted patterns
    pub fn reset_pulses(&self) {
        self.state.borrow_mut().edges = 0;
    }

    /// Rising SCL edges since the last [`SimBus::reset_pulses`]
    pub fn pulses(&self) -> usize {
        self.state.borrow().edges
    }

    /// Hold SDA low through the given pulses (0-based, from the falling edge before)
    pub fn slave_pulls_low(&self, pulses: &[usize]) {
        self.state.borrow_mut().pattern_low = pulses.to_vec();
    }

    /// Present `byte` MSB first on pulses 0..8
    pub fn slave_presents(&self, byte: u8) {
        let low = (0..8usize)
            .filter(|bit| byte & (0x80 >> bit) == 0)
            .collect();
        self.state.borrow_mut().pattern_low = low;
    }

    pub fn with_attached<R>(&self, f: impl FnOnce(&Device) -> R) -> R {
        let s = self.state.borrow();
        f(s.device.as_ref().expect("no device attached"))
    }

    pub fn rising_edges(&self, trace: &[Step]) -> Vec<usize> {
        trace
            .iter()
            .enumerate()
            .filter(|(_, step)| step.scl_rose)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn start_conditions(&self, trace: &[Step]) -> usize {
        trace.iter().filter(|step| step.scl && step.sda_fell).count()
    }

    pub fn stop_conditions(&self, trace: &[Step]) -> usize {
        trace.iter().filter(|step| step.scl && step.sda_rose).count()
    }

    /// SDA level at every rising SCL edge of the current trace
    pub fn sampled_by_slave(&self) -> Vec<u8> {
        self.state
            .borrow()
            .trace
            .iter()
            .filter(|step| step.scl_rose)
            .map(|step| step.sda as u8)
            .collect()
    }
}

pub struct SimPin<'a> {
    bus: &'a SimBus,
    line: Line,
}

impl SimPin<'_> {
    pub fn line(&self) -> Line {
        self.line
    }
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        let line = self.line;
        self.bus
            .record(Op::Level(line, true), |s| s.pin_mut(line).latch = true);
    }

    fn set_low(&mut self) {
        let line = self.line;
        self.bus
            .record(Op::Level(line, false), |s| s.pin_mut(line).latch = false);
    }

    fn is_set_high(&self) -> bool {
        let mut s = self.bus.state.borrow_mut();
        s.pin_mut(self.line).latch
    }
}

impl InputPin for SimPin<'_> {
    fn is_high(&self) -> bool {
        self.bus.record(Op::Sample(self.line), |_| {})
    }
}

impl FlexPin for SimPin<'_> {
    fn set_direction(&mut self, direction: PinDirection) {
        let line = self.line;
        let op = match direction {
            PinDirection::Output => Op::Drive(line),
            PinDirection::InputPullUp => Op::Release(line),
        };
        self.bus
            .record(op, |s| s.pin_mut(line).direction = direction);
    }

    fn direction(&self) -> PinDirection {
        let mut s = self.bus.state.borrow_mut();
        s.pin_mut(self.line).direction
    }
}

pub struct SimDelay<'a> {
    bus: &'a SimBus,
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.record(Op::Delay(ns), |_| {});
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.record(Op::Delay(us * 1_000), |_| {});
    }
}
