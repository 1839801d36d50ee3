//! Address-level transactions on top of the byte-level master
//!
//! Every transaction ends with a stop condition, also when the slave does
//! not acknowledge. Nothing is retried; that is up to the caller.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use heapless::Vec;
use tinywatt_hal::i2c::{address_byte, Direction, I2cBus, FIRST_ADDRESS, LAST_ADDRESS};
use tinywatt_hal::{DelayNs, FlexPin};

use super::SoftI2c;

/// Number of non-reserved 7-bit addresses
const ADDRESS_COUNT: usize = (LAST_ADDRESS - FIRST_ADDRESS + 1) as usize;

/// Error from an address-level transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoftI2cError {
    /// No device acknowledged the address byte
    AddressNack,
    /// The device did not acknowledge a data byte
    DataNack,
}

impl embedded_hal::i2c::Error for SoftI2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            SoftI2cError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            SoftI2cError::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
        }
    }
}

impl<SCL, SDA, D, const DELAY_US: u32> SoftI2c<SCL, SDA, D, DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    /// Check whether a device acknowledges `address`
    pub fn probe(&mut self, address: u8) -> bool {
        let result = self.begin(address, Direction::Write);
        self.stop();
        result.is_ok()
    }

    /// Probe every non-reserved 7-bit address
    pub fn scan(&mut self) -> Vec<u8, ADDRESS_COUNT> {
        (FIRST_ADDRESS..=LAST_ADDRESS)
            .filter(|&address| self.probe(address))
            .collect()
    }

    /// Start (or repeated start) and send the address byte
    fn begin(&mut self, address: u8, direction: Direction) -> Result<(), SoftI2cError> {
        self.start();
        if self.write_byte(address_byte(address, direction)) {
            Ok(())
        } else {
            Err(SoftI2cError::AddressNack)
        }
    }

    fn send(&mut self, data: &[u8]) -> Result<(), SoftI2cError> {
        for &byte in data {
            if !self.write_byte(byte) {
                return Err(SoftI2cError::DataNack);
            }
        }
        Ok(())
    }

    /// Fill `buf`, acknowledging every byte except the last unless `more` follows
    ///
    /// An empty `buf` that ends the read still clocks one NACKed byte: after
    /// acknowledging a read address the slave drives SDA with its first data
    /// bit and only lets go after a NACK.
    fn receive(&mut self, buf: &mut [u8], more: bool) {
        if buf.is_empty() && !more {
            let _ = self.read_byte(false);
            return;
        }
        let last = buf.len().saturating_sub(1);
        for (index, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(index < last || more);
        }
    }

    fn finish<T>(
        &mut self,
        address: u8,
        result: Result<T, SoftI2cError>,
    ) -> Result<T, SoftI2cError> {
        self.stop();
        #[cfg(feature = "defmt")]
        {
            if let Err(e) = &result {
                defmt::debug!("i2c {=u8:#x}: {}", address, e);
            }
        }
        #[cfg(not(feature = "defmt"))]
        let _ = address;
        result
    }
}

impl<SCL, SDA, D, const DELAY_US: u32> I2cBus for SoftI2c<SCL, SDA, D, DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    type Error = SoftI2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let result = self
            .begin(address, Direction::Write)
            .and_then(|()| self.send(data));
        self.finish(address, result)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let result = self
            .begin(address, Direction::Read)
            .map(|()| self.receive(buf, false));
        self.finish(address, result)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let result = self
            .begin(address, Direction::Write)
            .and_then(|()| self.send(write_data))
            .and_then(|()| self.begin(address, Direction::Read))
            .map(|()| self.receive(read_buf, false));
        self.finish(address, result)
    }
}

impl<SCL, SDA, D, const DELAY_US: u32> ErrorType for SoftI2c<SCL, SDA, D, DELAY_US> {
    type Error = SoftI2cError;
}

impl<SCL, SDA, D, const DELAY_US: u32> I2c for SoftI2c<SCL, SDA, D, DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }
        let result = self.run(address, operations);
        self.finish(address, result)
    }
}

impl<SCL, SDA, D, const DELAY_US: u32> SoftI2c<SCL, SDA, D, DELAY_US>
where
    SCL: FlexPin,
    SDA: FlexPin,
    D: DelayNs,
{
    /// Run `operations` as one transaction, repeated start on direction change
    fn run(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), SoftI2cError> {
        let mut current = None;
        // Slave still expects to send: the last byte read was ACKed
        let mut read_open = false;

        for index in 0..operations.len() {
            let read_follows = matches!(
                operations[index + 1..]
                    .iter()
                    .find(|op| !matches!(op, Operation::Read(buf) if buf.is_empty())),
                Some(Operation::Read(_))
            );

            match &mut operations[index] {
                Operation::Write(data) => {
                    if current != Some(Direction::Write) {
                        self.begin(address, Direction::Write)?;
                        current = Some(Direction::Write);
                    }
                    self.send(data)?;
                }
                Operation::Read(buf) => {
                    if current != Some(Direction::Read) {
                        self.begin(address, Direction::Read)?;
                        current = Some(Direction::Read);
                        read_open = true;
                    }
                    if buf.is_empty() && !read_open {
                        continue;
                    }
                    self.receive(buf, read_follows);
                    read_open = read_follows;
                }
            }
        }

        Ok(())
    }
}
