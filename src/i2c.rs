use std::ops::RangeInclusive;

use crate::{Error, Result};
use crate::config::I2cConfig;
use crate::device::{self, Device};
use crate::sys::Driver;

/// Addresses outside this range are reserved by the bus protocol.
const SCAN_RANGE: RangeInclusive<u8> = 0x08..=0x77;

fn wire_address(address: u8) -> Result<u8> {
    if address > 0x7f {
        return Err(Error::InvalidInput(format!("I2C address {:#04x} is wider than 7 bits", address)))
    }
    Ok(address << 1)
}

/// Maps the driver's NAK report onto a result. A non-zero `nak` is the 1-based position of the
/// byte that was not acknowledged, counting the `written` bytes that precede the read phase.
/// Only bytes read before the NAK are kept.
fn check_nak(nak: i32, written: usize, mut data: Vec<u8>) -> Result<Vec<u8>> {
    if nak == 0 {
        return Ok(data)
    }
    let index = nak.max(0) as usize;
    data.truncate(index.saturating_sub(written + 1));
    Err(Error::I2cNak { index, data })
}

/// Bit-banged I2C master. Addresses are 7-bit.
pub struct I2c<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> I2c<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        I2c { device }
    }

    pub fn open(&self, config: &I2cConfig) -> Result<()> {
        log::debug!("i2c.open({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let rate = device::check_frequency(config.clock_rate)?;
        driver.i2c_reset(hdwf)?;
        driver.i2c_stretch_set(hdwf, config.stretching)?;
        driver.i2c_rate_set(hdwf, rate)?;
        driver.i2c_scl_set(hdwf, config.scl as i32)?;
        driver.i2c_sda_set(hdwf, config.sda as i32)?;
        if driver.i2c_clear(hdwf)? == 0 {
            log::warn!("i2c.open: SCL or SDA held low");
            return Err(Error::I2cBusLockup)
        }
        // an empty write to address 0 brings the lines to the idle state
        if let Err(err) = driver.i2c_write(hdwf, 0, &[]) {
            log::warn!("i2c.open: cannot idle the bus: {}", err);
        }
        Ok(())
    }

    /// Returns every 7-bit address that acknowledges an empty write, in ascending order.
    pub fn scan(&self) -> Result<Vec<u8>> {
        log::debug!("i2c.scan()");
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let mut found = Vec::new();
        for address in SCAN_RANGE {
            if driver.i2c_write(hdwf, address << 1, &[])? == 0 {
                log::trace!("i2c.scan: ack at {:#04x}", address);
                found.push(address);
            }
        }
        Ok(found)
    }

    pub fn read(&self, address: u8, count: usize) -> Result<Vec<u8>> {
        log::debug!("i2c.read({:#04x}, {})", address, count);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let wire = wire_address(address)?;
        let mut data = vec![0u8; count];
        let nak = driver.i2c_read(hdwf, wire, &mut data)?;
        check_nak(nak, 0, data)
    }

    pub fn write(&self, address: u8, data: &[u8]) -> Result<()> {
        log::debug!("i2c.write({:#04x}, {:02x?})", address, data);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let wire = wire_address(address)?;
        let nak = driver.i2c_write(hdwf, wire, data)?;
        check_nak(nak, 0, Vec::new()).map(|_| ())
    }

    /// Writes `tx`, then issues a repeated start and reads `rx_count` bytes.
    pub fn exchange(&self, address: u8, tx: &[u8], rx_count: usize) -> Result<Vec<u8>> {
        log::debug!("i2c.exchange({:#04x}, {:02x?}, {})", address, tx, rx_count);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let wire = wire_address(address)?;
        let mut data = vec![0u8; rx_count];
        let nak = driver.i2c_write_read(hdwf, wire, tx, &mut data)?;
        // the address and every byte of `tx` go out before the read phase
        check_nak(nak, 1 + tx.len(), data)
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("i2c.close()");
        self.device.driver().i2c_reset(self.device.handle()?)
    }
}
