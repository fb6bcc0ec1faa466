use crate::Result;
use crate::config::SpiConfig;
use crate::params::DigitalOutIdle;
use crate::device::Device;
use crate::sys::Driver;

/// Data line selectors; single-bit transfers go out on DQ0 (MOSI) and come in on DQ1 (MISO).
const DQ_MOSI: i32 = 0;
const DQ_MISO: i32 = 1;
const DQ_SINGLE: i32 = 1;
const WORD_BITS: i32 = 8;

const CS_ACTIVE: i32 = 0;
const CS_INACTIVE: i32 = 1;

/// Bit-banged SPI master. Chip select is passed per transfer so that several peripherals can
/// share one bus.
pub struct Spi<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> Spi<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Spi { device }
    }

    pub fn open(&self, config: &SpiConfig) -> Result<()> {
        log::debug!("spi.open({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        driver.spi_frequency_set(hdwf, config.clock_frequency)?;
        driver.spi_clock_set(hdwf, config.sck as i32)?;
        if let Some(mosi) = config.mosi {
            driver.spi_data_set(hdwf, DQ_MOSI, mosi as i32)?;
            driver.spi_idle_set(hdwf, DQ_MOSI, DigitalOutIdle::HighZ.code())?;
        }
        if let Some(miso) = config.miso {
            driver.spi_data_set(hdwf, DQ_MISO, miso as i32)?;
            driver.spi_idle_set(hdwf, DQ_MISO, DigitalOutIdle::HighZ.code())?;
        }
        driver.spi_mode_set(hdwf, config.mode.code())?;
        driver.spi_order_set(hdwf, config.bit_order.code())?;
        driver.spi_select(hdwf, config.cs as i32, CS_INACTIVE)?;
        // a zero-bit transfer settles the clock line at its idle level
        driver.spi_write_one(hdwf, DQ_SINGLE, 0, 0)
    }

    /// Runs `transfer` with `cs` asserted. Chip select is released even if the transfer fails.
    fn selected<T>(&self, cs: u32, transfer: impl FnOnce() -> Result<T>) -> Result<T> {
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        driver.spi_select(hdwf, cs as i32, CS_ACTIVE)?;
        let result = transfer();
        let released = driver.spi_select(hdwf, cs as i32, CS_INACTIVE);
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), released) => {
                if let Err(release_err) = released {
                    log::warn!("spi: cannot release chip select {}: {}", cs, release_err);
                }
                Err(err)
            }
        }
    }

    pub fn read(&self, count: usize, cs: u32) -> Result<Vec<u8>> {
        log::debug!("spi.read({}, cs {})", count, cs);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let mut data = vec![0u8; count];
        self.selected(cs, || driver.spi_read(hdwf, DQ_SINGLE, WORD_BITS, &mut data))?;
        log::trace!("spi.read: {:02x?}", data);
        Ok(data)
    }

    pub fn write(&self, data: &[u8], cs: u32) -> Result<()> {
        log::debug!("spi.write({:02x?}, cs {})", data, cs);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        self.selected(cs, || driver.spi_write(hdwf, DQ_SINGLE, WORD_BITS, data))
    }

    /// Writes `tx` while clocking in `rx_count` bytes.
    pub fn exchange(&self, tx: &[u8], rx_count: usize, cs: u32) -> Result<Vec<u8>> {
        log::debug!("spi.exchange({:02x?}, {}, cs {})", tx, rx_count, cs);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let mut data = vec![0u8; rx_count];
        self.selected(cs, || driver.spi_write_read(hdwf, DQ_SINGLE, WORD_BITS, tx, &mut data))?;
        log::trace!("spi.exchange: {:02x?}", data);
        Ok(data)
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("spi.close()");
        self.device.driver().spi_reset(self.device.handle()?)
    }
}
