use crate::{Error, Result};
use crate::config::UartConfig;
use crate::device::Device;
use crate::sys::Driver;

/// Receive buffer size on devices that do not report an acquisition buffer size.
const DEFAULT_RX_BUFFER: usize = 8192;

/// Bit-banged UART on two DIO lines.
pub struct Uart<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> Uart<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Uart { device }
    }

    pub fn open(&self, config: &UartConfig) -> Result<()> {
        log::debug!("uart.open({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        driver.uart_rate_set(hdwf, config.baud_rate as f64)?;
        driver.uart_tx_set(hdwf, config.tx as i32)?;
        driver.uart_rx_set(hdwf, config.rx as i32)?;
        driver.uart_bits_set(hdwf, config.data_bits as i32)?;
        driver.uart_parity_set(hdwf, config.parity.code())?;
        driver.uart_stop_set(hdwf, config.stop_bits)?;

        // zero-length transfers initialize the transmitter and restart reception
        if let Err(err) = driver.uart_tx(hdwf, &[]) {
            log::warn!("uart.open: cannot flush transmitter: {}", err);
        }
        if let Err(err) = driver.uart_rx(hdwf, &mut []) {
            log::warn!("uart.open: cannot flush receiver: {}", err);
        }
        Ok(())
    }

    /// Returns the bytes received since the previous read. On overflow or a parity fault the
    /// received bytes are carried by the error; see `Error::data`.
    pub fn read(&self) -> Result<Vec<u8>> {
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let buffer_size = match self.device.device_info()?.max_analog_in_buffer_size {
            0 => DEFAULT_RX_BUFFER,
            size => size,
        };
        let mut data = vec![0u8; buffer_size];
        let (count, parity) = driver.uart_rx(hdwf, &mut data)?;
        data.truncate(count);
        log::debug!("uart.read() = {:02x?} (parity {})", data, parity);
        match parity {
            0 => Ok(data),
            parity if parity < 0 => Err(Error::Overflow { data }),
            index => {
                let index = index as usize;
                data.truncate(index);
                Err(Error::Parity { index, data })
            }
        }
    }

    pub fn write(&self, data: &[u8]) -> Result<()> {
        log::debug!("uart.write({:02x?})", data);
        self.device.driver().uart_tx(self.device.handle()?, data)
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("uart.close()");
        self.device.driver().uart_reset(self.device.handle()?)
    }
}
