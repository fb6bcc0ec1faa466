use crate::{Error, Result};
use crate::params::PullDirection;
use crate::device::Device;
use crate::sys::Driver;
use crate::analog_io;

/// Rotates the low `size` bits of `number` left by `position`.
fn rotate_left(number: u32, position: u32, size: u32) -> u32 {
    let high = number.checked_shl(position).unwrap_or(0);
    let low = size.checked_sub(position)
        .and_then(|shift| number.checked_shr(shift))
        .unwrap_or(0);
    high | low
}

/// Sets or clears bit `channel` of `mask`, leaving the other lines of a `count`-line register
/// untouched.
fn update_mask(mask: u32, channel: u32, count: u32, set: bool) -> u32 {
    if set {
        mask | rotate_left(1, channel, count)
    } else {
        // every line but line 0, rotated into place
        let all_but_one = 1u32.checked_shl(count).unwrap_or(0).wrapping_sub(2);
        mask & rotate_left(all_but_one, channel, count)
    }
}

/// Individually controlled digital lines. Channels are DIO line numbers as printed on the device.
pub struct StaticIo<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> StaticIo<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        StaticIo { device }
    }

    fn channel_count(&self) -> Result<u32> {
        let info = self.device.device_info()?;
        Ok(info.digital_in_channels.min(info.digital_out_channels))
    }

    fn line(&self, channel: u32) -> Result<(u32, u32)> {
        let line = self.device.dio_channel(channel)?;
        let count = self.channel_count()?;
        if line < count { Ok((line, count)) } else { Err(Error::InvalidChannel(channel)) }
    }

    /// Configures a line as an output or as an input.
    pub fn set_mode(&self, channel: u32, output: bool) -> Result<()> {
        log::debug!("static_io.set_mode({}, {})", channel, output);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let (line, count) = self.line(channel)?;
        let mask = driver.digital_io_output_enable_get(hdwf)?;
        driver.digital_io_output_enable_set(hdwf, update_mask(mask, line, count, output))
    }

    pub fn get_state(&self, channel: u32) -> Result<bool> {
        log::debug!("static_io.get_state({})", channel);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let (line, _) = self.line(channel)?;
        driver.digital_io_status(hdwf)?;
        Ok(driver.digital_io_input_status(hdwf)? & (1 << line) != 0)
    }

    /// Drives an output line high or low.
    pub fn set_state(&self, channel: u32, value: bool) -> Result<()> {
        log::debug!("static_io.set_state({}, {})", channel, value);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let (line, count) = self.line(channel)?;
        let mask = driver.digital_io_output_get(hdwf)?;
        driver.digital_io_output_set(hdwf, update_mask(mask, line, count, value))
    }

    /// Limits the output drive current, in A, on devices with a configurable digital supply.
    pub fn set_current(&self, current: f64) -> Result<()> {
        log::debug!("static_io.set_current({})", current);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let address = analog_io::find_node(driver, hdwf, &["VDD"], "Drive")?
            .ok_or(Error::NodeMissing { label: "VDD", node: "Drive" })?;
        analog_io::set_node(driver, hdwf, address, current)
    }

    /// Pull resistors cannot be configured yet; this always fails with `Error::NotImplemented`.
    pub fn set_pull(&self, channel: u32, direction: PullDirection) -> Result<()> {
        log::debug!("static_io.set_pull({}, {:?})", channel, direction);
        Err(Error::NotImplemented("set_pull"))
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("static_io.close()");
        self.device.driver().digital_io_reset(self.device.handle()?)
    }
}
