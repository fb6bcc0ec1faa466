use bitflags::bitflags;

use crate::Result;
use crate::config::SuppliesConfig;
use crate::device::Device;
use crate::sys::{Driver, Handle};
use crate::analog_io;

bitflags! {
    /// Power supply rails.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rails: u8 {
        const Positive = 1<<0;
        const Negative = 1<<1;
        /// The digital rail, or the 6 V rail on models without one.
        const Digital  = 1<<2;
    }
}

impl Rails {
    /// Labels a rail is exposed under, in order of preference.
    fn labels(self) -> &'static [&'static str] {
        if self == Rails::Positive {
            &["V+", "p25V"]
        } else if self == Rails::Negative {
            &["V-", "n25V"]
        } else if self == Rails::Digital {
            &["VDD", "p6V"]
        } else {
            &[]
        }
    }
}

pub struct Supply<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> Supply<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Supply { device }
    }

    /// Programs every rail present on the device, then the master switch. Returns the rails that
    /// were found; missing rails are skipped.
    pub fn switch(&self, config: &SuppliesConfig) -> Result<Rails> {
        log::debug!("supply.switch({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let rails = [
            (Rails::Positive, config.positive_enable, config.positive_voltage, config.positive_current),
            (Rails::Negative, config.negative_enable, config.negative_voltage, config.negative_current),
            (Rails::Digital,  config.digital_enable,  config.digital_voltage,  config.digital_current),
        ];
        let mut found = Rails::empty();
        for (rail, enable, voltage, current) in rails {
            let mut present = false;
            for (node, value) in [("Enable", enable as u8 as f64), ("Voltage", voltage), ("Current", current)] {
                present |= self.set_rail_node(driver, hdwf, rail, node, value)?;
            }
            if present {
                found |= rail;
            } else {
                log::debug!("supply.switch: no {:?} rail", rail);
            }
        }
        driver.analog_io_enable_set(hdwf, config.master_enable)?;
        Ok(found)
    }

    fn set_rail_node(&self, driver: &D, hdwf: Handle, rail: Rails, node: &str, value: f64) -> Result<bool> {
        match analog_io::find_node(driver, hdwf, rail.labels(), node)? {
            Some(address) => {
                analog_io::set_node(driver, hdwf, address, value)?;
                Ok(true)
            }
            None => Ok(false)
        }
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("supply.close()");
        self.device.driver().analog_io_reset(self.device.handle()?)
    }
}
