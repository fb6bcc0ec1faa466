use crate::Result;
use crate::codes;
use crate::config::WavegenConfig;
use crate::params::WavegenFunction;
use crate::device::{self, Device};
use crate::sys::Driver;

/// The analog waveform generator. Channels are numbered from 1.
pub struct Wavegen<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> Wavegen<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Wavegen { device }
    }

    /// Programs the carrier of a channel and starts it.
    pub fn generate(&self, config: &WavegenConfig) -> Result<()> {
        log::debug!("wavegen.generate({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let channel = device::channel_index(config.channel)?;
        let node = codes::ANALOG_OUT_NODE_CARRIER;

        driver.analog_out_node_enable_set(hdwf, channel, node, true)?;
        driver.analog_out_node_function_set(hdwf, channel, node, config.function.code())?;
        if config.function == WavegenFunction::Custom && !config.custom_data.is_empty() {
            driver.analog_out_node_data_set(hdwf, channel, node, &config.custom_data)?;
        }
        driver.analog_out_node_frequency_set(hdwf, channel, node, config.frequency)?;
        driver.analog_out_node_amplitude_set(hdwf, channel, node, config.amplitude)?;
        driver.analog_out_node_offset_set(hdwf, channel, node, config.offset)?;
        driver.analog_out_node_symmetry_set(hdwf, channel, node, config.symmetry)?;
        driver.analog_out_run_set(hdwf, channel, config.run_time)?;
        driver.analog_out_wait_set(hdwf, channel, config.wait)?;
        driver.analog_out_repeat_set(hdwf, channel, config.repeat as i32)?;
        driver.analog_out_configure(hdwf, channel, true)
    }

    pub fn enable(&self, channel: u32) -> Result<()> {
        log::debug!("wavegen.enable({})", channel);
        self.configure(channel, true)
    }

    pub fn disable(&self, channel: u32) -> Result<()> {
        log::debug!("wavegen.disable({})", channel);
        self.configure(channel, false)
    }

    fn configure(&self, channel: u32, start: bool) -> Result<()> {
        let channel = device::channel_index(channel)?;
        self.device.driver().analog_out_configure(self.device.handle()?, channel, start)
    }

    /// Resets one channel.
    pub fn close(&self, channel: u32) -> Result<()> {
        log::debug!("wavegen.close({})", channel);
        let channel = device::channel_index(channel)?;
        self.device.driver().analog_out_reset(self.device.handle()?, channel)
    }

    /// Resets every channel.
    pub fn close_all(&self) -> Result<()> {
        log::debug!("wavegen.close_all()");
        self.device.driver().analog_out_reset(self.device.handle()?, codes::ALL_CHANNELS)
    }
}
