use crate::{Error, Result};
use crate::codes::{self, InstrumentState};
use crate::config::{ScopeConfig, TriggerConfig};
use crate::params::{TriggerSlope, TriggerSource};
use crate::device::{self, Device};
use crate::sys::Driver;
use crate::wait::Poll;

pub struct Oscilloscope<'a, D: Driver> {
    device: &'a Device<D>,
    buffer_size: Option<usize>,
    poll: Poll,
}

impl<'a, D: Driver> Oscilloscope<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Oscilloscope { device, buffer_size: None, poll: Poll::default() }
    }

    /// Sets how `record` waits for the acquisition to complete.
    pub fn set_poll(&mut self, poll: Poll) {
        self.poll = poll;
    }

    /// Number of samples `record` returns, once opened.
    pub fn buffer_size(&self) -> Option<usize> {
        self.buffer_size
    }

    /// Enables every channel with a common offset and range. A buffer size of zero or above the
    /// device maximum selects the maximum.
    pub fn open(&mut self, config: &ScopeConfig) -> Result<()> {
        log::debug!("scope.open({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let frequency = device::check_frequency(config.sampling_frequency)?;
        let max_buffer_size = self.device.device_info()?.max_analog_in_buffer_size;
        let buffer_size = match config.buffer_size {
            0 => max_buffer_size,
            size if size > max_buffer_size => max_buffer_size,
            size => size,
        };

        driver.analog_in_channel_enable_set(hdwf, codes::ALL_CHANNELS, true)?;
        driver.analog_in_channel_offset_set(hdwf, codes::ALL_CHANNELS, config.offset)?;
        driver.analog_in_channel_range_set(hdwf, codes::ALL_CHANNELS, config.range)?;
        driver.analog_in_buffer_size_set(hdwf, buffer_size as i32)?;
        driver.analog_in_frequency_set(hdwf, frequency)?;
        driver.analog_in_channel_filter_set(hdwf, codes::ALL_CHANNELS, codes::FILTER_DECIMATE)?;
        self.buffer_size = Some(buffer_size);
        Ok(())
    }

    /// Reads the instantaneous voltage on a 1-based channel without a full acquisition.
    pub fn measure(&self, channel: u32) -> Result<f64> {
        log::debug!("scope.measure({})", channel);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let index = device::channel_index(channel)?;
        driver.analog_in_configure(hdwf, false, false)?;
        driver.analog_in_status(hdwf, false)?;
        driver.analog_in_status_sample(hdwf, index)
    }

    /// Arms the edge trigger, or disarms any trigger when disabled or without a source.
    pub fn set_trigger(&self, config: &TriggerConfig) -> Result<()> {
        log::debug!("scope.set_trigger({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        if !config.enable || config.source == TriggerSource::None {
            return driver.analog_in_trigger_source_set(hdwf, TriggerSource::None.code())
        }
        let channel = match config.source {
            TriggerSource::DetectorAnalogIn => device::channel_index(config.channel)?,
            _ => config.channel as i32,
        };
        driver.analog_in_trigger_auto_timeout_set(hdwf, config.timeout)?;
        driver.analog_in_trigger_source_set(hdwf, config.source.code())?;
        driver.analog_in_trigger_channel_set(hdwf, channel)?;
        driver.analog_in_trigger_type_set(hdwf, codes::TRIGTYPE_EDGE)?;
        driver.analog_in_trigger_level_set(hdwf, config.level)?;
        driver.analog_in_trigger_condition_set(hdwf, TriggerSlope::from_rising(config.edge_rising).code())
    }

    /// Starts an acquisition, waits for it to complete and returns the samples of a 1-based
    /// channel in volts.
    pub fn record(&self, channel: u32) -> Result<Vec<f64>> {
        log::debug!("scope.record({})", channel);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let buffer_size = self.buffer_size.ok_or(Error::NotConfigured("oscilloscope"))?;
        let index = device::channel_index(channel)?;
        driver.analog_in_configure(hdwf, false, true)?;
        self.poll.wait_until(|| {
            let state = InstrumentState::from(driver.analog_in_status(hdwf, true)?);
            log::trace!("scope.record: {:?}", state);
            Ok(state == InstrumentState::Done)
        })?;
        let mut samples = vec![0.0; buffer_size];
        driver.analog_in_status_data(hdwf, index, &mut samples)?;
        Ok(samples)
    }

    pub fn close(&mut self) -> Result<()> {
        log::debug!("scope.close()");
        self.buffer_size = None;
        self.device.driver().analog_in_reset(self.device.handle()?)
    }
}
