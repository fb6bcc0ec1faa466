use crate::{Error, Result};
use crate::codes::InstrumentState;
use crate::config::{LogicConfig, LogicTriggerConfig};
use crate::params::TriggerSource;
use crate::device::{self, Device};
use crate::sys::Driver;
use crate::wait::Poll;

/// Bits per sample read back from the digital-in buffer.
const SAMPLE_FORMAT: i32 = 16;

fn divider(clock: f64, frequency: f64) -> u32 {
    ((clock / frequency).floor() as u32).max(1)
}

/// Splits the buffer around the trigger into `(position, prefill)`.
fn trigger_split(position: i64, buffer_size: usize) -> (u32, u32) {
    let prefill = position.clamp(0, buffer_size as i64) as u32;
    (buffer_size as u32 - prefill, prefill)
}

/// Reduces raw samples to the level of a single line.
fn extract_line(samples: &mut [u16], line: u32) {
    for sample in samples {
        *sample = (*sample & (1 << line)) >> line;
    }
}

pub struct LogicAnalyzer<'a, D: Driver> {
    device: &'a Device<D>,
    buffer_size: Option<usize>,
    poll: Poll,
}

impl<'a, D: Driver> LogicAnalyzer<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        LogicAnalyzer { device, buffer_size: None, poll: Poll::default() }
    }

    /// Sets how `record` waits for the acquisition to complete.
    pub fn set_poll(&mut self, poll: Poll) {
        self.poll = poll;
    }

    pub fn buffer_size(&self) -> Option<usize> {
        self.buffer_size
    }

    pub fn open(&mut self, config: &LogicConfig) -> Result<()> {
        log::debug!("logic.open({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let frequency = device::check_frequency(config.sampling_frequency)?;
        let max_buffer_size = driver.digital_in_buffer_size_max(hdwf)?.max(0) as usize;
        let buffer_size = match config.buffer_size {
            0 => max_buffer_size,
            size => size.min(max_buffer_size),
        };
        let clock = driver.digital_in_internal_clock(hdwf)?;
        let divider = divider(clock, frequency);
        log::trace!("logic.open: clock {} Hz, divider {}", clock, divider);

        driver.digital_in_divider_set(hdwf, divider)?;
        driver.digital_in_sample_format_set(hdwf, SAMPLE_FORMAT)?;
        driver.digital_in_buffer_size_set(hdwf, buffer_size as i32)?;
        self.buffer_size = Some(buffer_size);
        Ok(())
    }

    /// Triggers on an edge of one line, keeping `position` samples from before the edge.
    pub fn set_trigger(&self, config: &LogicTriggerConfig) -> Result<()> {
        log::debug!("logic.set_trigger({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        if !config.enable {
            return driver.digital_in_trigger_source_set(hdwf, TriggerSource::None.code())
        }
        let buffer_size = self.buffer_size.ok_or(Error::NotConfigured("logic analyzer"))?;
        let bit = 1u32.checked_shl(config.channel).ok_or(Error::InvalidChannel(config.channel))?;

        driver.digital_in_trigger_source_set(hdwf, TriggerSource::DetectorDigitalIn.code())?;
        let (position, prefill) = trigger_split(config.position, buffer_size);
        driver.digital_in_trigger_position_set(hdwf, position)?;
        driver.digital_in_trigger_prefill_set(hdwf, prefill)?;
        // masks are (level low, level high, rising edge, falling edge)
        if config.rising_edge {
            driver.digital_in_trigger_set(hdwf, [0, bit, 0, 0])?;
            driver.digital_in_trigger_reset_set(hdwf, [0, 0, bit, 0])?;
        } else {
            driver.digital_in_trigger_set(hdwf, [bit, 0, 0, 0])?;
            driver.digital_in_trigger_reset_set(hdwf, [0, 0, 0, bit])?;
        }
        driver.digital_in_trigger_auto_timeout_set(hdwf, config.timeout)?;
        driver.digital_in_trigger_length_set(hdwf, config.length_min, config.length_max, 0)?;
        driver.digital_in_trigger_count_set(hdwf, config.count as i32, 0)
    }

    /// Starts an acquisition, waits for it to complete and returns the level of DIO `line` in
    /// every sample, as `0` or `1`.
    pub fn record(&self, line: u32) -> Result<Vec<u16>> {
        log::debug!("logic.record({})", line);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let buffer_size = self.buffer_size.ok_or(Error::NotConfigured("logic analyzer"))?;
        if line >= SAMPLE_FORMAT as u32 {
            return Err(Error::InvalidChannel(line))
        }
        driver.digital_in_configure(hdwf, false, true)?;
        self.poll.wait_until(|| {
            let state = InstrumentState::from(driver.digital_in_status(hdwf, true)?);
            log::trace!("logic.record: {:?}", state);
            Ok(state == InstrumentState::Done)
        })?;
        let mut samples = vec![0u16; buffer_size];
        driver.digital_in_status_data(hdwf, &mut samples)?;
        extract_line(&mut samples, line);
        Ok(samples)
    }

    pub fn close(&mut self) -> Result<()> {
        log::debug!("logic.close()");
        self.buffer_size = None;
        self.device.driver().digital_in_reset(self.device.handle()?)
    }
}
