use crate::Result;
use crate::config::{PatternConfig, PatternRunTime};
use crate::params::{DigitalOutType, TriggerSlope};
use crate::device::{self, Device};
use crate::sys::Driver;

/// Packs bits LSB first, eight to a byte.
fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (index, &bit) in bits.iter().enumerate() {
        if bit {
            bytes[index / 8] |= 1 << (index % 8);
        }
    }
    bytes
}

/// Splits `steps` counter ticks into `(low, high)` for a duty cycle in percent.
fn pulse_counts(steps: u32, duty_cycle: f64) -> (u32, u32) {
    let high = (steps as f64 * duty_cycle.clamp(0.0, 100.0) / 100.0).round() as u32;
    (steps - high.min(steps), high.min(steps))
}

fn run_time(config: &PatternConfig) -> f64 {
    match config.run_time {
        PatternRunTime::Continuous => 0.0,
        PatternRunTime::Seconds(seconds) => seconds,
        PatternRunTime::Auto if config.data.is_empty() => 0.0,
        PatternRunTime::Auto => config.data.len() as f64 / config.frequency,
    }
}

/// The digital pattern generator. Channels are DIO line numbers as printed on the device.
pub struct PatternGenerator<'a, D: Driver> {
    device: &'a Device<D>,
}

impl<'a, D: Driver> PatternGenerator<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        PatternGenerator { device }
    }

    pub fn generate(&self, config: &PatternConfig) -> Result<()> {
        log::debug!("pattern.generate({:?})", config);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let channel = self.device.dio_channel(config.channel)? as i32;
        let frequency = device::check_frequency(config.frequency)?;

        let clock = driver.digital_out_internal_clock(hdwf)?;
        let divider = ((clock / frequency).floor() as u32).max(1);
        log::trace!("pattern.generate: clock {} Hz, divider {}", clock, divider);

        driver.digital_out_enable_set(hdwf, channel, true)?;
        driver.digital_out_type_set(hdwf, channel, config.function.code())?;
        driver.digital_out_divider_set(hdwf, channel, divider)?;
        driver.digital_out_idle_set(hdwf, channel, config.idle.code())?;
        driver.digital_out_run_set(hdwf, run_time(config))?;
        driver.digital_out_wait_set(hdwf, config.wait)?;
        driver.digital_out_repeat_set(hdwf, config.repeat)?;

        driver.digital_out_repeat_trigger_set(hdwf, config.trigger.is_some())?;
        if let Some(trigger) = &config.trigger {
            driver.digital_out_trigger_source_set(hdwf, trigger.source.code())?;
            driver.digital_out_trigger_slope_set(hdwf, TriggerSlope::from_rising(trigger.edge_rising).code())?;
        }

        match config.function {
            DigitalOutType::Pulse => {
                let steps = (clock / frequency).floor() as u32 / divider;
                let (low, high) = pulse_counts(steps, config.duty_cycle);
                driver.digital_out_counter_set(hdwf, channel, low, high)?;
            }
            DigitalOutType::Custom if !config.data.is_empty() => {
                driver.digital_out_data_set(hdwf, channel, &pack_bits(&config.data), config.data.len() as u32)?;
            }
            _ => (),
        }
        driver.digital_out_configure(hdwf, true)
    }

    pub fn enable(&self, channel: u32) -> Result<()> {
        log::debug!("pattern.enable({})", channel);
        self.set_enabled(channel, true)
    }

    pub fn disable(&self, channel: u32) -> Result<()> {
        log::debug!("pattern.disable({})", channel);
        self.set_enabled(channel, false)
    }

    fn set_enabled(&self, channel: u32, enable: bool) -> Result<()> {
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let channel = self.device.dio_channel(channel)? as i32;
        driver.digital_out_enable_set(hdwf, channel, enable)?;
        driver.digital_out_configure(hdwf, true)
    }

    pub fn close(&self) -> Result<()> {
        log::debug!("pattern.close()");
        self.device.driver().digital_out_reset(self.device.handle()?)
    }
}
