//! High-level configuration of the instruments in terms of physical quantities.

use crate::params::{
    BitOrder, DigitalOutIdle, DigitalOutType, Parity, SpiMode, TriggerSource, WavegenFunction,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeConfig {
    /// Sampling frequency in Hz.
    pub sampling_frequency: f64,
    /// Buffer size in samples; `0` selects the device maximum.
    pub buffer_size: usize,
    /// Offset voltage in V.
    pub offset: f64,
    /// Full-scale amplitude range in V.
    pub range: f64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            sampling_frequency: 20e6,
            buffer_size: 0,
            offset: 0.0,
            range: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerConfig {
    pub enable: bool,
    pub source: TriggerSource,
    /// 1-based for `TriggerSource::DetectorAnalogIn`, passed through otherwise.
    pub channel: u32,
    /// Auto-trigger timeout in seconds; `0.0` waits forever.
    pub timeout: f64,
    pub edge_rising: bool,
    /// Trigger level in V.
    pub level: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enable: true,
            source: TriggerSource::None,
            channel: 1,
            timeout: 0.0,
            edge_rising: true,
            level: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicConfig {
    pub sampling_frequency: f64,
    /// Buffer size in samples; `0` selects the device maximum.
    pub buffer_size: usize,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            sampling_frequency: 100e6,
            buffer_size: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicTriggerConfig {
    pub enable: bool,
    /// DIO line number.
    pub channel: u32,
    /// Samples kept before the trigger event.
    pub position: i64,
    pub timeout: f64,
    pub rising_edge: bool,
    /// Minimum trigger sequence length in seconds.
    pub length_min: f64,
    /// Maximum trigger sequence length in seconds.
    pub length_max: f64,
    pub count: u32,
}

impl Default for LogicTriggerConfig {
    fn default() -> Self {
        Self {
            enable: true,
            channel: 0,
            position: 0,
            timeout: 0.0,
            rising_edge: true,
            length_min: 0.0,
            length_max: 20.0,
            count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WavegenConfig {
    /// 1-based output channel.
    pub channel: u32,
    pub function: WavegenFunction,
    pub offset: f64,
    pub frequency: f64,
    pub amplitude: f64,
    /// Symmetry in percent.
    pub symmetry: f64,
    pub wait: f64,
    /// Run time in seconds; `0.0` runs continuously.
    pub run_time: f64,
    /// Repeat count; `0` repeats forever.
    pub repeat: u32,
    /// Samples in V, used with `WavegenFunction::Custom`.
    pub custom_data: Vec<f64>,
}

impl Default for WavegenConfig {
    fn default() -> Self {
        Self {
            channel: 1,
            function: WavegenFunction::Sine,
            offset: 0.0,
            frequency: 1e3,
            amplitude: 1.0,
            symmetry: 50.0,
            wait: 0.0,
            run_time: 0.0,
            repeat: 0,
            custom_data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PatternRunTime {
    #[default]
    Continuous,
    Seconds(f64),
    /// Exactly one pass over the custom data at the requested frequency.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTrigger {
    pub source: TriggerSource,
    pub edge_rising: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternConfig {
    /// DIO line number as printed on the device.
    pub channel: u32,
    pub function: DigitalOutType,
    pub frequency: f64,
    /// Duty cycle in percent, used with `DigitalOutType::Pulse`.
    pub duty_cycle: f64,
    /// Bit pattern, used with `DigitalOutType::Custom`.
    pub data: Vec<bool>,
    pub wait: f64,
    pub repeat: u32,
    pub run_time: PatternRunTime,
    pub idle: DigitalOutIdle,
    /// Includes the trigger in every repeat cycle when set.
    pub trigger: Option<PatternTrigger>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            function: DigitalOutType::Pulse,
            frequency: 1e3,
            duty_cycle: 50.0,
            data: Vec::new(),
            wait: 0.0,
            repeat: 0,
            run_time: PatternRunTime::Continuous,
            idle: DigitalOutIdle::Init,
            trigger: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SuppliesConfig {
    pub master_enable: bool,
    pub positive_enable: bool,
    pub negative_enable: bool,
    /// Digital (or 6 V) rail.
    pub digital_enable: bool,
    pub positive_voltage: f64,
    pub negative_voltage: f64,
    pub digital_voltage: f64,
    pub positive_current: f64,
    pub negative_current: f64,
    pub digital_current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UartConfig {
    pub rx: u32,
    pub tx: u32,
    pub baud_rate: u32,
    pub parity: Parity,
    pub data_bits: u32,
    pub stop_bits: f64,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            rx: 0,
            tx: 1,
            baud_rate: 9600,
            parity: Parity::None,
            data_bits: 8,
            stop_bits: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiConfig {
    pub cs: u32,
    pub sck: u32,
    /// Left tri-stated when `None`.
    pub miso: Option<u32>,
    /// Left tri-stated when `None`.
    pub mosi: Option<u32>,
    pub clock_frequency: f64,
    pub mode: SpiMode,
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            cs: 0,
            sck: 1,
            miso: None,
            mosi: None,
            clock_frequency: 1e6,
            mode: SpiMode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct I2cConfig {
    pub sda: u32,
    pub scl: u32,
    pub clock_rate: f64,
    pub stretching: bool,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            sda: 0,
            scl: 1,
            clock_rate: 100e3,
            stretching: false,
        }
    }
}
