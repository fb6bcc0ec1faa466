mod sys;
mod codes;
mod params;
mod config;
mod device;
mod analog_io;
mod supply;
mod dmm;
mod wait;
mod scope;
mod logic;
mod wavegen;
mod pattern;
mod static_io;
mod uart;
mod spi;
mod i2c;
mod hex;

#[derive(Debug)]
pub enum Error {
    NotConnected,
    NoDeviceFound(String),
    OpenFailed(String),
    Driver(String),
    InstrumentUnavailable(&'static str),
    NodeMissing { label: &'static str, node: &'static str },
    MeasurementNodeMissing,
    NotConfigured(&'static str),
    NotImplemented(&'static str),
    InvalidChannel(u32),
    InvalidInput(String),
    Overflow { data: Vec<u8> },
    Parity { index: usize, data: Vec<u8> },
    I2cNak { index: usize, data: Vec<u8> },
    I2cBusLockup,
    Timeout,
    Cancelled,
}

impl Error {
    /// Bytes received before a protocol fault was reported, if any.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Self::Overflow { data } |
            Self::Parity { data, .. } |
            Self::I2cNak { data, .. } =>
                Some(&data[..]),
            _ => None
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotConnected =>
                write!(f, "device not connected"),
            Self::NoDeviceFound(name) if name.is_empty() =>
                write!(f, "no connected devices found"),
            Self::NoDeviceFound(name) =>
                write!(f, "no {} connected", name),
            Self::OpenFailed(message) =>
                write!(f, "failed to open device: {}", message),
            Self::Driver(message) =>
                write!(f, "dwf: {}", message),
            Self::InstrumentUnavailable(instrument) =>
                write!(f, "{} not available on this device", instrument),
            Self::NodeMissing { label, node } =>
                write!(f, "analog I/O node {}/{} not found", label, node),
            Self::MeasurementNodeMissing =>
                write!(f, "DMM measurement node not found"),
            Self::NotConfigured(instrument) =>
                write!(f, "{} used before it was opened", instrument),
            Self::NotImplemented(what) =>
                write!(f, "{}: not implemented for this device", what),
            Self::InvalidChannel(channel) =>
                write!(f, "invalid channel {}", channel),
            Self::InvalidInput(message) =>
                write!(f, "invalid input: {}", message),
            Self::Overflow { data } =>
                write!(f, "UART buffer overflow ({} bytes received)", data.len()),
            Self::Parity { index, .. } =>
                write!(f, "UART parity error at index {}", index),
            Self::I2cNak { index, .. } =>
                write!(f, "I2C NAK at index {}", index),
            Self::I2cBusLockup =>
                write!(f, "I2C bus lockup"),
            Self::Timeout =>
                write!(f, "acquisition timed out"),
            Self::Cancelled =>
                write!(f, "acquisition cancelled"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use sys::{
    Driver,
    Handle,
};

#[cfg(feature = "hardware")]
pub use sys::dwf::DwfDriver;

pub use codes::InstrumentState;

pub use params::{
    WavegenFunction,
    TriggerSource,
    TriggerSlope,
    DmmMode,
    DigitalOutType,
    DigitalOutIdle,
    PullDirection,
    Parity,
    SpiMode,
    BitOrder,
};

pub use config::{
    ScopeConfig,
    TriggerConfig,
    LogicConfig,
    LogicTriggerConfig,
    WavegenConfig,
    PatternConfig,
    PatternRunTime,
    PatternTrigger,
    SuppliesConfig,
    UartConfig,
    SpiConfig,
    I2cConfig,
};

pub use device::{
    DeviceModel,
    DeviceInfo,
    DeviceConfig,
    EnumDevice,
};

#[cfg(feature = "hardware")]
pub type Device =
    device::Device<crate::sys::dwf::DwfDriver>;

pub use device::Device as GenericDevice;

pub use analog_io::NodeAddress;
pub use supply::{Supply, Rails};
pub use dmm::Dmm;
pub use wait::Poll;
pub use scope::Oscilloscope;
pub use logic::LogicAnalyzer;
pub use wavegen::Wavegen;
pub use pattern::PatternGenerator;
pub use static_io::StaticIo;
pub use uart::Uart;
pub use spi::Spi;
pub use i2c::I2c;
pub use hex::decode_hex;
