use crate::{Error, Result};
use crate::codes;
use crate::sys::{Driver, Handle};
use crate::analog_io;
use crate::{Supply, Dmm, Oscilloscope, LogicAnalyzer, Wavegen, PatternGenerator, StaticIo, Uart, Spi, I2c};

/// Device family, as reported by the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceModel {
    AnalogDiscovery,
    AnalogDiscovery2,
    DigitalDiscovery,
    AnalogDiscoveryPro3X50,
    AnalogDiscoveryPro5250,
    Other(i32),
}

impl DeviceModel {
    /// Looks up a model by its marketing name. "Analog Discovery Studio" shares the
    /// Analog Discovery 2 hardware.
    pub fn from_name(name: &str) -> Option<DeviceModel> {
        match name {
            "Analog Discovery"          => Some(Self::AnalogDiscovery),
            "Analog Discovery 2"        => Some(Self::AnalogDiscovery2),
            "Analog Discovery Studio"   => Some(Self::AnalogDiscovery2),
            "Digital Discovery"         => Some(Self::DigitalDiscovery),
            "Analog Discovery Pro 3X50" => Some(Self::AnalogDiscoveryPro3X50),
            "Analog Discovery Pro 5250" => Some(Self::AnalogDiscoveryPro5250),
            _ => None,
        }
    }

    pub fn from_id(id: i32) -> DeviceModel {
        match id {
            codes::DEVID_DISCOVERY   => Self::AnalogDiscovery,
            codes::DEVID_DISCOVERY2  => Self::AnalogDiscovery2,
            codes::DEVID_DDISCOVERY  => Self::DigitalDiscovery,
            codes::DEVID_ADP3X50     => Self::AnalogDiscoveryPro3X50,
            codes::DEVID_ADP5250     => Self::AnalogDiscoveryPro5250,
            id => Self::Other(id),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::AnalogDiscovery        => codes::DEVID_DISCOVERY,
            Self::AnalogDiscovery2       => codes::DEVID_DISCOVERY2,
            Self::DigitalDiscovery       => codes::DEVID_DDISCOVERY,
            Self::AnalogDiscoveryPro3X50 => codes::DEVID_ADP3X50,
            Self::AnalogDiscoveryPro5250 => codes::DEVID_ADP5250,
            Self::Other(id) => id,
        }
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::AnalogDiscovery        => Some("Analog Discovery"),
            Self::AnalogDiscovery2       => Some("Analog Discovery 2"),
            Self::DigitalDiscovery       => Some("Digital Discovery"),
            Self::AnalogDiscoveryPro3X50 => Some("Analog Discovery Pro 3X50"),
            Self::AnalogDiscoveryPro5250 => Some("Analog Discovery Pro 5250"),
            Self::Other(_) => None,
        }
    }

    /// Maps a DIO line number as printed on the device to the bit index used by the digital
    /// instruments. The Digital Discovery numbers its lines from 24.
    pub fn dio_channel(self, channel: u32) -> Result<u32> {
        match self {
            Self::DigitalDiscovery =>
                channel.checked_sub(24).ok_or(Error::InvalidChannel(channel)),
            _ => Ok(channel),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub model: DeviceModel,
    pub name: String,
    pub serial: String,
    pub version: String,
    pub analog_in_channels: u32,
    pub analog_out_channels: u32,
    pub digital_in_channels: u32,
    pub digital_out_channels: u32,
    pub max_analog_in_buffer_size: usize,
    /// ADC resolution in bits.
    pub analog_in_bits: u32,
}

/// A device visible to the enumeration; it may be in use by another process.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDevice {
    pub index: usize,
    pub model: DeviceModel,
    pub name: String,
    pub user_name: String,
    pub serial: String,
    pub opened: bool,
}

/// One of the channel count and buffer size trade-offs a device can be opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceConfig {
    pub index: usize,
    pub analog_in_channels: u32,
    pub analog_out_channels: u32,
    pub analog_io_channels: u32,
    pub digital_in_channels: u32,
    pub digital_out_channels: u32,
    pub digital_io_channels: u32,
    pub analog_in_buffer_size: usize,
    pub analog_out_buffer_size: usize,
    pub digital_in_buffer_size: usize,
    pub digital_out_buffer_size: usize,
}

/// A session with one device. Instruments borrow the session, so it cannot be closed while any
/// of them is alive.
#[derive(Debug)]
pub struct Device<D: Driver> {
    driver: D,
    handle: Handle,
    info: Option<DeviceInfo>,
}

#[cfg(feature = "hardware")]
impl Device<crate::sys::dwf::DwfDriver> {
    pub fn new() -> Device<crate::sys::dwf::DwfDriver> {
        Device::with_driver(crate::sys::dwf::DwfDriver::new())
    }
}

fn count(value: i32) -> u32 {
    value.max(0) as u32
}

/// Converts a 1-based analog channel number to the SDK's 0-based index.
pub(crate) fn channel_index(channel: u32) -> Result<i32> {
    match channel.checked_sub(1) {
        Some(index) if index <= i32::MAX as u32 => Ok(index as i32),
        _ => Err(Error::InvalidChannel(channel)),
    }
}

pub(crate) fn check_frequency(hertz: f64) -> Result<f64> {
    if hertz > 0.0 && hertz.is_finite() {
        Ok(hertz)
    } else {
        Err(Error::InvalidInput(format!("frequency must be positive, got {}", hertz)))
    }
}

impl<D: Driver> Device<D> {
    pub fn with_driver(driver: D) -> Device<D> {
        Device { driver, handle: Handle(0), info: None }
    }

    pub fn version(&self) -> Result<String> {
        self.driver.version()
    }

    pub fn enumerate(&self) -> Result<Vec<EnumDevice>> {
        let count = self.driver.enumerate(codes::ENUMFILTER_ALL)?;
        let mut devices = Vec::with_capacity(count);
        for index in 0..count {
            let (id, _revision) = self.driver.enum_device_type(index)?;
            devices.push(EnumDevice {
                index,
                model: DeviceModel::from_id(id),
                name: self.driver.enum_device_name(index)?,
                user_name: self.driver.enum_user_name(index)?,
                serial: self.driver.enum_serial(index)?,
                opened: self.driver.enum_device_is_opened(index)?,
            });
        }
        log::debug!("enumerate() = {:?}", devices);
        Ok(devices)
    }

    /// Lists the configurations of the enumerated device at `device_index`.
    pub fn configs(&self, device_index: usize) -> Result<Vec<DeviceConfig>> {
        self.driver.enumerate(codes::ENUMFILTER_ALL)?;
        let config_count = self.driver.enum_config_count(device_index)?;
        let mut configs = Vec::with_capacity(config_count);
        for index in 0..config_count {
            let info = |selector| self.driver.enum_config_info(index, selector).map(count);
            configs.push(DeviceConfig {
                index,
                analog_in_channels:      info(codes::DECI_ANALOG_IN_CHANNEL_COUNT)?,
                analog_out_channels:     info(codes::DECI_ANALOG_OUT_CHANNEL_COUNT)?,
                analog_io_channels:      info(codes::DECI_ANALOG_IO_CHANNEL_COUNT)?,
                digital_in_channels:     info(codes::DECI_DIGITAL_IN_CHANNEL_COUNT)?,
                digital_out_channels:    info(codes::DECI_DIGITAL_OUT_CHANNEL_COUNT)?,
                digital_io_channels:     info(codes::DECI_DIGITAL_IO_CHANNEL_COUNT)?,
                analog_in_buffer_size:   info(codes::DECI_ANALOG_IN_BUFFER_SIZE)? as usize,
                analog_out_buffer_size:  info(codes::DECI_ANALOG_OUT_BUFFER_SIZE)? as usize,
                digital_in_buffer_size:  info(codes::DECI_DIGITAL_IN_BUFFER_SIZE)? as usize,
                digital_out_buffer_size: info(codes::DECI_DIGITAL_OUT_BUFFER_SIZE)? as usize,
            });
        }
        Ok(configs)
    }

    /// Opens the first available device called `name` (any device if `name` is empty or not a
    /// known model) using configuration `config`. An open session is closed first.
    pub fn open(&mut self, name: &str, config: usize) -> Result<&DeviceInfo> {
        log::debug!("open({:?}, {})", name, config);
        self.close()?;

        let filter = DeviceModel::from_name(name).map(DeviceModel::id).unwrap_or(codes::ENUMFILTER_ALL);
        let count = self.driver.enumerate(filter)?;
        if count == 0 {
            return Err(Error::NoDeviceFound(name.to_owned()))
        }

        let mut last_error = String::from("no device could be opened");
        let mut opened = None;
        for index in 0..count {
            match self.driver.device_config_open(index, config) {
                Ok(handle) if handle.is_valid() => {
                    opened = Some((index, handle));
                    break
                }
                Ok(_) => (),
                Err(err) => {
                    log::debug!("open: device {} refused: {}", index, err);
                    last_error = match err {
                        Error::Driver(message) => message,
                        err => err.to_string(),
                    }
                }
            }
        }
        let (index, handle) = opened.ok_or(Error::OpenFailed(last_error))?;
        Ok(self.attach(index, handle))
    }

    /// Opens the device at `index` in the unfiltered enumeration, as listed by `enumerate`,
    /// using configuration `config`. An open session is closed first.
    pub fn open_index(&mut self, index: usize, config: usize) -> Result<&DeviceInfo> {
        log::debug!("open_index({}, {})", index, config);
        self.close()?;

        let count = self.driver.enumerate(codes::ENUMFILTER_ALL)?;
        if count == 0 {
            return Err(Error::NoDeviceFound(String::new()))
        }
        if index >= count {
            return Err(Error::InvalidInput(format!("device index {} out of range 0..{}", index, count)))
        }
        let handle = match self.driver.device_config_open(index, config) {
            Ok(handle) if handle.is_valid() => handle,
            Ok(_) => return Err(Error::OpenFailed(String::from("no device could be opened"))),
            Err(Error::Driver(message)) => return Err(Error::OpenFailed(message)),
            Err(err) => return Err(Error::OpenFailed(err.to_string())),
        };
        Ok(self.attach(index, handle))
    }

    fn attach(&mut self, index: usize, handle: Handle) -> &DeviceInfo {
        self.handle = handle;
        let info = self.read_info(index);
        log::debug!("open: {:?}", info);
        self.info.insert(info)
    }

    fn read_info(&self, index: usize) -> DeviceInfo {
        fn tolerate<T: Default>(what: &str, result: Result<T>) -> T {
            result.unwrap_or_else(|err| {
                log::warn!("cannot read {}: {}", what, err);
                T::default()
            })
        }

        let (driver, hdwf) = (&self.driver, self.handle);
        let model = match driver.enum_device_type(index) {
            Ok((id, _revision)) => DeviceModel::from_id(id),
            Err(err) => {
                log::warn!("cannot read device type: {}", err);
                DeviceModel::Other(0)
            }
        };
        let name = match model.name() {
            Some(name) => name.to_owned(),
            None => tolerate("device name", driver.enum_device_name(index)),
        };
        DeviceInfo {
            model,
            name,
            serial: tolerate("serial number", driver.enum_serial(index)),
            version: tolerate("SDK version", driver.version()),
            analog_in_channels: count(tolerate("analog in channels", driver.analog_in_channel_count(hdwf))),
            analog_out_channels: count(tolerate("analog out channels", driver.analog_out_count(hdwf))),
            digital_in_channels: count(tolerate("digital in channels", driver.digital_in_bits(hdwf))),
            digital_out_channels: count(tolerate("digital out channels", driver.digital_out_count(hdwf))),
            max_analog_in_buffer_size:
                count(tolerate("analog in buffer size", driver.analog_in_buffer_size_max(hdwf))) as usize,
            analog_in_bits: count(tolerate("ADC resolution", driver.analog_in_bits(hdwf))),
        }
    }

    /// Releases the device. Closing a closed session does nothing.
    pub fn close(&mut self) -> Result<()> {
        if !self.handle.is_valid() {
            return Ok(())
        }
        log::debug!("close()");
        let handle = std::mem::replace(&mut self.handle, Handle(0));
        self.info = None;
        self.driver.device_close(handle)
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_valid()
    }

    pub fn info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }

    pub fn model(&self) -> Option<DeviceModel> {
        self.info.as_ref().map(|info| info.model)
    }

    /// Board temperature in °C, or `0.0` on devices without a temperature sensor.
    pub fn temperature(&self) -> Result<f64> {
        let hdwf = self.handle()?;
        match analog_io::find_node(&self.driver, hdwf, &["System"], "Temp")? {
            Some(address) => {
                self.driver.analog_io_status(hdwf)?;
                analog_io::read_node(&self.driver, hdwf, address)
            }
            None => Ok(0.0)
        }
    }

    pub(crate) fn driver(&self) -> &D {
        &self.driver
    }

    pub(crate) fn handle(&self) -> Result<Handle> {
        if self.handle.is_valid() { Ok(self.handle) } else { Err(Error::NotConnected) }
    }

    pub(crate) fn device_info(&self) -> Result<&DeviceInfo> {
        self.info.as_ref().ok_or(Error::NotConnected)
    }

    pub(crate) fn dio_channel(&self, channel: u32) -> Result<u32> {
        self.device_info()?.model.dio_channel(channel)
    }

    pub fn supply(&self) -> Supply<'_, D> {
        Supply::new(self)
    }

    pub fn dmm(&self) -> Dmm<'_, D> {
        Dmm::new(self)
    }

    pub fn scope(&self) -> Oscilloscope<'_, D> {
        Oscilloscope::new(self)
    }

    pub fn logic(&self) -> LogicAnalyzer<'_, D> {
        LogicAnalyzer::new(self)
    }

    pub fn wavegen(&self) -> Wavegen<'_, D> {
        Wavegen::new(self)
    }

    pub fn pattern(&self) -> PatternGenerator<'_, D> {
        PatternGenerator::new(self)
    }

    pub fn static_io(&self) -> StaticIo<'_, D> {
        StaticIo::new(self)
    }

    pub fn uart(&self) -> Uart<'_, D> {
        Uart::new(self)
    }

    pub fn spi(&self) -> Spi<'_, D> {
        Spi::new(self)
    }

    pub fn i2c(&self) -> I2c<'_, D> {
        I2c::new(self)
    }
}

impl<D: Driver> Drop for Device<D> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            log::warn!("failed to close device: {}", err);
        }
    }
}
