use crate::{Error, Result};
use crate::params::DmmMode;
use crate::device::Device;
use crate::sys::Driver;
use crate::analog_io;

#[derive(Debug, Clone, Copy, Default)]
struct DmmNodes {
    channel: i32,
    enable: Option<i32>,
    mode: Option<i32>,
    range: Option<i32>,
    meas: Option<i32>,
    input: Option<i32>,
}

/// The digital multimeter of the Analog Discovery Pro models.
pub struct Dmm<'a, D: Driver> {
    device: &'a Device<D>,
    nodes: Option<DmmNodes>,
}

impl<'a, D: Driver> Dmm<'a, D> {
    pub(crate) fn new(device: &'a Device<D>) -> Self {
        Dmm { device, nodes: None }
    }

    /// Locates the multimeter and turns it on. Fails with `Error::InstrumentUnavailable` on
    /// devices without one.
    pub fn open(&mut self) -> Result<()> {
        log::debug!("dmm.open()");
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        self.nodes = None;
        let channel = analog_io::find_channel(driver, hdwf, "DMM")?
            .ok_or(Error::InstrumentUnavailable("DMM"))?;
        let node = |name| analog_io::find_channel_node(driver, hdwf, channel, name);
        let nodes = DmmNodes {
            channel,
            enable: node("Enable"),
            mode: node("Mode"),
            range: node("Range"),
            meas: node("Meas"),
            input: node("Input"),
        };
        log::trace!("dmm.open: {:?}", nodes);
        if let Some(enable) = nodes.enable {
            driver.analog_io_channel_node_set(hdwf, channel, enable, 1.0)?;
        }
        self.nodes = Some(nodes);
        Ok(())
    }

    /// Takes one reading. `range` is in the unit of `mode`; `high_impedance` selects the
    /// 10 GΩ input on the voltage ranges that have one.
    pub fn measure(&self, mode: DmmMode, range: f64, high_impedance: bool) -> Result<f64> {
        log::debug!("dmm.measure({:?}, {}, {})", mode, range, high_impedance);
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        let nodes = self.nodes.ok_or(Error::NotConfigured("DMM"))?;
        let writes = [
            (nodes.input, if high_impedance { 1.0 } else { 0.0 }),
            (nodes.mode, mode.code()),
            (nodes.range, range),
        ];
        for (node, value) in writes {
            if let Some(node) = node {
                driver.analog_io_channel_node_set(hdwf, nodes.channel, node, value)?;
            }
        }
        driver.analog_io_status(hdwf)?;
        let meas = nodes.meas.ok_or(Error::MeasurementNodeMissing)?;
        driver.analog_io_channel_node_status(hdwf, nodes.channel, meas)
    }

    pub fn close(&mut self) -> Result<()> {
        log::debug!("dmm.close()");
        let (driver, hdwf) = (self.device.driver(), self.device.handle()?);
        if let Some(DmmNodes { channel, enable: Some(enable), .. }) = self.nodes.take() {
            if let Err(err) = driver.analog_io_channel_node_set(hdwf, channel, enable, 0.0) {
                log::warn!("dmm.close: cannot disable: {}", err);
            }
        }
        driver.analog_io_reset(hdwf)
    }
}
