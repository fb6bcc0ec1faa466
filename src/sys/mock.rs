//! Simulated device for unit tests. Every call is appended to a log that tests assert against.

use std::cell::{RefCell, RefMut};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::{Error, Result};
use super::{Driver, Handle};

#[derive(Debug, Clone)]
pub struct MockDevice {
    pub name: String,
    pub user_name: String,
    pub serial: String,
    pub id: i32,
    pub opened: bool,
    /// `device_config_open` fails for this device when set.
    pub refuses_open: bool,
}

#[derive(Debug, Clone)]
pub struct MockNode {
    pub name: String,
    pub units: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct MockChannel {
    pub name: String,
    pub label: String,
    pub nodes: Vec<MockNode>,
}

impl MockChannel {
    pub fn new(label: &str, nodes: &[&str]) -> MockChannel {
        MockChannel {
            name: format!("{} channel", label),
            label: label.to_owned(),
            nodes: nodes.iter().map(|&name| MockNode {
                name: name.to_owned(),
                units: String::new(),
                value: 0.0,
            }).collect(),
        }
    }
}

#[derive(Debug)]
pub struct MockState {
    pub version: String,
    pub devices: Vec<MockDevice>,
    /// Indices into `devices` selected by the last `enumerate` call.
    pub enumerated: Vec<usize>,
    /// `FDwfEnumConfigInfo` values per configuration, indexed by selector minus one.
    pub configs: Vec<[i32; 10]>,

    pub analog_in_channels: i32,
    pub analog_in_buffer_max: i32,
    pub analog_in_bits: i32,
    pub analog_out_channels: i32,
    pub analog_io: Vec<MockChannel>,

    pub digital_in_bits: i32,
    pub digital_in_buffer_max: i32,
    pub digital_in_clock: f64,
    pub digital_out_channels: i32,
    pub digital_out_clock: f64,

    /// Acquisition status bytes handed out in order; `Done` once exhausted.
    pub status: VecDeque<u8>,
    pub analog_samples: Vec<f64>,
    pub analog_sample: f64,
    pub digital_samples: Vec<u16>,

    pub dio_output_enable: u32,
    pub dio_output: u32,
    pub dio_input: u32,

    pub uart_rx: Vec<u8>,
    pub uart_parity: i32,

    pub spi_rx: Vec<u8>,

    /// 7-bit addresses that acknowledge.
    pub i2c_acks: HashSet<u8>,
    /// NAK index reported by every transfer when set, regardless of address.
    pub i2c_nak: Option<i32>,
    pub i2c_free: i32,
    pub i2c_rx: Vec<u8>,

    /// Names of calls that fail.
    pub failing: HashSet<&'static str>,
    /// Names of calls that fail once they have succeeded the given number of times.
    pub failing_after: HashMap<&'static str, usize>,
    pub calls: Vec<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            version: "3.20.1".to_owned(),
            devices: vec![MockDevice {
                name: "Analog Discovery 2".to_owned(),
                user_name: "Analog Discovery 2".to_owned(),
                serial: "SN:210321ABCDEF".to_owned(),
                id: crate::codes::DEVID_DISCOVERY2,
                opened: false,
                refuses_open: false,
            }],
            enumerated: Vec::new(),
            configs: vec![
                [2, 2, 5, 16, 16, 16, 8192, 4096, 4096, 1024],
                [2, 2, 5, 16, 16, 16, 16384, 1024, 1024, 1024],
            ],

            analog_in_channels: 2,
            analog_in_buffer_max: 8192,
            analog_in_bits: 14,
            analog_out_channels: 2,
            analog_io: vec![
                MockChannel::new("V+", &["Enable", "Voltage"]),
                MockChannel::new("V-", &["Enable", "Voltage"]),
                MockChannel::new("USB", &["Voltage", "Current"]),
            ],

            digital_in_bits: 16,
            digital_in_buffer_max: 4096,
            digital_in_clock: 100e6,
            digital_out_channels: 16,
            digital_out_clock: 100e6,

            status: VecDeque::new(),
            analog_samples: Vec::new(),
            analog_sample: 0.0,
            digital_samples: Vec::new(),

            dio_output_enable: 0,
            dio_output: 0,
            dio_input: 0,

            uart_rx: Vec::new(),
            uart_parity: 0,

            spi_rx: Vec::new(),

            i2c_acks: HashSet::new(),
            i2c_nak: None,
            i2c_free: 1,
            i2c_rx: Vec::new(),

            failing: HashSet::new(),
            failing_after: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockDriver {
    state: RefCell<MockState>,
}

macro_rules! log_call {
    ($self:ident, $name:literal $(, $arg:expr )* ) => {{
        let args: Vec<String> = vec![$( format!("{:?}", $arg) ),*];
        $self.record($name, args.join(", "))?;
    }};
}

impl MockDriver {
    pub fn new() -> MockDriver {
        MockDriver::default()
    }

    pub fn state(&self) -> RefMut<'_, MockState> {
        self.state.borrow_mut()
    }

    /// Replaces the analog I/O table.
    pub fn with_analog_io(self, channels: Vec<MockChannel>) -> MockDriver {
        self.state().analog_io = channels;
        self
    }

    pub fn with_device(self, name: &str, id: i32) -> MockDriver {
        self.state().devices = vec![MockDevice {
            name: name.to_owned(),
            user_name: name.to_owned(),
            serial: "SN:210018ABCDEF".to_owned(),
            id,
            opened: false,
            refuses_open: false,
        }];
        self
    }

    pub fn failing(self, call: &'static str) -> MockDriver {
        self.state().failing.insert(call);
        self
    }

    /// Lets the first `successes` calls to `call` through and fails the rest.
    pub fn failing_after(self, call: &'static str, successes: usize) -> MockDriver {
        self.state().failing_after.insert(call, successes);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Calls to `name`, in order, with their argument lists.
    pub fn calls_to(&self, name: &str) -> Vec<String> {
        let prefix = format!("{}(", name);
        self.state.borrow().calls.iter()
            .filter(|call| call.starts_with(&prefix))
            .cloned()
            .collect()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.state.borrow().calls.iter().position(|c| c == call)
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear()
    }

    /// Value of the named node of the first channel with `label`.
    pub fn node_value(&self, label: &str, node: &str) -> Option<f64> {
        let state = self.state.borrow();
        let channel = state.analog_io.iter().find(|channel| channel.label == label)?;
        channel.nodes.iter().find(|n| n.name == node).map(|n| n.value)
    }

    fn record(&self, name: &'static str, args: String) -> Result<()> {
        let mut state = self.state();
        let prefix = format!("{}(", name);
        let previous = state.calls.iter().filter(|call| call.starts_with(&prefix)).count();
        state.calls.push(format!("{}({})", name, args));
        let exhausted = state.failing_after.get(name).is_some_and(|&successes| previous >= successes);
        if state.failing.contains(name) || exhausted {
            Err(Error::Driver(format!("{} failed", name)))
        } else {
            Ok(())
        }
    }

    fn next_status(&self) -> u8 {
        self.state().status.pop_front().unwrap_or(2)
    }
}

impl Driver for MockDriver {
    fn version(&self) -> Result<String> {
        log_call!(self, "version");
        Ok(self.state.borrow().version.clone())
    }

    fn enumerate(&self, filter: i32) -> Result<usize> {
        log_call!(self, "enumerate", filter);
        let mut state = self.state();
        let enumerated: Vec<usize> = state.devices.iter().enumerate()
            .filter(|(_, device)| filter == 0 || device.id == filter)
            .map(|(index, _)| index)
            .collect();
        state.enumerated = enumerated;
        Ok(state.enumerated.len())
    }

    fn enum_device_type(&self, index: usize) -> Result<(i32, i32)> {
        log_call!(self, "enum_device_type", index);
        self.with_enumerated(index, |device| (device.id, 1))
    }

    fn enum_device_name(&self, index: usize) -> Result<String> {
        log_call!(self, "enum_device_name", index);
        self.with_enumerated(index, |device| device.name.clone())
    }

    fn enum_user_name(&self, index: usize) -> Result<String> {
        log_call!(self, "enum_user_name", index);
        self.with_enumerated(index, |device| device.user_name.clone())
    }

    fn enum_serial(&self, index: usize) -> Result<String> {
        log_call!(self, "enum_serial", index);
        self.with_enumerated(index, |device| device.serial.clone())
    }

    fn enum_device_is_opened(&self, index: usize) -> Result<bool> {
        log_call!(self, "enum_device_is_opened", index);
        self.with_enumerated(index, |device| device.opened)
    }

    fn enum_config_count(&self, index: usize) -> Result<usize> {
        log_call!(self, "enum_config_count", index);
        Ok(self.state.borrow().configs.len())
    }

    fn enum_config_info(&self, config: usize, info: i32) -> Result<i32> {
        log_call!(self, "enum_config_info", config, info);
        let state = self.state.borrow();
        state.configs.get(config)
            .and_then(|values| values.get((info - 1) as usize).copied())
            .ok_or_else(|| Error::Driver("invalid configuration".to_owned()))
    }

    fn device_config_open(&self, index: usize, config: usize) -> Result<Handle> {
        log_call!(self, "device_config_open", index, config);
        let mut state = self.state();
        let device_index = *state.enumerated.get(index)
            .ok_or_else(|| Error::Driver("device index out of range".to_owned()))?;
        let device = &mut state.devices[device_index];
        if device.refuses_open || device.opened {
            return Err(Error::Driver("device is busy".to_owned()))
        }
        device.opened = true;
        Ok(Handle(device_index as i32 + 1))
    }

    fn device_close(&self, hdwf: Handle) -> Result<()> {
        log_call!(self, "device_close", hdwf.0);
        if let Some(device) = self.state().devices.get_mut((hdwf.0 - 1) as usize) {
            device.opened = false;
        }
        Ok(())
    }

    fn analog_in_channel_count(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "analog_in_channel_count");
        Ok(self.state.borrow().analog_in_channels)
    }

    fn analog_in_buffer_size_max(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "analog_in_buffer_size_max");
        Ok(self.state.borrow().analog_in_buffer_max)
    }

    fn analog_in_bits(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "analog_in_bits");
        Ok(self.state.borrow().analog_in_bits)
    }

    fn analog_in_channel_enable_set(&self, _hdwf: Handle, channel: i32, enable: bool) -> Result<()> {
        log_call!(self, "analog_in_channel_enable_set", channel, enable);
        Ok(())
    }

    fn analog_in_channel_offset_set(&self, _hdwf: Handle, channel: i32, volts: f64) -> Result<()> {
        log_call!(self, "analog_in_channel_offset_set", channel, volts);
        Ok(())
    }

    fn analog_in_channel_range_set(&self, _hdwf: Handle, channel: i32, volts: f64) -> Result<()> {
        log_call!(self, "analog_in_channel_range_set", channel, volts);
        Ok(())
    }

    fn analog_in_channel_filter_set(&self, _hdwf: Handle, channel: i32, filter: i32) -> Result<()> {
        log_call!(self, "analog_in_channel_filter_set", channel, filter);
        Ok(())
    }

    fn analog_in_buffer_size_set(&self, _hdwf: Handle, size: i32) -> Result<()> {
        log_call!(self, "analog_in_buffer_size_set", size);
        Ok(())
    }

    fn analog_in_frequency_set(&self, _hdwf: Handle, hertz: f64) -> Result<()> {
        log_call!(self, "analog_in_frequency_set", hertz);
        Ok(())
    }

    fn analog_in_configure(&self, _hdwf: Handle, reconfigure: bool, start: bool) -> Result<()> {
        log_call!(self, "analog_in_configure", reconfigure, start);
        Ok(())
    }

    fn analog_in_status(&self, _hdwf: Handle, read_data: bool) -> Result<u8> {
        log_call!(self, "analog_in_status", read_data);
        Ok(self.next_status())
    }

    fn analog_in_status_sample(&self, _hdwf: Handle, channel: i32) -> Result<f64> {
        log_call!(self, "analog_in_status_sample", channel);
        Ok(self.state.borrow().analog_sample)
    }

    fn analog_in_status_data(&self, _hdwf: Handle, channel: i32, data: &mut [f64]) -> Result<()> {
        log_call!(self, "analog_in_status_data", channel, data.len());
        let state = self.state.borrow();
        for (sample, &value) in data.iter_mut().zip(state.analog_samples.iter()) {
            *sample = value;
        }
        Ok(())
    }

    fn analog_in_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "analog_in_reset");
        Ok(())
    }

    fn analog_in_trigger_auto_timeout_set(&self, _hdwf: Handle, seconds: f64) -> Result<()> {
        log_call!(self, "analog_in_trigger_auto_timeout_set", seconds);
        Ok(())
    }

    fn analog_in_trigger_source_set(&self, _hdwf: Handle, source: u8) -> Result<()> {
        log_call!(self, "analog_in_trigger_source_set", source);
        Ok(())
    }

    fn analog_in_trigger_channel_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "analog_in_trigger_channel_set", channel);
        Ok(())
    }

    fn analog_in_trigger_type_set(&self, _hdwf: Handle, trigger_type: i32) -> Result<()> {
        log_call!(self, "analog_in_trigger_type_set", trigger_type);
        Ok(())
    }

    fn analog_in_trigger_level_set(&self, _hdwf: Handle, volts: f64) -> Result<()> {
        log_call!(self, "analog_in_trigger_level_set", volts);
        Ok(())
    }

    fn analog_in_trigger_condition_set(&self, _hdwf: Handle, slope: i32) -> Result<()> {
        log_call!(self, "analog_in_trigger_condition_set", slope);
        Ok(())
    }

    fn analog_out_count(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "analog_out_count");
        Ok(self.state.borrow().analog_out_channels)
    }

    fn analog_out_node_enable_set(&self, _hdwf: Handle, channel: i32, node: i32, enable: bool) -> Result<()> {
        log_call!(self, "analog_out_node_enable_set", channel, node, enable);
        Ok(())
    }

    fn analog_out_node_function_set(&self, _hdwf: Handle, channel: i32, node: i32, function: u8) -> Result<()> {
        log_call!(self, "analog_out_node_function_set", channel, node, function);
        Ok(())
    }

    fn analog_out_node_data_set(&self, _hdwf: Handle, channel: i32, node: i32, data: &[f64]) -> Result<()> {
        log_call!(self, "analog_out_node_data_set", channel, node, data.len());
        Ok(())
    }

    fn analog_out_node_frequency_set(&self, _hdwf: Handle, channel: i32, node: i32, hertz: f64) -> Result<()> {
        log_call!(self, "analog_out_node_frequency_set", channel, node, hertz);
        Ok(())
    }

    fn analog_out_node_amplitude_set(&self, _hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()> {
        log_call!(self, "analog_out_node_amplitude_set", channel, node, volts);
        Ok(())
    }

    fn analog_out_node_offset_set(&self, _hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()> {
        log_call!(self, "analog_out_node_offset_set", channel, node, volts);
        Ok(())
    }

    fn analog_out_node_symmetry_set(&self, _hdwf: Handle, channel: i32, node: i32, percent: f64) -> Result<()> {
        log_call!(self, "analog_out_node_symmetry_set", channel, node, percent);
        Ok(())
    }

    fn analog_out_run_set(&self, _hdwf: Handle, channel: i32, seconds: f64) -> Result<()> {
        log_call!(self, "analog_out_run_set", channel, seconds);
        Ok(())
    }

    fn analog_out_wait_set(&self, _hdwf: Handle, channel: i32, seconds: f64) -> Result<()> {
        log_call!(self, "analog_out_wait_set", channel, seconds);
        Ok(())
    }

    fn analog_out_repeat_set(&self, _hdwf: Handle, channel: i32, repeat: i32) -> Result<()> {
        log_call!(self, "analog_out_repeat_set", channel, repeat);
        Ok(())
    }

    fn analog_out_configure(&self, _hdwf: Handle, channel: i32, start: bool) -> Result<()> {
        log_call!(self, "analog_out_configure", channel, start);
        Ok(())
    }

    fn analog_out_reset(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "analog_out_reset", channel);
        Ok(())
    }

    fn analog_io_channel_count(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "analog_io_channel_count");
        Ok(self.state.borrow().analog_io.len() as i32)
    }

    fn analog_io_channel_name(&self, _hdwf: Handle, channel: i32) -> Result<(String, String)> {
        log_call!(self, "analog_io_channel_name", channel);
        self.with_channel(channel, |channel| (channel.name.clone(), channel.label.clone()))
    }

    fn analog_io_channel_info(&self, _hdwf: Handle, channel: i32) -> Result<i32> {
        log_call!(self, "analog_io_channel_info", channel);
        self.with_channel(channel, |channel| channel.nodes.len() as i32)
    }

    fn analog_io_channel_node_name(&self, _hdwf: Handle, channel: i32, node: i32) -> Result<(String, String)> {
        log_call!(self, "analog_io_channel_node_name", channel, node);
        self.with_node(channel, node, |node| (node.name.clone(), node.units.clone()))
    }

    fn analog_io_channel_node_set(&self, _hdwf: Handle, channel: i32, node: i32, value: f64) -> Result<()> {
        log_call!(self, "analog_io_channel_node_set", channel, node, value);
        self.with_node(channel, node, |node| node.value = value)
    }

    fn analog_io_channel_node_status(&self, _hdwf: Handle, channel: i32, node: i32) -> Result<f64> {
        log_call!(self, "analog_io_channel_node_status", channel, node);
        self.with_node(channel, node, |node| node.value)
    }

    fn analog_io_status(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "analog_io_status");
        Ok(())
    }

    fn analog_io_enable_set(&self, _hdwf: Handle, enable: bool) -> Result<()> {
        log_call!(self, "analog_io_enable_set", enable);
        Ok(())
    }

    fn analog_io_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "analog_io_reset");
        Ok(())
    }

    fn digital_in_bits(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "digital_in_bits");
        Ok(self.state.borrow().digital_in_bits)
    }

    fn digital_in_buffer_size_max(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "digital_in_buffer_size_max");
        Ok(self.state.borrow().digital_in_buffer_max)
    }

    fn digital_in_internal_clock(&self, _hdwf: Handle) -> Result<f64> {
        log_call!(self, "digital_in_internal_clock");
        Ok(self.state.borrow().digital_in_clock)
    }

    fn digital_in_divider_set(&self, _hdwf: Handle, divider: u32) -> Result<()> {
        log_call!(self, "digital_in_divider_set", divider);
        Ok(())
    }

    fn digital_in_sample_format_set(&self, _hdwf: Handle, bits: i32) -> Result<()> {
        log_call!(self, "digital_in_sample_format_set", bits);
        Ok(())
    }

    fn digital_in_buffer_size_set(&self, _hdwf: Handle, size: i32) -> Result<()> {
        log_call!(self, "digital_in_buffer_size_set", size);
        Ok(())
    }

    fn digital_in_configure(&self, _hdwf: Handle, reconfigure: bool, start: bool) -> Result<()> {
        log_call!(self, "digital_in_configure", reconfigure, start);
        Ok(())
    }

    fn digital_in_status(&self, _hdwf: Handle, read_data: bool) -> Result<u8> {
        log_call!(self, "digital_in_status", read_data);
        Ok(self.next_status())
    }

    fn digital_in_status_data(&self, _hdwf: Handle, data: &mut [u16]) -> Result<()> {
        log_call!(self, "digital_in_status_data", data.len());
        let state = self.state.borrow();
        for (sample, &value) in data.iter_mut().zip(state.digital_samples.iter()) {
            *sample = value;
        }
        Ok(())
    }

    fn digital_in_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "digital_in_reset");
        Ok(())
    }

    fn digital_in_trigger_source_set(&self, _hdwf: Handle, source: u8) -> Result<()> {
        log_call!(self, "digital_in_trigger_source_set", source);
        Ok(())
    }

    fn digital_in_trigger_position_set(&self, _hdwf: Handle, samples: u32) -> Result<()> {
        log_call!(self, "digital_in_trigger_position_set", samples);
        Ok(())
    }

    fn digital_in_trigger_prefill_set(&self, _hdwf: Handle, samples: u32) -> Result<()> {
        log_call!(self, "digital_in_trigger_prefill_set", samples);
        Ok(())
    }

    fn digital_in_trigger_set(&self, _hdwf: Handle, masks: [u32; 4]) -> Result<()> {
        log_call!(self, "digital_in_trigger_set", masks);
        Ok(())
    }

    fn digital_in_trigger_reset_set(&self, _hdwf: Handle, masks: [u32; 4]) -> Result<()> {
        log_call!(self, "digital_in_trigger_reset_set", masks);
        Ok(())
    }

    fn digital_in_trigger_auto_timeout_set(&self, _hdwf: Handle, seconds: f64) -> Result<()> {
        log_call!(self, "digital_in_trigger_auto_timeout_set", seconds);
        Ok(())
    }

    fn digital_in_trigger_length_set(&self, _hdwf: Handle, min: f64, max: f64, sync: i32) -> Result<()> {
        log_call!(self, "digital_in_trigger_length_set", min, max, sync);
        Ok(())
    }

    fn digital_in_trigger_count_set(&self, _hdwf: Handle, count: i32, restart: i32) -> Result<()> {
        log_call!(self, "digital_in_trigger_count_set", count, restart);
        Ok(())
    }

    fn digital_out_count(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "digital_out_count");
        Ok(self.state.borrow().digital_out_channels)
    }

    fn digital_out_internal_clock(&self, _hdwf: Handle) -> Result<f64> {
        log_call!(self, "digital_out_internal_clock");
        Ok(self.state.borrow().digital_out_clock)
    }

    fn digital_out_enable_set(&self, _hdwf: Handle, channel: i32, enable: bool) -> Result<()> {
        log_call!(self, "digital_out_enable_set", channel, enable);
        Ok(())
    }

    fn digital_out_type_set(&self, _hdwf: Handle, channel: i32, output_type: i32) -> Result<()> {
        log_call!(self, "digital_out_type_set", channel, output_type);
        Ok(())
    }

    fn digital_out_divider_set(&self, _hdwf: Handle, channel: i32, divider: u32) -> Result<()> {
        log_call!(self, "digital_out_divider_set", channel, divider);
        Ok(())
    }

    fn digital_out_idle_set(&self, _hdwf: Handle, channel: i32, idle: i32) -> Result<()> {
        log_call!(self, "digital_out_idle_set", channel, idle);
        Ok(())
    }

    fn digital_out_counter_set(&self, _hdwf: Handle, channel: i32, low: u32, high: u32) -> Result<()> {
        log_call!(self, "digital_out_counter_set", channel, low, high);
        Ok(())
    }

    fn digital_out_data_set(&self, _hdwf: Handle, channel: i32, bits: &[u8], count: u32) -> Result<()> {
        log_call!(self, "digital_out_data_set", channel, bits, count);
        Ok(())
    }

    fn digital_out_run_set(&self, _hdwf: Handle, seconds: f64) -> Result<()> {
        log_call!(self, "digital_out_run_set", seconds);
        Ok(())
    }

    fn digital_out_wait_set(&self, _hdwf: Handle, seconds: f64) -> Result<()> {
        log_call!(self, "digital_out_wait_set", seconds);
        Ok(())
    }

    fn digital_out_repeat_set(&self, _hdwf: Handle, repeat: u32) -> Result<()> {
        log_call!(self, "digital_out_repeat_set", repeat);
        Ok(())
    }

    fn digital_out_repeat_trigger_set(&self, _hdwf: Handle, enable: bool) -> Result<()> {
        log_call!(self, "digital_out_repeat_trigger_set", enable);
        Ok(())
    }

    fn digital_out_trigger_source_set(&self, _hdwf: Handle, source: u8) -> Result<()> {
        log_call!(self, "digital_out_trigger_source_set", source);
        Ok(())
    }

    fn digital_out_trigger_slope_set(&self, _hdwf: Handle, slope: i32) -> Result<()> {
        log_call!(self, "digital_out_trigger_slope_set", slope);
        Ok(())
    }

    fn digital_out_configure(&self, _hdwf: Handle, start: bool) -> Result<()> {
        log_call!(self, "digital_out_configure", start);
        Ok(())
    }

    fn digital_out_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "digital_out_reset");
        Ok(())
    }

    fn digital_io_output_enable_get(&self, _hdwf: Handle) -> Result<u32> {
        log_call!(self, "digital_io_output_enable_get");
        Ok(self.state.borrow().dio_output_enable)
    }

    fn digital_io_output_enable_set(&self, _hdwf: Handle, mask: u32) -> Result<()> {
        log_call!(self, "digital_io_output_enable_set", mask);
        self.state().dio_output_enable = mask;
        Ok(())
    }

    fn digital_io_output_get(&self, _hdwf: Handle) -> Result<u32> {
        log_call!(self, "digital_io_output_get");
        Ok(self.state.borrow().dio_output)
    }

    fn digital_io_output_set(&self, _hdwf: Handle, mask: u32) -> Result<()> {
        log_call!(self, "digital_io_output_set", mask);
        self.state().dio_output = mask;
        Ok(())
    }

    fn digital_io_status(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "digital_io_status");
        Ok(())
    }

    fn digital_io_input_status(&self, _hdwf: Handle) -> Result<u32> {
        log_call!(self, "digital_io_input_status");
        Ok(self.state.borrow().dio_input)
    }

    fn digital_io_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "digital_io_reset");
        Ok(())
    }

    fn uart_rate_set(&self, _hdwf: Handle, baud: f64) -> Result<()> {
        log_call!(self, "uart_rate_set", baud);
        Ok(())
    }

    fn uart_tx_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "uart_tx_set", channel);
        Ok(())
    }

    fn uart_rx_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "uart_rx_set", channel);
        Ok(())
    }

    fn uart_bits_set(&self, _hdwf: Handle, bits: i32) -> Result<()> {
        log_call!(self, "uart_bits_set", bits);
        Ok(())
    }

    fn uart_parity_set(&self, _hdwf: Handle, parity: i32) -> Result<()> {
        log_call!(self, "uart_parity_set", parity);
        Ok(())
    }

    fn uart_stop_set(&self, _hdwf: Handle, bits: f64) -> Result<()> {
        log_call!(self, "uart_stop_set", bits);
        Ok(())
    }

    fn uart_tx(&self, _hdwf: Handle, data: &[u8]) -> Result<()> {
        log_call!(self, "uart_tx", data);
        Ok(())
    }

    fn uart_rx(&self, _hdwf: Handle, buffer: &mut [u8]) -> Result<(usize, i32)> {
        log_call!(self, "uart_rx", buffer.len());
        if buffer.is_empty() {
            return Ok((0, 0))
        }
        let mut state = self.state();
        let count = state.uart_rx.len().min(buffer.len());
        buffer[..count].copy_from_slice(&state.uart_rx[..count]);
        state.uart_rx.drain(..count);
        Ok((count, state.uart_parity))
    }

    fn uart_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "uart_reset");
        Ok(())
    }

    fn spi_frequency_set(&self, _hdwf: Handle, hertz: f64) -> Result<()> {
        log_call!(self, "spi_frequency_set", hertz);
        Ok(())
    }

    fn spi_clock_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "spi_clock_set", channel);
        Ok(())
    }

    fn spi_data_set(&self, _hdwf: Handle, dq: i32, channel: i32) -> Result<()> {
        log_call!(self, "spi_data_set", dq, channel);
        Ok(())
    }

    fn spi_idle_set(&self, _hdwf: Handle, dq: i32, idle: i32) -> Result<()> {
        log_call!(self, "spi_idle_set", dq, idle);
        Ok(())
    }

    fn spi_mode_set(&self, _hdwf: Handle, mode: i32) -> Result<()> {
        log_call!(self, "spi_mode_set", mode);
        Ok(())
    }

    fn spi_order_set(&self, _hdwf: Handle, order: i32) -> Result<()> {
        log_call!(self, "spi_order_set", order);
        Ok(())
    }

    fn spi_select(&self, _hdwf: Handle, channel: i32, level: i32) -> Result<()> {
        log_call!(self, "spi_select", channel, level);
        Ok(())
    }

    fn spi_write_one(&self, _hdwf: Handle, dq: i32, bits: i32, word: u32) -> Result<()> {
        log_call!(self, "spi_write_one", dq, bits, word);
        Ok(())
    }

    fn spi_read(&self, _hdwf: Handle, dq: i32, bits: i32, buffer: &mut [u8]) -> Result<()> {
        log_call!(self, "spi_read", dq, bits, buffer.len());
        let state = self.state.borrow();
        for (byte, &value) in buffer.iter_mut().zip(state.spi_rx.iter()) {
            *byte = value;
        }
        Ok(())
    }

    fn spi_write(&self, _hdwf: Handle, dq: i32, bits: i32, data: &[u8]) -> Result<()> {
        log_call!(self, "spi_write", dq, bits, data);
        Ok(())
    }

    fn spi_write_read(&self, _hdwf: Handle, dq: i32, bits: i32, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        log_call!(self, "spi_write_read", dq, bits, tx, rx.len());
        let state = self.state.borrow();
        for (byte, &value) in rx.iter_mut().zip(state.spi_rx.iter()) {
            *byte = value;
        }
        Ok(())
    }

    fn spi_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "spi_reset");
        Ok(())
    }

    fn i2c_reset(&self, _hdwf: Handle) -> Result<()> {
        log_call!(self, "i2c_reset");
        Ok(())
    }

    fn i2c_stretch_set(&self, _hdwf: Handle, enable: bool) -> Result<()> {
        log_call!(self, "i2c_stretch_set", enable);
        Ok(())
    }

    fn i2c_rate_set(&self, _hdwf: Handle, hertz: f64) -> Result<()> {
        log_call!(self, "i2c_rate_set", hertz);
        Ok(())
    }

    fn i2c_scl_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "i2c_scl_set", channel);
        Ok(())
    }

    fn i2c_sda_set(&self, _hdwf: Handle, channel: i32) -> Result<()> {
        log_call!(self, "i2c_sda_set", channel);
        Ok(())
    }

    fn i2c_clear(&self, _hdwf: Handle) -> Result<i32> {
        log_call!(self, "i2c_clear");
        Ok(self.state.borrow().i2c_free)
    }

    fn i2c_read(&self, _hdwf: Handle, address: u8, buffer: &mut [u8]) -> Result<i32> {
        log_call!(self, "i2c_read", address, buffer.len());
        let state = self.state.borrow();
        for (byte, &value) in buffer.iter_mut().zip(state.i2c_rx.iter()) {
            *byte = value;
        }
        Ok(self.nak_for(&state, address))
    }

    fn i2c_write(&self, _hdwf: Handle, address: u8, data: &[u8]) -> Result<i32> {
        log_call!(self, "i2c_write", address, data);
        let state = self.state.borrow();
        Ok(self.nak_for(&state, address))
    }

    fn i2c_write_read(&self, _hdwf: Handle, address: u8, tx: &[u8], rx: &mut [u8]) -> Result<i32> {
        log_call!(self, "i2c_write_read", address, tx, rx.len());
        let state = self.state.borrow();
        for (byte, &value) in rx.iter_mut().zip(state.i2c_rx.iter()) {
            *byte = value;
        }
        Ok(self.nak_for(&state, address))
    }
}

impl MockDriver {
    fn with_enumerated<T>(&self, index: usize, f: impl FnOnce(&MockDevice) -> T) -> Result<T> {
        let state = self.state.borrow();
        state.enumerated.get(index)
            .and_then(|&device| state.devices.get(device))
            .map(f)
            .ok_or_else(|| Error::Driver("device index out of range".to_owned()))
    }

    fn with_channel<T>(&self, channel: i32, f: impl FnOnce(&MockChannel) -> T) -> Result<T> {
        let state = self.state.borrow();
        usize::try_from(channel).ok()
            .and_then(|channel| state.analog_io.get(channel))
            .map(f)
            .ok_or_else(|| Error::Driver("channel index out of range".to_owned()))
    }

    fn with_node<T>(&self, channel: i32, node: i32, f: impl FnOnce(&mut MockNode) -> T) -> Result<T> {
        let mut state = self.state();
        usize::try_from(channel).ok()
            .and_then(|channel| state.analog_io.get_mut(channel))
            .and_then(|channel| usize::try_from(node).ok().and_then(|node| channel.nodes.get_mut(node)))
            .map(f)
            .ok_or_else(|| Error::Driver("node index out of range".to_owned()))
    }

    fn nak_for(&self, state: &MockState, address: u8) -> i32 {
        match state.i2c_nak {
            Some(nak) => nak,
            None if state.i2c_acks.contains(&(address >> 1)) => 0,
            None => 1,
        }
    }
}
