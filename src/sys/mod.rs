//! The native WaveForms SDK call surface the instruments are written against.
//!
//! Every call is synchronous and fallible. A failing call reports the SDK's last error message
//! verbatim through `Error::Driver`.

use crate::Result;

/// Native device handle. The SDK never hands out `0` for an open device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub i32);

impl Handle {
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

pub trait Driver {
    fn version(&self) -> Result<String>;

    // Enumeration, valid without an open handle.
    fn enumerate(&self, filter: i32) -> Result<usize>;
    fn enum_device_type(&self, index: usize) -> Result<(i32, i32)>;
    fn enum_device_name(&self, index: usize) -> Result<String>;
    fn enum_user_name(&self, index: usize) -> Result<String>;
    fn enum_serial(&self, index: usize) -> Result<String>;
    fn enum_device_is_opened(&self, index: usize) -> Result<bool>;
    fn enum_config_count(&self, index: usize) -> Result<usize>;
    fn enum_config_info(&self, config: usize, info: i32) -> Result<i32>;

    fn device_config_open(&self, index: usize, config: usize) -> Result<Handle>;
    fn device_close(&self, hdwf: Handle) -> Result<()>;

    // Analog in (oscilloscope).
    fn analog_in_channel_count(&self, hdwf: Handle) -> Result<i32>;
    fn analog_in_buffer_size_max(&self, hdwf: Handle) -> Result<i32>;
    fn analog_in_bits(&self, hdwf: Handle) -> Result<i32>;
    fn analog_in_channel_enable_set(&self, hdwf: Handle, channel: i32, enable: bool) -> Result<()>;
    fn analog_in_channel_offset_set(&self, hdwf: Handle, channel: i32, volts: f64) -> Result<()>;
    fn analog_in_channel_range_set(&self, hdwf: Handle, channel: i32, volts: f64) -> Result<()>;
    fn analog_in_channel_filter_set(&self, hdwf: Handle, channel: i32, filter: i32) -> Result<()>;
    fn analog_in_buffer_size_set(&self, hdwf: Handle, size: i32) -> Result<()>;
    fn analog_in_frequency_set(&self, hdwf: Handle, hertz: f64) -> Result<()>;
    fn analog_in_configure(&self, hdwf: Handle, reconfigure: bool, start: bool) -> Result<()>;
    fn analog_in_status(&self, hdwf: Handle, read_data: bool) -> Result<u8>;
    fn analog_in_status_sample(&self, hdwf: Handle, channel: i32) -> Result<f64>;
    fn analog_in_status_data(&self, hdwf: Handle, channel: i32, data: &mut [f64]) -> Result<()>;
    fn analog_in_reset(&self, hdwf: Handle) -> Result<()>;
    fn analog_in_trigger_auto_timeout_set(&self, hdwf: Handle, seconds: f64) -> Result<()>;
    fn analog_in_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()>;
    fn analog_in_trigger_channel_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    fn analog_in_trigger_type_set(&self, hdwf: Handle, trigger_type: i32) -> Result<()>;
    fn analog_in_trigger_level_set(&self, hdwf: Handle, volts: f64) -> Result<()>;
    fn analog_in_trigger_condition_set(&self, hdwf: Handle, slope: i32) -> Result<()>;

    // Analog out (waveform generator).
    fn analog_out_count(&self, hdwf: Handle) -> Result<i32>;
    fn analog_out_node_enable_set(&self, hdwf: Handle, channel: i32, node: i32, enable: bool) -> Result<()>;
    fn analog_out_node_function_set(&self, hdwf: Handle, channel: i32, node: i32, function: u8) -> Result<()>;
    fn analog_out_node_data_set(&self, hdwf: Handle, channel: i32, node: i32, data: &[f64]) -> Result<()>;
    fn analog_out_node_frequency_set(&self, hdwf: Handle, channel: i32, node: i32, hertz: f64) -> Result<()>;
    fn analog_out_node_amplitude_set(&self, hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()>;
    fn analog_out_node_offset_set(&self, hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()>;
    fn analog_out_node_symmetry_set(&self, hdwf: Handle, channel: i32, node: i32, percent: f64) -> Result<()>;
    fn analog_out_run_set(&self, hdwf: Handle, channel: i32, seconds: f64) -> Result<()>;
    fn analog_out_wait_set(&self, hdwf: Handle, channel: i32, seconds: f64) -> Result<()>;
    fn analog_out_repeat_set(&self, hdwf: Handle, channel: i32, repeat: i32) -> Result<()>;
    fn analog_out_configure(&self, hdwf: Handle, channel: i32, start: bool) -> Result<()>;
    fn analog_out_reset(&self, hdwf: Handle, channel: i32) -> Result<()>;

    // Analog I/O (supplies, DMM, system monitor).
    fn analog_io_channel_count(&self, hdwf: Handle) -> Result<i32>;
    /// Returns `(name, label)`.
    fn analog_io_channel_name(&self, hdwf: Handle, channel: i32) -> Result<(String, String)>;
    fn analog_io_channel_info(&self, hdwf: Handle, channel: i32) -> Result<i32>;
    /// Returns `(name, units)`.
    fn analog_io_channel_node_name(&self, hdwf: Handle, channel: i32, node: i32) -> Result<(String, String)>;
    fn analog_io_channel_node_set(&self, hdwf: Handle, channel: i32, node: i32, value: f64) -> Result<()>;
    fn analog_io_channel_node_status(&self, hdwf: Handle, channel: i32, node: i32) -> Result<f64>;
    fn analog_io_status(&self, hdwf: Handle) -> Result<()>;
    fn analog_io_enable_set(&self, hdwf: Handle, enable: bool) -> Result<()>;
    fn analog_io_reset(&self, hdwf: Handle) -> Result<()>;

    // Digital in (logic analyzer).
    fn digital_in_bits(&self, hdwf: Handle) -> Result<i32>;
    fn digital_in_buffer_size_max(&self, hdwf: Handle) -> Result<i32>;
    fn digital_in_internal_clock(&self, hdwf: Handle) -> Result<f64>;
    fn digital_in_divider_set(&self, hdwf: Handle, divider: u32) -> Result<()>;
    fn digital_in_sample_format_set(&self, hdwf: Handle, bits: i32) -> Result<()>;
    fn digital_in_buffer_size_set(&self, hdwf: Handle, size: i32) -> Result<()>;
    fn digital_in_configure(&self, hdwf: Handle, reconfigure: bool, start: bool) -> Result<()>;
    fn digital_in_status(&self, hdwf: Handle, read_data: bool) -> Result<u8>;
    fn digital_in_status_data(&self, hdwf: Handle, data: &mut [u16]) -> Result<()>;
    fn digital_in_reset(&self, hdwf: Handle) -> Result<()>;
    fn digital_in_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()>;
    fn digital_in_trigger_position_set(&self, hdwf: Handle, samples: u32) -> Result<()>;
    fn digital_in_trigger_prefill_set(&self, hdwf: Handle, samples: u32) -> Result<()>;
    /// Masks are `(level_low, level_high, edge_rise, edge_fall)`.
    fn digital_in_trigger_set(&self, hdwf: Handle, masks: [u32; 4]) -> Result<()>;
    fn digital_in_trigger_reset_set(&self, hdwf: Handle, masks: [u32; 4]) -> Result<()>;
    fn digital_in_trigger_auto_timeout_set(&self, hdwf: Handle, seconds: f64) -> Result<()>;
    fn digital_in_trigger_length_set(&self, hdwf: Handle, min: f64, max: f64, sync: i32) -> Result<()>;
    fn digital_in_trigger_count_set(&self, hdwf: Handle, count: i32, restart: i32) -> Result<()>;

    // Digital out (pattern generator).
    fn digital_out_count(&self, hdwf: Handle) -> Result<i32>;
    fn digital_out_internal_clock(&self, hdwf: Handle) -> Result<f64>;
    fn digital_out_enable_set(&self, hdwf: Handle, channel: i32, enable: bool) -> Result<()>;
    fn digital_out_type_set(&self, hdwf: Handle, channel: i32, output_type: i32) -> Result<()>;
    fn digital_out_divider_set(&self, hdwf: Handle, channel: i32, divider: u32) -> Result<()>;
    fn digital_out_idle_set(&self, hdwf: Handle, channel: i32, idle: i32) -> Result<()>;
    fn digital_out_counter_set(&self, hdwf: Handle, channel: i32, low: u32, high: u32) -> Result<()>;
    /// `bits` is packed LSB first; `count` is the number of valid bits.
    fn digital_out_data_set(&self, hdwf: Handle, channel: i32, bits: &[u8], count: u32) -> Result<()>;
    fn digital_out_run_set(&self, hdwf: Handle, seconds: f64) -> Result<()>;
    fn digital_out_wait_set(&self, hdwf: Handle, seconds: f64) -> Result<()>;
    fn digital_out_repeat_set(&self, hdwf: Handle, repeat: u32) -> Result<()>;
    fn digital_out_repeat_trigger_set(&self, hdwf: Handle, enable: bool) -> Result<()>;
    fn digital_out_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()>;
    fn digital_out_trigger_slope_set(&self, hdwf: Handle, slope: i32) -> Result<()>;
    fn digital_out_configure(&self, hdwf: Handle, start: bool) -> Result<()>;
    fn digital_out_reset(&self, hdwf: Handle) -> Result<()>;

    // Digital I/O (static lines).
    fn digital_io_output_enable_get(&self, hdwf: Handle) -> Result<u32>;
    fn digital_io_output_enable_set(&self, hdwf: Handle, mask: u32) -> Result<()>;
    fn digital_io_output_get(&self, hdwf: Handle) -> Result<u32>;
    fn digital_io_output_set(&self, hdwf: Handle, mask: u32) -> Result<()>;
    fn digital_io_status(&self, hdwf: Handle) -> Result<()>;
    fn digital_io_input_status(&self, hdwf: Handle) -> Result<u32>;
    fn digital_io_reset(&self, hdwf: Handle) -> Result<()>;

    // UART.
    fn uart_rate_set(&self, hdwf: Handle, baud: f64) -> Result<()>;
    fn uart_tx_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    fn uart_rx_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    fn uart_bits_set(&self, hdwf: Handle, bits: i32) -> Result<()>;
    fn uart_parity_set(&self, hdwf: Handle, parity: i32) -> Result<()>;
    fn uart_stop_set(&self, hdwf: Handle, bits: f64) -> Result<()>;
    fn uart_tx(&self, hdwf: Handle, data: &[u8]) -> Result<()>;
    /// Returns `(received, parity)`; a negative parity signals overflow, a positive one
    /// the position of a parity fault.
    fn uart_rx(&self, hdwf: Handle, buffer: &mut [u8]) -> Result<(usize, i32)>;
    fn uart_reset(&self, hdwf: Handle) -> Result<()>;

    // SPI.
    fn spi_frequency_set(&self, hdwf: Handle, hertz: f64) -> Result<()>;
    fn spi_clock_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    fn spi_data_set(&self, hdwf: Handle, dq: i32, channel: i32) -> Result<()>;
    fn spi_idle_set(&self, hdwf: Handle, dq: i32, idle: i32) -> Result<()>;
    fn spi_mode_set(&self, hdwf: Handle, mode: i32) -> Result<()>;
    fn spi_order_set(&self, hdwf: Handle, order: i32) -> Result<()>;
    fn spi_select(&self, hdwf: Handle, channel: i32, level: i32) -> Result<()>;
    fn spi_write_one(&self, hdwf: Handle, dq: i32, bits: i32, word: u32) -> Result<()>;
    fn spi_read(&self, hdwf: Handle, dq: i32, bits: i32, buffer: &mut [u8]) -> Result<()>;
    fn spi_write(&self, hdwf: Handle, dq: i32, bits: i32, data: &[u8]) -> Result<()>;
    fn spi_write_read(&self, hdwf: Handle, dq: i32, bits: i32, tx: &[u8], rx: &mut [u8]) -> Result<()>;
    fn spi_reset(&self, hdwf: Handle) -> Result<()>;

    // I2C. Addresses are 8-bit, with the R/W slot in bit 0. Transfers return the NAK index,
    // `0` meaning every byte was acknowledged.
    fn i2c_reset(&self, hdwf: Handle) -> Result<()>;
    fn i2c_stretch_set(&self, hdwf: Handle, enable: bool) -> Result<()>;
    fn i2c_rate_set(&self, hdwf: Handle, hertz: f64) -> Result<()>;
    fn i2c_scl_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    fn i2c_sda_set(&self, hdwf: Handle, channel: i32) -> Result<()>;
    /// Returns `0` when the bus is held low.
    fn i2c_clear(&self, hdwf: Handle) -> Result<i32>;
    fn i2c_read(&self, hdwf: Handle, address: u8, buffer: &mut [u8]) -> Result<i32>;
    fn i2c_write(&self, hdwf: Handle, address: u8, data: &[u8]) -> Result<i32>;
    fn i2c_write_read(&self, hdwf: Handle, address: u8, tx: &[u8], rx: &mut [u8]) -> Result<i32>;
}

#[cfg(feature = "hardware")]
pub mod dwf;

#[cfg(test)]
pub mod mock;
