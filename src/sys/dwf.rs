use std::ffi::CStr;
use libc::{c_char, c_double, c_int, c_uchar, c_uint, c_void};

use crate::{Error, Result};
use super::{Driver, Handle};

#[link(name = "dwf")]
extern "C" {
    fn FDwfGetLastErrorMsg(szError: *mut c_char) -> c_int;
    fn FDwfGetVersion(szVersion: *mut c_char) -> c_int;

    fn FDwfEnum(enumfilter: c_int, pcDevice: *mut c_int) -> c_int;
    fn FDwfEnumDeviceType(idxDevice: c_int, pDeviceId: *mut c_int, pDeviceRevision: *mut c_int) -> c_int;
    fn FDwfEnumDeviceIsOpened(idxDevice: c_int, pfIsUsed: *mut c_int) -> c_int;
    fn FDwfEnumUserName(idxDevice: c_int, szUserName: *mut c_char) -> c_int;
    fn FDwfEnumDeviceName(idxDevice: c_int, szDeviceName: *mut c_char) -> c_int;
    fn FDwfEnumSN(idxDevice: c_int, szSN: *mut c_char) -> c_int;
    fn FDwfEnumConfig(idxDevice: c_int, pcConfig: *mut c_int) -> c_int;
    fn FDwfEnumConfigInfo(idxConfig: c_int, info: c_int, pv: *mut c_int) -> c_int;
    fn FDwfDeviceConfigOpen(idxDev: c_int, idxCfg: c_int, phdwf: *mut c_int) -> c_int;
    fn FDwfDeviceClose(hdwf: c_int) -> c_int;

    fn FDwfAnalogInChannelCount(hdwf: c_int, pcChannel: *mut c_int) -> c_int;
    fn FDwfAnalogInBufferSizeInfo(hdwf: c_int, pnSizeMin: *mut c_int, pnSizeMax: *mut c_int) -> c_int;
    fn FDwfAnalogInBitsInfo(hdwf: c_int, pnBits: *mut c_int) -> c_int;
    fn FDwfAnalogInChannelEnableSet(hdwf: c_int, idxChannel: c_int, fEnable: c_int) -> c_int;
    fn FDwfAnalogInChannelOffsetSet(hdwf: c_int, idxChannel: c_int, voltOffset: c_double) -> c_int;
    fn FDwfAnalogInChannelRangeSet(hdwf: c_int, idxChannel: c_int, voltsRange: c_double) -> c_int;
    fn FDwfAnalogInChannelFilterSet(hdwf: c_int, idxChannel: c_int, filter: c_int) -> c_int;
    fn FDwfAnalogInBufferSizeSet(hdwf: c_int, nSize: c_int) -> c_int;
    fn FDwfAnalogInFrequencySet(hdwf: c_int, hzFrequency: c_double) -> c_int;
    fn FDwfAnalogInConfigure(hdwf: c_int, fReconfigure: c_int, fStart: c_int) -> c_int;
    fn FDwfAnalogInStatus(hdwf: c_int, fReadData: c_int, psts: *mut c_uchar) -> c_int;
    fn FDwfAnalogInStatusSample(hdwf: c_int, idxChannel: c_int, pdVoltSample: *mut c_double) -> c_int;
    fn FDwfAnalogInStatusData(hdwf: c_int, idxChannel: c_int, rgdVoltData: *mut c_double, cdData: c_int) -> c_int;
    fn FDwfAnalogInReset(hdwf: c_int) -> c_int;
    fn FDwfAnalogInTriggerAutoTimeoutSet(hdwf: c_int, secTimeout: c_double) -> c_int;
    fn FDwfAnalogInTriggerSourceSet(hdwf: c_int, trigsrc: c_uchar) -> c_int;
    fn FDwfAnalogInTriggerChannelSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfAnalogInTriggerTypeSet(hdwf: c_int, trigtype: c_int) -> c_int;
    fn FDwfAnalogInTriggerLevelSet(hdwf: c_int, voltsLevel: c_double) -> c_int;
    fn FDwfAnalogInTriggerConditionSet(hdwf: c_int, trigcond: c_int) -> c_int;

    fn FDwfAnalogOutCount(hdwf: c_int, pcChannel: *mut c_int) -> c_int;
    fn FDwfAnalogOutNodeEnableSet(hdwf: c_int, idxChannel: c_int, node: c_int, fEnable: c_int) -> c_int;
    fn FDwfAnalogOutNodeFunctionSet(hdwf: c_int, idxChannel: c_int, node: c_int, func: c_uchar) -> c_int;
    fn FDwfAnalogOutNodeDataSet(hdwf: c_int, idxChannel: c_int, node: c_int, rgdData: *const c_double, cdData: c_int) -> c_int;
    fn FDwfAnalogOutNodeFrequencySet(hdwf: c_int, idxChannel: c_int, node: c_int, hzFrequency: c_double) -> c_int;
    fn FDwfAnalogOutNodeAmplitudeSet(hdwf: c_int, idxChannel: c_int, node: c_int, vAmplitude: c_double) -> c_int;
    fn FDwfAnalogOutNodeOffsetSet(hdwf: c_int, idxChannel: c_int, node: c_int, vOffset: c_double) -> c_int;
    fn FDwfAnalogOutNodeSymmetrySet(hdwf: c_int, idxChannel: c_int, node: c_int, percentageSymmetry: c_double) -> c_int;
    fn FDwfAnalogOutRunSet(hdwf: c_int, idxChannel: c_int, secRun: c_double) -> c_int;
    fn FDwfAnalogOutWaitSet(hdwf: c_int, idxChannel: c_int, secWait: c_double) -> c_int;
    fn FDwfAnalogOutRepeatSet(hdwf: c_int, idxChannel: c_int, cRepeat: c_int) -> c_int;
    fn FDwfAnalogOutConfigure(hdwf: c_int, idxChannel: c_int, fStart: c_int) -> c_int;
    fn FDwfAnalogOutReset(hdwf: c_int, idxChannel: c_int) -> c_int;

    fn FDwfAnalogIOChannelCount(hdwf: c_int, pnChannel: *mut c_int) -> c_int;
    fn FDwfAnalogIOChannelName(hdwf: c_int, idxChannel: c_int, szName: *mut c_char, szLabel: *mut c_char) -> c_int;
    fn FDwfAnalogIOChannelInfo(hdwf: c_int, idxChannel: c_int, pnNodes: *mut c_int) -> c_int;
    fn FDwfAnalogIOChannelNodeName(hdwf: c_int, idxChannel: c_int, idxNode: c_int, szNodeName: *mut c_char, szNodeUnits: *mut c_char) -> c_int;
    fn FDwfAnalogIOChannelNodeSet(hdwf: c_int, idxChannel: c_int, idxNode: c_int, value: c_double) -> c_int;
    fn FDwfAnalogIOChannelNodeStatus(hdwf: c_int, idxChannel: c_int, idxNode: c_int, pValue: *mut c_double) -> c_int;
    fn FDwfAnalogIOStatus(hdwf: c_int) -> c_int;
    fn FDwfAnalogIOEnableSet(hdwf: c_int, fMasterEnable: c_int) -> c_int;
    fn FDwfAnalogIOReset(hdwf: c_int) -> c_int;

    fn FDwfDigitalInBitsInfo(hdwf: c_int, pnBits: *mut c_int) -> c_int;
    fn FDwfDigitalInBufferSizeInfo(hdwf: c_int, pnSizeMax: *mut c_int) -> c_int;
    fn FDwfDigitalInInternalClockInfo(hdwf: c_int, phzFreq: *mut c_double) -> c_int;
    fn FDwfDigitalInDividerSet(hdwf: c_int, div: c_uint) -> c_int;
    fn FDwfDigitalInSampleFormatSet(hdwf: c_int, nBits: c_int) -> c_int;
    fn FDwfDigitalInBufferSizeSet(hdwf: c_int, nSize: c_int) -> c_int;
    fn FDwfDigitalInConfigure(hdwf: c_int, fReconfigure: c_int, fStart: c_int) -> c_int;
    fn FDwfDigitalInStatus(hdwf: c_int, fReadData: c_int, psts: *mut c_uchar) -> c_int;
    fn FDwfDigitalInStatusData(hdwf: c_int, rgData: *mut c_void, countOfDataBytes: c_int) -> c_int;
    fn FDwfDigitalInReset(hdwf: c_int) -> c_int;
    fn FDwfDigitalInTriggerSourceSet(hdwf: c_int, trigsrc: c_uchar) -> c_int;
    fn FDwfDigitalInTriggerPositionSet(hdwf: c_int, cSamplesAfterTrigger: c_uint) -> c_int;
    fn FDwfDigitalInTriggerPrefillSet(hdwf: c_int, cSamplesBeforeTrigger: c_uint) -> c_int;
    fn FDwfDigitalInTriggerSet(hdwf: c_int, fsLevelLow: c_uint, fsLevelHigh: c_uint, fsEdgeRise: c_uint, fsEdgeFall: c_uint) -> c_int;
    fn FDwfDigitalInTriggerResetSet(hdwf: c_int, fsLevelLow: c_uint, fsLevelHigh: c_uint, fsEdgeRise: c_uint, fsEdgeFall: c_uint) -> c_int;
    fn FDwfDigitalInTriggerAutoTimeoutSet(hdwf: c_int, secTimeout: c_double) -> c_int;
    fn FDwfDigitalInTriggerLengthSet(hdwf: c_int, secMin: c_double, secMax: c_double, idxSync: c_int) -> c_int;
    fn FDwfDigitalInTriggerCountSet(hdwf: c_int, cCount: c_int, fRestart: c_int) -> c_int;

    fn FDwfDigitalOutCount(hdwf: c_int, pcChannel: *mut c_int) -> c_int;
    fn FDwfDigitalOutInternalClockInfo(hdwf: c_int, phzFreq: *mut c_double) -> c_int;
    fn FDwfDigitalOutEnableSet(hdwf: c_int, idxChannel: c_int, fEnable: c_int) -> c_int;
    fn FDwfDigitalOutTypeSet(hdwf: c_int, idxChannel: c_int, v: c_int) -> c_int;
    fn FDwfDigitalOutDividerSet(hdwf: c_int, idxChannel: c_int, v: c_uint) -> c_int;
    fn FDwfDigitalOutIdleSet(hdwf: c_int, idxChannel: c_int, v: c_int) -> c_int;
    fn FDwfDigitalOutCounterSet(hdwf: c_int, idxChannel: c_int, vLow: c_uint, vHigh: c_uint) -> c_int;
    fn FDwfDigitalOutDataSet(hdwf: c_int, idxChannel: c_int, rgBits: *const c_void, countOfBits: c_uint) -> c_int;
    fn FDwfDigitalOutRunSet(hdwf: c_int, secRun: c_double) -> c_int;
    fn FDwfDigitalOutWaitSet(hdwf: c_int, secWait: c_double) -> c_int;
    fn FDwfDigitalOutRepeatSet(hdwf: c_int, cRepeat: c_uint) -> c_int;
    fn FDwfDigitalOutRepeatTriggerSet(hdwf: c_int, fRepeatTrigger: c_int) -> c_int;
    fn FDwfDigitalOutTriggerSourceSet(hdwf: c_int, trigsrc: c_uchar) -> c_int;
    fn FDwfDigitalOutTriggerSlopeSet(hdwf: c_int, slope: c_int) -> c_int;
    fn FDwfDigitalOutConfigure(hdwf: c_int, fStart: c_int) -> c_int;
    fn FDwfDigitalOutReset(hdwf: c_int) -> c_int;

    fn FDwfDigitalIOOutputEnableGet(hdwf: c_int, pfsOutputEnable: *mut c_uint) -> c_int;
    fn FDwfDigitalIOOutputEnableSet(hdwf: c_int, fsOutputEnable: c_uint) -> c_int;
    fn FDwfDigitalIOOutputGet(hdwf: c_int, pfsOutput: *mut c_uint) -> c_int;
    fn FDwfDigitalIOOutputSet(hdwf: c_int, fsOutput: c_uint) -> c_int;
    fn FDwfDigitalIOStatus(hdwf: c_int) -> c_int;
    fn FDwfDigitalIOInputStatus(hdwf: c_int, pfsInput: *mut c_uint) -> c_int;
    fn FDwfDigitalIOReset(hdwf: c_int) -> c_int;

    fn FDwfDigitalUartRateSet(hdwf: c_int, hz: c_double) -> c_int;
    fn FDwfDigitalUartTxSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalUartRxSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalUartBitsSet(hdwf: c_int, cBits: c_int) -> c_int;
    fn FDwfDigitalUartParitySet(hdwf: c_int, parity: c_int) -> c_int;
    fn FDwfDigitalUartStopSet(hdwf: c_int, cBit: c_double) -> c_int;
    fn FDwfDigitalUartTx(hdwf: c_int, szTx: *const c_char, cTx: c_int) -> c_int;
    fn FDwfDigitalUartRx(hdwf: c_int, szRx: *mut c_char, cRx: c_int, pcRx: *mut c_int, pParity: *mut c_int) -> c_int;
    fn FDwfDigitalUartReset(hdwf: c_int) -> c_int;

    fn FDwfDigitalSpiFrequencySet(hdwf: c_int, hz: c_double) -> c_int;
    fn FDwfDigitalSpiClockSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalSpiDataSet(hdwf: c_int, idxDQ: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalSpiIdleSet(hdwf: c_int, idxDQ: c_int, idle: c_int) -> c_int;
    fn FDwfDigitalSpiModeSet(hdwf: c_int, iMode: c_int) -> c_int;
    fn FDwfDigitalSpiOrderSet(hdwf: c_int, fMSBLSB: c_int) -> c_int;
    fn FDwfDigitalSpiSelect(hdwf: c_int, idxChannel: c_int, level: c_int) -> c_int;
    fn FDwfDigitalSpiWriteOne(hdwf: c_int, cDQ: c_int, cBitPerWord: c_int, vTX: c_uint) -> c_int;
    fn FDwfDigitalSpiRead(hdwf: c_int, cDQ: c_int, cBitPerWord: c_int, rgRX: *mut c_uchar, cRX: c_int) -> c_int;
    fn FDwfDigitalSpiWrite(hdwf: c_int, cDQ: c_int, cBitPerWord: c_int, rgTX: *const c_uchar, cTX: c_int) -> c_int;
    fn FDwfDigitalSpiWriteRead(hdwf: c_int, cDQ: c_int, cBitPerWord: c_int, rgTX: *const c_uchar, cTX: c_int, rgRX: *mut c_uchar, cRX: c_int) -> c_int;
    fn FDwfDigitalSpiReset(hdwf: c_int) -> c_int;

    fn FDwfDigitalI2cReset(hdwf: c_int) -> c_int;
    fn FDwfDigitalI2cStretchSet(hdwf: c_int, fEnable: c_int) -> c_int;
    fn FDwfDigitalI2cRateSet(hdwf: c_int, hz: c_double) -> c_int;
    fn FDwfDigitalI2cSclSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalI2cSdaSet(hdwf: c_int, idxChannel: c_int) -> c_int;
    fn FDwfDigitalI2cClear(hdwf: c_int, pfFree: *mut c_int) -> c_int;
    fn FDwfDigitalI2cRead(hdwf: c_int, adr8bits: c_uchar, rgbRx: *mut c_uchar, cRx: c_int, pNak: *mut c_int) -> c_int;
    fn FDwfDigitalI2cWrite(hdwf: c_int, adr8bits: c_uchar, rgbTx: *const c_uchar, cTx: c_int, pNak: *mut c_int) -> c_int;
    fn FDwfDigitalI2cWriteRead(hdwf: c_int, adr8bits: c_uchar, rgbTx: *const c_uchar, cTx: c_int, rgRx: *mut c_uchar, cRx: c_int, pNak: *mut c_int) -> c_int;
}

fn last_error() -> Error {
    let mut buffer = [0 as c_char; 512];
    // SAFETY: The SDK writes at most 512 bytes including the terminator.
    let message = unsafe {
        FDwfGetLastErrorMsg(buffer.as_mut_ptr());
        CStr::from_ptr(buffer.as_ptr()).to_string_lossy().into_owned()
    };
    if message.is_empty() {
        Error::Driver("unknown DWF SDK error".to_owned())
    } else {
        Error::Driver(message.trim_end().to_owned())
    }
}

fn check(result: c_int) -> Result<()> {
    if result == 0 { Err(last_error()) } else { Ok(()) }
}

fn string_from(buffer: &[c_char]) -> String {
    // SAFETY: Buffers are zero-initialized, so they are terminated even if the SDK
    // writes nothing.
    unsafe { CStr::from_ptr(buffer.as_ptr()) }.to_string_lossy().into_owned()
}

macro_rules! call {
    ($func:ident ( $( $arg:expr ),* )) => {{
        log::trace!(concat!(stringify!($func), "{:?}"), ( $( &$arg, )* ));
        // SAFETY: Arguments are plain values or pointers into live Rust buffers whose
        // lengths are passed alongside them.
        check(unsafe { $func( $( $arg ),* ) })
    }};
}

macro_rules! query {
    ($ty:ty, $func:ident ( $( $arg:expr ),* )) => {{
        let mut value: $ty = Default::default();
        call!($func( $( $arg, )* &mut value ))?;
        Ok(value)
    }};
}

/// The vendor `libdwf` shared library.
#[derive(Debug, Default)]
pub struct DwfDriver;

impl DwfDriver {
    pub fn new() -> DwfDriver {
        DwfDriver
    }
}

impl Driver for DwfDriver {
    fn version(&self) -> Result<String> {
        let mut buffer = [0 as c_char; 32];
        call!(FDwfGetVersion(buffer.as_mut_ptr()))?;
        Ok(string_from(&buffer))
    }

    fn enumerate(&self, filter: i32) -> Result<usize> {
        query!(c_int, FDwfEnum(filter)).map(|count| count.max(0) as usize)
    }

    fn enum_device_type(&self, index: usize) -> Result<(i32, i32)> {
        let (mut id, mut revision) = (0, 0);
        call!(FDwfEnumDeviceType(index as c_int, &mut id, &mut revision))?;
        Ok((id, revision))
    }

    fn enum_device_name(&self, index: usize) -> Result<String> {
        let mut buffer = [0 as c_char; 32];
        call!(FDwfEnumDeviceName(index as c_int, buffer.as_mut_ptr()))?;
        Ok(string_from(&buffer))
    }

    fn enum_user_name(&self, index: usize) -> Result<String> {
        let mut buffer = [0 as c_char; 32];
        call!(FDwfEnumUserName(index as c_int, buffer.as_mut_ptr()))?;
        Ok(string_from(&buffer))
    }

    fn enum_serial(&self, index: usize) -> Result<String> {
        let mut buffer = [0 as c_char; 32];
        call!(FDwfEnumSN(index as c_int, buffer.as_mut_ptr()))?;
        Ok(string_from(&buffer))
    }

    fn enum_device_is_opened(&self, index: usize) -> Result<bool> {
        query!(c_int, FDwfEnumDeviceIsOpened(index as c_int)).map(|opened| opened != 0)
    }

    fn enum_config_count(&self, index: usize) -> Result<usize> {
        query!(c_int, FDwfEnumConfig(index as c_int)).map(|count| count.max(0) as usize)
    }

    fn enum_config_info(&self, config: usize, info: i32) -> Result<i32> {
        query!(c_int, FDwfEnumConfigInfo(config as c_int, info))
    }

    fn device_config_open(&self, index: usize, config: usize) -> Result<Handle> {
        query!(c_int, FDwfDeviceConfigOpen(index as c_int, config as c_int)).map(Handle)
    }

    fn device_close(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDeviceClose(hdwf.0))
    }

    fn analog_in_channel_count(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfAnalogInChannelCount(hdwf.0))
    }

    fn analog_in_buffer_size_max(&self, hdwf: Handle) -> Result<i32> {
        let (mut min, mut max) = (0, 0);
        call!(FDwfAnalogInBufferSizeInfo(hdwf.0, &mut min, &mut max))?;
        Ok(max)
    }

    fn analog_in_bits(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfAnalogInBitsInfo(hdwf.0))
    }

    fn analog_in_channel_enable_set(&self, hdwf: Handle, channel: i32, enable: bool) -> Result<()> {
        call!(FDwfAnalogInChannelEnableSet(hdwf.0, channel, enable as c_int))
    }

    fn analog_in_channel_offset_set(&self, hdwf: Handle, channel: i32, volts: f64) -> Result<()> {
        call!(FDwfAnalogInChannelOffsetSet(hdwf.0, channel, volts))
    }

    fn analog_in_channel_range_set(&self, hdwf: Handle, channel: i32, volts: f64) -> Result<()> {
        call!(FDwfAnalogInChannelRangeSet(hdwf.0, channel, volts))
    }

    fn analog_in_channel_filter_set(&self, hdwf: Handle, channel: i32, filter: i32) -> Result<()> {
        call!(FDwfAnalogInChannelFilterSet(hdwf.0, channel, filter))
    }

    fn analog_in_buffer_size_set(&self, hdwf: Handle, size: i32) -> Result<()> {
        call!(FDwfAnalogInBufferSizeSet(hdwf.0, size))
    }

    fn analog_in_frequency_set(&self, hdwf: Handle, hertz: f64) -> Result<()> {
        call!(FDwfAnalogInFrequencySet(hdwf.0, hertz))
    }

    fn analog_in_configure(&self, hdwf: Handle, reconfigure: bool, start: bool) -> Result<()> {
        call!(FDwfAnalogInConfigure(hdwf.0, reconfigure as c_int, start as c_int))
    }

    fn analog_in_status(&self, hdwf: Handle, read_data: bool) -> Result<u8> {
        query!(c_uchar, FDwfAnalogInStatus(hdwf.0, read_data as c_int))
    }

    fn analog_in_status_sample(&self, hdwf: Handle, channel: i32) -> Result<f64> {
        query!(c_double, FDwfAnalogInStatusSample(hdwf.0, channel))
    }

    fn analog_in_status_data(&self, hdwf: Handle, channel: i32, data: &mut [f64]) -> Result<()> {
        call!(FDwfAnalogInStatusData(hdwf.0, channel, data.as_mut_ptr(), data.len() as c_int))
    }

    fn analog_in_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfAnalogInReset(hdwf.0))
    }

    fn analog_in_trigger_auto_timeout_set(&self, hdwf: Handle, seconds: f64) -> Result<()> {
        call!(FDwfAnalogInTriggerAutoTimeoutSet(hdwf.0, seconds))
    }

    fn analog_in_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()> {
        call!(FDwfAnalogInTriggerSourceSet(hdwf.0, source))
    }

    fn analog_in_trigger_channel_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfAnalogInTriggerChannelSet(hdwf.0, channel))
    }

    fn analog_in_trigger_type_set(&self, hdwf: Handle, trigger_type: i32) -> Result<()> {
        call!(FDwfAnalogInTriggerTypeSet(hdwf.0, trigger_type))
    }

    fn analog_in_trigger_level_set(&self, hdwf: Handle, volts: f64) -> Result<()> {
        call!(FDwfAnalogInTriggerLevelSet(hdwf.0, volts))
    }

    fn analog_in_trigger_condition_set(&self, hdwf: Handle, slope: i32) -> Result<()> {
        call!(FDwfAnalogInTriggerConditionSet(hdwf.0, slope))
    }

    fn analog_out_count(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfAnalogOutCount(hdwf.0))
    }

    fn analog_out_node_enable_set(&self, hdwf: Handle, channel: i32, node: i32, enable: bool) -> Result<()> {
        call!(FDwfAnalogOutNodeEnableSet(hdwf.0, channel, node, enable as c_int))
    }

    fn analog_out_node_function_set(&self, hdwf: Handle, channel: i32, node: i32, function: u8) -> Result<()> {
        call!(FDwfAnalogOutNodeFunctionSet(hdwf.0, channel, node, function))
    }

    fn analog_out_node_data_set(&self, hdwf: Handle, channel: i32, node: i32, data: &[f64]) -> Result<()> {
        call!(FDwfAnalogOutNodeDataSet(hdwf.0, channel, node, data.as_ptr(), data.len() as c_int))
    }

    fn analog_out_node_frequency_set(&self, hdwf: Handle, channel: i32, node: i32, hertz: f64) -> Result<()> {
        call!(FDwfAnalogOutNodeFrequencySet(hdwf.0, channel, node, hertz))
    }

    fn analog_out_node_amplitude_set(&self, hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()> {
        call!(FDwfAnalogOutNodeAmplitudeSet(hdwf.0, channel, node, volts))
    }

    fn analog_out_node_offset_set(&self, hdwf: Handle, channel: i32, node: i32, volts: f64) -> Result<()> {
        call!(FDwfAnalogOutNodeOffsetSet(hdwf.0, channel, node, volts))
    }

    fn analog_out_node_symmetry_set(&self, hdwf: Handle, channel: i32, node: i32, percent: f64) -> Result<()> {
        call!(FDwfAnalogOutNodeSymmetrySet(hdwf.0, channel, node, percent))
    }

    fn analog_out_run_set(&self, hdwf: Handle, channel: i32, seconds: f64) -> Result<()> {
        call!(FDwfAnalogOutRunSet(hdwf.0, channel, seconds))
    }

    fn analog_out_wait_set(&self, hdwf: Handle, channel: i32, seconds: f64) -> Result<()> {
        call!(FDwfAnalogOutWaitSet(hdwf.0, channel, seconds))
    }

    fn analog_out_repeat_set(&self, hdwf: Handle, channel: i32, repeat: i32) -> Result<()> {
        call!(FDwfAnalogOutRepeatSet(hdwf.0, channel, repeat))
    }

    fn analog_out_configure(&self, hdwf: Handle, channel: i32, start: bool) -> Result<()> {
        call!(FDwfAnalogOutConfigure(hdwf.0, channel, start as c_int))
    }

    fn analog_out_reset(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfAnalogOutReset(hdwf.0, channel))
    }

    fn analog_io_channel_count(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfAnalogIOChannelCount(hdwf.0))
    }

    fn analog_io_channel_name(&self, hdwf: Handle, channel: i32) -> Result<(String, String)> {
        let mut name = [0 as c_char; 32];
        let mut label = [0 as c_char; 16];
        call!(FDwfAnalogIOChannelName(hdwf.0, channel, name.as_mut_ptr(), label.as_mut_ptr()))?;
        Ok((string_from(&name), string_from(&label)))
    }

    fn analog_io_channel_info(&self, hdwf: Handle, channel: i32) -> Result<i32> {
        query!(c_int, FDwfAnalogIOChannelInfo(hdwf.0, channel))
    }

    fn analog_io_channel_node_name(&self, hdwf: Handle, channel: i32, node: i32) -> Result<(String, String)> {
        let mut name = [0 as c_char; 32];
        let mut units = [0 as c_char; 16];
        call!(FDwfAnalogIOChannelNodeName(hdwf.0, channel, node, name.as_mut_ptr(), units.as_mut_ptr()))?;
        Ok((string_from(&name), string_from(&units)))
    }

    fn analog_io_channel_node_set(&self, hdwf: Handle, channel: i32, node: i32, value: f64) -> Result<()> {
        call!(FDwfAnalogIOChannelNodeSet(hdwf.0, channel, node, value))
    }

    fn analog_io_channel_node_status(&self, hdwf: Handle, channel: i32, node: i32) -> Result<f64> {
        query!(c_double, FDwfAnalogIOChannelNodeStatus(hdwf.0, channel, node))
    }

    fn analog_io_status(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfAnalogIOStatus(hdwf.0))
    }

    fn analog_io_enable_set(&self, hdwf: Handle, enable: bool) -> Result<()> {
        call!(FDwfAnalogIOEnableSet(hdwf.0, enable as c_int))
    }

    fn analog_io_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfAnalogIOReset(hdwf.0))
    }

    fn digital_in_bits(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfDigitalInBitsInfo(hdwf.0))
    }

    fn digital_in_buffer_size_max(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfDigitalInBufferSizeInfo(hdwf.0))
    }

    fn digital_in_internal_clock(&self, hdwf: Handle) -> Result<f64> {
        query!(c_double, FDwfDigitalInInternalClockInfo(hdwf.0))
    }

    fn digital_in_divider_set(&self, hdwf: Handle, divider: u32) -> Result<()> {
        call!(FDwfDigitalInDividerSet(hdwf.0, divider))
    }

    fn digital_in_sample_format_set(&self, hdwf: Handle, bits: i32) -> Result<()> {
        call!(FDwfDigitalInSampleFormatSet(hdwf.0, bits))
    }

    fn digital_in_buffer_size_set(&self, hdwf: Handle, size: i32) -> Result<()> {
        call!(FDwfDigitalInBufferSizeSet(hdwf.0, size))
    }

    fn digital_in_configure(&self, hdwf: Handle, reconfigure: bool, start: bool) -> Result<()> {
        call!(FDwfDigitalInConfigure(hdwf.0, reconfigure as c_int, start as c_int))
    }

    fn digital_in_status(&self, hdwf: Handle, read_data: bool) -> Result<u8> {
        query!(c_uchar, FDwfDigitalInStatus(hdwf.0, read_data as c_int))
    }

    fn digital_in_status_data(&self, hdwf: Handle, data: &mut [u16]) -> Result<()> {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(data);
        call!(FDwfDigitalInStatusData(hdwf.0, bytes.as_mut_ptr() as *mut c_void, bytes.len() as c_int))
    }

    fn digital_in_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalInReset(hdwf.0))
    }

    fn digital_in_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()> {
        call!(FDwfDigitalInTriggerSourceSet(hdwf.0, source))
    }

    fn digital_in_trigger_position_set(&self, hdwf: Handle, samples: u32) -> Result<()> {
        call!(FDwfDigitalInTriggerPositionSet(hdwf.0, samples))
    }

    fn digital_in_trigger_prefill_set(&self, hdwf: Handle, samples: u32) -> Result<()> {
        call!(FDwfDigitalInTriggerPrefillSet(hdwf.0, samples))
    }

    fn digital_in_trigger_set(&self, hdwf: Handle, masks: [u32; 4]) -> Result<()> {
        let [level_low, level_high, edge_rise, edge_fall] = masks;
        call!(FDwfDigitalInTriggerSet(hdwf.0, level_low, level_high, edge_rise, edge_fall))
    }

    fn digital_in_trigger_reset_set(&self, hdwf: Handle, masks: [u32; 4]) -> Result<()> {
        let [level_low, level_high, edge_rise, edge_fall] = masks;
        call!(FDwfDigitalInTriggerResetSet(hdwf.0, level_low, level_high, edge_rise, edge_fall))
    }

    fn digital_in_trigger_auto_timeout_set(&self, hdwf: Handle, seconds: f64) -> Result<()> {
        call!(FDwfDigitalInTriggerAutoTimeoutSet(hdwf.0, seconds))
    }

    fn digital_in_trigger_length_set(&self, hdwf: Handle, min: f64, max: f64, sync: i32) -> Result<()> {
        call!(FDwfDigitalInTriggerLengthSet(hdwf.0, min, max, sync))
    }

    fn digital_in_trigger_count_set(&self, hdwf: Handle, count: i32, restart: i32) -> Result<()> {
        call!(FDwfDigitalInTriggerCountSet(hdwf.0, count, restart))
    }

    fn digital_out_count(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfDigitalOutCount(hdwf.0))
    }

    fn digital_out_internal_clock(&self, hdwf: Handle) -> Result<f64> {
        query!(c_double, FDwfDigitalOutInternalClockInfo(hdwf.0))
    }

    fn digital_out_enable_set(&self, hdwf: Handle, channel: i32, enable: bool) -> Result<()> {
        call!(FDwfDigitalOutEnableSet(hdwf.0, channel, enable as c_int))
    }

    fn digital_out_type_set(&self, hdwf: Handle, channel: i32, output_type: i32) -> Result<()> {
        call!(FDwfDigitalOutTypeSet(hdwf.0, channel, output_type))
    }

    fn digital_out_divider_set(&self, hdwf: Handle, channel: i32, divider: u32) -> Result<()> {
        call!(FDwfDigitalOutDividerSet(hdwf.0, channel, divider))
    }

    fn digital_out_idle_set(&self, hdwf: Handle, channel: i32, idle: i32) -> Result<()> {
        call!(FDwfDigitalOutIdleSet(hdwf.0, channel, idle))
    }

    fn digital_out_counter_set(&self, hdwf: Handle, channel: i32, low: u32, high: u32) -> Result<()> {
        call!(FDwfDigitalOutCounterSet(hdwf.0, channel, low, high))
    }

    fn digital_out_data_set(&self, hdwf: Handle, channel: i32, bits: &[u8], count: u32) -> Result<()> {
        call!(FDwfDigitalOutDataSet(hdwf.0, channel, bits.as_ptr() as *const c_void, count))
    }

    fn digital_out_run_set(&self, hdwf: Handle, seconds: f64) -> Result<()> {
        call!(FDwfDigitalOutRunSet(hdwf.0, seconds))
    }

    fn digital_out_wait_set(&self, hdwf: Handle, seconds: f64) -> Result<()> {
        call!(FDwfDigitalOutWaitSet(hdwf.0, seconds))
    }

    fn digital_out_repeat_set(&self, hdwf: Handle, repeat: u32) -> Result<()> {
        call!(FDwfDigitalOutRepeatSet(hdwf.0, repeat))
    }

    fn digital_out_repeat_trigger_set(&self, hdwf: Handle, enable: bool) -> Result<()> {
        call!(FDwfDigitalOutRepeatTriggerSet(hdwf.0, enable as c_int))
    }

    fn digital_out_trigger_source_set(&self, hdwf: Handle, source: u8) -> Result<()> {
        call!(FDwfDigitalOutTriggerSourceSet(hdwf.0, source))
    }

    fn digital_out_trigger_slope_set(&self, hdwf: Handle, slope: i32) -> Result<()> {
        call!(FDwfDigitalOutTriggerSlopeSet(hdwf.0, slope))
    }

    fn digital_out_configure(&self, hdwf: Handle, start: bool) -> Result<()> {
        call!(FDwfDigitalOutConfigure(hdwf.0, start as c_int))
    }

    fn digital_out_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalOutReset(hdwf.0))
    }

    fn digital_io_output_enable_get(&self, hdwf: Handle) -> Result<u32> {
        query!(c_uint, FDwfDigitalIOOutputEnableGet(hdwf.0))
    }

    fn digital_io_output_enable_set(&self, hdwf: Handle, mask: u32) -> Result<()> {
        call!(FDwfDigitalIOOutputEnableSet(hdwf.0, mask))
    }

    fn digital_io_output_get(&self, hdwf: Handle) -> Result<u32> {
        query!(c_uint, FDwfDigitalIOOutputGet(hdwf.0))
    }

    fn digital_io_output_set(&self, hdwf: Handle, mask: u32) -> Result<()> {
        call!(FDwfDigitalIOOutputSet(hdwf.0, mask))
    }

    fn digital_io_status(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalIOStatus(hdwf.0))
    }

    fn digital_io_input_status(&self, hdwf: Handle) -> Result<u32> {
        query!(c_uint, FDwfDigitalIOInputStatus(hdwf.0))
    }

    fn digital_io_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalIOReset(hdwf.0))
    }

    fn uart_rate_set(&self, hdwf: Handle, baud: f64) -> Result<()> {
        call!(FDwfDigitalUartRateSet(hdwf.0, baud))
    }

    fn uart_tx_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfDigitalUartTxSet(hdwf.0, channel))
    }

    fn uart_rx_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfDigitalUartRxSet(hdwf.0, channel))
    }

    fn uart_bits_set(&self, hdwf: Handle, bits: i32) -> Result<()> {
        call!(FDwfDigitalUartBitsSet(hdwf.0, bits))
    }

    fn uart_parity_set(&self, hdwf: Handle, parity: i32) -> Result<()> {
        call!(FDwfDigitalUartParitySet(hdwf.0, parity))
    }

    fn uart_stop_set(&self, hdwf: Handle, bits: f64) -> Result<()> {
        call!(FDwfDigitalUartStopSet(hdwf.0, bits))
    }

    fn uart_tx(&self, hdwf: Handle, data: &[u8]) -> Result<()> {
        let pointer = if data.is_empty() { std::ptr::null() } else { data.as_ptr() as *const c_char };
        call!(FDwfDigitalUartTx(hdwf.0, pointer, data.len() as c_int))
    }

    fn uart_rx(&self, hdwf: Handle, buffer: &mut [u8]) -> Result<(usize, i32)> {
        let pointer = if buffer.is_empty() {
            std::ptr::null_mut()
        } else {
            buffer.as_mut_ptr() as *mut c_char
        };
        let (mut count, mut parity) = (0, 0);
        call!(FDwfDigitalUartRx(hdwf.0, pointer, buffer.len() as c_int, &mut count, &mut parity))?;
        Ok((count.max(0) as usize, parity))
    }

    fn uart_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalUartReset(hdwf.0))
    }

    fn spi_frequency_set(&self, hdwf: Handle, hertz: f64) -> Result<()> {
        call!(FDwfDigitalSpiFrequencySet(hdwf.0, hertz))
    }

    fn spi_clock_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfDigitalSpiClockSet(hdwf.0, channel))
    }

    fn spi_data_set(&self, hdwf: Handle, dq: i32, channel: i32) -> Result<()> {
        call!(FDwfDigitalSpiDataSet(hdwf.0, dq, channel))
    }

    fn spi_idle_set(&self, hdwf: Handle, dq: i32, idle: i32) -> Result<()> {
        call!(FDwfDigitalSpiIdleSet(hdwf.0, dq, idle))
    }

    fn spi_mode_set(&self, hdwf: Handle, mode: i32) -> Result<()> {
        call!(FDwfDigitalSpiModeSet(hdwf.0, mode))
    }

    fn spi_order_set(&self, hdwf: Handle, order: i32) -> Result<()> {
        call!(FDwfDigitalSpiOrderSet(hdwf.0, order))
    }

    fn spi_select(&self, hdwf: Handle, channel: i32, level: i32) -> Result<()> {
        call!(FDwfDigitalSpiSelect(hdwf.0, channel, level))
    }

    fn spi_write_one(&self, hdwf: Handle, dq: i32, bits: i32, word: u32) -> Result<()> {
        call!(FDwfDigitalSpiWriteOne(hdwf.0, dq, bits, word))
    }

    fn spi_read(&self, hdwf: Handle, dq: i32, bits: i32, buffer: &mut [u8]) -> Result<()> {
        call!(FDwfDigitalSpiRead(hdwf.0, dq, bits, buffer.as_mut_ptr(), buffer.len() as c_int))
    }

    fn spi_write(&self, hdwf: Handle, dq: i32, bits: i32, data: &[u8]) -> Result<()> {
        call!(FDwfDigitalSpiWrite(hdwf.0, dq, bits, data.as_ptr(), data.len() as c_int))
    }

    fn spi_write_read(&self, hdwf: Handle, dq: i32, bits: i32, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        call!(FDwfDigitalSpiWriteRead(hdwf.0, dq, bits,
            tx.as_ptr(), tx.len() as c_int, rx.as_mut_ptr(), rx.len() as c_int))
    }

    fn spi_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalSpiReset(hdwf.0))
    }

    fn i2c_reset(&self, hdwf: Handle) -> Result<()> {
        call!(FDwfDigitalI2cReset(hdwf.0))
    }

    fn i2c_stretch_set(&self, hdwf: Handle, enable: bool) -> Result<()> {
        call!(FDwfDigitalI2cStretchSet(hdwf.0, enable as c_int))
    }

    fn i2c_rate_set(&self, hdwf: Handle, hertz: f64) -> Result<()> {
        call!(FDwfDigitalI2cRateSet(hdwf.0, hertz))
    }

    fn i2c_scl_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfDigitalI2cSclSet(hdwf.0, channel))
    }

    fn i2c_sda_set(&self, hdwf: Handle, channel: i32) -> Result<()> {
        call!(FDwfDigitalI2cSdaSet(hdwf.0, channel))
    }

    fn i2c_clear(&self, hdwf: Handle) -> Result<i32> {
        query!(c_int, FDwfDigitalI2cClear(hdwf.0))
    }

    fn i2c_read(&self, hdwf: Handle, address: u8, buffer: &mut [u8]) -> Result<i32> {
        query!(c_int, FDwfDigitalI2cRead(hdwf.0, address, buffer.as_mut_ptr(), buffer.len() as c_int))
    }

    fn i2c_write(&self, hdwf: Handle, address: u8, data: &[u8]) -> Result<i32> {
        let pointer = if data.is_empty() { std::ptr::null() } else { data.as_ptr() };
        query!(c_int, FDwfDigitalI2cWrite(hdwf.0, address, pointer, data.len() as c_int))
    }

    fn i2c_write_read(&self, hdwf: Handle, address: u8, tx: &[u8], rx: &mut [u8]) -> Result<i32> {
        query!(c_int, FDwfDigitalI2cWriteRead(hdwf.0, address,
            tx.as_ptr(), tx.len() as c_int, rx.as_mut_ptr(), rx.len() as c_int))
    }
}
