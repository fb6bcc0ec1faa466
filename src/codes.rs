//! Numeric codes of the WaveForms SDK that do not warrant a typed parameter.

/// Enumeration filter matching every device family.
pub const ENUMFILTER_ALL: i32 = 0;

pub const DEVID_DISCOVERY: i32 = 2;
pub const DEVID_DISCOVERY2: i32 = 3;
pub const DEVID_DDISCOVERY: i32 = 4;
pub const DEVID_ADP3X50: i32 = 6;
pub const DEVID_ADP5250: i32 = 8;

// Selectors for `FDwfEnumConfigInfo`.
pub const DECI_ANALOG_IN_CHANNEL_COUNT: i32 = 1;
pub const DECI_ANALOG_OUT_CHANNEL_COUNT: i32 = 2;
pub const DECI_ANALOG_IO_CHANNEL_COUNT: i32 = 3;
pub const DECI_DIGITAL_IN_CHANNEL_COUNT: i32 = 4;
pub const DECI_DIGITAL_OUT_CHANNEL_COUNT: i32 = 5;
pub const DECI_DIGITAL_IO_CHANNEL_COUNT: i32 = 6;
pub const DECI_ANALOG_IN_BUFFER_SIZE: i32 = 7;
pub const DECI_ANALOG_OUT_BUFFER_SIZE: i32 = 8;
pub const DECI_DIGITAL_IN_BUFFER_SIZE: i32 = 9;
pub const DECI_DIGITAL_OUT_BUFFER_SIZE: i32 = 10;

/// Analog-in acquisition filter: decimate.
pub const FILTER_DECIMATE: i32 = 0;

/// Analog-in trigger type: edge.
pub const TRIGTYPE_EDGE: i32 = 0;

/// Analog-out carrier node.
pub const ANALOG_OUT_NODE_CARRIER: i32 = 0;

/// Channel index addressing every channel of an instrument at once.
pub const ALL_CHANNELS: i32 = -1;

/// State byte reported by the acquisition status calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentState {
    Ready,
    Armed,
    Done,
    Running,
    Config,
    Prefill,
    NotDone,
    Wait,
    Unknown(u8),
}

impl From<u8> for InstrumentState {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Ready,
            1 => Self::Armed,
            2 => Self::Done,
            3 => Self::Running, // also `DwfStateTriggered`
            4 => Self::Config,
            5 => Self::Prefill,
            6 => Self::NotDone,
            7 => Self::Wait,
            code => Self::Unknown(code),
        }
    }
}

impl InstrumentState {
    pub fn code(self) -> u8 {
        match self {
            Self::Ready => 0,
            Self::Armed => 1,
            Self::Done => 2,
            Self::Running => 3,
            Self::Config => 4,
            Self::Prefill => 5,
            Self::NotDone => 6,
            Self::Wait => 7,
            Self::Unknown(code) => code,
        }
    }
}
