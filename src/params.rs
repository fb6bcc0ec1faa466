//! Typed parameters of the instruments and their SDK codes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavegenFunction {
    DC,
    #[default]
    Sine,
    Square,
    Triangle,
    RampUp,
    RampDown,
    Noise,
    Pulse,
    Trapezium,
    SinePower,
    Custom,
}

impl WavegenFunction {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::DC        => 0,
            Self::Sine      => 1,
            Self::Square    => 2,
            Self::Triangle  => 3,
            Self::RampUp    => 4,
            Self::RampDown  => 5,
            Self::Noise     => 6,
            Self::Pulse     => 7,
            Self::Trapezium => 8,
            Self::SinePower => 9,
            Self::Custom    => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerSource {
    #[default]
    None,
    PC,
    DetectorAnalogIn,
    DetectorDigitalIn,
    AnalogIn,
    DigitalIn,
    DigitalOut,
    AnalogOut1,
    AnalogOut2,
    AnalogOut3,
    AnalogOut4,
    External1,
    External2,
    External3,
    External4,
}

impl TriggerSource {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::None              => 0,
            Self::PC                => 1,
            Self::DetectorAnalogIn  => 2,
            Self::DetectorDigitalIn => 3,
            Self::AnalogIn          => 4,
            Self::DigitalIn         => 5,
            Self::DigitalOut        => 6,
            Self::AnalogOut1        => 7,
            Self::AnalogOut2        => 8,
            Self::AnalogOut3        => 9,
            Self::AnalogOut4        => 10,
            Self::External1         => 11,
            Self::External2         => 12,
            Self::External3         => 13,
            Self::External4         => 14,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerSlope {
    #[default]
    Rise,
    Fall,
    Either,
}

impl TriggerSlope {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Rise   => 0,
            Self::Fall   => 1,
            Self::Either => 2,
        }
    }

    pub(crate) fn from_rising(rising: bool) -> Self {
        if rising { Self::Rise } else { Self::Fall }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DmmMode {
    ACVoltage,
    #[default]
    DCVoltage,
    ACCurrent,
    DCCurrent,
    Resistance,
    Continuity,
    Diode,
    Temperature,
    ACLowCurrent,
    DCLowCurrent,
    ACHighCurrent,
    DCHighCurrent,
}

impl DmmMode {
    pub(crate) fn code(self) -> f64 {
        (match self {
            Self::ACVoltage     => 0,
            Self::DCVoltage     => 1,
            Self::ACCurrent     => 2,
            Self::DCCurrent     => 3,
            Self::Resistance    => 4,
            Self::Continuity    => 5,
            Self::Diode         => 6,
            Self::Temperature   => 7,
            Self::ACLowCurrent  => 8,
            Self::DCLowCurrent  => 9,
            Self::ACHighCurrent => 10,
            Self::DCHighCurrent => 11,
        }) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitalOutType {
    #[default]
    Pulse,
    Custom,
    Random,
}

impl DigitalOutType {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Pulse  => 0,
            Self::Custom => 1,
            Self::Random => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitalOutIdle {
    #[default]
    Init,
    Low,
    High,
    HighZ,
}

impl DigitalOutIdle {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Init  => 0,
            Self::Low   => 1,
            Self::High  => 2,
            Self::HighZ => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullDirection {
    Up,
    Down,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl Parity {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Odd  => 1,
            Self::Even => 2,
        }
    }
}

/// Clock polarity and phase, as the conventional mode number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpiMode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl SpiMode {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Mode0 => 0,
            Self::Mode1 => 1,
            Self::Mode2 => 2,
            Self::Mode3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}

impl BitOrder {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::MsbFirst => 1,
            Self::LsbFirst => 0,
        }
    }
}
