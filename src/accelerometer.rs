//! Accelerometer data rate, range, and sample types
//!
//! The output data rate is selected through three fields spread over two
//! registers: the ODR code in `ACC_CONFIG1`, the filter 1 bandwidth bit in
//! `ACC_CONFIG0`, and the data source in `ACC_CONFIG2`. The two filter 2
//! variants run at a fixed 100 Hz and ignore the ODR code.
//!
//! Samples are 12-bit two's complement values, little-endian across two
//! bytes per axis.

/// Output data rate and filter selection
///
/// `Bw048` variants use a filter 1 bandwidth of 0.48 x ODR, `Bw024`
/// variants 0.24 x ODR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    /// 800 Hz, bandwidth 0.48 x ODR
    Hz800Bw048,
    /// 800 Hz, bandwidth 0.24 x ODR
    Hz800Bw024,
    /// 400 Hz, bandwidth 0.48 x ODR
    Hz400Bw048,
    /// 400 Hz, bandwidth 0.24 x ODR
    Hz400Bw024,
    /// 200 Hz, bandwidth 0.48 x ODR
    Hz200Bw048,
    /// 200 Hz, bandwidth 0.24 x ODR
    Hz200Bw024,
    /// 100 Hz, bandwidth 0.48 x ODR
    Hz100Bw048,
    /// 100 Hz, bandwidth 0.24 x ODR
    Hz100Bw024,
    /// 50 Hz, bandwidth 0.48 x ODR
    Hz50Bw048,
    /// 50 Hz, bandwidth 0.24 x ODR
    Hz50Bw024,
    /// 25 Hz, bandwidth 0.48 x ODR
    Hz25Bw048,
    /// 25 Hz, bandwidth 0.24 x ODR
    Hz25Bw024,
    /// 12.5 Hz, bandwidth 0.48 x ODR
    Hz12_5Bw048,
    /// 12.5 Hz, bandwidth 0.24 x ODR
    Hz12_5Bw024,
    /// Fixed 100 Hz from filter 2
    Filter2Hz100,
    /// Fixed 100 Hz from filter 2 with an additional 1 Hz low-pass
    Filter2Hz100Lpf1Hz,
    /// The device reported a combination that maps to no known rate
    Unknown,
}

/// Data source code for filter 1 output
const DATA_SRC_FILTER1: u8 = 0;
/// Data source code for filter 2 output
const DATA_SRC_FILTER2: u8 = 1;
/// Data source code for filter 2 followed by the 1 Hz low-pass
const DATA_SRC_FILTER2_LPF: u8 = 2;

impl OutputDataRate {
    /// Filter 1 fields for this rate: `(odr_code, bandwidth_024)`
    ///
    /// Returns `None` for the filter 2 variants and [`OutputDataRate::Unknown`].
    pub const fn filter1_fields(self) -> Option<(u8, bool)> {
        match self {
            Self::Hz800Bw048 => Some((0x0B, false)),
            Self::Hz800Bw024 => Some((0x0B, true)),
            Self::Hz400Bw048 => Some((0x0A, false)),
            Self::Hz400Bw024 => Some((0x0A, true)),
            Self::Hz200Bw048 => Some((0x09, false)),
            Self::Hz200Bw024 => Some((0x09, true)),
            Self::Hz100Bw048 => Some((0x08, false)),
            Self::Hz100Bw024 => Some((0x08, true)),
            Self::Hz50Bw048 => Some((0x07, false)),
            Self::Hz50Bw024 => Some((0x07, true)),
            Self::Hz25Bw048 => Some((0x06, false)),
            Self::Hz25Bw024 => Some((0x06, true)),
            Self::Hz12_5Bw048 => Some((0x05, false)),
            Self::Hz12_5Bw024 => Some((0x05, true)),
            Self::Filter2Hz100 | Self::Filter2Hz100Lpf1Hz | Self::Unknown => None,
        }
    }

    /// Value of the `data_src_reg` field, `None` for [`OutputDataRate::Unknown`]
    pub const fn data_source(self) -> Option<u8> {
        match self {
            Self::Filter2Hz100 => Some(DATA_SRC_FILTER2),
            Self::Filter2Hz100Lpf1Hz => Some(DATA_SRC_FILTER2_LPF),
            Self::Unknown => None,
            _ => Some(DATA_SRC_FILTER1),
        }
    }

    /// Decode the rate from the data source, ODR code and bandwidth bit
    ///
    /// The data source takes precedence: filter 2 sources decode to their
    /// fixed 100 Hz variants regardless of the ODR code.
    pub const fn from_fields(data_source: u8, odr_code: u8, bandwidth_024: bool) -> Self {
        match data_source & 0x03 {
            DATA_SRC_FILTER2 => return Self::Filter2Hz100,
            DATA_SRC_FILTER2_LPF => return Self::Filter2Hz100Lpf1Hz,
            DATA_SRC_FILTER1 => {}
            _ => return Self::Unknown,
        }

        match (odr_code & 0x0F, bandwidth_024) {
            (0x0B, false) => Self::Hz800Bw048,
            (0x0B, true) => Self::Hz800Bw024,
            (0x0A, false) => Self::Hz400Bw048,
            (0x0A, true) => Self::Hz400Bw024,
            (0x09, false) => Self::Hz200Bw048,
            (0x09, true) => Self::Hz200Bw024,
            (0x08, false) => Self::Hz100Bw048,
            (0x08, true) => Self::Hz100Bw024,
            (0x07, false) => Self::Hz50Bw048,
            (0x07, true) => Self::Hz50Bw024,
            (0x06, false) => Self::Hz25Bw048,
            (0x06, true) => Self::Hz25Bw024,
            (0x05, false) => Self::Hz12_5Bw048,
            (0x05, true) => Self::Hz12_5Bw024,
            _ => Self::Unknown,
        }
    }

    /// Sample rate in Hz, `None` for [`OutputDataRate::Unknown`]
    pub const fn rate_hz(self) -> Option<f32> {
        match self {
            Self::Hz800Bw048 | Self::Hz800Bw024 => Some(800.0),
            Self::Hz400Bw048 | Self::Hz400Bw024 => Some(400.0),
            Self::Hz200Bw048 | Self::Hz200Bw024 => Some(200.0),
            Self::Hz100Bw048
            | Self::Hz100Bw024
            | Self::Filter2Hz100
            | Self::Filter2Hz100Lpf1Hz => Some(100.0),
            Self::Hz50Bw048 | Self::Hz50Bw024 => Some(50.0),
            Self::Hz25Bw048 | Self::Hz25Bw024 => Some(25.0),
            Self::Hz12_5Bw048 | Self::Hz12_5Bw024 => Some(12.5),
            Self::Unknown => None,
        }
    }

    /// Samples per millisecond, used to convert durations to sample counts
    ///
    /// [`OutputDataRate::Unknown`] uses a factor of 1.0.
    pub fn samples_per_ms(self) -> f32 {
        self.rate_hz().map_or(1.0, |hz| hz / 1000.0)
    }

    /// Raise the rate to at least 100 Hz, keeping the filter 1 bandwidth family
    ///
    /// Generic interrupts are evaluated at 100 Hz; slower rates are bumped.
    #[must_use]
    pub const fn with_generic_interrupt_floor(self) -> Self {
        match self {
            Self::Hz12_5Bw024 | Self::Hz25Bw024 | Self::Hz50Bw024 => Self::Hz100Bw024,
            Self::Hz12_5Bw048 | Self::Hz25Bw048 | Self::Hz50Bw048 => Self::Hz100Bw048,
            other => other,
        }
    }

    /// Raise the rate to at least 200 Hz, keeping the filter 1 bandwidth family
    ///
    /// Tap detection needs 200 Hz. Filter 2 variants move to
    /// [`OutputDataRate::Hz200Bw048`].
    #[must_use]
    pub const fn with_tap_floor(self) -> Self {
        match self {
            Self::Hz12_5Bw024 | Self::Hz25Bw024 | Self::Hz50Bw024 | Self::Hz100Bw024 => {
                Self::Hz200Bw024
            }
            Self::Hz12_5Bw048
            | Self::Hz25Bw048
            | Self::Hz50Bw048
            | Self::Hz100Bw048
            | Self::Filter2Hz100
            | Self::Filter2Hz100Lpf1Hz => Self::Hz200Bw048,
            other => other,
        }
    }
}

/// Accelerometer measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g (1024 LSB/g)
    G2,
    /// ±4g (512 LSB/g)
    G4,
    /// ±8g (256 LSB/g)
    G8,
    /// ±16g (128 LSB/g)
    G16,
    /// Range could not be determined
    Unknown,
}

impl AccelRange {
    /// Decode the 2-bit `acc_range` field
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }

    /// Register value for the `acc_range` field, `None` for [`AccelRange::Unknown`]
    pub const fn bits(self) -> Option<u8> {
        match self {
            Self::G2 => Some(0),
            Self::G4 => Some(1),
            Self::G8 => Some(2),
            Self::G16 => Some(3),
            Self::Unknown => None,
        }
    }

    /// Sensitivity in LSB/g
    ///
    /// [`AccelRange::Unknown`] uses a divisor of 1 so conversions stay finite.
    pub const fn lsb_per_g(self) -> f32 {
        match self {
            Self::G2 => 1024.0,
            Self::G4 => 512.0,
            Self::G8 => 256.0,
            Self::G16 => 128.0,
            Self::Unknown => 1.0,
        }
    }
}

/// Accelerometer data (raw 12-bit values sign-extended to 16 bits)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode the 6-byte data block (`X_LSB, X_MSB, Y_LSB, Y_MSB, Z_LSB, Z_MSB`)
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: decode_12bit(bytes[0], bytes[1]),
            y: decode_12bit(bytes[2], bytes[3]),
            z: decode_12bit(bytes[4], bytes[5]),
        }
    }

    /// Encode as the 6-byte register layout used by data and reference blocks
    pub const fn to_le_bytes(self) -> [u8; 6] {
        let [x0, x1] = encode_12bit(self.x);
        let [y0, y1] = encode_12bit(self.y);
        let [z0, z1] = encode_12bit(self.z);
        [x0, x1, y0, y1, z0, z1]
    }

    /// Like [`to_le_bytes()`](Self::to_le_bytes), `None` if any axis is
    /// outside the 12-bit range -2048..=2047
    pub const fn to_le_bytes_checked(self) -> Option<[u8; 6]> {
        if fits_12bit(self.x) && fits_12bit(self.y) && fits_12bit(self.z) {
            Some(self.to_le_bytes())
        } else {
            None
        }
    }

    /// Convert to g using the given range
    pub fn to_g(self, range: AccelRange) -> AccelDataG {
        let divisor = range.lsb_per_g();
        AccelDataG {
            x: f32::from(self.x) / divisor,
            y: f32::from(self.y) / divisor,
            z: f32::from(self.z) / divisor,
        }
    }
}

/// Accelerometer data in g
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

/// Decode one axis: 12-bit two's complement from an LSB/MSB pair
pub const fn decode_12bit(lsb: u8, msb: u8) -> i16 {
    let raw = ((msb as i16 & 0x0F) << 8) | lsb as i16;
    if raw > 2047 {
        raw - 4096
    } else {
        raw
    }
}

const fn fits_12bit(value: i16) -> bool {
    value >= -2048 && value <= 2047
}

/// Encode one axis as a 12-bit LSB/MSB pair
///
/// Values outside -2048..=2047 are masked to 12 bits.
pub const fn encode_12bit(value: i16) -> [u8; 2] {
    #[allow(clippy::cast_sign_loss)]
    let raw = (value as u16) & 0x0FFF;
    #[allow(clippy::cast_possible_truncation)]
    let bytes = [(raw & 0xFF) as u8, (raw >> 8) as u8];
    bytes
}
