//! Power modes and auto low-power transitions
//!
//! The BMA400 has three power tiers selected in `ACC_CONFIG0`:
//! - **Sleep**: no measurements, register access only
//! - **Low power**: duty-cycled at a fixed 25 Hz, four oversampling tiers
//! - **Normal**: continuous sampling at the configured ODR, four oversampling tiers
//!
//! Within a tier, a higher oversampling ratio trades current for noise.
//! The chip can also drop into low-power mode on its own after a data ready
//! event, on generic interrupt 1, or after a programmable timeout.
//!
//! # Example
//!
//! ```ignore
//! # use bma400::{Bma400Driver, power::{AutoLowPowerConfig, AutoLowPowerTimeoutMode, PowerMode}};
//! # let mut accel: Bma400Driver<_> = todo!();
//! accel.set_power_mode(PowerMode::Normal)?;
//!
//! // Fall back to low power after 100 ms without activity
//! let config = AutoLowPowerConfig {
//!     timeout_mode: AutoLowPowerTimeoutMode::OnTimeout,
//!     timeout_ms: 100.0,
//!     ..Default::default()
//! };
//! accel.configure_auto_low_power(&config)?;
//! # Ok::<(), bma400::Error<()>>(())
//! ```

/// Duration of one auto low-power timeout tick in milliseconds
pub const AUTO_LOW_POWER_TICK_MS: f32 = 2.5;

/// Largest timeout tick count the 12-bit threshold field can hold
pub const AUTO_LOW_POWER_MAX_TICKS: u16 = 0x0FFF;

const SELECTOR_SLEEP: u8 = 0;
const SELECTOR_LOW_POWER: u8 = 1;
const SELECTOR_NORMAL: u8 = 2;

/// Power mode selection
///
/// Low-power variants map to `osr_lp` 0..=3 and normal variants to `osr`
/// 0..=3, ordered from lowest current to lowest noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Sleep mode - no measurements
    Sleep,
    /// Low power, oversampling 0
    LowestPowerWithNoise,
    /// Low power, oversampling 1
    UltraLowPower,
    /// Low power, oversampling 2
    LowPower,
    /// Low power, oversampling 3
    LowPowerLowNoise,
    /// Normal, oversampling 0
    NormalLowerPowerWithNoise,
    /// Normal, oversampling 1
    Normal,
    /// Normal, oversampling 2
    NormalLowNoise,
    /// Normal, oversampling 3
    NormalLowestNoise,
    /// The device reported a combination that maps to no known mode
    Unknown,
}

impl PowerMode {
    /// Decode the power mode from the selector and both oversampling fields
    ///
    /// The reserved selector value 3 decodes to [`PowerMode::Unknown`].
    pub const fn from_fields(selector: u8, osr_lp: u8, osr: u8) -> Self {
        match selector & 0x03 {
            SELECTOR_SLEEP => Self::Sleep,
            SELECTOR_LOW_POWER => match osr_lp & 0x03 {
                0 => Self::LowestPowerWithNoise,
                1 => Self::UltraLowPower,
                2 => Self::LowPower,
                _ => Self::LowPowerLowNoise,
            },
            SELECTOR_NORMAL => match osr & 0x03 {
                0 => Self::NormalLowerPowerWithNoise,
                1 => Self::Normal,
                2 => Self::NormalLowNoise,
                _ => Self::NormalLowestNoise,
            },
            _ => Self::Unknown,
        }
    }

    /// Value of the `power_mode_conf` selector, `None` for [`PowerMode::Unknown`]
    pub const fn selector(self) -> Option<u8> {
        match self {
            Self::Sleep => Some(SELECTOR_SLEEP),
            Self::LowestPowerWithNoise
            | Self::UltraLowPower
            | Self::LowPower
            | Self::LowPowerLowNoise => Some(SELECTOR_LOW_POWER),
            Self::NormalLowerPowerWithNoise
            | Self::Normal
            | Self::NormalLowNoise
            | Self::NormalLowestNoise => Some(SELECTOR_NORMAL),
            Self::Unknown => None,
        }
    }

    /// Oversampling ratio for the selected tier
    ///
    /// Sleep and [`PowerMode::Unknown`] carry no oversampling ratio.
    pub const fn oversampling(self) -> Option<u8> {
        match self {
            Self::LowestPowerWithNoise | Self::NormalLowerPowerWithNoise => Some(0),
            Self::UltraLowPower | Self::Normal => Some(1),
            Self::LowPower | Self::NormalLowNoise => Some(2),
            Self::LowPowerLowNoise | Self::NormalLowestNoise => Some(3),
            Self::Sleep | Self::Unknown => None,
        }
    }

    /// True for the four duty-cycled low-power tiers
    pub const fn is_low_power(self) -> bool {
        matches!(self.selector(), Some(SELECTOR_LOW_POWER))
    }

    /// True for the four continuous normal tiers
    pub const fn is_normal(self) -> bool {
        matches!(self.selector(), Some(SELECTOR_NORMAL))
    }
}

/// Auto low-power timeout behaviour
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoLowPowerTimeoutMode {
    /// Timeout trigger disabled
    #[default]
    Disabled = 0,
    /// Enter low power once the timeout elapses
    OnTimeout = 1,
    /// Enter low power once the timeout elapses, generic interrupt 2 restarts the timer
    OnTimeoutResetByGenericInterrupt2 = 2,
}

impl AutoLowPowerTimeoutMode {
    /// Decode the 2-bit `auto_lp_timeout` field
    ///
    /// Value 3 behaves like a plain timeout on the device.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Disabled,
            2 => Self::OnTimeoutResetByGenericInterrupt2,
            _ => Self::OnTimeout,
        }
    }

    /// Register value for the `auto_lp_timeout` field
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Complete auto low-power configuration
///
/// Applying this overwrites every trigger of `AUTOLOWPOW_1`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoLowPowerConfig {
    /// Enter low power after a data ready event
    pub on_data_ready: bool,
    /// Enter low power on generic interrupt 1
    pub on_generic_interrupt_1: bool,
    /// Timeout trigger mode
    pub timeout_mode: AutoLowPowerTimeoutMode,
    /// Timeout in milliseconds (0 to 10237.5, 2.5 ms resolution)
    pub timeout_ms: f32,
}

/// Convert a timeout in milliseconds to 2.5 ms ticks
///
/// Rounds to the nearest tick. Returns `None` for non-finite, negative, or
/// out-of-range values.
pub fn timeout_ticks_from_ms(timeout_ms: f32) -> Option<u16> {
    if !timeout_ms.is_finite() || timeout_ms < 0.0 {
        return None;
    }
    let ticks = libm::roundf(timeout_ms / AUTO_LOW_POWER_TICK_MS);
    if ticks > f32::from(AUTO_LOW_POWER_MAX_TICKS) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ticks = ticks as u16;
    Some(ticks)
}

/// Split a tick count into the `AUTOLOWPOW_0` byte and the `AUTOLOWPOW_1` nibble
pub const fn split_timeout_ticks(ticks: u16) -> (u8, u8) {
    #[allow(clippy::cast_possible_truncation)]
    let msb = (ticks >> 4) as u8;
    #[allow(clippy::cast_possible_truncation)]
    let lsb = (ticks & 0x0F) as u8;
    (msb, lsb)
}

/// Reassemble the timeout in milliseconds from its two register fields
pub fn timeout_ms_from_fields(msb: u8, lsb_nibble: u8) -> f32 {
    let ticks = (u16::from(msb) << 4) + u16::from(lsb_nibble & 0x0F);
    f32::from(ticks) * AUTO_LOW_POWER_TICK_MS
}
