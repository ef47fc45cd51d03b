//! Interrupt sources, routing, and feature engine configuration
//!
//! The BMA400 has two interrupt pins (INT1, INT2). Enabling an interrupt and
//! routing it to a pin are independent: an enabled source with no pin still
//! shows up in the status registers.
//!
//! Basic interrupts (data ready, FIFO watermark, FIFO full) only need to be
//! enabled. The feature engines (generic interrupts 1/2, activity change,
//! tap, orientation change, step counter) take a configuration struct whose
//! physical values are converted to register units by the driver.
//!
//! # Example
//!
//! ```ignore
//! # use bma400::{Bma400Driver, interrupt::*};
//! # let mut accel: Bma400Driver<_> = todo!();
//! accel.configure_interrupt_pin_settings(&InterruptPinConfig {
//!     latched: true,
//!     int1_active_high: true,
//!     ..Default::default()
//! })?;
//!
//! // Wake on motion above 64 mg on any axis
//! let config = GenericInterruptConfig {
//!     enable: true,
//!     pin: InterruptPin::Pin1,
//!     mode: GenericInterruptMode::Activity,
//!     reference_update: GenericReferenceUpdate::EveryTimeFromFilter,
//!     x_axis: true,
//!     y_axis: true,
//!     z_axis: true,
//!     ..Default::default()
//! };
//! accel.configure_generic_interrupt(GenericInterrupt::One, &config, 64.0, 50.0)?;
//!
//! if accel.has_interrupt(InterruptSource::GENERIC_INTERRUPT_1)? {
//!     // motion detected
//! }
//! # Ok::<(), bma400::Error<()>>(())
//! ```

use crate::accelerometer::OutputDataRate;

bitflags::bitflags! {
    /// Set of interrupt sources
    ///
    /// Returned by status reads and accepted by routing operations. Bit
    /// positions are a logical numbering, not register bit positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InterruptSource: u16 {
        /// Wake-up from low power
        const WAKEUP = 0x0001;
        /// Orientation change detected
        const ORIENTATION_CHANGE = 0x0002;
        /// Generic interrupt 1
        const GENERIC_INTERRUPT_1 = 0x0004;
        /// Generic interrupt 2
        const GENERIC_INTERRUPT_2 = 0x0008;
        /// Feature engine overrun
        const ENGINE_OVERRUN = 0x0010;
        /// FIFO full
        const FIFO_FULL = 0x0020;
        /// FIFO watermark reached
        const FIFO_WATERMARK = 0x0040;
        /// New data ready
        const DATA_READY = 0x0080;
        /// Step detected
        const STEP_DETECTOR = 0x0100;
        /// Double step detected
        const STEP_DETECTOR_DOUBLE_STEP = 0x0200;
        /// Single tap
        const SINGLE_TAP = 0x0400;
        /// Double tap
        const DOUBLE_TAP = 0x0800;
        /// Activity change
        const ACTIVITY_CHANGE = 0x1000;
        /// Change reported on the X axis
        const ORIENTATION_CHANGE_X = 0x2000;
        /// Change reported on the Y axis
        const ORIENTATION_CHANGE_Y = 0x4000;
        /// Change reported on the Z axis
        const ORIENTATION_CHANGE_Z = 0x8000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptSource {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "InterruptSource({=u16:#x})", self.bits());
    }
}

impl InterruptSource {
    /// Sources that only need an enable bit, no feature engine
    pub const BASIC: Self = Self::DATA_READY
        .union(Self::FIFO_WATERMARK)
        .union(Self::FIFO_FULL);

    /// Decode the three `INT_STAT0..2` bytes
    ///
    /// The engine overrun bit is mirrored in all three status bytes.
    pub fn from_status(status: [u8; 3]) -> Self {
        const STAT0: [(u8, InterruptSource); 7] = [
            (0, InterruptSource::WAKEUP),
            (1, InterruptSource::ORIENTATION_CHANGE),
            (2, InterruptSource::GENERIC_INTERRUPT_1),
            (3, InterruptSource::GENERIC_INTERRUPT_2),
            (5, InterruptSource::FIFO_FULL),
            (6, InterruptSource::FIFO_WATERMARK),
            (7, InterruptSource::DATA_READY),
        ];
        const STAT1: [(u8, InterruptSource); 4] = [
            (0, InterruptSource::STEP_DETECTOR),
            (1, InterruptSource::STEP_DETECTOR_DOUBLE_STEP),
            (2, InterruptSource::SINGLE_TAP),
            (3, InterruptSource::DOUBLE_TAP),
        ];
        const STAT2: [(u8, InterruptSource); 3] = [
            (0, InterruptSource::ORIENTATION_CHANGE_X),
            (1, InterruptSource::ORIENTATION_CHANGE_Y),
            (2, InterruptSource::ORIENTATION_CHANGE_Z),
        ];
        const ENGINE_OVERRUN_BIT: u8 = 1 << 4;

        let mut result = Self::empty();
        for (byte, table) in [
            (status[0], &STAT0[..]),
            (status[1], &STAT1[..]),
            (status[2], &STAT2[..]),
        ] {
            for &(bit, flag) in table {
                if byte & (1 << bit) != 0 {
                    result |= flag;
                }
            }
        }

        if status.iter().any(|byte| byte & ENGINE_OVERRUN_BIT != 0) {
            result |= Self::ENGINE_OVERRUN;
        }

        result
    }
}

/// Interrupt output pin selection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// Not routed to any pin
    #[default]
    None,
    /// Routed to INT1
    Pin1,
    /// Routed to INT2
    Pin2,
    /// Routed to both INT1 and INT2
    Both,
}

impl InterruptPin {
    /// True if the source drives INT1
    pub const fn int1(self) -> bool {
        matches!(self, Self::Pin1 | Self::Both)
    }

    /// True if the source drives INT2
    pub const fn int2(self) -> bool {
        matches!(self, Self::Pin2 | Self::Both)
    }
}

/// Interrupt pin electrical configuration
///
/// The default matches the reset state: non-latched, active low, push-pull.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptPinConfig {
    /// Latch interrupts until the status registers are read
    pub latched: bool,
    /// INT1 active high (true) or active low (false)
    pub int1_active_high: bool,
    /// INT1 open-drain (true) or push-pull (false)
    pub int1_open_drain: bool,
    /// INT2 active high (true) or active low (false)
    pub int2_active_high: bool,
    /// INT2 open-drain (true) or push-pull (false)
    pub int2_open_drain: bool,
}

/// Driver command written to the `CMD` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Clear the step counter
    StepCounterClear = 0xB1,
    /// Soft reset, all registers return to their reset values
    SoftReset = 0xB6,
}

// ==================== GENERIC INTERRUPTS ====================

/// Generic interrupt engine selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenericInterrupt {
    /// Generic interrupt 1
    One,
    /// Generic interrupt 2
    Two,
}

impl GenericInterrupt {
    /// The status/routing flag for this engine
    pub const fn source(self) -> InterruptSource {
        match self {
            Self::One => InterruptSource::GENERIC_INTERRUPT_1,
            Self::Two => InterruptSource::GENERIC_INTERRUPT_2,
        }
    }
}

/// How a generic interrupt updates its reference vector
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenericReferenceUpdate {
    /// Reference is only written by the host
    #[default]
    Manual = 0,
    /// Reference is taken once when the interrupt triggers
    OneTime = 1,
    /// Reference follows the selected data source continuously
    EveryTimeFromFilter = 2,
    /// Reference follows the low-pass filtered data continuously
    EveryTimeFromLowPass = 3,
}

/// Generic interrupt detection criterion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenericInterruptMode {
    /// Trigger while acceleration stays inside the threshold band
    #[default]
    Inactivity,
    /// Trigger when acceleration leaves the threshold band
    Activity,
}

/// Generic interrupt hysteresis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hysteresis {
    /// No hysteresis
    #[default]
    None = 0,
    /// 24 mg
    Mg24 = 1,
    /// 48 mg
    Mg48 = 2,
    /// 96 mg
    Mg96 = 3,
}

/// Filter output a feature engine evaluates
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataSource {
    /// Filter 1 output (variable ODR)
    #[default]
    AccFilt1,
    /// Filter 2 output (fixed 100 Hz)
    AccFilt2,
}

/// Generic interrupt configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct GenericInterruptConfig {
    /// Enable the interrupt; when false only the enable bit is cleared
    pub enable: bool,
    /// Output pin
    pub pin: InterruptPin,
    /// Reference update mode
    pub reference_update: GenericReferenceUpdate,
    /// Activity or inactivity detection
    pub mode: GenericInterruptMode,
    /// Hysteresis
    pub hysteresis: Hysteresis,
    /// Data source
    pub data_source: DataSource,
    /// Evaluate the X axis
    pub x_axis: bool,
    /// Evaluate the Y axis
    pub y_axis: bool,
    /// Evaluate the Z axis
    pub z_axis: bool,
    /// Require all enabled axes (AND) instead of any (OR)
    pub combine_all_axes: bool,
    /// Leave the output data rate alone even if it is below 100 Hz
    pub skip_rate_floor: bool,
}

// ==================== ACTIVITY CHANGE ====================

/// Activity change observation window
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityChangeObservations {
    /// 32 samples
    #[default]
    Samples32 = 0,
    /// 64 samples
    Samples64 = 1,
    /// 128 samples
    Samples128 = 2,
    /// 256 samples
    Samples256 = 3,
    /// 512 samples
    Samples512 = 4,
}

/// Activity change interrupt configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct ActivityChangeConfig {
    /// Enable the interrupt; when false only the enable bit is cleared
    pub enable: bool,
    /// Output pin
    pub pin: InterruptPin,
    /// Data source
    pub data_source: DataSource,
    /// Number of samples observed
    pub observations: ActivityChangeObservations,
    /// Evaluate the X axis
    pub x_axis: bool,
    /// Evaluate the Y axis
    pub y_axis: bool,
    /// Evaluate the Z axis
    pub z_axis: bool,
}

// ==================== TAP ====================

/// Axis evaluated by the tap detector
///
/// Codes follow the datasheet (Z=0, Y=1, X=2). Firmware that writes X as 1
/// actually selects Y, so boards tuned against it see a different axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapAxis {
    /// Z axis
    #[default]
    Z = 0,
    /// Y axis
    Y = 1,
    /// X axis
    X = 2,
}

/// Tap sensitivity, level 0 is the most sensitive
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum TapSensitivity {
    #[default]
    Level0 = 0,
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
    Level5 = 5,
    Level6 = 6,
    Level7 = 7,
}

/// Maximum duration of a tap peak, in samples at 200 Hz
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum TapPeakToPeak {
    #[default]
    Samples6 = 0,
    Samples9 = 1,
    Samples12 = 2,
    Samples18 = 3,
}

/// Minimum quiet time between two taps, in samples at 200 Hz
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum TapQuiet {
    #[default]
    Samples60 = 0,
    Samples80 = 1,
    Samples100 = 2,
    Samples120 = 3,
}

/// Window in which the second tap of a double tap must arrive
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum DoubleTapWindow {
    #[default]
    Samples4,
    Samples8,
    Samples12,
    Samples16,
}

impl DoubleTapWindow {
    /// Value of the `quiet_dt` field
    ///
    /// Everything above 4 samples shares code 1. This is the encoding
    /// deployed boards have been tuned against and is kept as is.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Samples4 => 0,
            Self::Samples8 | Self::Samples12 | Self::Samples16 => 1,
        }
    }
}

/// Tap interrupt configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapConfig {
    /// Enable single tap detection
    pub single_tap: bool,
    /// Enable double tap detection
    pub double_tap: bool,
    /// Evaluated axis
    pub axis: TapAxis,
    /// Output pin for both tap interrupts
    pub pin: InterruptPin,
    /// Sensitivity
    pub sensitivity: TapSensitivity,
    /// Peak-to-peak duration
    pub peak_to_peak: TapPeakToPeak,
    /// Quiet time
    pub quiet: TapQuiet,
    /// Double tap window
    pub double_tap_window: DoubleTapWindow,
}

// ==================== ORIENTATION ====================

/// Filter output the orientation detector evaluates
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrientationDataSource {
    /// Filter 2 output
    #[default]
    AccFilt2,
    /// Low-pass filtered output
    AccFiltLp,
}

/// How the orientation detector updates its reference vector
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrientationReferenceUpdate {
    /// Reference is only written by the host
    #[default]
    Manual = 0,
    /// Reference follows filter 2 output
    AutoAccFilt2 = 1,
    /// Reference follows the low-pass filtered output
    AutoAccFiltLp = 2,
}

/// Orientation change interrupt configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct OrientationConfig {
    /// Enable the interrupt; when false only the enable bit is cleared
    pub enable: bool,
    /// Output pin
    pub pin: InterruptPin,
    /// Reference update mode
    pub reference_update: OrientationReferenceUpdate,
    /// Data source
    pub data_source: OrientationDataSource,
    /// Evaluate the X axis
    pub x_axis: bool,
    /// Evaluate the Y axis
    pub y_axis: bool,
    /// Evaluate the Z axis
    pub z_axis: bool,
}

// ==================== UNIT CONVERSIONS ====================

/// Threshold resolution shared by all feature engines
pub const THRESHOLD_MG_PER_LSB: f32 = 8.0;

/// Orientation duration resolution
pub const ORIENTATION_DURATION_MS_PER_LSB: f32 = 10.0;

/// Convert a threshold in mg to register units, truncating
pub fn threshold_from_mg(threshold_mg: f32) -> u8 {
    saturate_u8(threshold_mg / THRESHOLD_MG_PER_LSB)
}

/// Convert a threshold in mg to register units, rounding to nearest
pub fn threshold_from_mg_rounded(threshold_mg: f32) -> u8 {
    saturate_u8(libm::roundf(threshold_mg / THRESHOLD_MG_PER_LSB))
}

/// Convert an orientation stability duration in ms to register units, truncating
pub fn orientation_duration_from_ms(duration_ms: f32) -> u8 {
    saturate_u8(duration_ms / ORIENTATION_DURATION_MS_PER_LSB)
}

/// Convert a generic interrupt duration in ms to samples at the given rate
pub fn generic_duration_from_ms(duration_ms: f32, rate: OutputDataRate) -> u16 {
    let samples = libm::roundf(duration_ms * rate.samples_per_ms());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let samples = samples.clamp(0.0, f32::from(u16::MAX)) as u16;
    samples
}

fn saturate_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value.clamp(0.0, f32::from(u8::MAX)) as u8;
    value
}
