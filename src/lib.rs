#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod accelerometer;
pub mod device;
pub mod interface;
pub mod interrupt;
pub mod power;
pub mod registers;

// Re-export main types
pub use accelerometer::{AccelData, AccelDataG, AccelRange, OutputDataRate};
pub use device::Bma400Driver;
pub use interface::I2cInterface;
pub use interrupt::{
    ActivityChangeConfig, ActivityChangeObservations, Command, DataSource, DoubleTapWindow,
    GenericInterrupt, GenericInterruptConfig, GenericInterruptMode, GenericReferenceUpdate,
    Hysteresis, InterruptPin, InterruptPinConfig, InterruptSource, OrientationConfig,
    OrientationDataSource, OrientationReferenceUpdate, TapAxis, TapConfig, TapPeakToPeak,
    TapQuiet, TapSensitivity,
};
pub use power::{AutoLowPowerConfig, AutoLowPowerTimeoutMode, PowerMode};

/// BMA400 I2C address when the SDO pin is low (primary: 0x14)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const BMA400_ADDRESS_PRIMARY: u8 = 0x14;

/// BMA400 I2C address when the SDO pin is high (secondary: 0x15)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const BMA400_ADDRESS_SECONDARY: u8 = 0x15;

/// Expected value of the `CHIP_ID` register
pub const CHIP_ID_VALUE: u8 = 0x90;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
