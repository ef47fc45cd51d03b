//! Bus interface implementation for the BMA400
//!
//! This module provides the `device-driver` register interface on top of an
//! `embedded-hal` I2C bus. Reads send the register address and then read the
//! requested number of bytes; writes send the register address followed by
//! the data bytes in one transaction.

use crate::{BMA400_ADDRESS_PRIMARY, BMA400_ADDRESS_SECONDARY};

use device_driver::RegisterInterface;

/// I2C interface for the BMA400
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the primary address (0x14, SDO pin LOW)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut accel = Bma400Driver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: BMA400_ADDRESS_PRIMARY,
        }
    }

    /// Create a new I2C interface with the secondary address (0x15, SDO pin HIGH)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: BMA400_ADDRESS_SECONDARY,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// For standard wiring, prefer [`default()`](Self::default) or
    /// [`alternative()`](Self::alternative).
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit address all transactions are sent to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Rebind the interface to another device address
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Address byte plus up to 8 data bytes
        let mut buffer = [0u8; 9];
        buffer[0] = address;
        let len = write_data.len().min(buffer.len() - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
