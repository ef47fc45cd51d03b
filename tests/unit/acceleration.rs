//! Unit tests for acceleration data reads

use crate::common::{assert_float_eq, create_mock_driver, Operation};
use bma400::AccelRange;

const ACC_X_LSB: u8 = 0x04;

#[test]
fn test_read_raw_positive_limit() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(ACC_X_LSB, 0xFF);
    interface.set_register(ACC_X_LSB + 1, 0x07);

    let data = driver.read_acceleration_raw().unwrap();
    assert_eq!(data.x, 2047);
}

#[test]
fn test_read_raw_negative_limit() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(ACC_X_LSB + 2, 0x00);
    interface.set_register(ACC_X_LSB + 3, 0x08);

    let data = driver.read_acceleration_raw().unwrap();
    assert_eq!(data.y, -2048);
}

#[test]
fn test_read_raw_all_axes() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_accel_data(100, -50, 1024);

    let data = driver.read_acceleration_raw().unwrap();
    assert_eq!((data.x, data.y, data.z), (100, -50, 1024));
}

#[test]
fn test_read_is_single_burst() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    driver.read_acceleration_raw().unwrap();

    let addresses: Vec<u8> = interface
        .operations()
        .iter()
        .map(|op| match op {
            Operation::ReadRegister { address, .. } => *address,
            Operation::WriteRegister { address, .. } => *address,
        })
        .collect();
    assert_eq!(addresses, vec![0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
}

#[test]
fn test_read_in_g_uses_device_range() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_accel_data(512, -256, 1024);
    driver.set_range(AccelRange::G4).unwrap();

    let data = driver.read_acceleration().unwrap();
    assert_float_eq(data.x, 1.0, 1e-6);
    assert_float_eq(data.y, -0.5, 1e-6);
    assert_float_eq(data.z, 2.0, 1e-6);
}

#[test]
fn test_read_in_g_each_range() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_accel_data(0, 0, 1024);

    for (range, expected) in [
        (AccelRange::G2, 1.0),
        (AccelRange::G4, 2.0),
        (AccelRange::G8, 4.0),
        (AccelRange::G16, 8.0),
    ] {
        driver.set_range(range).unwrap();
        let data = driver.read_acceleration().unwrap();
        assert_float_eq(data.z, expected, 1e-6);
    }
}
