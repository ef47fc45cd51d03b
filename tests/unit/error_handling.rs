//! Unit tests for error handling and recovery

use crate::common::{activity_config, create_mock_driver, MockError};
use bma400::{
    AccelRange, Command, Error, GenericInterrupt, OutputDataRate, PowerMode,
};

#[test]
fn test_read_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();

    let result = driver.read_acceleration_raw();
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    assert!(driver.read_acceleration_raw().is_err(), "First read should fail");

    interface.set_accel_data(100, 200, 300);

    let data = driver.read_acceleration_raw().unwrap();
    assert_eq!((data.x, data.y, data.z), (100, 200, 300));
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();

    let result = driver.set_range(AccelRange::G8);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert_eq!(interface.get_register(0x1A), 0x00);
}

#[test]
fn test_write_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    assert!(driver.set_range(AccelRange::G8).is_err());

    driver.set_range(AccelRange::G8).unwrap();
    assert_eq!(driver.get_range().unwrap(), AccelRange::G8);
}

#[test]
fn test_init_read_failure() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();

    assert!(matches!(
        driver.init(),
        Err(Error::Bus(MockError::Communication))
    ));
}

#[test]
fn test_interrupt_status_failure() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();

    assert!(driver.get_interrupts().is_err());
}

#[test]
fn test_command_status_failure_sends_nothing() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    interface.clear_operations();

    assert!(driver.execute_command(Command::SoftReset).is_err());
    assert_eq!(interface.write_count(), 0);
}

#[test]
fn test_failure_midway_stops_sequence() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz100Bw048).unwrap();
    interface.clear_operations();
    interface.fail_next_write();

    let result =
        driver.configure_generic_interrupt(GenericInterrupt::One, &activity_config(), 64.0, 50.0);
    assert!(result.is_err());

    // The first routing write failed, nothing after it was attempted
    assert_eq!(interface.write_count(), 0);
    assert_eq!(interface.get_register(0x1F), 0x00);
}

#[test]
fn test_unknown_variants_rejected() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    assert!(matches!(
        driver.set_power_mode(PowerMode::Unknown),
        Err(Error::InvalidConfig)
    ));
    assert!(matches!(
        driver.set_data_rate(OutputDataRate::Unknown),
        Err(Error::InvalidConfig)
    ));
    assert!(matches!(
        driver.set_range(AccelRange::Unknown),
        Err(Error::InvalidConfig)
    ));
    assert!(matches!(
        driver.setup(PowerMode::Normal, OutputDataRate::Hz100Bw048, AccelRange::Unknown),
        Err(Error::InvalidConfig)
    ));
    assert!(matches!(
        driver.setup(PowerMode::Normal, OutputDataRate::Unknown, AccelRange::G4),
        Err(Error::InvalidConfig)
    ));
    assert_eq!(interface.write_count(), 0);
    assert_eq!(driver.get_power_mode().unwrap(), PowerMode::Sleep);
}

#[test]
fn test_multiple_failures() {
    let (mut driver, interface) = create_mock_driver();

    for _ in 0..3 {
        interface.fail_next_read();
        assert!(driver.read_chip_id().is_err());
    }

    assert_eq!(driver.read_chip_id().unwrap(), 0x90);
}
