//! Unit tests for auto low-power configuration

use crate::common::{assert_float_eq, create_mock_driver};
use bma400::{AutoLowPowerConfig, AutoLowPowerTimeoutMode, Error};

const AUTOLOWPOW_0: u8 = 0x2A;
const AUTOLOWPOW_1: u8 = 0x2B;

#[test]
fn test_timeout_100ms_encoding() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_auto_low_power_timeout(AutoLowPowerTimeoutMode::OnTimeout, 100.0)
        .unwrap();

    assert_eq!(interface.get_register(AUTOLOWPOW_1) >> 4, 8);
    assert_eq!(interface.get_register(AUTOLOWPOW_0), 2);
    assert_float_eq(driver.get_auto_low_power_timeout().unwrap(), 100.0, 1e-3);
    assert_eq!(
        driver.get_auto_low_power_timeout_mode().unwrap(),
        AutoLowPowerTimeoutMode::OnTimeout
    );
}

#[test]
fn test_timeout_keeps_triggers() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_auto_low_power_on_data_ready(true).unwrap();
    driver.set_auto_low_power_on_generic_interrupt_1(true).unwrap();
    driver
        .set_auto_low_power_timeout(
            AutoLowPowerTimeoutMode::OnTimeoutResetByGenericInterrupt2,
            2.5,
        )
        .unwrap();

    // thres lsb = 1, mode = 2, gen1 + drdy triggers
    assert_eq!(interface.get_register(AUTOLOWPOW_1), 0x1B);
    assert!(driver.get_auto_low_power_on_data_ready().unwrap());
    assert!(driver.get_auto_low_power_on_generic_interrupt_1().unwrap());
}

#[test]
fn test_trigger_setters_are_single_bit() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(AUTOLOWPOW_1, 0xF4);

    driver.set_auto_low_power_on_generic_interrupt_1(true).unwrap();
    assert_eq!(interface.get_register(AUTOLOWPOW_1), 0xF6);

    driver.set_auto_low_power_on_generic_interrupt_1(false).unwrap();
    driver.set_auto_low_power_on_data_ready(true).unwrap();
    assert_eq!(interface.get_register(AUTOLOWPOW_1), 0xF5);
}

#[test]
fn test_configure_overwrites_all_triggers() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(AUTOLOWPOW_1, 0x03);

    let config = AutoLowPowerConfig {
        on_data_ready: false,
        on_generic_interrupt_1: false,
        timeout_mode: AutoLowPowerTimeoutMode::OnTimeout,
        timeout_ms: 1000.0,
    };
    driver.configure_auto_low_power(&config).unwrap();

    // 400 ticks = 0x190
    assert_eq!(interface.get_register(AUTOLOWPOW_0), 0x19);
    assert_eq!(interface.get_register(AUTOLOWPOW_1), 0x04);
    assert!(!driver.get_auto_low_power_on_data_ready().unwrap());
    assert_float_eq(driver.get_auto_low_power_timeout().unwrap(), 1000.0, 1e-3);
}

#[test]
fn test_configure_with_triggers() {
    let (mut driver, interface) = create_mock_driver();

    let config = AutoLowPowerConfig {
        on_data_ready: true,
        on_generic_interrupt_1: true,
        timeout_mode: AutoLowPowerTimeoutMode::Disabled,
        timeout_ms: 0.0,
    };
    driver.configure_auto_low_power(&config).unwrap();

    assert_eq!(interface.get_register(AUTOLOWPOW_1), 0x03);
    assert_eq!(
        driver.get_auto_low_power_timeout_mode().unwrap(),
        AutoLowPowerTimeoutMode::Disabled
    );
}

#[test]
fn test_timeout_mode_three_reads_as_timeout() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(AUTOLOWPOW_1, 0x0C);

    assert_eq!(
        driver.get_auto_low_power_timeout_mode().unwrap(),
        AutoLowPowerTimeoutMode::OnTimeout
    );
}

#[test]
fn test_maximum_timeout() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_auto_low_power_timeout(AutoLowPowerTimeoutMode::OnTimeout, 10_237.5)
        .unwrap();

    assert_eq!(interface.get_register(AUTOLOWPOW_0), 0xFF);
    assert_eq!(interface.get_register(AUTOLOWPOW_1) >> 4, 0x0F);
}

#[test]
fn test_unencodable_timeouts_rejected() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    for timeout in [-2.5, 10_240.0, f32::NAN, f32::INFINITY] {
        let result =
            driver.set_auto_low_power_timeout(AutoLowPowerTimeoutMode::OnTimeout, timeout);
        assert!(
            matches!(result, Err(Error::InvalidConfig)),
            "Timeout {} should be rejected",
            timeout
        );
    }

    let config = AutoLowPowerConfig {
        timeout_ms: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        driver.configure_auto_low_power(&config),
        Err(Error::InvalidConfig)
    ));
    assert_eq!(interface.write_count(), 0);
}
