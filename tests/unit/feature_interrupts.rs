//! Unit tests for the activity change, tap, and orientation engines

use crate::common::create_mock_driver;
use bma400::{
    AccelData, ActivityChangeConfig, Error, ActivityChangeObservations, DataSource, DoubleTapWindow,
    InterruptPin, OrientationConfig, OrientationDataSource, OrientationReferenceUpdate,
    OutputDataRate, TapAxis, TapConfig, TapPeakToPeak, TapQuiet, TapSensitivity,
};

const INT_CONFIG0: u8 = 0x1F;
const INT_CONFIG1: u8 = 0x20;
const INT1_MAP: u8 = 0x21;
const INT12_MAP: u8 = 0x23;
const ORIENTCH_CONFIG0: u8 = 0x35;
const ORIENTCH_CONFIG1: u8 = 0x36;
const ORIENTCH_CONFIG3: u8 = 0x38;
const ACTCH_CONFIG0: u8 = 0x55;
const ACTCH_CONFIG1: u8 = 0x56;
const TAP_CONFIG: u8 = 0x57;
const TAP_CONFIG1: u8 = 0x58;

fn activity_change_config() -> ActivityChangeConfig {
    ActivityChangeConfig {
        enable: true,
        pin: InterruptPin::Pin2,
        data_source: DataSource::AccFilt2,
        observations: ActivityChangeObservations::Samples128,
        x_axis: true,
        y_axis: false,
        z_axis: true,
    }
}

fn tap_config() -> TapConfig {
    TapConfig {
        single_tap: true,
        double_tap: true,
        axis: TapAxis::X,
        pin: InterruptPin::Pin1,
        sensitivity: TapSensitivity::Level3,
        peak_to_peak: TapPeakToPeak::Samples12,
        quiet: TapQuiet::Samples100,
        double_tap_window: DoubleTapWindow::Samples12,
    }
}

fn orientation_config() -> OrientationConfig {
    OrientationConfig {
        enable: true,
        pin: InterruptPin::Pin1,
        reference_update: OrientationReferenceUpdate::AutoAccFiltLp,
        data_source: OrientationDataSource::AccFiltLp,
        x_axis: true,
        y_axis: true,
        z_axis: true,
    }
}

// ==================== ACTIVITY CHANGE ====================

#[test]
fn test_activity_change_configuration() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    driver
        .configure_activity_change_interrupt(&activity_change_config(), 67.0)
        .unwrap();

    assert_eq!(
        interface.written_addresses(),
        vec![INT12_MAP, INT_CONFIG1, ACTCH_CONFIG0, ACTCH_CONFIG1]
    );
    assert_eq!(interface.get_register(INT12_MAP), 0x80);
    assert_eq!(interface.get_register(INT_CONFIG1), 0x10);
    // 67 mg rounds to 8 steps
    assert_eq!(interface.get_register(ACTCH_CONFIG0), 8);
    assert_eq!(interface.get_register(ACTCH_CONFIG1), 0xB2);
}

#[test]
fn test_activity_change_raw_threshold() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .configure_activity_change_interrupt_raw(&activity_change_config(), 0x7F)
        .unwrap();

    assert_eq!(interface.get_register(ACTCH_CONFIG0), 0x7F);
}

#[test]
fn test_activity_change_disable() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .configure_activity_change_interrupt(&activity_change_config(), 64.0)
        .unwrap();
    interface.clear_operations();

    let config = ActivityChangeConfig {
        enable: false,
        ..activity_change_config()
    };
    driver.configure_activity_change_interrupt(&config, 64.0).unwrap();

    assert_eq!(interface.written_addresses(), vec![INT_CONFIG1]);
    assert_eq!(interface.get_register(INT_CONFIG1), 0x00);
    assert_eq!(interface.get_register(INT12_MAP), 0x80);
}

// ==================== TAP ====================

#[test]
fn test_tap_configuration() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz50Bw048).unwrap();
    interface.clear_operations();

    driver.configure_tap_interrupt(&tap_config()).unwrap();

    assert_eq!(
        interface.written_addresses(),
        vec![INT12_MAP, 0x19, 0x1A, 0x1B, INT_CONFIG1, TAP_CONFIG, TAP_CONFIG1]
    );
    assert_eq!(driver.get_data_rate().unwrap(), OutputDataRate::Hz200Bw048);
    assert_eq!(interface.get_register(INT12_MAP), 0x04);
    assert_eq!(interface.get_register(INT_CONFIG1), 0x0C);
    assert_eq!(interface.get_register(TAP_CONFIG), 0x13);
    assert_eq!(interface.get_register(TAP_CONFIG1), 0x1A);
}

#[test]
fn test_tap_floor_from_filter2() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Filter2Hz100).unwrap();
    driver.configure_tap_interrupt(&tap_config()).unwrap();

    assert_eq!(driver.get_data_rate().unwrap(), OutputDataRate::Hz200Bw048);
}

#[test]
fn test_tap_keeps_faster_rate() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz800Bw024).unwrap();
    driver.configure_tap_interrupt(&tap_config()).unwrap();

    assert_eq!(driver.get_data_rate().unwrap(), OutputDataRate::Hz800Bw024);
}

#[test]
fn test_single_tap_only() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz200Bw024).unwrap();

    let config = TapConfig {
        double_tap: false,
        pin: InterruptPin::Both,
        axis: TapAxis::Z,
        double_tap_window: DoubleTapWindow::Samples4,
        ..tap_config()
    };
    driver.configure_tap_interrupt(&config).unwrap();

    assert_eq!(interface.get_register(INT_CONFIG1), 0x04);
    assert_eq!(interface.get_register(INT12_MAP), 0x44);
    assert_eq!(interface.get_register(TAP_CONFIG), 0x03);
    assert_eq!(interface.get_register(TAP_CONFIG1) & 0x30, 0x00);
}

#[test]
fn test_double_tap_windows_above_four_share_code() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz200Bw024).unwrap();

    for window in [
        DoubleTapWindow::Samples8,
        DoubleTapWindow::Samples12,
        DoubleTapWindow::Samples16,
    ] {
        let config = TapConfig {
            double_tap_window: window,
            ..tap_config()
        };
        driver.configure_tap_interrupt(&config).unwrap();
        assert_eq!(interface.get_register(TAP_CONFIG1) >> 4, 1);
    }
}

#[test]
fn test_tap_disable() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_data_rate(OutputDataRate::Hz200Bw024).unwrap();
    driver.configure_tap_interrupt(&tap_config()).unwrap();
    interface.set_register(INT_CONFIG1, interface.get_register(INT_CONFIG1) | 0x01);
    interface.clear_operations();

    let config = TapConfig {
        single_tap: false,
        double_tap: false,
        ..tap_config()
    };
    driver.configure_tap_interrupt(&config).unwrap();

    assert_eq!(interface.written_addresses(), vec![INT_CONFIG1]);
    assert_eq!(interface.get_register(INT_CONFIG1), 0x01);
}

// ==================== ORIENTATION ====================

#[test]
fn test_orientation_configuration() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    driver
        .configure_orientation_change_interrupt(&orientation_config(), 100.0, 109.0)
        .unwrap();

    assert_eq!(
        interface.written_addresses(),
        vec![
            INT_CONFIG0,
            INT1_MAP,
            0x22,
            ORIENTCH_CONFIG0,
            ORIENTCH_CONFIG1,
            ORIENTCH_CONFIG3
        ]
    );
    assert_eq!(interface.get_register(INT_CONFIG0), 0x02);
    assert_eq!(interface.get_register(INT1_MAP), 0x02);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG0), 0xF8);
    // 100 mg and 109 ms truncate to 12 and 10 steps
    assert_eq!(interface.get_register(ORIENTCH_CONFIG1), 12);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG3), 10);
}

#[test]
fn test_orientation_raw_values() {
    let (mut driver, interface) = create_mock_driver();

    let config = OrientationConfig {
        reference_update: OrientationReferenceUpdate::Manual,
        data_source: OrientationDataSource::AccFilt2,
        y_axis: false,
        pin: InterruptPin::Pin2,
        ..orientation_config()
    };
    driver
        .configure_orientation_change_interrupt_raw(&config, 0x40, 0xFF)
        .unwrap();

    assert_eq!(interface.get_register(ORIENTCH_CONFIG0), 0xA0);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG1), 0x40);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG3), 0xFF);
    assert_eq!(interface.get_register(INT1_MAP), 0x00);
    assert_eq!(interface.get_register(0x22), 0x02);
}

#[test]
fn test_orientation_values_saturate() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .configure_orientation_change_interrupt(&orientation_config(), 4000.0, 5000.0)
        .unwrap();

    assert_eq!(interface.get_register(ORIENTCH_CONFIG1), 255);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG3), 255);
}

#[test]
fn test_orientation_disable() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .configure_orientation_change_interrupt(&orientation_config(), 100.0, 100.0)
        .unwrap();
    interface.clear_operations();

    let config = OrientationConfig {
        enable: false,
        ..orientation_config()
    };
    driver
        .configure_orientation_change_interrupt(&config, 100.0, 100.0)
        .unwrap();

    assert_eq!(interface.written_addresses(), vec![INT_CONFIG0]);
    assert_eq!(interface.get_register(INT_CONFIG0), 0x00);
    assert_eq!(interface.get_register(ORIENTCH_CONFIG1), 12);
}

#[test]
fn test_orientation_reference() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_orientation_reference(&AccelData { x: 0, y: 0, z: 1024 })
        .unwrap();
    assert_eq!(
        interface.get_registers::<6>(0x39),
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x04]
    );

    interface.set_accel_data(-512, 256, 0);
    driver.snapshot_orientation_reference().unwrap();
    assert_eq!(
        interface.get_registers::<6>(0x39),
        interface.get_registers::<6>(0x04)
    );
}

#[test]
fn test_orientation_reference_outside_12_bit_range_rejected() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    let result = driver.set_orientation_reference(&AccelData {
        x: 0,
        y: 0,
        z: i16::MIN,
    });

    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert_eq!(interface.write_count(), 0);
}
