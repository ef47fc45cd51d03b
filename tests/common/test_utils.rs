//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use bma400::interrupt::GenericInterruptConfig;
use bma400::{Bma400Driver, GenericInterruptMode, GenericReferenceUpdate, InterruptPin};

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver() -> (Bma400Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Bma400Driver::new(interface);
    (driver, interface_clone)
}

/// Assert that two floating point values are approximately equal
#[allow(dead_code)]
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}

/// Enabled all-axis activity detector on INT1
#[allow(dead_code)]
pub fn activity_config() -> GenericInterruptConfig {
    GenericInterruptConfig {
        enable: true,
        pin: InterruptPin::Pin1,
        mode: GenericInterruptMode::Activity,
        reference_update: GenericReferenceUpdate::EveryTimeFromFilter,
        x_axis: true,
        y_axis: true,
        z_axis: true,
        ..Default::default()
    }
}
