//! Common test utilities and mock implementations

pub mod test_utils;

#[allow(unused_imports)]
pub use mock_interface::{MockError, Operation};
#[allow(unused_imports)]
pub use test_utils::{activity_config, assert_float_eq, create_mock_driver};
