//! Hand-driven capability mocks and recorded fixtures shared by the workspace tests.

pub mod csv_loader;
pub mod mocks;

pub use mocks::{MockLocationPort, MockPermissionPort, MockSensorPort};

use std::path::PathBuf;

/// Absolute path of a file under `test-utils/test_data`.
pub fn test_data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(name)
}
