//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions
//! that allow unit testing without external dependencies.

pub mod directory;
pub mod registry;
pub mod store;
pub mod time;

pub use directory::{make_test_farmer, MockFarmerDirectory};
pub use registry::{make_test_equipment, MockEquipmentRegistry};
pub use store::{MockRentalStore, MockStoreFailure};
pub use time::MockTime;
