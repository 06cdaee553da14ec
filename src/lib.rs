//! Rental lifecycle core for a farm equipment marketplace.
//!
//! Connects farmers renting out equipment with farmers who need it: rental
//! requests move through a role-gated state machine
//! (`PENDING -> APPROVED -> PAID -> ACTIVE -> COMPLETED`, cancellable before
//! going active), with cost fixed at creation and equipment availability
//! kept consistent with the rental's state. Persistence, the equipment
//! registry, the account directory, and the clock are trait seams; the
//! `test-support` feature exposes in-memory mocks for all of them.

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod marketplace;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use api::{ApiError, CreateRentalRequest, ErrorKind, RentalListResponse, RentalResponse};
pub use error::{RentalError, RentalResult};
pub use lifecycle::{rental_days, total_cost, RentalLifecycle};
pub use marketplace::{
    Actor, Equipment, EquipmentId, Farmer, FarmerId, NewRental, Rental, RentalId, RentalStatus,
};
pub use traits::{
    EquipmentRegistry, FarmerDirectory, RentalStore, SystemTimeProvider, TimeProvider,
    TransitionOutcome,
};
