//! The rental lifecycle: cost calculation and the transition manager.

pub mod cost;
pub mod manager;

pub use cost::{rental_days, total_cost};
pub use manager::RentalLifecycle;
