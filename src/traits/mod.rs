//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for external collaborators,
//! enabling unit testing without a database, an equipment service, or a
//! real clock.

pub mod directory;
pub mod registry;
pub mod store;
pub mod time;

// Re-export all traits for crate-internal use.
// The public API surface is controlled by lib.rs re-exports.
pub use directory::FarmerDirectory;
pub use registry::EquipmentRegistry;
pub use store::{RentalStore, TransitionOutcome};
pub use time::TimeProvider;

// Re-export default implementations
pub use time::SystemTimeProvider;
