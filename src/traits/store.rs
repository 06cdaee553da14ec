//! Rental persistence abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::marketplace::{EquipmentId, FarmerId, NewRental, Rental, RentalId, RentalStatus};

/// Outcome of a conditional status transition.
///
/// The precondition check and the mutation are a single atomic step inside
/// the store, so concurrent transitions on the same rental have exactly one
/// winner; every loser observes `Raced` with the status the winner left
/// behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The rental was in the expected status and has been moved.
    Updated(Rental),
    /// No rental with the given id exists.
    Missing,
    /// The rental's status no longer matched the expected value.
    Raced { current: RentalStatus },
}

/// Abstraction over rental persistence.
///
/// This trait enables testing of lifecycle code without a real database.
/// A database-backed implementation would realize `transition` as a
/// conditional `UPDATE ... WHERE status = ?` (or a row lock); the in-memory
/// mock uses a single write-lock critical section.
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Persist a new rental request. The store assigns the id; the record
    /// begins in `Pending` status.
    async fn create(&self, request: NewRental) -> Result<Rental>;

    /// Fetch a rental by id. Returns `None` if it does not exist.
    async fn get(&self, id: RentalId) -> Result<Option<Rental>>;

    /// List all rentals requested by the given farmer.
    async fn list_by_renter(&self, renter: FarmerId) -> Result<Vec<Rental>>;

    /// List all rentals referencing the given equipment.
    async fn list_by_equipment(&self, equipment: EquipmentId) -> Result<Vec<Rental>>;

    /// Atomically move a rental from `expected` to `next`.
    ///
    /// Must not apply the mutation unless the rental's current status equals
    /// `expected` at the moment of the update.
    async fn transition(
        &self,
        id: RentalId,
        expected: RentalStatus,
        next: RentalStatus,
    ) -> Result<TransitionOutcome>;
}
