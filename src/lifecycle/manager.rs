//! The rental lifecycle manager.
//!
//! Owns every status transition of a rental: validation, role-gated
//! authorization, cost computation at creation, and the equipment
//! availability side effects coupled to transitions.

use tracing::{info, warn};

use crate::error::{RentalError, RentalResult};
use crate::marketplace::{
    Actor, Equipment, EquipmentId, FarmerId, Rental, RentalId, RentalStatus,
};
use crate::traits::{
    EquipmentRegistry, FarmerDirectory, RentalStore, TimeProvider, TransitionOutcome,
};

/// The rental lifecycle manager.
///
/// Stateless per request: every operation takes the authenticated actor
/// explicitly and runs to completion within a single call. Each transition
/// is a compare-and-swap on `(rental id, expected status)` inside the
/// store, so concurrent conflicting transitions have exactly one winner.
pub struct RentalLifecycle<S, E, F, C>
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    store: S,
    registry: E,
    directory: F,
    time: C,
}

impl<S, E, F, C> RentalLifecycle<S, E, F, C>
where
    S: RentalStore,
    E: EquipmentRegistry,
    F: FarmerDirectory,
    C: TimeProvider,
{
    /// Create a new lifecycle manager over the given collaborators.
    pub const fn new(store: S, registry: E, directory: F, time: C) -> Self {
        Self {
            store,
            registry,
            directory,
            time,
        }
    }

    /// Submit a new rental request. The request enters the lifecycle as
    /// `Pending`; the equipment availability flag is untouched until the
    /// rental goes active.
    pub async fn create(
        &self,
        actor: Actor,
        equipment_id: EquipmentId,
        start_date: u64,
        end_date: u64,
        notes: Option<String>,
    ) -> RentalResult<Rental> {
        if self.directory.get(actor.id).await?.is_none() {
            return Err(RentalError::NotFound(format!("renter {}", actor.id)));
        }

        let equipment = self.require_equipment(equipment_id).await?;
        if !equipment.available {
            return Err(RentalError::Validation(format!(
                "equipment {equipment_id} is not available for booking"
            )));
        }
        self.ensure_period_free(equipment_id, start_date, end_date, None)
            .await?;

        let mut builder = Rental::builder_with_time(&self.time)
            .renter(actor.id)
            .equipment(equipment_id, equipment.daily_rate)
            .period(start_date, end_date);
        if let Some(notes) = notes {
            builder = builder.notes(notes);
        }
        let request = builder.build()?;

        let rental = self.store.create(request).await?;
        info!(
            rental = %rental.id,
            equipment = %equipment_id,
            cost = rental.total_cost,
            "rental request created"
        );
        Ok(rental)
    }

    /// Approve a pending request. Only the equipment owner may approve.
    pub async fn approve(&self, rental_id: RentalId, actor: Actor) -> RentalResult<Rental> {
        let rental = self.require_rental(rental_id).await?;
        let equipment = self.require_equipment(rental.equipment).await?;

        if !equipment.is_owned_by(actor.id) {
            warn!(rental = %rental_id, actor = %actor.id, "approve denied: not the owner");
            return Err(RentalError::Forbidden(format!(
                "farmer {} does not own equipment {}",
                actor.id, rental.equipment
            )));
        }
        Self::require_status(&rental, RentalStatus::Pending)?;

        // The period may have been taken by another booking since creation.
        self.ensure_period_free(
            rental.equipment,
            rental.start_date,
            rental.end_date,
            Some(rental_id),
        )
        .await?;

        let rental = self
            .swap_status(rental_id, RentalStatus::Pending, RentalStatus::Approved)
            .await?;
        info!(rental = %rental_id, "rental approved");
        Ok(rental)
    }

    /// Record that the renter has paid the owner. Payment processing itself
    /// happens outside this crate; this is an attestation step.
    pub async fn confirm_payment(&self, rental_id: RentalId, actor: Actor) -> RentalResult<Rental> {
        let rental = self.require_rental(rental_id).await?;

        Self::require_renter(&rental, actor)?;
        Self::require_status(&rental, RentalStatus::Approved)?;

        let rental = self
            .swap_status(rental_id, RentalStatus::Approved, RentalStatus::Paid)
            .await?;
        info!(rental = %rental_id, "payment confirmed");
        Ok(rental)
    }

    /// Begin the rental: the renter picks up the equipment. Marks the
    /// equipment unavailable.
    pub async fn start(&self, rental_id: RentalId, actor: Actor) -> RentalResult<Rental> {
        let rental = self.require_rental(rental_id).await?;

        Self::require_renter(&rental, actor)?;
        Self::require_status(&rental, RentalStatus::Paid)?;

        if self.time.now_unix() < rental.start_date {
            return Err(RentalError::Validation(format!(
                "rental {rental_id} start date has not arrived yet"
            )));
        }

        let equipment = self.require_equipment(rental.equipment).await?;
        if !equipment.available {
            return Err(RentalError::Conflict(format!(
                "equipment {} is already in use",
                rental.equipment
            )));
        }

        let rental = self
            .swap_status(rental_id, RentalStatus::Paid, RentalStatus::Active)
            .await?;
        // Only the CAS winner reaches this point, so the flag is flipped
        // exactly once per transition.
        self.registry.set_available(rental.equipment, false).await?;
        info!(rental = %rental_id, equipment = %rental.equipment, "rental started");
        Ok(rental)
    }

    /// Close out an active rental. The renter self-reports completion;
    /// the equipment becomes available again.
    pub async fn complete(&self, rental_id: RentalId, actor: Actor) -> RentalResult<Rental> {
        let rental = self.require_rental(rental_id).await?;

        Self::require_renter(&rental, actor)?;
        Self::require_status(&rental, RentalStatus::Active)?;

        let rental = self
            .swap_status(rental_id, RentalStatus::Active, RentalStatus::Completed)
            .await?;
        self.registry.set_available(rental.equipment, true).await?;
        info!(rental = %rental_id, equipment = %rental.equipment, "rental completed");
        Ok(rental)
    }

    /// Cancel a rental that has not yet gone active. Either the renter or
    /// the equipment owner may cancel; an active rental must be completed
    /// instead, and cancelling a terminal rental is an error rather than a
    /// silent success.
    pub async fn cancel(&self, rental_id: RentalId, actor: Actor) -> RentalResult<Rental> {
        let rental = self.require_rental(rental_id).await?;
        let equipment = self.require_equipment(rental.equipment).await?;

        if !rental.is_rented_by(actor.id) && !equipment.is_owned_by(actor.id) {
            warn!(rental = %rental_id, actor = %actor.id, "cancel denied: neither renter nor owner");
            return Err(RentalError::Forbidden(format!(
                "farmer {} is neither the renter nor the owner of rental {rental_id}",
                actor.id
            )));
        }
        if !rental.status.may_cancel() {
            return Err(RentalError::InvalidTransition(format!(
                "rental {rental_id} is {:?} and can no longer be cancelled",
                rental.status
            )));
        }

        let rental = self
            .swap_status(rental_id, rental.status, RentalStatus::Cancelled)
            .await?;
        // Availability is only flagged from Active onward, and Active
        // rentals cannot be cancelled, so there is nothing to restore here.
        // A policy encumbering at Approved would restore the flag at this
        // point.
        info!(rental = %rental_id, "rental cancelled");
        Ok(rental)
    }

    /// Fetch a rental by id.
    pub async fn rental(&self, rental_id: RentalId) -> RentalResult<Rental> {
        self.require_rental(rental_id).await
    }

    /// List the rentals requested by a farmer.
    pub async fn rentals_for_renter(&self, renter: FarmerId) -> RentalResult<Vec<Rental>> {
        Ok(self.store.list_by_renter(renter).await?)
    }

    /// List the rentals referencing a piece of equipment.
    pub async fn rentals_for_equipment(
        &self,
        equipment: EquipmentId,
    ) -> RentalResult<Vec<Rental>> {
        Ok(self.store.list_by_equipment(equipment).await?)
    }

    /// Reject the request if another open rental on the same equipment
    /// overlaps the given inclusive period.
    async fn ensure_period_free(
        &self,
        equipment: EquipmentId,
        start: u64,
        end: u64,
        exclude: Option<RentalId>,
    ) -> RentalResult<()> {
        let existing = self.store.list_by_equipment(equipment).await?;
        let conflict = existing.iter().any(|r| {
            exclude != Some(r.id) && r.status.encumbers() && r.overlaps(start, end)
        });
        if conflict {
            return Err(RentalError::Validation(format!(
                "equipment {equipment} is already booked for the selected period"
            )));
        }
        Ok(())
    }

    /// Run the store's compare-and-swap and map the outcome into the error
    /// taxonomy. A lost race surfaces as `Conflict`.
    async fn swap_status(
        &self,
        rental_id: RentalId,
        expected: RentalStatus,
        next: RentalStatus,
    ) -> RentalResult<Rental> {
        match self.store.transition(rental_id, expected, next).await? {
            TransitionOutcome::Updated(rental) => Ok(rental),
            TransitionOutcome::Missing => {
                Err(RentalError::NotFound(format!("rental {rental_id}")))
            }
            TransitionOutcome::Raced { current } => {
                warn!(
                    rental = %rental_id,
                    ?expected,
                    ?current,
                    "transition lost a concurrent race"
                );
                Err(RentalError::Conflict(format!(
                    "rental {rental_id} moved to {current:?} concurrently"
                )))
            }
        }
    }

    async fn require_rental(&self, id: RentalId) -> RentalResult<Rental> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| RentalError::NotFound(format!("rental {id}")))
    }

    async fn require_equipment(&self, id: EquipmentId) -> RentalResult<Equipment> {
        self.registry
            .get(id)
            .await?
            .ok_or_else(|| RentalError::NotFound(format!("equipment {id}")))
    }

    fn require_renter(rental: &Rental, actor: Actor) -> RentalResult<()> {
        if rental.is_rented_by(actor.id) {
            Ok(())
        } else {
            warn!(rental = %rental.id, actor = %actor.id, "denied: not the renter");
            Err(RentalError::Forbidden(format!(
                "farmer {} is not the renter of rental {}",
                actor.id, rental.id
            )))
        }
    }

    fn require_status(rental: &Rental, expected: RentalStatus) -> RentalResult<()> {
        if rental.status == expected {
            Ok(())
        } else {
            Err(RentalError::InvalidTransition(format!(
                "rental {} is {:?}, expected {expected:?}",
                rental.id, rental.status
            )))
        }
    }
}
