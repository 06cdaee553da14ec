use serde::{Deserialize, Serialize};

use crate::config::MAX_NOTES_LEN;
use crate::error::{RentalError, RentalResult};
use crate::lifecycle::cost::total_cost;
use crate::marketplace::{EquipmentId, FarmerId, RentalId};
use crate::traits::{SystemTimeProvider, TimeProvider};

/// Status of a rental in its lifecycle.
///
/// The only legal forward path is
/// `Pending -> Approved -> Paid -> Active -> Completed`; `Cancelled` is
/// reachable from any state before the rental goes active. `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    /// Requested by the renter, awaiting the owner's decision.
    Pending,
    /// Accepted by the equipment owner.
    Approved,
    /// Payment attested by the renter.
    Paid,
    /// Equipment handed over; the rental is running.
    Active,
    /// Returned and closed out.
    Completed,
    /// Withdrawn before going active.
    Cancelled,
}

impl RentalStatus {
    /// Whether no further transitions are permitted.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a rental in this status may still be cancelled.
    /// Active rentals must be completed, not cancelled.
    pub const fn may_cancel(self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Paid)
    }

    /// Whether a rental in this status ties up the equipment, blocking
    /// overlapping bookings for the same period.
    pub const fn encumbers(self) -> bool {
        !self.is_terminal()
    }

    /// Whether the transition graph contains an edge from `self` to `next`.
    pub const fn permits(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Approved, Self::Paid)
                | (Self::Paid, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Pending | Self::Approved | Self::Paid, Self::Cancelled)
        )
    }
}

/// A rental record.
///
/// Created when a renter submits a request, mutated only through the
/// lifecycle manager's transition operations, never deleted. The cost is
/// computed once at creation; changing dates means cancelling and
/// recreating the rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,

    /// The farmer renting the equipment.
    pub renter: FarmerId,

    /// The equipment being rented. Referenced, never owned.
    pub equipment: EquipmentId,

    /// First rental day, as a Unix timestamp (inclusive).
    pub start_date: u64,

    /// Last rental day, as a Unix timestamp (inclusive, `>= start_date`).
    pub end_date: u64,

    /// Total cost in atomic currency units, fixed at creation.
    pub total_cost: u64,

    /// Optional free-text notes from the renter.
    pub notes: Option<String>,

    pub status: RentalStatus,

    /// Unix timestamp when the request was created.
    pub created_at: u64,
}

impl Rental {
    /// Create a new rental request builder.
    pub const fn builder() -> RentalBuilder<SystemTimeProvider> {
        RentalBuilder::new(SystemTimeProvider::new())
    }

    /// Create a new rental request builder with a custom time provider.
    pub const fn builder_with_time<T: TimeProvider>(time: T) -> RentalBuilder<T> {
        RentalBuilder::new(time)
    }

    /// Check that the acting farmer is the renter on this rental.
    pub fn is_rented_by(&self, farmer: FarmerId) -> bool {
        self.renter == farmer
    }

    /// Whether this rental's period overlaps the given inclusive period.
    pub const fn overlaps(&self, start: u64, end: u64) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// A validated rental request, ready to be persisted.
///
/// Carries no id and no status: the store assigns the id, and every new
/// rental begins life as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRental {
    pub renter: FarmerId,
    pub equipment: EquipmentId,
    pub start_date: u64,
    pub end_date: u64,
    pub total_cost: u64,
    pub notes: Option<String>,
    pub created_at: u64,
}

impl NewRental {
    /// Materialize the stored record once the store has assigned an id.
    pub fn into_rental(self, id: RentalId) -> Rental {
        Rental {
            id,
            renter: self.renter,
            equipment: self.equipment,
            start_date: self.start_date,
            end_date: self.end_date,
            total_cost: self.total_cost,
            notes: self.notes,
            status: RentalStatus::Pending,
            created_at: self.created_at,
        }
    }
}

/// Builder for validated rental requests.
pub struct RentalBuilder<T: TimeProvider> {
    time: T,
    renter: Option<FarmerId>,
    equipment: Option<EquipmentId>,
    daily_rate: Option<u64>,
    start_date: Option<u64>,
    end_date: Option<u64>,
    notes: Option<String>,
}

impl<T: TimeProvider> RentalBuilder<T> {
    /// Create a new builder with a time provider.
    pub const fn new(time: T) -> Self {
        Self {
            time,
            renter: None,
            equipment: None,
            daily_rate: None,
            start_date: None,
            end_date: None,
            notes: None,
        }
    }

    #[must_use]
    pub const fn renter(mut self, renter: FarmerId) -> Self {
        self.renter = Some(renter);
        self
    }

    #[must_use]
    pub const fn equipment(mut self, equipment: EquipmentId, daily_rate: u64) -> Self {
        self.equipment = Some(equipment);
        self.daily_rate = Some(daily_rate);
        self
    }

    /// Set the rental period as inclusive Unix timestamps.
    #[must_use]
    pub const fn period(mut self, start: u64, end: u64) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate and build the request. Computes the total cost from the
    /// period and the daily rate.
    pub fn build(self) -> RentalResult<NewRental> {
        let renter = Self::require(self.renter, "renter")?;
        let equipment = Self::require(self.equipment, "equipment")?;
        let daily_rate = Self::require(self.daily_rate, "daily rate")?;
        let start_date = Self::require(self.start_date, "start date")?;
        let end_date = Self::require(self.end_date, "end date")?;

        if daily_rate == 0 {
            return Err(RentalError::Validation(
                "daily rate must be positive".to_string(),
            ));
        }

        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(RentalError::Validation(format!(
                    "notes exceed {MAX_NOTES_LEN} characters"
                )));
            }
        }

        // Rejects end < start as a side effect of the day count.
        let total_cost = total_cost(start_date, end_date, daily_rate)?;

        Ok(NewRental {
            renter,
            equipment,
            start_date,
            end_date,
            total_cost,
            notes: self.notes,
            created_at: self.time.now_unix(),
        })
    }

    fn require<V>(field: Option<V>, name: &str) -> RentalResult<V> {
        field.ok_or_else(|| RentalError::Validation(format!("{name} is required")))
    }
}
