use serde::{Deserialize, Serialize};

use crate::marketplace::{EquipmentId, FarmerId};

/// A piece of equipment listed for rental.
///
/// The `available` flag is a coarse "in use right now" signal mutated by the
/// rental lifecycle as a side effect of transitions; booking conflicts are
/// decided by period-overlap checks against open rentals, not by this flag
/// alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,

    /// Category of the machine, e.g. "tractor" or "harvester".
    pub kind: String,

    /// Manufacturer model designation.
    pub model: String,

    /// Rental rate per day, in atomic currency units. Must be positive.
    pub daily_rate: u64,

    /// Whether the equipment is currently free to be picked up.
    pub available: bool,

    /// The farmer who listed this equipment.
    pub owner: FarmerId,
}

impl Equipment {
    /// Check that the acting farmer is the owner of this equipment.
    pub fn is_owned_by(&self, farmer: FarmerId) -> bool {
        self.owner == farmer
    }
}
