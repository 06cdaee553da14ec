use serde::{Deserialize, Serialize};

use crate::marketplace::FarmerId;

/// A farmer account. The same account may act as renter on one rental and
/// as equipment owner on another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
}

/// Request-scoped authenticated identity.
///
/// Every lifecycle operation takes the acting farmer explicitly; there is
/// no ambient "current user" lookup. Whether the actor counts as renter or
/// owner is decided per rental, against the rental's renter reference and
/// the equipment's owner reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: FarmerId,
}

impl Actor {
    pub const fn new(id: FarmerId) -> Self {
        Self { id }
    }
}

impl From<FarmerId> for Actor {
    fn from(id: FarmerId) -> Self {
        Self { id }
    }
}
