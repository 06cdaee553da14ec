//! Typed identifiers for marketplace entities.
//!
//! Every entity reference crosses a trait seam at some point, so the raw
//! integers are wrapped in newtypes to keep a renter id from ever being
//! handed to an equipment lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type! {
    /// Identifier of a farmer account (renter or equipment owner).
    FarmerId
}

id_type! {
    /// Identifier of a piece of listed equipment.
    EquipmentId
}

id_type! {
    /// Identifier of a rental record. Assigned by the store on creation.
    RentalId
}
