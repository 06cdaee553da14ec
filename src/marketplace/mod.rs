pub mod equipment;
pub mod farmer;
pub mod ids;
pub mod rental;

pub use equipment::Equipment;
pub use farmer::{Actor, Farmer};
pub use ids::{EquipmentId, FarmerId, RentalId};
pub use rental::{NewRental, Rental, RentalBuilder, RentalStatus};
