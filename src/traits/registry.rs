//! Equipment registry abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::marketplace::{Equipment, EquipmentId};

/// Abstraction over the equipment registry.
///
/// The registry owns equipment records; the rental lifecycle reads them and
/// flips the availability flag as a side effect of transitions.
#[async_trait]
pub trait EquipmentRegistry: Send + Sync {
    /// Fetch an equipment record by id. Returns `None` if unknown.
    async fn get(&self, id: EquipmentId) -> Result<Option<Equipment>>;

    /// Set the availability flag of an equipment record.
    async fn set_available(&self, id: EquipmentId, available: bool) -> Result<()>;
}
