//! Farmer directory abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::marketplace::{Farmer, FarmerId};

/// Abstraction over the farmer account directory.
///
/// Used to verify that a referenced renter actually exists; authentication
/// itself happens at the request boundary, before the lifecycle is invoked.
#[async_trait]
pub trait FarmerDirectory: Send + Sync {
    /// Fetch a farmer record by id. Returns `None` if unknown.
    async fn get(&self, id: FarmerId) -> Result<Option<Farmer>>;
}
