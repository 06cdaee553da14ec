//! Mock rental store for testing.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::marketplace::{EquipmentId, FarmerId, NewRental, Rental, RentalId, RentalStatus};
use crate::traits::{RentalStore, TransitionOutcome};

/// Types of failures that can be simulated.
#[derive(Debug, Clone)]
pub enum MockStoreFailure {
    /// Fail all operations.
    All,
    /// Fail only read operations.
    Reads,
    /// Fail only write operations.
    Writes,
}

#[derive(Debug)]
struct MockStoreInner {
    rentals: RwLock<HashMap<RentalId, Rental>>,
    /// Counter for assigning rental ids.
    next_id: AtomicU64,
    /// Whether to simulate failures.
    fail_mode: RwLock<Option<MockStoreFailure>>,
}

/// In-memory rental store.
///
/// Clones share the same underlying state, so a test can hand the store to
/// the lifecycle manager and keep a handle for assertions. `transition`
/// performs its check-and-swap inside a single write-lock critical section,
/// matching the atomicity a conditional database update would provide.
#[derive(Debug, Clone)]
pub struct MockRentalStore {
    inner: Arc<MockStoreInner>,
}

impl MockRentalStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockStoreInner {
                rentals: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                fail_mode: RwLock::new(None),
            }),
        }
    }

    /// Set failure mode for testing error handling.
    pub async fn set_fail_mode(&self, mode: Option<MockStoreFailure>) {
        *self.inner.fail_mode.write().await = mode;
    }

    /// Check if current operation should fail.
    async fn should_fail(&self, is_write: bool) -> bool {
        let mode = self.inner.fail_mode.read().await;
        match &*mode {
            None => false,
            Some(MockStoreFailure::All) => true,
            Some(MockStoreFailure::Reads) => !is_write,
            Some(MockStoreFailure::Writes) => is_write,
        }
    }

    /// Get a snapshot of all stored rentals (for test assertions).
    pub async fn snapshot(&self) -> Vec<Rental> {
        let rentals = self.inner.rentals.read().await;
        let mut all: Vec<Rental> = rentals.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        all
    }

    /// Overwrite a stored rental directly, bypassing transition checks
    /// (for setting up unusual test states).
    pub async fn put(&self, rental: Rental) {
        self.inner.rentals.write().await.insert(rental.id, rental);
    }
}

impl Default for MockRentalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RentalStore for MockRentalStore {
    async fn create(&self, request: NewRental) -> Result<Rental> {
        if self.should_fail(true).await {
            return Err(anyhow!("mock store: simulated create failure"));
        }
        let id = RentalId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let rental = request.into_rental(id);
        self.inner
            .rentals
            .write()
            .await
            .insert(id, rental.clone());
        Ok(rental)
    }

    async fn get(&self, id: RentalId) -> Result<Option<Rental>> {
        if self.should_fail(false).await {
            return Err(anyhow!("mock store: simulated read failure"));
        }
        Ok(self.inner.rentals.read().await.get(&id).cloned())
    }

    async fn list_by_renter(&self, renter: FarmerId) -> Result<Vec<Rental>> {
        if self.should_fail(false).await {
            return Err(anyhow!("mock store: simulated read failure"));
        }
        let rentals = self.inner.rentals.read().await;
        Ok(rentals
            .values()
            .filter(|r| r.renter == renter)
            .cloned()
            .collect())
    }

    async fn list_by_equipment(&self, equipment: EquipmentId) -> Result<Vec<Rental>> {
        if self.should_fail(false).await {
            return Err(anyhow!("mock store: simulated read failure"));
        }
        let rentals = self.inner.rentals.read().await;
        Ok(rentals
            .values()
            .filter(|r| r.equipment == equipment)
            .cloned()
            .collect())
    }

    async fn transition(
        &self,
        id: RentalId,
        expected: RentalStatus,
        next: RentalStatus,
    ) -> Result<TransitionOutcome> {
        if self.should_fail(true).await {
            return Err(anyhow!("mock store: simulated write failure"));
        }
        // Check and swap under one write lock.
        let mut rentals = self.inner.rentals.write().await;
        let Some(rental) = rentals.get_mut(&id) else {
            return Ok(TransitionOutcome::Missing);
        };
        if rental.status != expected {
            return Ok(TransitionOutcome::Raced {
                current: rental.status,
            });
        }
        rental.status = next;
        Ok(TransitionOutcome::Updated(rental.clone()))
    }
}
