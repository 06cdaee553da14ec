//! Mock farmer directory for testing.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::marketplace::{Farmer, FarmerId};
use crate::traits::FarmerDirectory;

/// In-memory farmer directory. Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct MockFarmerDirectory {
    inner: Arc<DirectoryInner>,
}

#[derive(Debug)]
struct DirectoryInner {
    farmers: RwLock<HashMap<FarmerId, Farmer>>,
    fail: RwLock<bool>,
}

impl MockFarmerDirectory {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                farmers: RwLock::new(HashMap::new()),
                fail: RwLock::new(false),
            }),
        }
    }

    /// Seed the directory with a farmer account.
    pub async fn add(&self, farmer: Farmer) {
        self.inner.farmers.write().await.insert(farmer.id, farmer);
    }

    /// Make every subsequent operation fail.
    pub async fn set_fail(&self, fail: bool) {
        *self.inner.fail.write().await = fail;
    }
}

impl Default for MockFarmerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FarmerDirectory for MockFarmerDirectory {
    async fn get(&self, id: FarmerId) -> Result<Option<Farmer>> {
        if *self.inner.fail.read().await {
            return Err(anyhow!("mock directory: simulated failure"));
        }
        Ok(self.inner.farmers.read().await.get(&id).cloned())
    }
}

/// Create a test farmer account.
pub fn make_test_farmer(id: u64) -> Farmer {
    Farmer {
        id: FarmerId::new(id),
        name: format!("farmer-{id}"),
        location: "Haryana".to_string(),
        phone: format!("+91-00000-{id:05}"),
        email: format!("farmer{id}@example.com"),
    }
}
