//! Mock equipment registry for testing.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::marketplace::{Equipment, EquipmentId, FarmerId};
use crate::traits::EquipmentRegistry;

/// In-memory equipment registry. Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct MockEquipmentRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    equipment: RwLock<HashMap<EquipmentId, Equipment>>,
    fail: RwLock<bool>,
}

impl MockEquipmentRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                equipment: RwLock::new(HashMap::new()),
                fail: RwLock::new(false),
            }),
        }
    }

    /// Seed the registry with an equipment record.
    pub async fn add(&self, equipment: Equipment) {
        self.inner
            .equipment
            .write()
            .await
            .insert(equipment.id, equipment);
    }

    /// Make every subsequent operation fail.
    pub async fn set_fail(&self, fail: bool) {
        *self.inner.fail.write().await = fail;
    }

    async fn check_fail(&self) -> Result<()> {
        if *self.inner.fail.read().await {
            Err(anyhow!("mock registry: simulated failure"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockEquipmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EquipmentRegistry for MockEquipmentRegistry {
    async fn get(&self, id: EquipmentId) -> Result<Option<Equipment>> {
        self.check_fail().await?;
        Ok(self.inner.equipment.read().await.get(&id).cloned())
    }

    async fn set_available(&self, id: EquipmentId, available: bool) -> Result<()> {
        self.check_fail().await?;
        let mut equipment = self.inner.equipment.write().await;
        let record = equipment
            .get_mut(&id)
            .ok_or_else(|| anyhow!("mock registry: unknown equipment {id}"))?;
        record.available = available;
        Ok(())
    }
}

/// Create a test equipment record owned by the given farmer.
pub fn make_test_equipment(id: u64, owner: u64, daily_rate: u64) -> Equipment {
    Equipment {
        id: EquipmentId::new(id),
        kind: "tractor".to_string(),
        model: format!("model-{id}"),
        daily_rate,
        available: true,
        owner: FarmerId::new(owner),
    }
}
