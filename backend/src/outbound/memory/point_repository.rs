//! In-memory `PointRepository`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{PointRepository, PointRepositoryError};
use crate::domain::{Point, PointDraft, PointId, PointParts, UserId};

#[derive(Default)]
struct PointTable {
    last_id: i64,
    rows: BTreeMap<i64, Point>,
}

/// Volatile point store. Iteration order of the backing map gives id order.
#[derive(Clone)]
pub struct InMemoryPointRepository {
    table: Arc<RwLock<PointTable>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryPointRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryPointRepository {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Arc::new(RwLock::new(PointTable::default())),
            clock,
        }
    }
}

#[async_trait]
impl PointRepository for InMemoryPointRepository {
    async fn list_all(&self) -> Result<Vec<Point>, PointRepositoryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PointId) -> Result<Option<Point>, PointRepositoryError> {
        Ok(self.table.read().await.rows.get(&id.value()).cloned())
    }

    async fn insert(
        &self,
        owner: UserId,
        draft: &PointDraft,
    ) -> Result<Point, PointRepositoryError> {
        let mut table = self.table.write().await;
        let next = table.last_id + 1;
        let id = PointId::new(next).map_err(|err| PointRepositoryError::query(err.to_string()))?;
        let now = self.clock.utc();
        let point = Point::new(PointParts {
            id,
            owner_id: owner,
            draft: draft.clone(),
            created_at: now,
            updated_at: now,
        });
        table.last_id = next;
        table.rows.insert(next, point.clone());
        Ok(point)
    }

    async fn update_owned(
        &self,
        id: PointId,
        owner: UserId,
        draft: &PointDraft,
    ) -> Result<Option<Point>, PointRepositoryError> {
        let mut table = self.table.write().await;
        let Some(current) = table.rows.get_mut(&id.value()) else {
            return Ok(None);
        };
        if !current.is_owned_by(owner) {
            return Ok(None);
        }
        let updated = Point::new(PointParts {
            id,
            owner_id: owner,
            draft: draft.clone(),
            created_at: current.created_at(),
            updated_at: self.clock.utc(),
        });
        *current = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_owned(&self, id: PointId, owner: UserId) -> Result<bool, PointRepositoryError> {
        let mut table = self.table.write().await;
        let owned = table
            .rows
            .get(&id.value())
            .is_some_and(|point| point.is_owned_by(owner));
        if owned {
            table.rows.remove(&id.value());
        }
        Ok(owned)
    }
}
