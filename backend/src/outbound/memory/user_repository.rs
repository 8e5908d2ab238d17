//! In-memory `UserRepository`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, User, UserId};

#[derive(Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

/// Volatile user store keyed by sequential ids starting at 1.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Arc::new(RwLock::new(UserTable::default())),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.table.read().await.rows.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|user| user.email() == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|row| row.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.to_string()));
        }

        let next = table.last_id + 1;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let now = self.clock.utc();
        let created = User::new(
            id,
            user.email.clone(),
            user.password_hash.clone(),
            now,
            now,
        );
        table.last_id = next;
        table.rows.insert(next, created.clone());
        Ok(created)
    }
}
