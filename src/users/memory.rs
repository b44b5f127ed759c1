use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    error::{StoreError, StoreErrorKind},
    model::User,
    repo::UserRepository,
    repo_types::UserRecord,
};

/// Vec-backed store for handler and service tests. Mirrors the Postgres
/// semantics: insertion order on list, `23505` on a duplicate id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserRecord>>,
    fail_with: Option<StoreErrorKind>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with the given kind.
    pub fn failing(kind: StoreErrorKind) -> Self {
        Self {
            rows: Mutex::default(),
            fail_with: Some(kind),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.fail_with {
            Some(kind) => Err(StoreError::new(kind, None, "injected failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<UserRecord, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|r| r.id == user.id()) {
            return Err(StoreError::new(
                StoreErrorKind::UniqueViolation,
                Some("23505".into()),
                format!("duplicate key value violates unique constraint: id={}", user.id()),
            ));
        }
        let record = UserRecord::from(user);
        rows.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.check()?;
        Ok(self.rows.lock().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        self.check()?;
        Ok(self.rows.lock().await.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, user: &User) -> Result<Option<UserRecord>, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == user.id()) else {
            return Ok(None);
        };
        row.name = user.name().to_owned();
        row.email = user.email().to_owned();
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Ok(None);
        }
        Ok(Some(id.to_owned()))
    }
}
