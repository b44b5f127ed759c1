use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use super::{error::StoreError, model::User, repo_types::UserRecord};

/// Storage operations for users. Absent rows come back as `None`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<UserRecord, StoreError>;
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn update(&self, user: &User) -> Result<Option<UserRecord>, StoreError>;
    /// Returns the deleted id.
    async fn delete_by_id(&self, id: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn log_failure(op: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |e| {
        error!(error = %e, op, "users query failed");
        StoreError::from(e)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn create(&self, user: &User) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.email())
        .fetch_one(&self.db)
        .await
        .map_err(log_failure("create"))?;
        debug!("user inserted");
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UserRecord>(r#"SELECT id, name, email FROM users"#)
            .fetch_all(&self.db)
            .await
            .map_err(log_failure("list"))?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, name, email FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(log_failure("get_by_id"))?;
        Ok(row)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn update(&self, user: &User) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET name = $1, email = $2
            WHERE id = $3
            RETURNING id, name, email
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.id())
        .fetch_optional(&self.db)
        .await
        .map_err(log_failure("update"))?;
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<Option<String>, StoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(log_failure("delete_by_id"))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(id.to_owned()))
    }
}
