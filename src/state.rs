use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::activities::client::{ActivitiesClient, HttpActivitiesClient};
use crate::config::AppConfig;
use crate::users::repo::{PgUserRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub users: Arc<dyn UserRepository>,
    pub activities: Arc<dyn ActivitiesClient>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_with(config.database.connect_options()?)
            .await
            .context("connect to database")?;

        let activities = HttpActivitiesClient::new(&config.activities_api_url)
            .context("activities client")?;

        Ok(Self::from_parts(
            db.clone(),
            Arc::new(PgUserRepository::new(db)),
            Arc::new(activities),
        ))
    }

    pub fn from_parts(
        db: PgPool,
        users: Arc<dyn UserRepository>,
        activities: Arc<dyn ActivitiesClient>,
    ) -> Self {
        Self {
            db,
            users,
            activities,
        }
    }

    /// Closes the pool; in-flight queries finish first.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
impl AppState {
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new().connect_lazy_with(
            sqlx::postgres::PgConnectOptions::new()
                .host("localhost")
                .username("postgres")
                .password("postgres")
                .database("postgres"),
        )
    }

    fn unreachable_activities() -> Arc<dyn ActivitiesClient> {
        Arc::new(HttpActivitiesClient::new("http://127.0.0.1:9").expect("static url"))
    }

    pub fn fake_with_users(users: Arc<dyn UserRepository>) -> Self {
        Self::from_parts(Self::lazy_pool(), users, Self::unreachable_activities())
    }

    pub fn fake_with_activities(activities: Arc<dyn ActivitiesClient>) -> Self {
        Self::from_parts(
            Self::lazy_pool(),
            Arc::new(crate::users::memory::InMemoryUserRepository::new()),
            activities,
        )
    }
}
