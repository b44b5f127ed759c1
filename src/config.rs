use std::str::FromStr;

use anyhow::Context;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; wins over the individual fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives, from `RUST_LOG`.
    pub filter: String,
    /// `LOG_FORMAT=json` switches to one JSON object per line.
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log: LogConfig,
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
    pub activities_api_url: String,
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {v:?}")),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL"),
            host: var("DB_HOST", "db"),
            port: parse_or(lookup("DB_PORT"), "DB_PORT", 5432)?,
            user: var("DB_USER", "admin"),
            password: var("DB_PASSWORD", "password"),
            name: var("DB_NAME", "mydatabase"),
            max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10)?,
        };

        let log = LogConfig {
            filter: var("RUST_LOG", "users_api=debug,axum=info,tower_http=info"),
            json: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        };

        Ok(Self {
            log,
            database,
            host: var("APP_HOST", "0.0.0.0"),
            port: parse_or(lookup("PORT"), "PORT", 3000)?,
            activities_api_url: var("ACTIVITIES_API_URL", "http://another-api.com"),
        })
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .context("parse DATABASE_URL");
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}
