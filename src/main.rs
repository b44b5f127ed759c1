mod activities;
mod app;
mod config;
mod error;
mod state;
mod telemetry;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init(&config.log)?;

    let state = AppState::init(&config).await?;

    sqlx::migrate!("./migrations").run(&state.db).await?;
    tracing::info!("migrations applied");

    let result = app::serve(app::build_app(state.clone()), &config).await;

    state.close().await;
    tracing::info!("database pool closed");
    result
}
