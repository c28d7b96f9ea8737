mod app;
mod auth;
mod config;
mod db;
mod error;
mod extract;
mod foods;
mod meals;
#[cfg(test)]
mod memory;
mod seed;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "caltrack=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    seed::ensure_admin_seed(app_state.users.as_ref(), &app_state.config.seed).await?;
    seed::ensure_food_seed(app_state.foods.as_ref()).await?;

    let app = app::build_app(app_state);
    app::serve(app).await
}
