use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::content::ContentClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub content: ContentClient,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ContentClient {
    fn from_ref(state: &AppState) -> Self {
        state.content.clone()
    }
}
