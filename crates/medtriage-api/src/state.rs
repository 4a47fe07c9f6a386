//! Shared application state.

use std::sync::Arc;

use medtriage_core::{
    Database, PasswordHasher, SharedDatabase, TokenIssuer, TriageResult, TriageService,
};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    db: SharedDatabase,
    tokens: Arc<TokenIssuer>,
    hasher: PasswordHasher,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        Self {
            db: SharedDatabase::new(db),
            tokens: Arc::new(tokens),
            hasher,
        }
    }

    /// Build state for an already-opened database from server settings.
    pub fn from_config(db: Database, cfg: &ServerConfig) -> Self {
        Self::new(
            db,
            TokenIssuer::new(&cfg.jwt_secret, cfg.token_ttl_minutes),
            PasswordHasher::new(cfg.pbkdf2_iterations),
        )
    }

    /// Run a service call on the blocking pool. The database is locked per query only.
    pub async fn run<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&TriageService<'_, SharedDatabase>) -> TriageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let tokens = Arc::clone(&self.tokens);
        let hasher = self.hasher;

        tokio::task::spawn_blocking(move || {
            let service = TriageService::new(&db, hasher, &tokens);
            f(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::internal(format!("blocking task failed: {}", e)))?
    }
}
