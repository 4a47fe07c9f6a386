//! Server configuration, resolved once at startup from the environment.

use std::path::PathBuf;

use anyhow::{bail, Context};
use medtriage_core::credentials::{DEFAULT_TOKEN_TTL_MINUTES, PBKDF2_ITERATIONS};
use rand::RngCore;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE: &str = "medtriage.db";

/// Runtime settings for the REST server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Listen address (`MEDTRIAGE_ADDR`)
    pub addr: String,
    /// SQLite file (`MEDTRIAGE_DATABASE`)
    pub database_path: PathBuf,
    /// HS256 signing secret (`MEDTRIAGE_JWT_SECRET`)
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (`MEDTRIAGE_TOKEN_TTL_MINUTES`)
    pub token_ttl_minutes: u32,
    /// PBKDF2 rounds for new password hashes (`MEDTRIAGE_PBKDF2_ITERATIONS`)
    pub pbkdf2_iterations: u32,
    /// Optional JSON catalog loaded into an empty database (`MEDTRIAGE_SEED_CATALOG`)
    pub seed_catalog: Option<PathBuf>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("addr", &self.addr)
            .field("database_path", &self.database_path)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("pbkdf2_iterations", &self.pbkdf2_iterations)
            .field("seed_catalog", &self.seed_catalog)
            .finish()
    }
}

impl ServerConfig {
    /// Read settings from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, applying defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("MEDTRIAGE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let database_path = lookup("MEDTRIAGE_DATABASE")
            .unwrap_or_else(|| DEFAULT_DATABASE.into())
            .into();

        let jwt_secret = match lookup("MEDTRIAGE_JWT_SECRET") {
            Some(secret) if secret.is_empty() => bail!("MEDTRIAGE_JWT_SECRET must not be empty"),
            Some(secret) => secret.into_bytes(),
            None => {
                tracing::warn!(
                    "MEDTRIAGE_JWT_SECRET not set, using a random secret; tokens will not survive a restart"
                );
                random_secret()
            }
        };

        let token_ttl_minutes =
            parse_positive(&lookup, "MEDTRIAGE_TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        let pbkdf2_iterations =
            parse_positive(&lookup, "MEDTRIAGE_PBKDF2_ITERATIONS", PBKDF2_ITERATIONS)?;
        let seed_catalog = lookup("MEDTRIAGE_SEED_CATALOG")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            addr,
            database_path,
            jwt_secret,
            token_ttl_minutes,
            pbkdf2_iterations,
            seed_catalog,
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u32) -> anyhow::Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", key, raw))?;
    if value == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(value)
}

fn random_secret() -> Vec<u8> {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes).into_bytes()
}
