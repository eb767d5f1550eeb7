//! Runtime configuration, loaded once from `BROCHURE_*` environment
//! variables layered over built-in defaults.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Lower bound for the bcrypt work factor; weaker values are clamped up.
pub const MIN_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite connection string, e.g. `sqlite:brochure.db`.
    pub database_url: String,
    /// Shared secret required by the one-time admin bootstrap endpoint.
    pub setup_key: String,
    /// Session lifetime in seconds; successful lookups slide it forward.
    pub session_ttl_secs: u64,
    /// Interval between background sweeps for expired sessions.
    pub session_sweep_secs: u64,
    pub bcrypt_cost: u32,
    /// Optional directory of pre-built frontend assets to serve.
    pub static_dir: Option<PathBuf>,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite:brochure.db".to_string(),
            setup_key: "dev-setup-key-change-me".to_string(),
            session_ttl_secs: 86_400,
            session_sweep_secs: 3_600,
            bcrypt_cost: 12,
            static_dir: None,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("BROCHURE_"))
            .extract()
            .expect("invalid BROCHURE_* configuration")
    }

    /// bcrypt cost to use for new password hashes, clamped to the
    /// supported minimum.
    pub fn effective_bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.max(MIN_BCRYPT_COST)
    }

    /// Expired-session sweep period in seconds, floored at one second
    /// (`tokio::time::interval` panics on a zero period).
    pub fn effective_sweep_secs(&self) -> u64 {
        self.session_sweep_secs.max(1)
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
