//! Database-backed admin sessions.
//!
//! Session ids are opaque 64-character alphanumeric strings from a
//! CSPRNG (well over 128 bits of entropy). Rows live in the `sessions`
//! table, so sessions survive a server restart; a background sweeper
//! purges rows whose expiry has passed.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::{info, warn};

use crate::db::SiteStorage;
use crate::db::models::{Session, User};
use crate::error::BrochureError;

#[derive(Clone)]
pub struct SessionRegistry {
    storage: SiteStorage,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(storage: SiteStorage, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    fn generate_session_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// Mint and persist a session for `user`, returning its id.
    pub async fn create(&self, user: &User) -> Result<String, BrochureError> {
        let now = Utc::now();
        let session = Session {
            session_id: Self::generate_session_id(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.storage.insert_session(&session).await?;
        Ok(session.session_id)
    }

    /// Resolve a session id. Expired sessions are deleted and read as
    /// absent; live ones get their expiry slid forward by the TTL.
    pub async fn lookup(&self, session_id: &str) -> Result<Option<Session>, BrochureError> {
        let Some(mut session) = self.storage.get_session(session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.expires_at < now {
            self.storage.delete_session(session_id).await?;
            return Ok(None);
        }

        session.expires_at = now + self.ttl;
        self.storage
            .extend_session(session_id, session.expires_at)
            .await?;
        Ok(Some(session))
    }

    /// Drop a session. Unknown ids are a no-op.
    pub async fn destroy(&self, session_id: &str) -> Result<(), BrochureError> {
        self.storage.delete_session(session_id).await
    }

    /// Spawn the periodic cleanup task for expired rows. `every` must be
    /// nonzero; `Config::effective_sweep_secs` guarantees that.
    pub fn spawn_sweeper(&self, every: std::time::Duration) {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match registry.storage.delete_expired_sessions(Utc::now()).await {
                    Ok(0) => {}
                    Ok(count) => info!(count, "purged expired admin sessions"),
                    Err(e) => warn!(error = %e, "session sweep failed"),
                }
            }
        });
    }
}
