use crate::common::context::StoreContext;
use crate::models::single_sign_out::{Acknowledgement, LogoutNotification};
use crate::repositories::{session_indexes, sessions};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, warn};

/// Maps CAS session indexes to local session ids.
#[async_trait]
pub trait SessionIndexStore: Sync + Send {
    async fn store_session_index(&self, session_index: &str, session_id: &str)
    -> anyhow::Result<()>;

    async fn find_session_id(&self, session_index: &str) -> anyhow::Result<Option<String>>;

    /// Deleting an index that is not stored is not an error.
    async fn delete_index(&self, session_index: &str) -> anyhow::Result<()>;
}

/// Destroys local session state by id, independent of the requester's own session.
#[async_trait]
pub trait SessionDestroyer: Sync + Send {
    async fn destroy_by_id(&self, session_id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl SessionIndexStore for StoreContext {
    async fn store_session_index(
        &self,
        session_index: &str,
        session_id: &str,
    ) -> anyhow::Result<()> {
        session_indexes::create(self, session_index, session_id).await
    }

    async fn find_session_id(&self, session_index: &str) -> anyhow::Result<Option<String>> {
        session_indexes::fetch_session_id(self, session_index).await
    }

    async fn delete_index(&self, session_index: &str) -> anyhow::Result<()> {
        session_indexes::delete(self, session_index).await
    }
}

#[async_trait]
impl SessionDestroyer for StoreContext {
    async fn destroy_by_id(&self, session_id: &str) -> anyhow::Result<bool> {
        sessions::delete(self, session_id).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSignOutConfig {
    pub enabled: bool,
}

static SESSION_INDEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)^<samlp:LogoutRequest.*?<samlp:SessionIndex>(.*?)</samlp:SessionIndex>")
        .expect("Invalid session index pattern")
});

/// Extracts the CAS session index from a logout notification.
///
/// Multipart notifications and anything other than a POST carrying a
/// `logoutRequest` parameter yield `None`.
pub fn read_session_index(notification: &LogoutNotification) -> Option<String> {
    if notification.is_multipart() || !notification.is_post() {
        return None;
    }
    let logout_request = notification.logout_request.as_deref()?;
    SESSION_INDEX_PATTERN
        .captures(logout_request)
        .and_then(|captures| captures.get(1))
        .map(|session_index| session_index.as_str().to_owned())
}

pub struct SingleSignOutHandler {
    config: SingleSignOutConfig,
    index_store: Arc<dyn SessionIndexStore>,
    destroyer: Arc<dyn SessionDestroyer>,
}

impl SingleSignOutHandler {
    pub fn new(
        config: SingleSignOutConfig,
        index_store: Arc<dyn SessionIndexStore>,
        destroyer: Arc<dyn SessionDestroyer>,
    ) -> Self {
        Self {
            config,
            index_store,
            destroyer,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Processes a CAS logout notification. Never fails: every outcome,
    /// including collaborator errors, is acknowledged and only logged.
    pub async fn handle(&self, notification: &LogoutNotification) -> Acknowledgement {
        if !self.config.enabled {
            warn!("Ignoring CAS single-sign-out request as feature is not currently enabled.");
            return Acknowledgement;
        }

        let Some(session_index) = read_session_index(notification) else {
            warn!(
                "Ignoring CAS single-sign-out request as no session index could be parsed from the parameters."
            );
            return Acknowledgement;
        };

        debug!(
            session_index,
            "Intercepted single-sign-out request for CAS session"
        );

        match self.index_store.find_session_id(&session_index).await {
            Ok(Some(session_id)) => {
                debug!(session_id, session_index, "Found session for CAS session index");
                self.destroy_session(&session_index, &session_id).await;
            }
            Ok(None) => debug!(session_index, "No session recorded for CAS session index"),
            Err(e) => error!(
                session_index,
                "Failed to look up session for CAS session index: {e:?}"
            ),
        }

        if let Err(e) = self.index_store.delete_index(&session_index).await {
            error!(
                session_index,
                "Failed to delete CAS session index: {e:?}"
            );
        }
        Acknowledgement
    }

    async fn destroy_session(&self, session_index: &str, session_id: &str) {
        match self.destroyer.destroy_by_id(session_id).await {
            Ok(true) => debug!(
                session_id,
                session_index, "Destroyed session corresponding to CAS session index"
            ),
            Ok(false) => debug!(
                session_id,
                session_index, "Session was already gone when handling single-sign-out"
            ),
            Err(e) => error!(
                session_id,
                session_index, "Failed to destroy session: {e:?}"
            ),
        }
    }
}
