//! Session list state
//!
//! Client-side holder for one user's sessions. Local state is never the
//! source of truth: every mutation round-trips through the gateway before
//! the list changes. A failed refresh keeps the previous list
//! (stale-but-available).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::models::{ChatSession, SessionPatch};
use crate::gateway::{ChatGateway, ListSessionsOptions};
use crate::shared::errors::Result;

#[derive(Default)]
struct SessionsInner {
    sessions: Vec<ChatSession>,
    loading: bool,
    error: Option<String>,
}

pub struct SessionState {
    gateway: Arc<dyn ChatGateway>,
    user_id: String,
    inner: RwLock<SessionsInner>,
}

impl SessionState {
    pub fn new(gateway: Arc<dyn ChatGateway>, user_id: impl Into<String>) -> Self {
        Self {
            gateway,
            user_id: user_id.into(),
            inner: RwLock::new(SessionsInner::default()),
        }
    }

    /// Fetches page 1 and replaces local state. On failure the previous
    /// list is preserved and the error flag is set.
    pub async fn load(&self) -> Result<()> {
        {
            let mut inner = self.inner.write().await;
            inner.loading = true;
            inner.error = None;
        }

        let result = self
            .gateway
            .list_sessions(&self.user_id, ListSessionsOptions::default())
            .await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        match result {
            Ok(page) => {
                inner.sessions = page.items;
                Ok(())
            }
            Err(e) => {
                inner.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Creates a session and prepends it (newest-first).
    pub async fn create(&self, title: &str) -> Result<ChatSession> {
        let created = self
            .gateway
            .create_session(crate::gateway::NewSession {
                title: title.to_string(),
                user_id: self.user_id.clone(),
                id: None,
            })
            .await;

        match created {
            Ok(session) => {
                let mut inner = self.inner.write().await;
                inner.sessions.insert(0, session.clone());
                Ok(session)
            }
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Updates a session and replaces the matching local entry.
    pub async fn update(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        match self.gateway.update_session(id, patch).await {
            Ok(updated) => {
                let mut inner = self.inner.write().await;
                if let Some(existing) = inner.sessions.iter_mut().find(|s| s.id == id) {
                    *existing = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Deletes a session and removes the matching local entry.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.gateway.delete_session(id).await {
            Ok(()) => {
                let mut inner = self.inner.write().await;
                inner.sessions.retain(|s| s.id != id);
                Ok(())
            }
            Err(e) => {
                self.set_error(&e).await;
                Err(e)
            }
        }
    }

    /// Refreshes the list on a fixed interval. Overlapping refreshes are
    /// not cancelled; the later completion wins.
    pub fn spawn_polling(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = state.load().await;
            }
        })
    }

    pub async fn sessions(&self) -> Vec<ChatSession> {
        self.inner.read().await.sessions.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    async fn set_error(&self, error: &crate::shared::errors::AppError) {
        let mut inner = self.inner.write().await;
        inner.error = Some(error.to_string());
    }
}
