//! DecisionBoard - the client's state container.
//!
//! Holds the active and archived decision lists, the decision being edited,
//! and the error banner. Every mutation goes through `&mut self`, so the
//! board needs no locking. The backend is reached through the
//! [`DecisionApi`] port; the session through [`AuthSession`].
//!
//! Failures never unwind local state that was already changed before the
//! failing call. They set the banner and are returned to the caller.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::decision::{ItemKind, NewItem};
use crate::domain::foundation::{DecisionId, ItemId};
use crate::domain::scoring::Score;
use crate::ports::{ApiError, DecisionApi, DecisionPatch};

use super::model::BoardDecision;
use super::session::AuthSession;

pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// Why a board operation failed. `Display` is the banner text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("{0}")]
    Failed(String),
}

/// Decision list plus the decision currently open in the editor.
pub struct DecisionBoard {
    api: Arc<dyn DecisionApi>,
    session: AuthSession,
    active: Vec<BoardDecision>,
    archived: Vec<BoardDecision>,
    current: BoardDecision,
    error: Option<String>,
    loading: bool,
    show_archived: bool,
}

impl DecisionBoard {
    pub fn new(api: Arc<dyn DecisionApi>, session: AuthSession) -> Self {
        Self {
            api,
            session,
            active: Vec::new(),
            archived: Vec::new(),
            current: BoardDecision::draft(),
            error: None,
            loading: false,
            show_archived: false,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Read access
    // ════════════════════════════════════════════════════════════════════════

    pub fn active(&self) -> &[BoardDecision] {
        &self.active
    }

    pub fn archived(&self) -> &[BoardDecision] {
        &self.archived
    }

    pub fn current(&self) -> &BoardDecision {
        &self.current
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn shows_archived(&self) -> bool {
        self.show_archived
    }

    /// The list the sidebar should show.
    pub fn listed(&self) -> &[BoardDecision] {
        if self.show_archived {
            &self.archived
        } else {
            &self.active
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Scoring engine output for the decision being edited.
    pub fn score(&self) -> Score {
        self.current.score()
    }

    // ════════════════════════════════════════════════════════════════════════
    // UI toggles
    // ════════════════════════════════════════════════════════════════════════

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn toggle_show_archived(&mut self) {
        self.show_archived = !self.show_archived;
    }

    // ════════════════════════════════════════════════════════════════════════
    // Operations
    // ════════════════════════════════════════════════════════════════════════

    /// Reloads both lists and opens the most recent active decision.
    pub async fn fetch_decisions(&mut self) -> Result<(), BoardError> {
        self.loading = true;
        self.error = None;

        let result = self.load_listing().await;
        self.loading = false;

        match result {
            Ok((active, archived)) => {
                if let Some(first) = active.first() {
                    self.current = first.clone();
                }
                self.active = active;
                self.archived = archived;
                Ok(())
            }
            Err(e) => self.fail(e, |e| format!("Failed to load decisions: {}", e)).await,
        }
    }

    /// Adds a pro or con to the current decision, saving a draft first.
    ///
    /// Blank text is ignored.
    pub async fn add_item(
        &mut self,
        kind: ItemKind,
        text: &str,
        magnitude: i32,
    ) -> Result<(), BoardError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let label = kind.as_str();
        let new_item = match NewItem::new(kind, text, magnitude) {
            Ok(item) => item,
            Err(e) => return self.banner(format!("Failed to add {}: {}", label, e)),
        };

        let decision_id = match self.current.persisted_id() {
            Some(id) => id,
            None => match self.promote_current().await {
                Ok(id) => id,
                Err(e) => return self.fail(e, |e| format!("Failed to add {}: {}", label, e)).await,
            },
        };

        let item = self
            .api
            .add_item(decision_id, &new_item)
            .await
            .and_then(|remote| remote.into_item());

        match item {
            Ok(item) => {
                self.current.push_item(item);
                self.sync_current();
                Ok(())
            }
            Err(e) => self.fail(e, |e| format!("Failed to add {}: {}", label, e)).await,
        }
    }

    /// Deletes an item of the current decision.
    pub async fn remove_item(&mut self, item_id: ItemId) -> Result<(), BoardError> {
        let Some(kind) = self.current.item(item_id).map(|i| i.kind()) else {
            return Ok(());
        };

        if let Err(e) = self.api.delete_item(item_id).await {
            let label = kind.as_str();
            return self.fail(e, |_| format!("Failed to remove {}", label)).await;
        }

        self.current.remove_item(item_id);
        self.sync_current();
        Ok(())
    }

    /// Persists the current decision: update if it has an id, create if not.
    pub async fn save_current(&mut self) -> Result<(), BoardError> {
        let result = match self.current.persisted_id() {
            Some(id) => {
                let patch = DecisionPatch {
                    title: Some(self.current.title().to_string()),
                    archived: Some(self.current.is_archived()),
                };
                match self.api.update_decision(id, &patch).await {
                    Ok(remote) => {
                        self.current.set_title(remote.title);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            None => self.promote_current().await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.sync_current();
                Ok(())
            }
            Err(e) => self.fail(e, |_| "Failed to save decision".to_string()).await,
        }
    }

    /// Starts a fresh draft, saving the current one if it holds unsaved work.
    pub async fn create_new_decision(&mut self) -> Result<(), BoardError> {
        let saved = if self.current.has_items() && self.current.is_draft() {
            self.save_current().await
        } else {
            Ok(())
        };

        self.current = BoardDecision::draft();
        saved
    }

    /// Opens a decision from either list. Returns false if it is unknown.
    pub fn load_decision(&mut self, id: DecisionId) -> bool {
        match self
            .active
            .iter()
            .chain(self.archived.iter())
            .find(|d| d.is(id))
        {
            Some(decision) => {
                self.current = decision.clone();
                true
            }
            None => false,
        }
    }

    pub async fn archive_decision(&mut self, id: DecisionId) -> Result<(), BoardError> {
        let Some(index) = self.active.iter().position(|d| d.is(id)) else {
            return Ok(());
        };

        if let Err(e) = self.api.update_decision(id, &DecisionPatch::archived(true)).await {
            return self.fail(e, |_| "Failed to archive decision".to_string()).await;
        }

        let mut decision = self.active.remove(index);
        decision.set_archived(true);
        self.archived.push(decision);

        if self.current.is(id) {
            self.current = BoardDecision::draft();
        }
        Ok(())
    }

    pub async fn restore_decision(&mut self, id: DecisionId) -> Result<(), BoardError> {
        let Some(index) = self.archived.iter().position(|d| d.is(id)) else {
            return Ok(());
        };

        if let Err(e) = self.api.update_decision(id, &DecisionPatch::archived(false)).await {
            return self.fail(e, |_| "Failed to restore decision".to_string()).await;
        }

        let mut decision = self.archived.remove(index);
        decision.set_archived(false);
        self.current = decision.clone();
        self.active.push(decision);
        Ok(())
    }

    pub async fn delete_decision(&mut self, id: DecisionId) -> Result<(), BoardError> {
        let known = self.current.is(id)
            || self.active.iter().any(|d| d.is(id))
            || self.archived.iter().any(|d| d.is(id));
        if !known {
            return Ok(());
        }

        if let Err(e) = self.api.delete_decision(id).await {
            return self.fail(e, |_| "Failed to delete decision".to_string()).await;
        }

        self.active.retain(|d| !d.is(id));
        self.archived.retain(|d| !d.is(id));
        if self.current.is(id) {
            self.current = BoardDecision::draft();
        }
        Ok(())
    }

    /// Renames the current decision and saves it. The backend's title wins,
    /// so a cleared title comes back as "New Decision".
    pub async fn update_title(&mut self, title: &str) -> Result<(), BoardError> {
        self.current.set_title(title);
        self.save_current().await
    }

    // ════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════

    async fn load_listing(&self) -> Result<(Vec<BoardDecision>, Vec<BoardDecision>), ApiError> {
        let listing = self.api.list_decisions().await?;
        let active = listing
            .active
            .into_iter()
            .map(BoardDecision::from_remote)
            .collect::<Result<Vec<_>, _>>()?;
        let archived = listing
            .archived
            .into_iter()
            .map(BoardDecision::from_remote)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((active, archived))
    }

    /// Creates the current draft on the backend and lists it as active.
    async fn promote_current(&mut self) -> Result<DecisionId, ApiError> {
        let remote = self.api.create_decision(self.current.title()).await?;
        self.current.promote(remote.id, remote.created_at);
        self.current.set_title(remote.title);
        self.active.push(self.current.clone());
        tracing::debug!(decision_id = %remote.id, "draft saved");
        Ok(remote.id)
    }

    /// Copies the current decision over its entry in whichever list holds it.
    fn sync_current(&mut self) {
        let key = self.current.key();
        let list = if self.current.is_archived() {
            &mut self.archived
        } else {
            &mut self.active
        };

        match list.iter_mut().find(|d| d.key() == key) {
            Some(entry) => *entry = self.current.clone(),
            None => list.push(self.current.clone()),
        }
    }

    fn banner(&mut self, message: String) -> Result<(), BoardError> {
        self.error = Some(message.clone());
        Err(BoardError::Failed(message))
    }

    /// Records a failed call. Unauthorized ends the session.
    async fn fail<F>(&mut self, error: ApiError, message: F) -> Result<(), BoardError>
    where
        F: FnOnce(&ApiError) -> String,
    {
        if error.is_unauthorized() {
            self.expire_session().await;
            return Err(BoardError::SessionExpired);
        }

        tracing::warn!(error = %error, "decision board request failed");
        self.banner(message(&error))
    }

    async fn expire_session(&mut self) {
        if let Err(e) = self.session.logout().await {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        self.active.clear();
        self.archived.clear();
        self.current = BoardDecision::draft();
        self.loading = false;
        self.error = Some(SESSION_EXPIRED.to_string());
    }
}
