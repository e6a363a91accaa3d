//! In-process stand-in for the backend, shared by the client tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::domain::decision::{ItemKind, NewItem, DEFAULT_TITLE};
use crate::domain::foundation::{DecisionId, ItemId, Timestamp, UserId};
use crate::ports::{
    ApiError, DecisionApi, DecisionListing, DecisionPatch, Registration, RemoteDecision,
    RemoteItem, SessionGrant,
};

#[derive(Default)]
struct State {
    token: Option<String>,
    calls: usize,
    failures: VecDeque<ApiError>,
    decisions: Vec<RemoteDecision>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Counts the call and replays a queued failure, if any.
    fn begin(&mut self) -> Result<(), ApiError> {
        self.calls += 1;
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn begin_authorized(&mut self) -> Result<(), ApiError> {
        self.begin()?;
        if self.token.is_none() {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    fn find_mut(&mut self, id: DecisionId) -> Result<&mut RemoteDecision, ApiError> {
        self.decisions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found("Decision not found"))
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: message.to_string(),
    }
}

/// Blank titles come back as the default, like the real backend.
fn stored_title(title: &str) -> String {
    match title.trim() {
        "" => DEFAULT_TITLE.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn grant(id: i64, username: &str, email: Option<String>) -> SessionGrant {
    SessionGrant {
        id: UserId::from_raw(id),
        username: username.to_string(),
        email,
        token: format!("token-{}", username),
    }
}

pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Adds a decision the backend already knows about.
    pub async fn seed(&self, title: &str, archived: bool) -> DecisionId {
        let mut state = self.state.lock().await;
        let id = DecisionId::from_raw(state.next_id());
        let now = Timestamp::now();
        state.decisions.push(RemoteDecision {
            id,
            title: title.to_string(),
            archived,
            created_at: now,
            updated_at: now,
            pros: Vec::new(),
            cons: Vec::new(),
        });
        id
    }

    pub async fn fail_next(&self, err: ApiError) {
        self.state.lock().await.failures.push_back(err);
    }

    pub async fn token(&self) -> Option<String> {
        self.state.lock().await.token.clone()
    }

    pub async fn calls(&self) -> usize {
        self.state.lock().await.calls
    }

    pub async fn decision(&self, id: DecisionId) -> Option<RemoteDecision> {
        self.state
            .lock()
            .await
            .decisions
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    pub async fn decision_count(&self) -> usize {
        self.state.lock().await.decisions.len()
    }
}

#[async_trait]
impl DecisionApi for FakeApi {
    async fn set_token(&self, token: Option<String>) {
        self.state.lock().await.token = token;
    }

    async fn login(&self, username: &str, _password: &str) -> Result<SessionGrant, ApiError> {
        self.state.lock().await.begin()?;
        Ok(grant(1, username, None))
    }

    async fn register(&self, registration: &Registration) -> Result<SessionGrant, ApiError> {
        let mut state = self.state.lock().await;
        state.begin()?;
        let id = state.next_id();
        Ok(grant(id, &registration.username, registration.email.clone()))
    }

    async fn list_decisions(&self) -> Result<DecisionListing, ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        let (archived, active): (Vec<_>, Vec<_>) =
            state.decisions.iter().cloned().partition(|d| d.archived);
        Ok(DecisionListing { active, archived })
    }

    async fn create_decision(&self, title: &str) -> Result<RemoteDecision, ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        let id = DecisionId::from_raw(state.next_id());
        let now = Timestamp::now();
        let decision = RemoteDecision {
            id,
            title: stored_title(title),
            archived: false,
            created_at: now,
            updated_at: now,
            pros: Vec::new(),
            cons: Vec::new(),
        };
        state.decisions.push(decision.clone());
        Ok(decision)
    }

    async fn update_decision(
        &self,
        id: DecisionId,
        patch: &DecisionPatch,
    ) -> Result<RemoteDecision, ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        let decision = state.find_mut(id)?;
        if let Some(title) = &patch.title {
            decision.title = stored_title(title);
        }
        if let Some(archived) = patch.archived {
            decision.archived = archived;
        }
        decision.updated_at = Timestamp::now();
        Ok(decision.clone())
    }

    async fn delete_decision(&self, id: DecisionId) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        let before = state.decisions.len();
        state.decisions.retain(|d| d.id != id);
        if state.decisions.len() == before {
            return Err(not_found("Decision not found"));
        }
        Ok(())
    }

    async fn add_item(
        &self,
        decision_id: DecisionId,
        item: &NewItem,
    ) -> Result<RemoteItem, ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        let id = ItemId::from_raw(state.next_id());
        let decision = state.find_mut(decision_id)?;
        let remote = RemoteItem {
            id,
            decision_id,
            text: item.text().to_string(),
            weight: item.weight().value(),
            kind: item.kind(),
        };
        match item.kind() {
            ItemKind::Pro => decision.pros.push(remote.clone()),
            ItemKind::Con => decision.cons.push(remote.clone()),
        }
        Ok(remote)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.begin_authorized()?;
        for decision in state.decisions.iter_mut() {
            let before = decision.pros.len() + decision.cons.len();
            decision.pros.retain(|i| i.id != id);
            decision.cons.retain(|i| i.id != id);
            if decision.pros.len() + decision.cons.len() != before {
                return Ok(());
            }
        }
        Err(not_found("Item not found"))
    }
}
