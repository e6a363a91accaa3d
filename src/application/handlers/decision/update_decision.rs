//! UpdateDecisionHandler - Command handler for renaming and (un)archiving.

use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{DecisionId, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Command to update a decision. Absent fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateDecisionCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub archived: Option<bool>,
}

/// Handler for updating decisions.
pub struct UpdateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateDecisionCommand) -> Result<Decision, DecisionError> {
        let mut decision =
            load_owned(self.repository.as_ref(), cmd.decision_id, cmd.user_id).await?;

        if let Some(title) = cmd.title {
            decision.rename(title)?;
        }
        if let Some(archived) = cmd.archived {
            decision.set_archived(archived);
        }
        // Saving with no changes still counts as activity.
        decision.touch();

        self.repository.update(&decision).await?;
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDecisionRepository;
    use crate::domain::decision::{NewDecision, DEFAULT_TITLE};

    async fn seeded() -> (Arc<InMemoryDecisionRepository>, Decision) {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let new = NewDecision::new(UserId::from_raw(1), Some("Old".to_string())).unwrap();
        let decision = repo.create(&new).await.unwrap();
        (repo, decision)
    }

    fn cmd(id: DecisionId) -> UpdateDecisionCommand {
        UpdateDecisionCommand {
            decision_id: id,
            user_id: UserId::from_raw(1),
            title: None,
            archived: None,
        }
    }

    #[tokio::test]
    async fn renames_and_persists() {
        let (repo, decision) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo.clone());

        let updated = handler
            .handle(UpdateDecisionCommand {
                title: Some("New".to_string()),
                ..cmd(decision.id())
            })
            .await
            .unwrap();

        assert_eq!(updated.title(), "New");
        let stored = repo.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "New");
    }

    #[tokio::test]
    async fn archives_without_touching_title() {
        let (repo, decision) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo.clone());

        let updated = handler
            .handle(UpdateDecisionCommand {
                archived: Some(true),
                ..cmd(decision.id())
            })
            .await
            .unwrap();

        assert!(updated.is_archived());
        assert_eq!(updated.title(), "Old");
    }

    #[tokio::test]
    async fn empty_update_still_bumps_updated_at() {
        let (repo, decision) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo);

        let updated = handler.handle(cmd(decision.id())).await.unwrap();

        assert!(updated.updated_at() >= decision.updated_at());
    }

    #[tokio::test]
    async fn blank_title_resets_to_default() {
        let (repo, decision) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo.clone());

        let updated = handler
            .handle(UpdateDecisionCommand {
                title: Some("   ".to_string()),
                ..cmd(decision.id())
            })
            .await
            .unwrap();

        assert_eq!(updated.title(), DEFAULT_TITLE);
        let stored = repo.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let (repo, decision) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo);

        let result = handler
            .handle(UpdateDecisionCommand {
                user_id: UserId::from_raw(9),
                archived: Some(true),
                ..cmd(decision.id())
            })
            .await;

        assert!(matches!(result, Err(DecisionError::Forbidden)));
    }

    #[tokio::test]
    async fn unknown_decision_is_not_found() {
        let (repo, _) = seeded().await;
        let handler = UpdateDecisionHandler::new(repo);

        let result = handler.handle(cmd(DecisionId::from_raw(404))).await;

        assert!(matches!(result, Err(DecisionError::NotFound(_))));
    }
}
