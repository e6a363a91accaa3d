//! HTTP handlers for decision and item endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::decision::{
    AddItemCommand, AddItemHandler, CreateDecisionCommand, CreateDecisionHandler,
    DeleteDecisionCommand, DeleteDecisionHandler, DeleteItemCommand, DeleteItemHandler,
    GetDecisionHandler, GetDecisionQuery, ListDecisionsHandler, ListDecisionsQuery,
    UpdateDecisionCommand, UpdateDecisionHandler, UpdateItemCommand, UpdateItemHandler,
};
use crate::domain::decision::DecisionError;
use crate::domain::foundation::{DecisionId, ItemId};
use crate::ports::DecisionRepository;

use super::dto::{
    AddItemRequest, CreateDecisionRequest, DecisionListResponse, DecisionResponse, ItemResponse,
    SuccessResponse, UpdateDecisionRequest, UpdateItemRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for decision endpoints. Handlers are built per request.
#[derive(Clone)]
pub struct DecisionAppState {
    pub decision_repository: Arc<dyn DecisionRepository>,
}

impl DecisionAppState {
    pub fn new(decision_repository: Arc<dyn DecisionRepository>) -> Self {
        Self {
            decision_repository,
        }
    }

    pub fn create_handler(&self) -> CreateDecisionHandler {
        CreateDecisionHandler::new(self.decision_repository.clone())
    }

    pub fn get_handler(&self) -> GetDecisionHandler {
        GetDecisionHandler::new(self.decision_repository.clone())
    }

    pub fn list_handler(&self) -> ListDecisionsHandler {
        ListDecisionsHandler::new(self.decision_repository.clone())
    }

    pub fn update_handler(&self) -> UpdateDecisionHandler {
        UpdateDecisionHandler::new(self.decision_repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteDecisionHandler {
        DeleteDecisionHandler::new(self.decision_repository.clone())
    }

    pub fn add_item_handler(&self) -> AddItemHandler {
        AddItemHandler::new(self.decision_repository.clone())
    }

    pub fn update_item_handler(&self) -> UpdateItemHandler {
        UpdateItemHandler::new(self.decision_repository.clone())
    }

    pub fn delete_item_handler(&self) -> DeleteItemHandler {
        DeleteItemHandler::new(self.decision_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Decision handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/decisions - List the caller's decisions
pub async fn list_decisions(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListDecisionsQuery { user_id: user.id };

    match state.list_handler().handle(query).await {
        Ok(lists) => {
            let response: DecisionListResponse = lists.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// POST /api/decisions - Create a decision
pub async fn create_decision(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    body: Option<Json<CreateDecisionRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = CreateDecisionCommand {
        user_id: user.id,
        title: req.title,
    };

    match state.create_handler().handle(cmd).await {
        Ok(decision) => {
            let response: DecisionResponse = decision.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// GET /api/decisions/:id - Get one decision
pub async fn get_decision(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(decision_id): Path<String>,
) -> Response {
    let decision_id = match decision_id.parse::<DecisionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("decision"),
    };

    let query = GetDecisionQuery {
        decision_id,
        user_id: user.id,
    };

    match state.get_handler().handle(query).await {
        Ok(decision) => {
            let response: DecisionResponse = decision.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// PUT /api/decisions/:id - Rename, archive, or restore a decision
pub async fn update_decision(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(decision_id): Path<String>,
    ApiJson(req): ApiJson<UpdateDecisionRequest>,
) -> Response {
    let decision_id = match decision_id.parse::<DecisionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("decision"),
    };

    let cmd = UpdateDecisionCommand {
        decision_id,
        user_id: user.id,
        title: req.title,
        archived: req.archived,
    };

    match state.update_handler().handle(cmd).await {
        Ok(decision) => {
            let response: DecisionResponse = decision.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// DELETE /api/decisions/:id - Delete a decision and its items
pub async fn delete_decision(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(decision_id): Path<String>,
) -> Response {
    let decision_id = match decision_id.parse::<DecisionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("decision"),
    };

    let cmd = DeleteDecisionCommand {
        decision_id,
        user_id: user.id,
    };

    match state.delete_handler().handle(cmd).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Item handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/decisions/:id/items - Add a pro or con
pub async fn add_item(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(decision_id): Path<String>,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> Response {
    let decision_id = match decision_id.parse::<DecisionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("decision"),
    };

    let cmd = AddItemCommand {
        decision_id,
        user_id: user.id,
        kind: req.kind,
        text: req.text,
        weight: req.weight,
    };

    match state.add_item_handler().handle(cmd).await {
        Ok(item) => {
            let response: ItemResponse = item.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// PUT /api/items/:id - Edit an item's text or weight
pub async fn update_item(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> Response {
    let item_id = match item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("item"),
    };

    let cmd = UpdateItemCommand {
        item_id,
        user_id: user.id,
        text: req.text,
        weight: req.weight,
    };

    match state.update_item_handler().handle(cmd).await {
        Ok(item) => {
            let response: ItemResponse = item.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// DELETE /api/items/:id - Remove an item
pub async fn delete_item(
    State(state): State<DecisionAppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
) -> Response {
    let item_id = match item_id.parse::<ItemId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("item"),
    };

    let cmd = DeleteItemCommand {
        item_id,
        user_id: user.id,
    };

    match state.delete_item_handler().handle(cmd).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_id(resource: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {} ID", resource))),
    )
        .into_response()
}

fn handle_decision_error(error: DecisionError) -> Response {
    let message = error.message();
    match error {
        DecisionError::NotFound(_) | DecisionError::ItemNotFound(_) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found(message))).into_response()
        }
        DecisionError::Forbidden => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::forbidden(message))).into_response()
        }
        DecisionError::ValidationFailed { field, .. } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(message)
                    .with_details(serde_json::json!({ "field": field })),
            ),
        )
            .into_response(),
        DecisionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "decision request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
