//! reqwest implementation of the DecisionApi port.
//!
//! Talks to the PivotPoint backend over JSON. The bearer token lives behind
//! an async lock so one client can be shared by the session and the board.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::decision::{ItemKind, NewItem};
use crate::domain::foundation::{DecisionId, ItemId};
use crate::ports::{
    ApiError, DecisionApi, DecisionListing, DecisionPatch, Registration, RemoteDecision,
    RemoteItem, SessionGrant,
};

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL including the `/api` prefix, e.g. `http://localhost:5001/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateDecisionBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct AddItemBody<'a> {
    text: &'a str,
    weight: i32,
    #[serde(rename = "type")]
    kind: ItemKind,
}

/// HTTP client for the decision backend.
pub struct HttpDecisionApi {
    base_url: String,
    client: Client,
    token: RwLock<Option<String>>,
}

impl HttpDecisionApi {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request carrying the current token. Fails fast without one.
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token.read().await.clone().ok_or(ApiError::Unauthorized)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(token))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Network("Request timed out".to_string())
            } else if e.is_connect() {
                ApiError::Network(format!("Connection failed: {}", e))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(ApiError::Unauthorized),
            code => Err(ApiError::Status {
                status: code,
                message: Self::error_message(&body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                }),
            }),
        }
    }

    /// Pulls a human-readable message out of an error body.
    fn error_message(body: &str) -> Option<String> {
        let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| parsed.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl DecisionApi for HttpDecisionApi {
    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn login(&self, username: &str, password: &str) -> Result<SessionGrant, ApiError> {
        let request = self
            .client
            .post(self.url("/login"))
            .json(&Credentials { username, password });
        Self::decode(Self::send(request).await?).await
    }

    async fn register(&self, registration: &Registration) -> Result<SessionGrant, ApiError> {
        let request = self.client.post(self.url("/register")).json(registration);
        Self::decode(Self::send(request).await?).await
    }

    async fn list_decisions(&self) -> Result<DecisionListing, ApiError> {
        let request = self.authorized(Method::GET, "/decisions").await?;
        Self::decode(Self::send(request).await?).await
    }

    async fn create_decision(&self, title: &str) -> Result<RemoteDecision, ApiError> {
        let request = self
            .authorized(Method::POST, "/decisions")
            .await?
            .json(&CreateDecisionBody { title });
        Self::decode(Self::send(request).await?).await
    }

    async fn update_decision(
        &self,
        id: DecisionId,
        patch: &DecisionPatch,
    ) -> Result<RemoteDecision, ApiError> {
        let request = self
            .authorized(Method::PUT, &format!("/decisions/{}", id))
            .await?
            .json(patch);
        Self::decode(Self::send(request).await?).await
    }

    async fn delete_decision(&self, id: DecisionId) -> Result<(), ApiError> {
        let request = self
            .authorized(Method::DELETE, &format!("/decisions/{}", id))
            .await?;
        Self::send(request).await?;
        Ok(())
    }

    async fn add_item(
        &self,
        decision_id: DecisionId,
        item: &NewItem,
    ) -> Result<RemoteItem, ApiError> {
        let body = AddItemBody {
            text: item.text(),
            weight: item.weight().magnitude(),
            kind: item.kind(),
        };
        let request = self
            .authorized(Method::POST, &format!("/decisions/{}/items", decision_id))
            .await?
            .json(&body);
        Self::decode(Self::send(request).await?).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        let request = self
            .authorized(Method::DELETE, &format!("/items/{}", id))
            .await?;
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> HttpDecisionApi {
        HttpDecisionApi::new(ApiClientConfig::new(format!("{}/api", server.uri()))).unwrap()
    }

    fn decision_json(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": 1,
            "title": title,
            "archived": false,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z",
            "pros": [],
            "cons": []
        })
    }

    #[tokio::test]
    async fn login_posts_credentials_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({ "username": "alice", "password": "secret123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": null, "token": "jwt"
            })))
            .mount(&server)
            .await;

        let grant = api_for(&server).await.login("alice", "secret123").await.unwrap();

        assert_eq!(grant.token, "jwt");
        assert_eq!(grant.username, "alice");
    }

    #[tokio::test]
    async fn authorized_calls_fail_fast_without_token() {
        let server = MockServer::start().await;
        let api = api_for(&server).await;

        let result = api.list_decisions().await;

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_decisions_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/decisions"))
            .and(header("Authorization", "Bearer jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "active": [decision_json(2, "Job offer")],
                "archived": []
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("jwt".to_string())).await;
        let listing = api.list_decisions().await.unwrap();

        assert_eq!(listing.active.len(), 1);
        assert_eq!(listing.active[0].title, "Job offer");
    }

    #[tokio::test]
    async fn status_401_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/decisions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("stale".to_string())).await;

        assert!(api.list_decisions().await.unwrap_err().is_unauthorized());
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "Username or email already exists" })),
            )
            .mount(&server)
            .await;

        let registration = Registration {
            username: "alice".into(),
            email: None,
            password: "secret123".into(),
        };
        let err = api_for(&server).await.register(&registration).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Username or email already exists".into()
            }
        );
    }

    #[tokio::test]
    async fn add_item_sends_magnitude_and_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/decisions/5/items"))
            .and(body_json(json!({ "text": "Commute", "weight": 3, "type": "con" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9, "decision_id": 5, "text": "Commute", "weight": -3, "type": "con"
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("jwt".into())).await;
        let item = NewItem::new(ItemKind::Con, "Commute", 3).unwrap();
        let remote = api.add_item(DecisionId::from_raw(5), &item).await.unwrap();

        assert_eq!(remote.id, ItemId::from_raw(9));
        assert_eq!(remote.weight, -3);
    }

    #[tokio::test]
    async fn update_decision_sends_only_patched_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/decisions/2"))
            .and(body_json(json!({ "archived": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(decision_json(2, "Job offer")))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("jwt".into())).await;
        let updated = api
            .update_decision(DecisionId::from_raw(2), &DecisionPatch::archived(true))
            .await
            .unwrap();

        assert_eq!(updated.id, DecisionId::from_raw(2));
    }

    #[tokio::test]
    async fn delete_ignores_response_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/items/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("jwt".into())).await;

        assert!(api.delete_item(ItemId::from_raw(4)).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/decisions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.set_token(Some("jwt".into())).await;

        assert!(matches!(
            api.create_decision("Title").await,
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let api = HttpDecisionApi::new(
            ApiClientConfig::new("http://127.0.0.1:9/api").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        assert!(matches!(
            api.login("a", "b").await,
            Err(ApiError::Network(_))
        ));
    }

    #[test]
    fn error_message_prefers_message_then_error() {
        assert_eq!(
            HttpDecisionApi::error_message(r#"{"code":"NOT_FOUND","message":"Decision not found"}"#),
            Some("Decision not found".to_string())
        );
        assert_eq!(
            HttpDecisionApi::error_message(r#"{"error":"Text is required"}"#),
            Some("Text is required".to_string())
        );
        assert_eq!(HttpDecisionApi::error_message("oops"), None);
    }
}
