//! Body extractor whose rejections use the shared error body.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use super::error::ErrorResponse;

/// `Json<T>` that answers a missing or malformed body with a 400
/// `{code, message}` instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_rejected(rejection)),
        }
    }
}

fn body_rejected(rejection: JsonRejection) -> Response {
    tracing::debug!(status = %rejection.status(), "rejected request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}
