pub mod products;
pub mod users;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// JSON body extractor. A request without a JSON content type reads as an
/// empty object (`T::default()`); malformed JSON is rejected through
/// `AppError` with the usual `{"error": ...}` envelope.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(AppJson(T::default()));
        }
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

pub async fn root() -> &'static str {
    "API is running..."
}

pub async fn health(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    state.store.ping().await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "asset-registry" })),
    ))
}

/// `{"message": ...}` with status 200, the success envelope of every write endpoint.
pub(crate) fn ok_message(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "message": message })))
}
