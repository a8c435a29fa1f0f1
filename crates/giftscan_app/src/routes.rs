//! HTTP handlers: the gift query and the liveness probe.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use giftscan_core::{ItemRecord, QueryError, SortOrder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct GiftParams {
    pub model: String,
    pub id_range: String,
    pub limit: Option<usize>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GiftResponse {
    pub results: Vec<ItemRecord>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("query task failed: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Query(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Query(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// GET /api/gifts?model=..&id_range=a-b&limit=..&order=asc|desc
pub async fn list_gifts(
    State(state): State<AppState>,
    Query(params): Query<GiftParams>,
) -> Result<Json<GiftResponse>, ApiError> {
    let order = params
        .order
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();
    let query = giftscan_core::Query {
        model: params.model,
        id_range: params.id_range,
        limit: params.limit.unwrap_or(state.default_limit),
        order,
    };

    // Run detached so a dropped connection does not cut the query short.
    let pipeline = state.pipeline.clone();
    let results = tokio::spawn(async move { pipeline.run(&query).await })
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;

    Ok(Json(GiftResponse { results }))
}

/// GET /ping
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}
