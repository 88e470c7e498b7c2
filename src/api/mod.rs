use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{VERSION, coordinator::Coordinator, models::FinalResponse};

pub const QUERY_REQUIRED_MESSAGE: &str = "Query is required in request body";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Anything JSON; only strings are treated as questions
    #[serde(default)]
    pub query: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Routes mounted under `/api`
pub fn router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .with_state(coordinator)
}

async fn ask(
    State(coordinator): State<Arc<Coordinator>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected ask request: {}", rejection.body_text());
            return bad_request(rejection.body_text());
        }
    };

    // A missing or empty query is a 400, unlike every other unanswerable query,
    // which is a 200 with `success: false`.
    match request.query {
        None | Some(Value::Null) => bad_request(QUERY_REQUIRED_MESSAGE),
        Some(Value::String(query)) if query.is_empty() => bad_request(QUERY_REQUIRED_MESSAGE),
        Some(Value::String(query)) => {
            info!("Received query: {}", query);
            Json(coordinator.process_query(&query).await).into_response()
        }
        Some(_) => Json(FinalResponse::invalid_query()).into_response(),
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(FinalResponse {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Multi-Agent Tourism System is running".to_string(),
        version: VERSION.to_string(),
    })
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
