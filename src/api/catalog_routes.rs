//! Category list endpoints
//!
//! `GET /<category>` returns the raw JSON document array for that
//! collection: no pagination, no query parameters, filtering happens
//! client-side. The UI runs on a different origin, so CORS is open.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::model::Category;
use crate::store::CatalogStore;

// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
}

/// Envelope for non-collection endpoints (health)
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // one list endpoint per category: /cpu, /mainboard, ..., /cpuCooler
        .route("/:category", get(list_category))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        success: true,
        data: Some("OK".to_string()),
        error: None,
    })
}

// List one category collection
async fn list_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonValue>>, StatusCode> {
    let Some(category) = Category::from_route(&category) else {
        return Err(StatusCode::NOT_FOUND);
    };

    match state.store.list_category(category).await {
        Ok(docs) => Ok(Json(docs)),
        Err(e) => {
            warn!("Failed to list '{}': {:?}", category, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
