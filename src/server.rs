//! Edit Service: a small HTTP CRUD surface over the per-SKU content store.
//!
//! Presentation-layer field replacement only: the handlers never touch the
//! `en` derivation logic. Updates are read-modify-write on one file per
//! request, last write wins.

use crate::config::Config;
use crate::product::{HistoryEntry, Product};
use crate::render;
use crate::store::ContentStore;
use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub config: Arc<Config>,
}

/// Errors surfaced at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("SKU not found")]
    SkuNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::SkuNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(err) => {
                error!("Internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Partial update for one language block. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub lang: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub precautions: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /skus
pub async fn list_skus(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let skus = state.store.list_skus().map_err(ApiError::Internal)?;
    Ok(Json(skus))
}

/// GET /product/{sku}
pub async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<Product>, ApiError> {
    if !state.store.exists(&sku) {
        return Err(ApiError::SkuNotFound);
    }
    let product = state.store.load(&sku).map_err(ApiError::Internal)?;
    Ok(Json(product))
}

/// POST /product/{sku}
///
/// Merges the provided fields into one language block, creating the block
/// if absent. Only fields present in the body are written.
pub async fn update_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Json(update): Json<UpdateRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    if !state.store.exists(&sku) {
        return Err(ApiError::SkuNotFound);
    }
    let mut product = state.store.load(&sku).map_err(ApiError::Internal)?;

    let block = product.i18n.entry(update.lang.clone()).or_default();
    if let Some(description) = update.description {
        block.description = description;
    }
    if let Some(ingredients) = update.ingredients {
        block.ingredients = ingredients;
    }
    if let Some(precautions) = update.precautions {
        block.precautions = precautions;
    }
    if let Some(history) = update.history {
        block.history = history;
    }

    state.store.save(&product).map_err(ApiError::Internal)?;
    info!("Saved {} ({})", sku, update.lang);
    Ok(Json(StatusResponse { status: "saved" }))
}

/// POST /rebuild/{sku}
///
/// Takes a SKU for interface symmetry but re-renders the whole catalog;
/// partial rebuild is a known latent inefficiency, not a bug.
pub async fn rebuild_pages(
    State(state): State<AppState>,
    Path(_sku): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let rendered = render::run_render(&state.config).map_err(ApiError::Internal)?;
    info!("Rebuilt pages for {} products", rendered);
    Ok(Json(StatusResponse { status: "rebuilt" }))
}

/// Build the router with all Edit API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/skus", get(list_skus))
        .route("/product/:sku", get(get_product).post(update_product))
        .route("/rebuild/:sku", post(rebuild_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the Edit API until the process is terminated.
pub async fn run_server(config: Config) -> Result<()> {
    let port = config.port;
    let state = AppState {
        store: Arc::new(ContentStore::new(&config.content_dir)),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Edit service listening on port {}", port);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
