// Route exports
pub mod matches;
pub mod records;
pub mod transfers;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{InventoryStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InventoryStore>>,
    pub matcher: Matcher,
}

impl AppState {
    pub fn new(store: InventoryStore, matcher: Matcher) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            matcher,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(records::configure)
            .configure(transfers::configure),
    );
}

/// Map a store failure onto an HTTP error body
pub(crate) fn store_error_response(err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        StoreError::InvalidState(_) => HttpResponse::Conflict().json(ErrorResponse {
            error: "Invalid state".to_string(),
            message: err.to_string(),
            status_code: 409,
        }),
        StoreError::Validation(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
    }
}
