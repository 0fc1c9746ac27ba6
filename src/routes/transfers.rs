use actix_web::{web, HttpResponse, Responder};

use crate::models::{ClinicQuery, ClinicTransfersResponse, Transfer};
use crate::routes::{store_error_response, AppState};
use crate::services::{InventoryStore, StoreError};

/// Configure transfer approval routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/transfers", web::get().to(list_transfers))
        .route("/transfers/{id}/approve", web::post().to(approve_transfer))
        .route("/transfers/{id}/dispatch", web::post().to(dispatch_transfer))
        .route("/transfers/{id}/reject", web::post().to(reject_transfer))
        .route("/transfers/{id}/complete", web::post().to(complete_transfer));
}

/// List transfers
///
/// GET /api/v1/transfers?clinicId={clinicId}
///
/// With `clinicId` the transfers are split into outgoing and incoming;
/// without it every transfer is returned.
async fn list_transfers(
    state: web::Data<AppState>,
    query: web::Query<ClinicQuery>,
) -> impl Responder {
    let store = state.store.read().await;
    match &query.clinic_id {
        Some(clinic_id) => HttpResponse::Ok().json(ClinicTransfersResponse {
            outgoing: store.outgoing_transfers(clinic_id),
            incoming: store.incoming_transfers(clinic_id),
        }),
        None => HttpResponse::Ok().json(store.transfers()),
    }
}

async fn apply(
    state: web::Data<AppState>,
    id: &str,
    action: fn(&mut InventoryStore, &str) -> Result<Transfer, StoreError>,
) -> HttpResponse {
    let mut store = state.store.write().await;
    match action(&mut *store, id) {
        Ok(transfer) => HttpResponse::Ok().json(transfer),
        Err(e) => {
            tracing::warn!("Transfer {} update refused: {}", id, e);
            store_error_response(&e)
        }
    }
}

async fn approve_transfer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply(state, &path, InventoryStore::approve_transfer).await
}

async fn dispatch_transfer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply(state, &path, InventoryStore::dispatch_transfer).await
}

async fn reject_transfer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply(state, &path, InventoryStore::reject_transfer).await
}

async fn complete_transfer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply(state, &path, InventoryStore::complete_transfer).await
}
