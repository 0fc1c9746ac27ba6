use actix_web::{web, HttpResponse, Responder};

use crate::models::{
    ClinicQuery, NewClinic, NewInventoryItem, NewMedicine, NewMedicineRequest, NewSurplusPosting,
};
use crate::routes::{store_error_response, AppState};

/// Configure clinic, catalogue, inventory, surplus and request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/clinics", web::get().to(list_clinics))
        .route("/clinics", web::post().to(add_clinic))
        .route("/medicines", web::get().to(list_medicines))
        .route("/medicines", web::post().to(add_medicine))
        .route("/inventory", web::get().to(list_inventory))
        .route("/inventory", web::post().to(add_inventory_item))
        .route("/surplus", web::get().to(list_surplus))
        .route("/surplus", web::post().to(post_surplus))
        .route("/surplus/{id}/cancel", web::post().to(cancel_surplus))
        .route("/requests", web::get().to(list_requests))
        .route("/requests", web::post().to(create_request))
        .route("/requests/{id}/cancel", web::post().to(cancel_request));
}

async fn list_clinics(state: web::Data<AppState>) -> impl Responder {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.clinics())
}

async fn add_clinic(state: web::Data<AppState>, req: web::Json<NewClinic>) -> impl Responder {
    let mut store = state.store.write().await;
    match store.add_clinic(req.into_inner()) {
        Ok(clinic) => HttpResponse::Created().json(clinic),
        Err(e) => store_error_response(&e),
    }
}

async fn list_medicines(state: web::Data<AppState>) -> impl Responder {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.medicines())
}

async fn add_medicine(state: web::Data<AppState>, req: web::Json<NewMedicine>) -> impl Responder {
    let mut store = state.store.write().await;
    match store.add_medicine(req.into_inner()) {
        Ok(medicine) => HttpResponse::Created().json(medicine),
        Err(e) => store_error_response(&e),
    }
}

/// List inventory, optionally for one clinic
///
/// GET /api/v1/inventory?clinicId={clinicId}
///
/// Statuses are re-derived first so lots that crossed an expiry threshold
/// since they were recorded show up correctly.
async fn list_inventory(
    state: web::Data<AppState>,
    query: web::Query<ClinicQuery>,
) -> impl Responder {
    let mut store = state.store.write().await;
    store.refresh_inventory_statuses(chrono::Utc::now());

    match &query.clinic_id {
        Some(clinic_id) => HttpResponse::Ok().json(store.inventory_for_clinic(clinic_id)),
        None => HttpResponse::Ok().json(store.inventory()),
    }
}

async fn add_inventory_item(
    state: web::Data<AppState>,
    req: web::Json<NewInventoryItem>,
) -> impl Responder {
    let mut store = state.store.write().await;
    match store.add_inventory_item(req.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => store_error_response(&e),
    }
}

async fn list_surplus(
    state: web::Data<AppState>,
    query: web::Query<ClinicQuery>,
) -> impl Responder {
    let store = state.store.read().await;
    match &query.clinic_id {
        Some(clinic_id) => HttpResponse::Ok().json(store.surplus_for_clinic(clinic_id)),
        None => HttpResponse::Ok().json(store.surplus()),
    }
}

/// Post surplus endpoint
///
/// POST /api/v1/surplus
///
/// Request body:
/// ```json
/// {
///   "clinicId": "string",
///   "inventoryItemId": "string",
///   "quantity": 500,
///   "reason": "Near Expiry|Overstocked|Program Ended|Other",
///   "notes": "string"
/// }
/// ```
async fn post_surplus(
    state: web::Data<AppState>,
    req: web::Json<NewSurplusPosting>,
) -> impl Responder {
    let mut store = state.store.write().await;
    match store.post_surplus(req.into_inner()) {
        Ok(posting) => HttpResponse::Created().json(posting),
        Err(e) => {
            tracing::info!("Surplus posting refused: {}", e);
            store_error_response(&e)
        }
    }
}

async fn cancel_surplus(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let mut store = state.store.write().await;
    match store.cancel_surplus(&path) {
        Ok(posting) => HttpResponse::Ok().json(posting),
        Err(e) => store_error_response(&e),
    }
}

async fn list_requests(
    state: web::Data<AppState>,
    query: web::Query<ClinicQuery>,
) -> impl Responder {
    let store = state.store.read().await;
    match &query.clinic_id {
        Some(clinic_id) => HttpResponse::Ok().json(store.requests_for_clinic(clinic_id)),
        None => HttpResponse::Ok().json(store.requests()),
    }
}

/// Create request endpoint
///
/// POST /api/v1/requests
///
/// Request body:
/// ```json
/// {
///   "clinicId": "string",
///   "medicineId": "string",
///   "quantity": 200,
///   "unit": "tablets",
///   "urgency": "Critical|High|Medium|Low",
///   "reason": "string"
/// }
/// ```
async fn create_request(
    state: web::Data<AppState>,
    req: web::Json<NewMedicineRequest>,
) -> impl Responder {
    let mut store = state.store.write().await;
    match store.create_request(req.into_inner()) {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => {
            tracing::info!("Medicine request refused: {}", e);
            store_error_response(&e)
        }
    }
}

async fn cancel_request(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let mut store = state.store.write().await;
    match store.cancel_request(&path) {
        Ok(request) => HttpResponse::Ok().json(request),
        Err(e) => store_error_response(&e),
    }
}
