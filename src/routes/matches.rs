use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::relevant_to_clinic;
use crate::models::{
    ErrorResponse, HealthResponse, MatchesQuery, MatchesResponse, RequestTransferRequest,
};
use crate::routes::{store_error_response, AppState};

/// Upper bound on matches returned in one response
const MAX_LIMIT: usize = 200;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(find_matches))
        .route("/matches/transfer", web::post().to(request_transfer));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// GET /api/v1/matches?clinicId={clinicId}&limit={limit}
///
/// Without `clinicId` the full ranked list is returned; with it, only
/// matches where the clinic offers the surplus or filed the request.
async fn find_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchesQuery>,
) -> impl Responder {
    let result = {
        let store = state.store.read().await;
        state.matcher.find_matches(store.match_inputs(), chrono::Utc::now())
    };

    if result.skipped_references > 0 {
        tracing::debug!("{} pairings skipped on unresolved references", result.skipped_references);
    }

    let mut matches = match &query.clinic_id {
        Some(clinic_id) => relevant_to_clinic(result.matches, clinic_id),
        None => result.matches,
    };
    let total_matches = matches.len();

    if let Some(limit) = query.limit {
        matches.truncate(limit.min(MAX_LIMIT));
    }

    tracing::info!(
        "Returning {} of {} matches (clinic: {:?})",
        matches.len(),
        total_matches,
        query.clinic_id
    );

    HttpResponse::Ok().json(MatchesResponse {
        matches,
        total_matches,
        available_surplus: result.available_surplus,
        open_requests: result.open_requests,
    })
}

/// Request a transfer for a proposed match
///
/// POST /api/v1/matches/transfer
///
/// Request body:
/// ```json
/// {
///   "surplusId": "string",
///   "requestId": "string"
/// }
/// ```
async fn request_transfer(
    state: web::Data<AppState>,
    req: web::Json<RequestTransferRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mut store = state.store.write().await;
    match store.request_transfer(&req.surplus_id, &req.request_id) {
        Ok(transfer) => HttpResponse::Created().json(transfer),
        Err(e) => {
            tracing::warn!(
                "Transfer request {} -> {} refused: {}",
                req.surplus_id,
                req.request_id,
                e
            );
            store_error_response(&e)
        }
    }
}

