use crate::models::{MedicineRequest, ScoreBreakdown, ScoringWeights, SurplusPosting, Urgency};

/// Calculate the match score for a surplus posting against a request
///
/// Scoring formula:
/// score = round(
///     urgency_score * 0.40 +       # Critical 100, High 75, Medium 50, Low 25
///     expiry_score * 0.30 +        # Sooner expiry = higher
///     quantity_score * 0.30        # Share of the request the surplus covers
/// )
///
/// Returns `None` when the request asks for zero units, since the quantity
/// ratio is undefined.
pub fn calculate_match_score(
    surplus: &SurplusPosting,
    request: &MedicineRequest,
    days_until_expiry: i64,
    weights: &ScoringWeights,
) -> Option<ScoreBreakdown> {
    let urgency = urgency_score(request.urgency);
    let expiry = expiry_score(days_until_expiry, weights.expiry_horizon_days);
    let quantity = quantity_score(surplus.quantity, request.quantity)?;

    let weighted = urgency * weights.urgency
        + expiry * weights.expiry
        + quantity * weights.quantity;

    Some(ScoreBreakdown {
        urgency,
        expiry,
        quantity,
        total: round_half_up(weighted),
    })
}

/// Fixed mapping from requester urgency to a 0-100 score
#[inline]
pub fn urgency_score(urgency: Urgency) -> f64 {
    match urgency {
        Urgency::Critical => 100.0,
        Urgency::High => 75.0,
        Urgency::Medium => 50.0,
        Urgency::Low => 25.0,
    }
}

/// Expiry score: linear decay from 100 today to 0 at the horizon.
///
/// Only the lower bound is clamped. Expired stock (negative days) scores
/// above 100, which pushes it to the front of the ranking.
#[inline]
pub fn expiry_score(days_until_expiry: i64, horizon_days: f64) -> f64 {
    (100.0 - (days_until_expiry as f64 / horizon_days) * 100.0).max(0.0)
}

/// Share of the requested quantity the surplus can cover, capped at 100
#[inline]
pub fn quantity_score(surplus_quantity: u32, request_quantity: u32) -> Option<f64> {
    if request_quantity == 0 {
        return None;
    }

    let ratio = (surplus_quantity as f64 / request_quantity as f64).min(1.0);
    Some(ratio * 100.0)
}

/// Round to the nearest integer, halves going up
#[inline]
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}
