use crate::models::{Match, MedicineRequest, RequestStatus, SurplusPosting, SurplusStatus};

/// Only postings still on offer take part in matching
#[inline]
pub fn is_available_surplus(surplus: &SurplusPosting) -> bool {
    surplus.status == SurplusStatus::Available
}

/// Only requests nobody has answered yet take part in matching
#[inline]
pub fn is_open_request(request: &MedicineRequest) -> bool {
    request.status == RequestStatus::Open
}

/// Keep the matches a clinic takes part in, as surplus owner or requester.
///
/// Ranking order is preserved.
pub fn relevant_to_clinic(matches: Vec<Match>, clinic_id: &str) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| m.involves_clinic(clinic_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SurplusReason, Unit, Urgency};
    use chrono::Utc;

    fn create_surplus(status: SurplusStatus) -> SurplusPosting {
        SurplusPosting {
            id: "s1".to_string(),
            clinic_id: "c1".to_string(),
            inventory_item_id: "i1".to_string(),
            quantity: 100,
            reason: SurplusReason::NearExpiry,
            notes: None,
            status,
            posted_date: Utc::now(),
        }
    }

    fn create_request(status: RequestStatus) -> MedicineRequest {
        MedicineRequest {
            id: "r1".to_string(),
            clinic_id: "c2".to_string(),
            medicine_id: "m1".to_string(),
            quantity: 50,
            unit: Unit::Vials,
            urgency: Urgency::Medium,
            reason: "Campaign".to_string(),
            status,
            requested_date: Utc::now(),
        }
    }

    #[test]
    fn test_only_available_surplus() {
        assert!(is_available_surplus(&create_surplus(SurplusStatus::Available)));
        assert!(!is_available_surplus(&create_surplus(SurplusStatus::Reserved)));
        assert!(!is_available_surplus(&create_surplus(SurplusStatus::Transferred)));
        assert!(!is_available_surplus(&create_surplus(SurplusStatus::Cancelled)));
    }

    #[test]
    fn test_only_open_requests() {
        assert!(is_open_request(&create_request(RequestStatus::Open)));
        assert!(!is_open_request(&create_request(RequestStatus::Matched)));
        assert!(!is_open_request(&create_request(RequestStatus::Fulfilled)));
        assert!(!is_open_request(&create_request(RequestStatus::Cancelled)));
    }
}
