use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::core::{
    expiry::days_until_expiry,
    filters::{is_available_surplus, is_open_request},
    scoring::calculate_match_score,
};
use crate::models::{
    Clinic, InventoryItem, Match, Medicine, MedicineRequest, ScoringWeights, SurplusPosting,
};

/// Borrowed snapshot of the collections the matcher reads
#[derive(Debug, Clone, Copy)]
pub struct MatchInputs<'a> {
    pub surplus: &'a [SurplusPosting],
    pub requests: &'a [MedicineRequest],
    pub inventory: &'a [InventoryItem],
    pub medicines: &'a [Medicine],
    pub clinics: &'a [Clinic],
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<Match>,
    pub available_surplus: usize,
    pub open_requests: usize,
    /// Postings or pairings dropped because a referenced record was missing
    pub skipped_references: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Status filter (available surplus, open requests)
/// 2. Reference resolution (inventory item, medicine, clinics)
/// 3. Medicine equality pairing
/// 4. Scoring and ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

/// First record wins when ids repeat
fn index_by_id<'a, T>(items: &'a [T], id: impl Fn(&T) -> &str) -> HashMap<&'a str, &'a T> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(id(item)).or_insert(item);
    }
    index
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Pair every available surplus posting with every open request for the
    /// same medicine, score each pair and rank them.
    ///
    /// # Arguments
    /// * `inputs` - Snapshot of the five collections
    /// * `now` - Reference instant for days-until-expiry
    ///
    /// # Returns
    /// MatchResult with matches sorted by score, highest first. Equal scores
    /// keep enumeration order (surplus order, then request order).
    pub fn find_matches(&self, inputs: MatchInputs<'_>, now: DateTime<Utc>) -> MatchResult {
        let inventory = index_by_id(inputs.inventory, |i| i.id.as_str());
        let medicines = index_by_id(inputs.medicines, |m| m.id.as_str());
        let clinics = index_by_id(inputs.clinics, |c| c.id.as_str());

        // Stage 1: status filter
        let available: Vec<&SurplusPosting> = inputs
            .surplus
            .iter()
            .filter(|s| is_available_surplus(s))
            .collect();
        let open: Vec<&MedicineRequest> = inputs
            .requests
            .iter()
            .filter(|r| is_open_request(r))
            .collect();

        let mut matches = Vec::new();
        let mut skipped_references = 0;

        for surplus in &available {
            // Stage 2: resolve the posting's references
            let Some(item) = inventory.get(surplus.inventory_item_id.as_str()) else {
                tracing::debug!(
                    "Surplus {} references unknown inventory item {}",
                    surplus.id,
                    surplus.inventory_item_id
                );
                skipped_references += 1;
                continue;
            };
            let Some(medicine) = medicines.get(item.medicine_id.as_str()) else {
                tracing::debug!(
                    "Inventory item {} references unknown medicine {}",
                    item.id,
                    item.medicine_id
                );
                skipped_references += 1;
                continue;
            };
            let Some(from_clinic) = clinics.get(surplus.clinic_id.as_str()) else {
                tracing::debug!(
                    "Surplus {} references unknown clinic {}",
                    surplus.id,
                    surplus.clinic_id
                );
                skipped_references += 1;
                continue;
            };

            let days = days_until_expiry(item.expiry_date, now);

            // Stage 3: pair with open requests for the same medicine
            for request in open.iter().filter(|r| r.medicine_id == medicine.id) {
                let Some(to_clinic) = clinics.get(request.clinic_id.as_str()) else {
                    tracing::debug!(
                        "Request {} references unknown clinic {}",
                        request.id,
                        request.clinic_id
                    );
                    skipped_references += 1;
                    continue;
                };

                // Stage 4: score
                let Some(breakdown) = calculate_match_score(surplus, request, days, &self.weights)
                else {
                    tracing::warn!(
                        "Request {} asks for zero units, not scored against surplus {}",
                        request.id,
                        surplus.id
                    );
                    continue;
                };

                matches.push(Match {
                    surplus: (*surplus).clone(),
                    request: (*request).clone(),
                    inventory_item: (*item).clone(),
                    medicine: (*medicine).clone(),
                    from_clinic: (*from_clinic).clone(),
                    to_clinic: (*to_clinic).clone(),
                    match_score: breakdown.total,
                    days_until_expiry: days,
                    score_breakdown: breakdown,
                });
            }
        }

        // Stable sort: ties keep enumeration order
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::debug!(
            "Matched {} pairs from {} available surplus and {} open requests",
            matches.len(),
            available.len(),
            open.len()
        );

        MatchResult {
            matches,
            available_surplus: available.len(),
            open_requests: open.len(),
            skipped_references,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClinicType, InventoryStatus, MedicineCategory, RequestStatus, SurplusReason,
        SurplusStatus, Unit, Urgency,
    };
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn create_clinic(id: &str) -> Clinic {
        Clinic {
            id: id.to_string(),
            name: format!("Clinic {}", id),
            clinic_type: ClinicType::PrimaryHealthCenter,
            location: "Town".to_string(),
            district: "District".to_string(),
            state: "State".to_string(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    fn create_medicine(id: &str) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: format!("Medicine {}", id),
            generic_name: "generic".to_string(),
            category: MedicineCategory::Antibiotic,
            strength: "500mg".to_string(),
            manufacturer: String::new(),
            priority: None,
        }
    }

    fn create_item(
        id: &str,
        clinic_id: &str,
        medicine_id: &str,
        expires_in_days: i64,
    ) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            clinic_id: clinic_id.to_string(),
            medicine_id: medicine_id.to_string(),
            batch_number: "B1".to_string(),
            quantity: 2000,
            unit: Unit::Tablets,
            expiry_date: now() + Duration::days(expires_in_days),
            status: InventoryStatus::InStock,
            added_date: now(),
        }
    }

    fn create_surplus(id: &str, clinic_id: &str, item_id: &str, quantity: u32) -> SurplusPosting {
        SurplusPosting {
            id: id.to_string(),
            clinic_id: clinic_id.to_string(),
            inventory_item_id: item_id.to_string(),
            quantity,
            reason: SurplusReason::Overstocked,
            notes: None,
            status: SurplusStatus::Available,
            posted_date: now(),
        }
    }

    fn create_request(
        id: &str,
        clinic_id: &str,
        medicine_id: &str,
        quantity: u32,
        urgency: Urgency,
    ) -> MedicineRequest {
        MedicineRequest {
            id: id.to_string(),
            clinic_id: clinic_id.to_string(),
            medicine_id: medicine_id.to_string(),
            quantity,
            unit: Unit::Tablets,
            urgency,
            reason: "Shortage".to_string(),
            status: RequestStatus::Open,
            requested_date: now(),
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_weights();
        let clinics = vec![create_clinic("c1"), create_clinic("c2")];
        let medicines = vec![create_medicine("m1")];
        let inventory = vec![create_item("i1", "c1", "m1", 30)];
        let surplus = vec![create_surplus("s1", "c1", "i1", 1000)];
        let requests = vec![create_request("r1", "c2", "m1", 500, Urgency::Critical)];

        let result = matcher.find_matches(
            MatchInputs {
                surplus: &surplus,
                requests: &requests,
                inventory: &inventory,
                medicines: &medicines,
                clinics: &clinics,
            },
            now(),
        );

        assert_eq!(result.matches.len(), 1);
        let m = &result.matches[0];
        assert_eq!(m.match_score, 90);
        assert_eq!(m.days_until_expiry, 30);
        assert_eq!(m.from_clinic.id, "c1");
        assert_eq!(m.to_clinic.id, "c2");
        assert_eq!(result.available_surplus, 1);
        assert_eq!(result.open_requests, 1);
    }

    #[test]
    fn test_equal_scores_keep_enumeration_order() {
        let matcher = Matcher::with_default_weights();
        let clinics = vec![create_clinic("c1"), create_clinic("c2"), create_clinic("c3")];
        let medicines = vec![create_medicine("m1")];
        let inventory = vec![create_item("i1", "c1", "m1", 60)];
        let surplus = vec![create_surplus("s1", "c1", "i1", 100)];
        let requests = vec![
            create_request("r-first", "c2", "m1", 100, Urgency::High),
            create_request("r-second", "c3", "m1", 100, Urgency::High),
        ];

        let result = matcher.find_matches(
            MatchInputs {
                surplus: &surplus,
                requests: &requests,
                inventory: &inventory,
                medicines: &medicines,
                clinics: &clinics,
            },
            now(),
        );

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].match_score, result.matches[1].match_score);
        assert_eq!(result.matches[0].request.id, "r-first");
        assert_eq!(result.matches[1].request.id, "r-second");
    }

    #[test]
    fn test_missing_requesting_clinic_skips_only_that_request() {
        let matcher = Matcher::with_default_weights();
        let clinics = vec![create_clinic("c1"), create_clinic("c2")];
        let medicines = vec![create_medicine("m1")];
        let inventory = vec![create_item("i1", "c1", "m1", 60)];
        let surplus = vec![create_surplus("s1", "c1", "i1", 100)];
        let requests = vec![
            create_request("r1", "ghost", "m1", 100, Urgency::Critical),
            create_request("r2", "c2", "m1", 100, Urgency::Low),
        ];

        let result = matcher.find_matches(
            MatchInputs {
                surplus: &surplus,
                requests: &requests,
                inventory: &inventory,
                medicines: &medicines,
                clinics: &clinics,
            },
            now(),
        );

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].request.id, "r2");
        assert_eq!(result.skipped_references, 1);
    }

    #[test]
    fn test_zero_quantity_request_skipped() {
        let matcher = Matcher::with_default_weights();
        let clinics = vec![create_clinic("c1"), create_clinic("c2")];
        let medicines = vec![create_medicine("m1")];
        let inventory = vec![create_item("i1", "c1", "m1", 60)];
        let surplus = vec![create_surplus("s1", "c1", "i1", 100)];
        let requests = vec![create_request("r1", "c2", "m1", 0, Urgency::Critical)];

        let result = matcher.find_matches(
            MatchInputs {
                surplus: &surplus,
                requests: &requests,
                inventory: &inventory,
                medicines: &medicines,
                clinics: &clinics,
            },
            now(),
        );

        assert!(result.matches.is_empty());
    }
}
