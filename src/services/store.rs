use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::Validate;

use crate::core::{derive_inventory_status, MatchInputs};
use crate::models::{
    Clinic, InventoryItem, InventoryPolicy, InventoryStatus, Medicine, MedicineRequest,
    NewClinic, NewInventoryItem, NewMedicine, NewMedicineRequest, NewSurplusPosting,
    RequestStatus, SurplusPosting, SurplusStatus, Transfer, TransferStatus,
};

/// Errors that can occur when changing store records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        StoreError::Validation(errors.to_string())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn position<T>(
    items: &[T],
    kind: &'static str,
    id: &str,
    item_id: impl Fn(&T) -> &str,
) -> Result<usize, StoreError> {
    items
        .iter()
        .position(|item| item_id(item) == id)
        .ok_or_else(|| StoreError::NotFound {
            kind,
            id: id.to_string(),
        })
}

/// In-memory owner of every record the sharing network keeps
///
/// All mutations go through the methods below so status transitions stay
/// consistent across postings, requests and transfers. The matcher never
/// sees the store itself, only the borrowed snapshot from `match_inputs`.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    policy: InventoryPolicy,
    clinics: Vec<Clinic>,
    medicines: Vec<Medicine>,
    inventory: Vec<InventoryItem>,
    surplus: Vec<SurplusPosting>,
    requests: Vec<MedicineRequest>,
    transfers: Vec<Transfer>,
}

impl InventoryStore {
    pub fn new(policy: InventoryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn surplus(&self) -> &[SurplusPosting] {
        &self.surplus
    }

    pub fn requests(&self) -> &[MedicineRequest] {
        &self.requests
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Snapshot handed to the matcher
    pub fn match_inputs(&self) -> MatchInputs<'_> {
        MatchInputs {
            surplus: &self.surplus,
            requests: &self.requests,
            inventory: &self.inventory,
            medicines: &self.medicines,
            clinics: &self.clinics,
        }
    }

    pub fn inventory_for_clinic(&self, clinic_id: &str) -> Vec<InventoryItem> {
        self.inventory
            .iter()
            .filter(|i| i.clinic_id == clinic_id)
            .cloned()
            .collect()
    }

    pub fn surplus_for_clinic(&self, clinic_id: &str) -> Vec<SurplusPosting> {
        self.surplus
            .iter()
            .filter(|s| s.clinic_id == clinic_id)
            .cloned()
            .collect()
    }

    pub fn requests_for_clinic(&self, clinic_id: &str) -> Vec<MedicineRequest> {
        self.requests
            .iter()
            .filter(|r| r.clinic_id == clinic_id)
            .cloned()
            .collect()
    }

    pub fn outgoing_transfers(&self, clinic_id: &str) -> Vec<Transfer> {
        self.transfers
            .iter()
            .filter(|t| t.from_clinic_id == clinic_id)
            .cloned()
            .collect()
    }

    pub fn incoming_transfers(&self, clinic_id: &str) -> Vec<Transfer> {
        self.transfers
            .iter()
            .filter(|t| t.to_clinic_id == clinic_id)
            .cloned()
            .collect()
    }

    fn require_clinic(&self, id: &str) -> Result<(), StoreError> {
        position(&self.clinics, "Clinic", id, |c| c.id.as_str()).map(|_| ())
    }

    fn require_medicine(&self, id: &str) -> Result<(), StoreError> {
        position(&self.medicines, "Medicine", id, |m| m.id.as_str()).map(|_| ())
    }

    pub fn add_clinic(&mut self, new: NewClinic) -> Result<Clinic, StoreError> {
        new.validate()?;

        let clinic = Clinic {
            id: new_id(),
            name: new.name,
            clinic_type: new.clinic_type,
            location: new.location,
            district: new.district,
            state: new.state,
            contact_person: new.contact_person,
            phone: new.phone,
            email: new.email,
        };

        tracing::info!("Registered clinic {} ({})", clinic.name, clinic.id);
        self.clinics.push(clinic.clone());
        Ok(clinic)
    }

    pub fn add_medicine(&mut self, new: NewMedicine) -> Result<Medicine, StoreError> {
        new.validate()?;

        let medicine = Medicine {
            id: new_id(),
            name: new.name,
            generic_name: new.generic_name,
            category: new.category,
            strength: new.strength,
            manufacturer: new.manufacturer,
            priority: new.priority,
        };

        tracing::info!(
            "Added medicine {} {} ({})",
            medicine.name,
            medicine.strength,
            medicine.id
        );
        self.medicines.push(medicine.clone());
        Ok(medicine)
    }

    /// Record a new lot; its status is derived from expiry and quantity
    pub fn add_inventory_item(
        &mut self,
        new: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        new.validate()?;
        self.require_clinic(&new.clinic_id)?;
        self.require_medicine(&new.medicine_id)?;

        let now = Utc::now();
        let item = InventoryItem {
            id: new_id(),
            status: derive_inventory_status(new.quantity, new.expiry_date, now, &self.policy),
            clinic_id: new.clinic_id,
            medicine_id: new.medicine_id,
            batch_number: new.batch_number,
            quantity: new.quantity,
            unit: new.unit,
            expiry_date: new.expiry_date,
            added_date: now,
        };

        tracing::info!(
            "Clinic {} added inventory item {} ({:?})",
            item.clinic_id,
            item.id,
            item.status
        );
        self.inventory.push(item.clone());
        Ok(item)
    }

    /// Re-derive every lot's status against `now`
    pub fn refresh_inventory_statuses(&mut self, now: DateTime<Utc>) {
        for item in &mut self.inventory {
            item.status =
                derive_inventory_status(item.quantity, item.expiry_date, now, &self.policy);
        }
    }

    /// Offer part of an inventory lot to other clinics
    ///
    /// The lot's status is re-derived first, so a lot that expired since it
    /// was recorded is refused even if nobody refreshed the inventory.
    pub fn post_surplus(&mut self, new: NewSurplusPosting) -> Result<SurplusPosting, StoreError> {
        new.validate()?;

        let idx = position(&self.inventory, "Inventory item", &new.inventory_item_id, |i| {
            i.id.as_str()
        })?;
        let now = Utc::now();
        let policy = self.policy;
        let item = &mut self.inventory[idx];
        item.status = derive_inventory_status(item.quantity, item.expiry_date, now, &policy);

        if item.clinic_id != new.clinic_id {
            return Err(StoreError::Validation(format!(
                "Inventory item {} does not belong to clinic {}",
                item.id, new.clinic_id
            )));
        }
        if item.status == InventoryStatus::Expired {
            return Err(StoreError::InvalidState(format!(
                "Inventory item {} has expired",
                item.id
            )));
        }
        if new.quantity > item.quantity {
            return Err(StoreError::Validation(format!(
                "Quantity exceeds available stock ({} > {})",
                new.quantity, item.quantity
            )));
        }

        let posting = SurplusPosting {
            id: new_id(),
            clinic_id: new.clinic_id,
            inventory_item_id: new.inventory_item_id,
            quantity: new.quantity,
            reason: new.reason,
            notes: new.notes.filter(|n| !n.is_empty()),
            status: SurplusStatus::Available,
            posted_date: now,
        };

        tracing::info!(
            "Clinic {} posted surplus {} ({} units)",
            posting.clinic_id,
            posting.id,
            posting.quantity
        );
        self.surplus.push(posting.clone());
        Ok(posting)
    }

    pub fn cancel_surplus(&mut self, id: &str) -> Result<SurplusPosting, StoreError> {
        let idx = position(&self.surplus, "Surplus posting", id, |s| s.id.as_str())?;
        let posting = &mut self.surplus[idx];

        if posting.status != SurplusStatus::Available {
            return Err(StoreError::InvalidState(format!(
                "Surplus posting {} is {:?}, only available postings can be cancelled",
                id, posting.status
            )));
        }

        posting.status = SurplusStatus::Cancelled;
        tracing::info!("Cancelled surplus posting {}", id);
        Ok(posting.clone())
    }

    pub fn create_request(
        &mut self,
        new: NewMedicineRequest,
    ) -> Result<MedicineRequest, StoreError> {
        new.validate()?;
        self.require_clinic(&new.clinic_id)?;
        self.require_medicine(&new.medicine_id)?;

        let request = MedicineRequest {
            id: new_id(),
            clinic_id: new.clinic_id,
            medicine_id: new.medicine_id,
            quantity: new.quantity,
            unit: new.unit,
            urgency: new.urgency,
            reason: new.reason,
            status: RequestStatus::Open,
            requested_date: Utc::now(),
        };

        tracing::info!(
            "Clinic {} opened request {} ({:?})",
            request.clinic_id,
            request.id,
            request.urgency
        );
        self.requests.push(request.clone());
        Ok(request)
    }

    pub fn cancel_request(&mut self, id: &str) -> Result<MedicineRequest, StoreError> {
        let idx = position(&self.requests, "Request", id, |r| r.id.as_str())?;
        let request = &mut self.requests[idx];

        if request.status != RequestStatus::Open {
            return Err(StoreError::InvalidState(format!(
                "Request {} is {:?}, only open requests can be cancelled",
                id, request.status
            )));
        }

        request.status = RequestStatus::Cancelled;
        tracing::info!("Cancelled request {}", id);
        Ok(request.clone())
    }

    /// Turn a proposed match into a pending transfer.
    ///
    /// The posting becomes Reserved and the request Matched, which removes
    /// both from future match results.
    pub fn request_transfer(
        &mut self,
        surplus_id: &str,
        request_id: &str,
    ) -> Result<Transfer, StoreError> {
        let s_idx = position(&self.surplus, "Surplus posting", surplus_id, |s| s.id.as_str())?;
        let r_idx = position(&self.requests, "Request", request_id, |r| r.id.as_str())?;

        let posting = &self.surplus[s_idx];
        let request = &self.requests[r_idx];

        if posting.status != SurplusStatus::Available {
            return Err(StoreError::InvalidState(format!(
                "Surplus posting {} is {:?}",
                surplus_id, posting.status
            )));
        }
        if request.status != RequestStatus::Open {
            return Err(StoreError::InvalidState(format!(
                "Request {} is {:?}",
                request_id, request.status
            )));
        }

        let i_idx = position(&self.inventory, "Inventory item", &posting.inventory_item_id, |i| {
            i.id.as_str()
        })?;
        let item = &self.inventory[i_idx];

        if item.medicine_id != request.medicine_id {
            return Err(StoreError::Validation(format!(
                "Surplus {} and request {} are for different medicines",
                surplus_id, request_id
            )));
        }

        let transfer = Transfer {
            id: new_id(),
            surplus_posting_id: posting.id.clone(),
            request_id: Some(request.id.clone()),
            from_clinic_id: posting.clinic_id.clone(),
            to_clinic_id: request.clinic_id.clone(),
            inventory_item_id: item.id.clone(),
            quantity: posting.quantity.min(request.quantity),
            status: TransferStatus::Pending,
            requested_date: Utc::now(),
            approved_date: None,
            completed_date: None,
            notes: None,
        };

        self.surplus[s_idx].status = SurplusStatus::Reserved;
        self.requests[r_idx].status = RequestStatus::Matched;

        tracing::info!(
            "Transfer {} requested: {} units from {} to {}",
            transfer.id,
            transfer.quantity,
            transfer.from_clinic_id,
            transfer.to_clinic_id
        );
        self.transfers.push(transfer.clone());
        Ok(transfer)
    }

    fn transition(
        &mut self,
        id: &str,
        allowed: &[TransferStatus],
        next: TransferStatus,
    ) -> Result<usize, StoreError> {
        let idx = position(&self.transfers, "Transfer", id, |t| t.id.as_str())?;
        let current = self.transfers[idx].status;

        if !allowed.contains(&current) {
            return Err(StoreError::InvalidState(format!(
                "Transfer {} cannot move from {:?} to {:?}",
                id, current, next
            )));
        }

        self.transfers[idx].status = next;
        tracing::info!("Transfer {} {:?} -> {:?}", id, current, next);
        Ok(idx)
    }

    fn set_linked_statuses(&mut self, idx: usize, surplus: SurplusStatus, request: RequestStatus) {
        let transfer = &self.transfers[idx];

        if let Some(posting) = self
            .surplus
            .iter_mut()
            .find(|s| s.id == transfer.surplus_posting_id)
        {
            posting.status = surplus;
        }
        if let Some(request_id) = &transfer.request_id {
            if let Some(req) = self.requests.iter_mut().find(|r| &r.id == request_id) {
                req.status = request;
            }
        }
    }

    pub fn approve_transfer(&mut self, id: &str) -> Result<Transfer, StoreError> {
        let idx = self.transition(id, &[TransferStatus::Pending], TransferStatus::Approved)?;
        self.transfers[idx].approved_date = Some(Utc::now());
        Ok(self.transfers[idx].clone())
    }

    pub fn dispatch_transfer(&mut self, id: &str) -> Result<Transfer, StoreError> {
        let idx = self.transition(id, &[TransferStatus::Approved], TransferStatus::InTransit)?;
        Ok(self.transfers[idx].clone())
    }

    /// Reject a transfer and put its posting and request back on the market
    pub fn reject_transfer(&mut self, id: &str) -> Result<Transfer, StoreError> {
        let idx = self.transition(
            id,
            &[TransferStatus::Pending, TransferStatus::Approved],
            TransferStatus::Rejected,
        )?;
        self.set_linked_statuses(idx, SurplusStatus::Available, RequestStatus::Open);
        Ok(self.transfers[idx].clone())
    }

    /// Close a transfer: stock leaves the source lot, request is fulfilled
    pub fn complete_transfer(&mut self, id: &str) -> Result<Transfer, StoreError> {
        let idx = self.transition(
            id,
            &[TransferStatus::Approved, TransferStatus::InTransit],
            TransferStatus::Completed,
        )?;

        let now = Utc::now();
        self.transfers[idx].completed_date = Some(now);
        self.set_linked_statuses(idx, SurplusStatus::Transferred, RequestStatus::Fulfilled);

        let (item_id, quantity) = {
            let t = &self.transfers[idx];
            (t.inventory_item_id.clone(), t.quantity)
        };
        let policy = self.policy;
        if let Some(item) = self.inventory.iter_mut().find(|i| i.id == item_id) {
            item.quantity = item.quantity.saturating_sub(quantity);
            item.status = derive_inventory_status(item.quantity, item.expiry_date, now, &policy);
        }

        Ok(self.transfers[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicType, MedicineCategory, SurplusReason, Unit, Urgency};
    use chrono::Duration;

    fn new_clinic(name: &str) -> NewClinic {
        NewClinic {
            name: name.to_string(),
            clinic_type: ClinicType::Ngo,
            location: "Town".to_string(),
            district: "District".to_string(),
            state: "State".to_string(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    fn new_medicine(name: &str) -> NewMedicine {
        NewMedicine {
            name: name.to_string(),
            generic_name: name.to_lowercase(),
            category: MedicineCategory::Painkiller,
            strength: "500mg".to_string(),
            manufacturer: String::new(),
            priority: None,
        }
    }

    /// Two clinics, one medicine, one lot of 1000 at the first clinic
    fn setup() -> (InventoryStore, Clinic, Clinic, Medicine, InventoryItem) {
        let mut store = InventoryStore::new(InventoryPolicy::default());
        let donor = store.add_clinic(new_clinic("Donor")).unwrap();
        let receiver = store.add_clinic(new_clinic("Receiver")).unwrap();
        let medicine = store.add_medicine(new_medicine("Paracetamol")).unwrap();
        let item = store
            .add_inventory_item(NewInventoryItem {
                clinic_id: donor.id.clone(),
                medicine_id: medicine.id.clone(),
                batch_number: "B-1".to_string(),
                quantity: 1000,
                unit: Unit::Tablets,
                expiry_date: Utc::now() + Duration::days(200),
            })
            .unwrap();
        (store, donor, receiver, medicine, item)
    }

    fn post(
        store: &mut InventoryStore,
        clinic: &Clinic,
        item: &InventoryItem,
        quantity: u32,
    ) -> Result<SurplusPosting, StoreError> {
        store.post_surplus(NewSurplusPosting {
            clinic_id: clinic.id.clone(),
            inventory_item_id: item.id.clone(),
            quantity,
            reason: SurplusReason::Overstocked,
            notes: None,
        })
    }

    fn request(
        store: &mut InventoryStore,
        clinic: &Clinic,
        medicine: &Medicine,
        quantity: u32,
    ) -> MedicineRequest {
        store
            .create_request(NewMedicineRequest {
                clinic_id: clinic.id.clone(),
                medicine_id: medicine.id.clone(),
                quantity,
                unit: Unit::Tablets,
                urgency: Urgency::High,
                reason: "Fever outbreak".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_inventory_requires_known_clinic() {
        let (mut store, _, _, medicine, _) = setup();
        let err = store
            .add_inventory_item(NewInventoryItem {
                clinic_id: "nowhere".to_string(),
                medicine_id: medicine.id,
                batch_number: "B-2".to_string(),
                quantity: 10,
                unit: Unit::Tablets,
                expiry_date: Utc::now() + Duration::days(10),
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { kind: "Clinic", .. }));
    }

    #[test]
    fn test_surplus_cannot_exceed_stock() {
        let (mut store, donor, _, _, item) = setup();

        let err = post(&mut store, &donor, &item, 1001).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(post(&mut store, &donor, &item, 1000).is_ok());
    }

    #[test]
    fn test_surplus_must_come_from_own_inventory() {
        let (mut store, _, receiver, _, item) = setup();

        let err = post(&mut store, &receiver, &item, 10).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_cancel_only_available_surplus() {
        let (mut store, donor, _, _, item) = setup();
        let posting = post(&mut store, &donor, &item, 100).unwrap();

        let cancelled = store.cancel_surplus(&posting.id).unwrap();
        assert_eq!(cancelled.status, SurplusStatus::Cancelled);
        assert!(matches!(
            store.cancel_surplus(&posting.id),
            Err(StoreError::InvalidState(_))
        ));
    }

    #[test]
    fn test_transfer_lifecycle() {
        let (mut store, donor, receiver, medicine, item) = setup();
        let posting = post(&mut store, &donor, &item, 300).unwrap();
        let req = request(&mut store, &receiver, &medicine, 200);

        let transfer = store.request_transfer(&posting.id, &req.id).unwrap();
        assert_eq!(transfer.status, TransferStatus::Pending);
        assert_eq!(transfer.quantity, 200);
        assert_eq!(store.surplus()[0].status, SurplusStatus::Reserved);
        assert_eq!(store.requests()[0].status, RequestStatus::Matched);

        // Completing before approval is refused
        assert!(store.complete_transfer(&transfer.id).is_err());

        let approved = store.approve_transfer(&transfer.id).unwrap();
        assert!(approved.approved_date.is_some());
        store.dispatch_transfer(&transfer.id).unwrap();

        let completed = store.complete_transfer(&transfer.id).unwrap();
        assert_eq!(completed.status, TransferStatus::Completed);
        assert!(completed.completed_date.is_some());
        assert_eq!(store.surplus()[0].status, SurplusStatus::Transferred);
        assert_eq!(store.requests()[0].status, RequestStatus::Fulfilled);
        assert_eq!(store.inventory()[0].quantity, 800);
    }

    #[test]
    fn test_reject_reopens_posting_and_request() {
        let (mut store, donor, receiver, medicine, item) = setup();
        let posting = post(&mut store, &donor, &item, 300).unwrap();
        let req = request(&mut store, &receiver, &medicine, 200);

        let transfer = store.request_transfer(&posting.id, &req.id).unwrap();
        store.reject_transfer(&transfer.id).unwrap();

        assert_eq!(store.surplus()[0].status, SurplusStatus::Available);
        assert_eq!(store.requests()[0].status, RequestStatus::Open);
        assert_eq!(store.transfers()[0].status, TransferStatus::Rejected);
    }

    #[test]
    fn test_reserved_surplus_cannot_be_requested_twice() {
        let (mut store, donor, receiver, medicine, item) = setup();
        let posting = post(&mut store, &donor, &item, 300).unwrap();
        let first = request(&mut store, &receiver, &medicine, 100);
        let second = request(&mut store, &receiver, &medicine, 100);

        store.request_transfer(&posting.id, &first.id).unwrap();
        assert!(matches!(
            store.request_transfer(&posting.id, &second.id),
            Err(StoreError::InvalidState(_))
        ));
    }

    #[test]
    fn test_clinic_views() {
        let (mut store, donor, receiver, medicine, item) = setup();
        let posting = post(&mut store, &donor, &item, 300).unwrap();
        let req = request(&mut store, &receiver, &medicine, 200);
        store.request_transfer(&posting.id, &req.id).unwrap();

        assert_eq!(store.inventory_for_clinic(&donor.id).len(), 1);
        assert!(store.inventory_for_clinic(&receiver.id).is_empty());
        assert_eq!(store.surplus_for_clinic(&donor.id).len(), 1);
        assert_eq!(store.requests_for_clinic(&receiver.id).len(), 1);
        assert_eq!(store.outgoing_transfers(&donor.id).len(), 1);
        assert_eq!(store.incoming_transfers(&receiver.id).len(), 1);
        assert!(store.incoming_transfers(&donor.id).is_empty());
    }

    #[test]
    fn test_lot_expired_since_recording_cannot_be_posted() {
        let (mut store, donor, _, _, item) = setup();
        // Time passes without anyone refreshing the stored status
        store.inventory[0].expiry_date = Utc::now() - Duration::days(5);
        assert_eq!(store.inventory()[0].status, InventoryStatus::InStock);

        let err = post(&mut store, &donor, &item, 10).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
        assert_eq!(store.inventory()[0].status, InventoryStatus::Expired);
        assert!(store.surplus().is_empty());
    }

    #[test]
    fn test_refresh_marks_expired() {
        let (mut store, _, _, _, _) = setup();

        store.refresh_inventory_statuses(Utc::now() + Duration::days(365));
        assert_eq!(store.inventory()[0].status, InventoryStatus::Expired);
    }
}
