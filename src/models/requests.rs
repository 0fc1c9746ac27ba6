use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    ClinicType, MedicineCategory, MedicinePriority, SurplusReason, Unit, Urgency,
};

/// Request to register a clinic
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewClinic {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub clinic_type: ClinicType,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub district: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Request to add a medicine to the shared catalogue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMedicine {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(rename = "genericName")]
    pub generic_name: String,
    pub category: MedicineCategory,
    #[validate(length(min = 1))]
    pub strength: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub priority: Option<MedicinePriority>,
}

/// Request to record a new inventory lot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewInventoryItem {
    #[validate(length(min = 1))]
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "medicineId")]
    pub medicine_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "batchNumber")]
    pub batch_number: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub unit: Unit,
    #[serde(rename = "expiryDate")]
    pub expiry_date: DateTime<Utc>,
}

/// Request to offer part of an inventory lot as surplus
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSurplusPosting {
    #[validate(length(min = 1))]
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "inventoryItemId")]
    pub inventory_item_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub reason: SurplusReason,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to file a medicine request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMedicineRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "medicineId")]
    pub medicine_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub unit: Unit,
    pub urgency: Urgency,
    #[validate(length(min = 1))]
    pub reason: String,
}

/// Request to turn a proposed match into a transfer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestTransferRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "surplusId")]
    pub surplus_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "requestId")]
    pub request_id: String,
}

/// Optional clinic scope for listing endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicQuery {
    #[serde(rename = "clinicId", default)]
    pub clinic_id: Option<String>,
}

/// Query for the matches endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchesQuery {
    #[serde(rename = "clinicId", default)]
    pub clinic_id: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}
