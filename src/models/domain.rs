use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of organisation running a clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClinicType {
    #[serde(rename = "NGO")]
    Ngo,
    #[serde(rename = "Primary Health Center")]
    PrimaryHealthCenter,
    #[serde(rename = "Charitable Hospital")]
    CharitableHospital,
    #[serde(rename = "Mobile Medical Unit")]
    MobileMedicalUnit,
}

/// A participating clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub clinic_type: ClinicType,
    pub location: String,
    pub district: String,
    pub state: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicineCategory {
    Antibiotic,
    Painkiller,
    Antiseptic,
    Antidiabetic,
    Antihypertensive,
    Vitamin,
    Vaccine,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicinePriority {
    Essential,
    Critical,
    Standard,
}

/// Catalogue entry for a medicine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    #[serde(rename = "genericName")]
    pub generic_name: String,
    pub category: MedicineCategory,
    pub strength: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub priority: Option<MedicinePriority>,
}

/// Dispensing unit shared by inventory lots and requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Tablets,
    Capsules,
    Ml,
    Vials,
    Strips,
    Bottles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Expired,
}

/// A batch of one medicine held by one clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[serde(rename = "medicineId")]
    pub medicine_id: String,
    #[serde(rename = "batchNumber", default)]
    pub batch_number: String,
    pub quantity: u32,
    pub unit: Unit,
    #[serde(rename = "expiryDate")]
    pub expiry_date: DateTime<Utc>,
    pub status: InventoryStatus,
    #[serde(rename = "addedDate")]
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurplusReason {
    #[serde(rename = "Near Expiry")]
    NearExpiry,
    Overstocked,
    #[serde(rename = "Program Ended")]
    ProgramEnded,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurplusStatus {
    Available,
    Reserved,
    Transferred,
    Cancelled,
}

/// A clinic's offer of excess stock from one inventory lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurplusPosting {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[serde(rename = "inventoryItemId")]
    pub inventory_item_id: String,
    pub quantity: u32,
    pub reason: SurplusReason,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: SurplusStatus,
    #[serde(rename = "postedDate")]
    pub posted_date: DateTime<Utc>,
}

/// Requester-declared priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    Matched,
    Fulfilled,
    Cancelled,
}

/// A clinic's declared need for a medicine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRequest {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    #[serde(rename = "medicineId")]
    pub medicine_id: String,
    pub quantity: u32,
    pub unit: Unit,
    pub urgency: Urgency,
    #[serde(default)]
    pub reason: String,
    pub status: RequestStatus,
    #[serde(rename = "requestedDate")]
    pub requested_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Pending,
    Approved,
    #[serde(rename = "In Transit")]
    InTransit,
    Completed,
    Rejected,
}

/// Movement of surplus stock from one clinic to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    #[serde(rename = "surplusPostingId")]
    pub surplus_posting_id: String,
    #[serde(rename = "requestId", default)]
    pub request_id: Option<String>,
    #[serde(rename = "fromClinicId")]
    pub from_clinic_id: String,
    #[serde(rename = "toClinicId")]
    pub to_clinic_id: String,
    #[serde(rename = "inventoryItemId")]
    pub inventory_item_id: String,
    pub quantity: u32,
    pub status: TransferStatus,
    #[serde(rename = "requestedDate")]
    pub requested_date: DateTime<Utc>,
    #[serde(rename = "approvedDate", default)]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(rename = "completedDate", default)]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Weighted components behind a match score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub urgency: f64,
    pub expiry: f64,
    pub quantity: f64,
    pub total: u32,
}

/// Composite identity of a match, stable across recomputations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey {
    #[serde(rename = "surplusId")]
    pub surplus_id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

/// Scored pairing of an available surplus posting and an open request.
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub surplus: SurplusPosting,
    pub request: MedicineRequest,
    #[serde(rename = "inventoryItem")]
    pub inventory_item: InventoryItem,
    pub medicine: Medicine,
    #[serde(rename = "fromClinic")]
    pub from_clinic: Clinic,
    #[serde(rename = "toClinic")]
    pub to_clinic: Clinic,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "daysUntilExpiry")]
    pub days_until_expiry: i64,
    #[serde(rename = "scoreBreakdown")]
    pub score_breakdown: ScoreBreakdown,
}

impl Match {
    pub fn key(&self) -> MatchKey {
        MatchKey {
            surplus_id: self.surplus.id.clone(),
            request_id: self.request.id.clone(),
        }
    }

    /// True when the clinic owns either side of the pairing
    pub fn involves_clinic(&self, clinic_id: &str) -> bool {
        self.from_clinic.id == clinic_id || self.to_clinic.id == clinic_id
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub urgency: f64,
    pub expiry: f64,
    pub quantity: f64,
    /// Days of remaining shelf life at which the expiry component reaches zero
    pub expiry_horizon_days: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            urgency: 0.4,
            expiry: 0.3,
            quantity: 0.3,
            expiry_horizon_days: 90.0,
        }
    }
}

/// Thresholds used when deriving an inventory item's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPolicy {
    pub low_stock_threshold: u32,
    pub expiring_soon_days: i64,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: 500,
            expiring_soon_days: 90,
        }
    }
}
