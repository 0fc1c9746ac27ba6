// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Clinic, ClinicType, InventoryItem, InventoryPolicy, InventoryStatus, Match, MatchKey,
    Medicine, MedicineCategory, MedicinePriority, MedicineRequest, RequestStatus,
    ScoreBreakdown, ScoringWeights, SurplusPosting, SurplusReason, SurplusStatus, Transfer,
    TransferStatus, Unit, Urgency,
};
pub use requests::{
    ClinicQuery, MatchesQuery, NewClinic, NewInventoryItem, NewMedicine, NewMedicineRequest,
    NewSurplusPosting, RequestTransferRequest,
};
pub use responses::{ClinicTransfersResponse, ErrorResponse, HealthResponse, MatchesResponse};
