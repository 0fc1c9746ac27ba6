//! Demo dataset for a freshly started service.
//!
//! All clinics, medicines and stock here are fictional. Expiry dates are
//! relative to the moment of seeding so the matcher always has near-expiry
//! surplus to propose.

use chrono::{Duration, Utc};

use crate::models::{
    ClinicType, InventoryPolicy, MedicineCategory, MedicinePriority, NewClinic,
    NewInventoryItem, NewMedicine, NewMedicineRequest, NewSurplusPosting, SurplusReason, Unit,
    Urgency,
};
use crate::services::store::{InventoryStore, StoreError};

fn clinic(
    name: &str,
    clinic_type: ClinicType,
    location: &str,
    district: &str,
    state: &str,
) -> NewClinic {
    NewClinic {
        name: name.to_string(),
        clinic_type,
        location: location.to_string(),
        district: district.to_string(),
        state: state.to_string(),
        contact_person: "Duty Pharmacist".to_string(),
        phone: "+91 00000 00000".to_string(),
        email: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
    }
}

fn medicine(
    name: &str,
    generic: &str,
    category: MedicineCategory,
    strength: &str,
    priority: MedicinePriority,
) -> NewMedicine {
    NewMedicine {
        name: name.to_string(),
        generic_name: generic.to_string(),
        category,
        strength: strength.to_string(),
        manufacturer: "Generic Pharma".to_string(),
        priority: Some(priority),
    }
}

/// Build a store populated with the demo network
pub fn demo_store(policy: InventoryPolicy) -> Result<InventoryStore, StoreError> {
    let mut store = InventoryStore::new(policy);
    let now = Utc::now();

    let hope = store.add_clinic(clinic(
        "Hope Community Clinic",
        ClinicType::Ngo,
        "Andheri",
        "Mumbai Suburban",
        "Maharashtra",
    ))?;
    let rural = store.add_clinic(clinic(
        "Rampur Primary Health Center",
        ClinicType::PrimaryHealthCenter,
        "Rampur",
        "Pune",
        "Maharashtra",
    ))?;
    let seva = store.add_clinic(clinic(
        "Seva Charitable Hospital",
        ClinicType::CharitableHospital,
        "Dharavi",
        "Mumbai City",
        "Maharashtra",
    ))?;
    let mobile = store.add_clinic(clinic(
        "Sahyadri Mobile Unit",
        ClinicType::MobileMedicalUnit,
        "Lonavala",
        "Pune",
        "Maharashtra",
    ))?;

    let amoxicillin = store.add_medicine(medicine(
        "Amoxicillin",
        "amoxicillin",
        MedicineCategory::Antibiotic,
        "500mg",
        MedicinePriority::Essential,
    ))?;
    let paracetamol = store.add_medicine(medicine(
        "Paracetamol",
        "acetaminophen",
        MedicineCategory::Painkiller,
        "650mg",
        MedicinePriority::Essential,
    ))?;
    let metformin = store.add_medicine(medicine(
        "Metformin",
        "metformin hydrochloride",
        MedicineCategory::Antidiabetic,
        "500mg",
        MedicinePriority::Critical,
    ))?;
    let ors = store.add_medicine(medicine(
        "ORS",
        "oral rehydration salts",
        MedicineCategory::Other,
        "21g",
        MedicinePriority::Standard,
    ))?;

    let lots = [
        (&hope, &amoxicillin, "AMX-2301", 1200, Unit::Capsules, 25),
        (&hope, &paracetamol, "PCM-1187", 3000, Unit::Tablets, 200),
        (&seva, &metformin, "MET-0412", 800, Unit::Tablets, 55),
        (&mobile, &ors, "ORS-7781", 400, Unit::Bottles, 120),
    ];

    let mut items = Vec::with_capacity(lots.len());
    for (owner, med, batch, quantity, unit, days) in lots {
        items.push(store.add_inventory_item(NewInventoryItem {
            clinic_id: owner.id.clone(),
            medicine_id: med.id.clone(),
            batch_number: batch.to_string(),
            quantity,
            unit,
            expiry_date: now + Duration::days(days),
        })?);
    }

    let postings = [
        (
            &hope,
            &items[0],
            800,
            SurplusReason::NearExpiry,
            Some("Program stock left over after camp"),
        ),
        (&hope, &items[1], 1000, SurplusReason::Overstocked, None),
        (&seva, &items[2], 300, SurplusReason::NearExpiry, None),
    ];
    for (owner, item, quantity, reason, notes) in postings {
        store.post_surplus(NewSurplusPosting {
            clinic_id: owner.id.clone(),
            inventory_item_id: item.id.clone(),
            quantity,
            reason,
            notes: notes.map(str::to_string),
        })?;
    }

    let requests = [
        (
            &rural,
            &amoxicillin,
            500,
            Unit::Capsules,
            Urgency::Critical,
            "Respiratory infection cases rising",
        ),
        (&mobile, &amoxicillin, 300, Unit::Capsules, Urgency::Medium, "Weekly outreach round"),
        (&rural, &paracetamol, 2000, Unit::Tablets, Urgency::Low, "Buffer stock for monsoon"),
        (&hope, &metformin, 200, Unit::Tablets, Urgency::High, "Diabetes screening follow-up"),
    ];
    for (owner, med, quantity, unit, urgency, reason) in requests {
        store.create_request(NewMedicineRequest {
            clinic_id: owner.id.clone(),
            medicine_id: med.id.clone(),
            quantity,
            unit,
            urgency,
            reason: reason.to_string(),
        })?;
    }

    tracing::info!(
        "Seeded demo store: {} clinics, {} medicines, {} lots, {} postings, {} requests",
        store.clinics().len(),
        store.medicines().len(),
        store.inventory().len(),
        store.surplus().len(),
        store.requests().len()
    );

    Ok(store)
}
