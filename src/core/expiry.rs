use chrono::{DateTime, Utc};
use crate::models::{InventoryPolicy, InventoryStatus};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days from `now` until `expiry_date`, rounded up.
///
/// Any remaining fraction of a day counts as a full day, so an expiry
/// one hour away yields 1 and one exactly a day ago yields -1.
/// Already-expired stock gives zero or a negative count.
#[inline]
pub fn days_until_expiry(expiry_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry_date - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Derive the display status of an inventory lot
///
/// Expiry takes precedence over quantity: an expiring lot is reported as
/// such even when it is also low on stock.
pub fn derive_inventory_status(
    quantity: u32,
    expiry_date: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &InventoryPolicy,
) -> InventoryStatus {
    let days = days_until_expiry(expiry_date, now);

    if days < 0 {
        InventoryStatus::Expired
    } else if days < policy.expiring_soon_days {
        InventoryStatus::ExpiringSoon
    } else if quantity < policy.low_stock_threshold {
        InventoryStatus::LowStock
    } else {
        InventoryStatus::InStock
    }
}
