//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Filter parameters for `GET /parcels`
/// (`?payment_status=&delivery_status=&email=`). All optional; absent
/// fields impose no constraint.
#[derive(Debug, Deserialize)]
pub struct ParcelListParams {
    pub payment_status: Option<String>,
    pub delivery_status: Option<String>,
    pub email: Option<String>,
}

/// `?email=` parameter used by the rider-scoped and payment listings.
#[derive(Debug, Deserialize)]
pub struct EmailParams {
    pub email: Option<String>,
}

/// `?district=` parameter for the available-rider lookup.
#[derive(Debug, Deserialize)]
pub struct DistrictParams {
    pub district: Option<String>,
}
