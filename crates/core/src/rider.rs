//! Rider status domains.
//!
//! A rider moves through an approval workflow (`pending -> approved |
//! rejected`, admin-driven) and, once approved, may be bound to at most one
//! active delivery at a time. The binding is tracked in `riders.work_status`:
//! NULL means available, [`WORK_STATUS_IN_DELIVERY`] while bound.

use crate::error::CoreError;

/// Application/approval state of a rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderStatus {
    Pending,
    Approved,
    Rejected,
}

impl RiderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RiderStatus::Pending => "pending",
            RiderStatus::Approved => "approved",
            RiderStatus::Rejected => "rejected",
        }
    }

    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            "pending" => Ok(RiderStatus::Pending),
            "approved" => Ok(RiderStatus::Approved),
            "rejected" => Ok(RiderStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown rider status '{other}'"
            ))),
        }
    }
}

/// Label stored in `riders.work_status` while a rider is bound to a parcel.
pub const WORK_STATUS_IN_DELIVERY: &str = "in-delivery";
