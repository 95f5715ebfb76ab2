//! Tracking log input validation.

use crate::error::CoreError;

/// Validate a tracking event before it is appended.
///
/// The log accepts events for tracking identifiers with no corresponding
/// parcel, so only presence of the identifier and the status label is
/// enforced here.
pub fn validate_event(tracking_id: &str, status: &str) -> Result<(), CoreError> {
    if tracking_id.trim().is_empty() {
        return Err(CoreError::Validation("Missing trackingId".into()));
    }
    if status.trim().is_empty() {
        return Err(CoreError::Validation("Missing status".into()));
    }
    Ok(())
}
