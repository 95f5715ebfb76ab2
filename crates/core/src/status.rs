//! Parcel status domains and the delivery transition matrix.
//!
//! Statuses are stored as their wire labels (TEXT columns), so each enum
//! owns its label mapping. `DeliveryStatus` additionally owns the fulfilment
//! pipeline ordering:
//!
//! ```text
//! pending -> assigned -> in-transit -> delivered
//!                                   -> service-center-delivered
//! ```
//!
//! No transition skips a stage or moves backward. `payment_status` is an
//! orthogonal one-way axis (`unpaid -> paid`) and gates nothing in delivery
//! progression.

use std::fmt;

use crate::error::CoreError;

/// Position of a parcel in the fulfilment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    ServiceCenterDelivered,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 5] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Assigned,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
        DeliveryStatus::ServiceCenterDelivered,
    ];

    /// The wire label stored in `parcels.delivery_status`.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::InTransit => "in-transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::ServiceCenterDelivered => "service-center-delivered",
        }
    }

    /// Parse a wire label, rejecting anything outside the domain.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == label)
            .ok_or_else(|| CoreError::Validation(format!("Unknown delivery status '{label}'")))
    }

    /// Whether `next` is a direct successor of `self` in the pipeline.
    pub fn allows(self, next: DeliveryStatus) -> bool {
        matches!(
            (self, next),
            (DeliveryStatus::Pending, DeliveryStatus::Assigned)
                | (DeliveryStatus::Assigned, DeliveryStatus::InTransit)
                | (DeliveryStatus::InTransit, DeliveryStatus::Delivered)
                | (DeliveryStatus::InTransit, DeliveryStatus::ServiceCenterDelivered)
        )
    }

    /// Terminal states admit no further delivery transitions and make the
    /// parcel eligible for cash-out.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DeliveryStatus::Delivered | DeliveryStatus::ServiceCenterDelivered
        )
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery status a caller may request through the advance operation.
///
/// `assigned` is reachable only through rider assignment, and the terminal
/// `service-center-delivered` is not settable over the API, so the advance
/// surface accepts exactly these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTarget {
    InTransit,
    Delivered,
}

impl AdvanceTarget {
    /// Parse an advance request label. Any label outside the advance
    /// surface -- including otherwise-valid delivery statuses -- is an
    /// invalid argument.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            "in-transit" => Ok(AdvanceTarget::InTransit),
            "delivered" => Ok(AdvanceTarget::Delivered),
            other => Err(CoreError::Validation(format!(
                "Delivery status must be 'in-transit' or 'delivered', got '{other}'"
            ))),
        }
    }

    pub fn as_delivery_status(self) -> DeliveryStatus {
        match self {
            AdvanceTarget::InTransit => DeliveryStatus::InTransit,
            AdvanceTarget::Delivered => DeliveryStatus::Delivered,
        }
    }

    /// Check the transition from `current` is legal (direct successor only).
    pub fn validate_from(self, current: DeliveryStatus) -> Result<(), CoreError> {
        let target = self.as_delivery_status();
        if current.allows(target) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Cannot move delivery status from '{current}' to '{target}'"
            )))
        }
    }
}

/// Payment axis of a parcel. One-way: `unpaid -> paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(CoreError::Validation(format!(
                "Unknown payment status '{other}'"
            ))),
        }
    }
}

/// Label stored in `parcels.cash_out_status` once a cash-out has been
/// requested. Absence of the field (NULL) means no cash-out yet.
pub const CASHED_OUT: &str = "cashed-out";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in DeliveryStatus::ALL {
            assert_eq!(DeliveryStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(DeliveryStatus::parse("shipped").is_err());
        assert!(DeliveryStatus::parse("").is_err());
        assert!(PaymentStatus::parse("refunded").is_err());
    }

    #[test]
    fn pipeline_allows_only_direct_successors() {
        use DeliveryStatus::*;

        assert!(Pending.allows(Assigned));
        assert!(Assigned.allows(InTransit));
        assert!(InTransit.allows(Delivered));
        assert!(InTransit.allows(ServiceCenterDelivered));

        // No skips.
        assert!(!Pending.allows(InTransit));
        assert!(!Pending.allows(Delivered));
        assert!(!Assigned.allows(Delivered));

        // No backward moves.
        assert!(!Assigned.allows(Pending));
        assert!(!InTransit.allows(Assigned));
        assert!(!Delivered.allows(InTransit));

        // No self loops.
        for status in DeliveryStatus::ALL {
            assert!(!status.allows(status));
        }
    }

    #[test]
    fn terminal_states_admit_no_exit() {
        use DeliveryStatus::*;

        for terminal in [Delivered, ServiceCenterDelivered] {
            assert!(terminal.is_terminal());
            for next in DeliveryStatus::ALL {
                assert!(!terminal.allows(next));
            }
        }
        assert!(!Pending.is_terminal());
        assert!(!Assigned.is_terminal());
        assert!(!InTransit.is_terminal());
    }

    #[test]
    fn advance_surface_accepts_exactly_two_targets() {
        assert_eq!(
            AdvanceTarget::parse("in-transit").unwrap(),
            AdvanceTarget::InTransit
        );
        assert_eq!(
            AdvanceTarget::parse("delivered").unwrap(),
            AdvanceTarget::Delivered
        );

        // Valid delivery statuses that are not advance targets.
        assert!(AdvanceTarget::parse("pending").is_err());
        assert!(AdvanceTarget::parse("assigned").is_err());
        assert!(AdvanceTarget::parse("service-center-delivered").is_err());
        assert!(AdvanceTarget::parse("lost").is_err());
    }

    #[test]
    fn advance_requires_direct_predecessor() {
        use DeliveryStatus::*;

        assert!(AdvanceTarget::InTransit.validate_from(Assigned).is_ok());
        assert!(AdvanceTarget::Delivered.validate_from(InTransit).is_ok());

        assert!(AdvanceTarget::InTransit.validate_from(Pending).is_err());
        assert!(AdvanceTarget::Delivered.validate_from(Pending).is_err());
        assert!(AdvanceTarget::Delivered.validate_from(Assigned).is_err());
        assert!(AdvanceTarget::InTransit.validate_from(Delivered).is_err());
        assert!(AdvanceTarget::Delivered.validate_from(Delivered).is_err());
    }
}
