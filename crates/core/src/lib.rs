//! Domain rules for the parcel delivery platform.
//!
//! Pure logic only: status domains, the delivery-status transition matrix,
//! role constants, and input validation. No I/O lives here -- persistence is
//! in `parceld-db` and the HTTP surface in `parceld-api`.

pub mod error;
pub mod rider;
pub mod roles;
pub mod status;
pub mod tracking;
pub mod types;
