//! Entity model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the requests that create or mutate it
//!
//! Status fields stay `String` in the rows -- the label <-> enum mapping is
//! owned by `parceld_core::status` and applied at the handler boundary.

pub mod parcel;
pub mod payment;
pub mod rider;
pub mod tracking_event;
pub mod user;
