//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Lifecycle guards are expressed
//! as single conditional `UPDATE` statements; `rows_affected()` is the
//! success signal, so a tripped guard and a missing row both surface as
//! `false` and callers disambiguate with a lookup.

pub mod parcel_repo;
pub mod payment_repo;
pub mod rider_repo;
pub mod tracking_repo;
pub mod user_repo;

pub use parcel_repo::ParcelRepo;
pub use payment_repo::PaymentRepo;
pub use rider_repo::RiderRepo;
pub use tracking_repo::TrackingRepo;
pub use user_repo::UserRepo;
