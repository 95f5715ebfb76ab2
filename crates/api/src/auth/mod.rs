//! Identity verification.
//!
//! Credentials are minted by the external identity service that shares this
//! deployment's signing secret; this module only verifies them and yields
//! the trusted `{subject, email, role}` identity the rest of the API
//! consumes. The core never inspects a raw credential.

pub mod jwt;
