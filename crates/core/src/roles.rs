//! Well-known role name constants.
//!
//! These must match the values accepted by the `users.role` column.

use crate::error::CoreError;

pub const ROLE_USER: &str = "user";
pub const ROLE_RIDER: &str = "rider";
pub const ROLE_ADMIN: &str = "admin";

/// Validate a role assignment requested through the admin role endpoint.
///
/// Only `admin` and `user` can be granted directly; `rider` is reachable
/// exclusively through the rider approval workflow.
pub fn validate_assignable_role(role: &str) -> Result<(), CoreError> {
    if role == ROLE_ADMIN || role == ROLE_USER {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid role '{role}'")))
    }
}
