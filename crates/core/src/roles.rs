//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_STUDENT: &str = "student";

/// Whether `role` is one the portal grants.
pub fn is_known_role(role: &str) -> bool {
    matches!(role, ROLE_TEACHER | ROLE_STUDENT)
}
