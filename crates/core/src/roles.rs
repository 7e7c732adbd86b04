//! Well-known role name constants.
//!
//! These must match the seed data in `20260715000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BUILDER: &str = "builder";
pub const ROLE_INVESTOR: &str = "investor";
