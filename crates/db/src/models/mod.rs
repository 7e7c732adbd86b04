//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod investment;
pub mod payment;
pub mod project;
pub mod returns;
pub mod status;
pub mod user;
