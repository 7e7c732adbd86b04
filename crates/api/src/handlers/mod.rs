//! HTTP handlers, one module per resource.

pub mod investment;
pub mod project;
pub mod returns;
