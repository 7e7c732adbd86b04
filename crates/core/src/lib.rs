//! Pure domain logic for the investment & returns ledger.
//!
//! This crate has no database or HTTP dependencies so the money math,
//! signature verification, and distribution allocation can be unit tested
//! in isolation and reused by any future worker or CLI tooling.

pub mod distribution;
pub mod error;
pub mod money;
pub mod principal;
pub mod roles;
pub mod signature;
pub mod types;
