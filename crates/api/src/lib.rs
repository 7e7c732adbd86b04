//! HTTP service for the investment & returns ledger.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
