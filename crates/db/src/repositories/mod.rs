//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Mutations spanning more than one
//! row run inside a single transaction opened and committed in the
//! repository method, so callers cannot observe partial writes.

pub mod investment_repo;
pub mod payment_repo;
pub mod project_repo;
pub mod return_repo;
pub mod user_repo;

pub use investment_repo::{InvestmentRepo, SettleOutcome};
pub use payment_repo::PaymentRepo;
pub use project_repo::ProjectRepo;
pub use return_repo::ReturnRepo;
pub use user_repo::UserRepo;
