use rust_decimal::Decimal;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure taxonomy of the investment ledger.
///
/// Capacity failures (`BelowMinimum`, `ExceedsRemaining`, `ProjectNotOpen`)
/// are transient: the same request may succeed later as funding state
/// changes. Integrity failures (`InvalidSignature`, `AlreadyInvested`) are
/// terminal for the request and worth flagging for abuse review.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount {amount} is below the minimum investment of {minimum}")]
    BelowMinimum { amount: Decimal, minimum: Decimal },

    #[error("amount {amount} does not buy a whole share at {price_per_share} per share")]
    InsufficientAmount {
        amount: Decimal,
        price_per_share: Decimal,
    },

    #[error("amount {amount} exceeds the remaining funding capacity of {remaining}")]
    ExceedsRemaining { amount: Decimal, remaining: Decimal },

    #[error("project is not open for investment")]
    ProjectNotOpen,

    #[error("payment signature verification failed")]
    InvalidSignature,

    #[error("no payment matches this order for the given investor and project")]
    PaymentNotFound,

    #[error("investor already holds an investment in this project")]
    AlreadyInvested,
}
