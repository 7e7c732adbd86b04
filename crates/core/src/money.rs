//! Money/share arithmetic for the investment ledger.
//!
//! All monetary values are [`rust_decimal::Decimal`]; binary floating point
//! never touches a currency amount. Shares are indivisible, so a requested
//! amount converts to `floor(amount / price_per_share)` whole shares and the
//! investor is charged for those shares only. The sub-share remainder is
//! never charged and never rounds up.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LedgerError;

/// Minor currency units per major unit (paise per rupee, cents per dollar).
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// The outcome of converting a requested amount into whole shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareQuote {
    /// Whole shares purchasable, `floor(amount / price_per_share)`. Always >= 1.
    pub shares: i64,
    /// The exact amount charged: `shares * price_per_share`. Always <= the
    /// requested amount.
    pub actual_amount: Decimal,
}

/// Convert a requested amount into a whole-share quote.
///
/// Deterministic and side-effect free; safe to call repeatedly, including
/// once at order time as a pre-check and again at settlement time as the
/// authoritative computation.
///
/// # Errors
///
/// - [`LedgerError::InsufficientAmount`] when the amount buys no whole share.
pub fn compute_shares(amount: Decimal, price_per_share: Decimal) -> Result<ShareQuote, LedgerError> {
    // A non-positive price would make every amount "insufficient"; projects
    // are validated at creation, so this only guards corrupted data.
    if price_per_share <= Decimal::ZERO {
        return Err(LedgerError::InsufficientAmount {
            amount,
            price_per_share,
        });
    }

    let shares_dec = (amount / price_per_share).floor();
    let shares = shares_dec.to_i64().unwrap_or(0);

    if shares < 1 {
        return Err(LedgerError::InsufficientAmount {
            amount,
            price_per_share,
        });
    }

    Ok(ShareQuote {
        shares,
        actual_amount: shares_dec * price_per_share,
    })
}

/// Check an amount against a project's minimum-investment floor.
pub fn check_minimum(amount: Decimal, min_investment: Decimal) -> Result<(), LedgerError> {
    if amount < min_investment {
        return Err(LedgerError::BelowMinimum {
            amount,
            minimum: min_investment,
        });
    }
    Ok(())
}

/// Remaining funding capacity: `max(0, total_value - raised)`.
///
/// Clamped at zero so an over-funded project (possible only through manual
/// data fixes) reads as "no capacity" rather than a negative amount.
pub fn remaining_capacity(total_value: Decimal, raised: Decimal) -> Decimal {
    (total_value - raised).max(Decimal::ZERO)
}

/// Check an amount against the remaining funding capacity.
pub fn check_capacity(amount: Decimal, remaining: Decimal) -> Result<(), LedgerError> {
    if amount > remaining {
        return Err(LedgerError::ExceedsRemaining { amount, remaining });
    }
    Ok(())
}

/// Convert a major-unit amount to integer minor units for the gateway call
/// (x100, half-up). Only the gateway wire call uses minor units; everything
/// persisted stays in major-unit decimals.
///
/// Returns `None` if the result does not fit in an `i64`, which for currency
/// amounts means the input was garbage.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount * Decimal::from(MINOR_UNITS_PER_UNIT))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
