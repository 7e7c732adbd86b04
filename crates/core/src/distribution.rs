//! Pro-rata profit allocation for a distribution round.
//!
//! Each active shareholder receives `total_profit * shares / total_shares`,
//! computed in exact decimal arithmetic and truncated toward zero at two
//! decimal places. When shares do not evenly divide the profit, the sub-cent
//! truncation remainder is deliberately left unallocated with the project --
//! it is a known approximation, never silently redistributed to any holder.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;
use crate::types::DbId;

/// Decimal places credited amounts are truncated to.
const CREDIT_SCALE: u32 = 2;

/// One investor's computed credit in a distribution round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnShare {
    pub investor_id: DbId,
    pub shares: i64,
    pub amount: Decimal,
}

/// Allocate a profit pool across shareholders proportionally to shares held.
///
/// `holdings` is `(investor_id, shares_purchased)` per active investment.
/// The returned credits sum to at most `total_profit`; the difference is the
/// truncation remainder described in the module docs.
///
/// # Errors
///
/// - [`CoreError::Validation`] when `total_profit <= 0`, `total_shares <= 0`,
///   or any holding has a non-positive share count.
/// - [`CoreError::Internal`] when the holdings sum to more shares than the
///   project has. Crediting against an undersized denominator would pay out
///   more than `total_profit`, so an over-committed ledger refuses to
///   distribute instead.
pub fn allocate_returns(
    total_profit: Decimal,
    total_shares: i64,
    holdings: &[(DbId, i64)],
) -> Result<Vec<ReturnShare>, CoreError> {
    if total_profit <= Decimal::ZERO {
        return Err(CoreError::Validation(
            "total profit must be positive".into(),
        ));
    }
    if total_shares <= 0 {
        return Err(CoreError::Validation(
            "project has no shares to distribute against".into(),
        ));
    }

    let mut held: i64 = 0;
    for &(investor_id, shares) in holdings {
        if shares <= 0 {
            return Err(CoreError::Validation(format!(
                "investor {investor_id} holds a non-positive share count"
            )));
        }
        held += shares;
    }
    if held > total_shares {
        return Err(CoreError::Internal(format!(
            "holdings total {held} shares but the project has only {total_shares}"
        )));
    }

    let total_shares_dec = Decimal::from(total_shares);
    let mut credits = Vec::with_capacity(holdings.len());

    for &(investor_id, shares) in holdings {
        let amount = (total_profit * Decimal::from(shares) / total_shares_dec)
            .round_dp_with_strategy(CREDIT_SCALE, RoundingStrategy::ToZero);

        credits.push(ReturnShare {
            investor_id,
            shares,
            amount,
        });
    }

    Ok(credits)
}

/// Sum of credited amounts, for conservation checks and logging.
pub fn total_credited(credits: &[ReturnShare]) -> Decimal {
    credits.iter().map(|c| c.amount).sum()
}
