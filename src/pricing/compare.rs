//! Percentage comparison of two prices in a common currency.

use super::money::Money;
use crate::error::{PriceError, Result};
use serde::{Deserialize, Serialize};

/// Which side of a comparison is cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheaperSide {
    Reference,
    Compared,
}

/// Result of comparing a reference price against another region's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub reference_price: Money,
    pub compared_price: Money,
    /// Absolute difference as a whole percentage of the reference price.
    pub percent_diff: u32,
    pub cheaper_side: CheaperSide,
}

impl ComparisonResult {
    /// Returns true if the compared region is cheaper.
    pub fn compared_is_cheaper(&self) -> bool {
        self.cheaper_side == CheaperSide::Compared
    }

    /// Percentage difference, negative when the compared side is cheaper.
    pub fn signed_percent(&self) -> i64 {
        match self.cheaper_side {
            CheaperSide::Compared => -(self.percent_diff as i64),
            CheaperSide::Reference => self.percent_diff as i64,
        }
    }

    /// Returns a short verdict for the compared side.
    pub fn verdict(&self) -> &'static str {
        if self.compared_is_cheaper() {
            "cheaper"
        } else if self.percent_diff == 0 {
            "same price"
        } else {
            "more expensive"
        }
    }
}

/// Compares `compared` against `reference`.
///
/// Both prices must already be in the same currency, and the reference must
/// be non-zero.
pub fn compare(reference: Money, compared: Money) -> Result<ComparisonResult> {
    if reference.currency != compared.currency {
        return Err(PriceError::CurrencyMismatch {
            expected: reference.currency,
            actual: compared.currency,
        });
    }

    if reference.amount == 0.0 {
        return Err(PriceError::DivisionByZero);
    }

    let percent = ((reference.amount - compared.amount).abs() / reference.amount * 100.0).round();
    if !(0.0..=u32::MAX as f64).contains(&percent) {
        return Err(PriceError::DifferenceOutOfRange(percent));
    }

    let cheaper_side = if compared.amount < reference.amount {
        CheaperSide::Compared
    } else {
        CheaperSide::Reference
    };

    Ok(ComparisonResult {
        reference_price: reference,
        compared_price: compared,
        percent_diff: percent as u32,
        cheaper_side,
    })
}
