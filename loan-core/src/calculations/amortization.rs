//! Fixed-rate amortized payment estimate.
//!
//! The estimate shown next to the amount and term sliders is the standard
//! annuity payment
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `P`    | Principal in whole colones |
//! | `n`    | Term in months |
//! | `r`    | Monthly rate, `0.08 / 12` |
//!
//! `payment = round(P · r / (1 − (1 + r)^−n))`
//!
//! which is evaluated as `P · r · f / (f − 1)` with `f = (1 + r)^n` so the
//! whole computation stays in [`Decimal`] arithmetic.
//!
//! # Example
//!
//! ```
//! use loan_core::calculations::{LoanTerms, monthly_payment};
//!
//! assert_eq!(monthly_payment(300_000, 12), 26_097);
//!
//! let terms = LoanTerms::clamped(10, 999);
//! assert_eq!(terms.principal(), 300_000);
//! assert_eq!(terms.term_months(), 60);
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{clamp, round_to_unit};

/// Smallest principal that can be requested.
pub const PRINCIPAL_MIN: u64 = 300_000;
/// Largest principal that can be requested.
pub const PRINCIPAL_MAX: u64 = 10_000_000;
/// Principal shown when the form is first loaded or reset.
pub const PRINCIPAL_DEFAULT: u64 = 1_000_000;

/// Shortest term in months.
pub const TERM_MIN: u32 = 6;
/// Longest term in months.
pub const TERM_MAX: u32 = 60;
/// Term used when the form is first loaded, reset, or the term box is blank.
pub const TERM_DEFAULT: u32 = 12;

/// Nominal annual rate, compounded monthly. Not user-configurable.
pub fn annual_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Periodic (monthly) rate.
pub fn monthly_rate() -> Decimal {
    annual_rate() / Decimal::from(12)
}

/// Computes the monthly payment for `principal` over `term_months`.
///
/// The term is clamped into `[TERM_MIN, TERM_MAX]` first, so a zero term
/// can never make the denominator vanish. The principal is used as given.
pub fn monthly_payment(
    principal: u64,
    term_months: u32,
) -> u64 {
    let n = clamp(term_months, TERM_MIN, TERM_MAX);
    let p = Decimal::from(principal);
    let r = monthly_rate();

    let growth = Decimal::ONE + r;
    let factor = (0..n).fold(Decimal::ONE, |acc, _| acc * growth);

    let payment = p * r * factor / (factor - Decimal::ONE);

    round_to_unit(payment).to_u64().unwrap_or(u64::MAX)
}

/// Principal and term, always inside their allowed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal: u64,
    term_months: u32,
}

impl LoanTerms {
    /// Builds terms, clamping both values into their bounds.
    pub fn clamped(
        principal: u64,
        term_months: u32,
    ) -> Self {
        Self {
            principal: clamp(principal, PRINCIPAL_MIN, PRINCIPAL_MAX),
            term_months: clamp(term_months, TERM_MIN, TERM_MAX),
        }
    }

    pub fn principal(&self) -> u64 {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn with_principal(
        self,
        principal: u64,
    ) -> Self {
        Self::clamped(principal, self.term_months)
    }

    pub fn with_term(
        self,
        term_months: u32,
    ) -> Self {
        Self::clamped(self.principal, term_months)
    }

    pub fn payment(&self) -> u64 {
        monthly_payment(self.principal, self.term_months)
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self::clamped(PRINCIPAL_DEFAULT, TERM_DEFAULT)
    }
}
