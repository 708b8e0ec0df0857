//! Loan calculation modules.
//!
//! This module provides the payment estimate shown while the applicant
//! adjusts the requested amount and term.

pub mod amortization;
pub mod common;

pub use amortization::{
    LoanTerms, PRINCIPAL_DEFAULT, PRINCIPAL_MAX, PRINCIPAL_MIN, TERM_DEFAULT, TERM_MAX, TERM_MIN,
    annual_rate, monthly_payment, monthly_rate,
};
