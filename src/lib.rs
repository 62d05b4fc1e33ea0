//! Fixed-rate loan amortization: monthly payment, payment schedule with extra
//! payments, and summary statistics.
//!
//! Each call validates its input, computes, and returns fresh value objects.
//! Nothing is retained between calls.

pub mod error;
pub mod export;
pub mod loan;
pub mod payment;
pub mod schedule;
pub mod summary;
pub mod validator;

use log::debug;

pub use error::{ExportError, Result, ValidationError};
pub use loan::{LoanRequest, LoanSummary, PaymentEntry};
pub use validator::{validate, validate_terms, ValidatedRequest};

/// Fixed monthly payment, excluding extras, at full precision.
///
/// No calendar dates are involved, so terms past the calendar range are accepted here.
pub fn compute_fixed_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64> {
    validate_terms(&LoanRequest::new(principal, annual_rate_percent, term_months))?;
    Ok(fixed_payment_for(
        principal,
        annual_rate_percent,
        term_months,
    ))
}

pub fn compute_schedule(request: &LoanRequest) -> Result<Vec<PaymentEntry>> {
    let request = validate(request)?;
    let payment = fixed_payment_for(
        request.principal,
        request.annual_rate_percent,
        request.term_months,
    );
    Ok(schedule::generate(&request, payment))
}

pub fn compute_summary(request: &LoanRequest) -> Result<LoanSummary> {
    let request = validate(request)?;
    let payment = fixed_payment_for(
        request.principal,
        request.annual_rate_percent,
        request.term_months,
    );
    let schedule = schedule::generate(&request, payment);
    Ok(summary::summarize(schedule, &request, payment))
}

fn fixed_payment_for(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let payment = payment::fixed_payment(principal, annual_rate_percent, term_months);
    debug!(
        "fixed payment {} for principal {} at {}% over {} months",
        payment, principal, annual_rate_percent, term_months
    );
    payment
}
