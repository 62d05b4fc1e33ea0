//! Input validation. Every check is a pure predicate; the first failure wins.

use chrono::NaiveDate;
use log::warn;

use crate::error::{Result, ValidationError};
use crate::loan::{add_months, LoanRequest};

/// A `LoanRequest` that passed validation, with its start date resolved.
///
/// Only `validate` constructs one, so the generator and aggregator can rely on
/// positive principal and term, non-negative rates and extras, an in-range
/// one-time month and a representable maturity date.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ValidatedRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    pub monthly_extra_payment: f64,
    pub one_time_extra_payment: f64,
    pub one_time_extra_payment_month: u32,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

impl ValidatedRequest {
    /// Interest rate applied to the balance each month, as a decimal.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100. / 12.
    }

    /// Extra principal paid in `month`, combining the recurring and one-time amounts.
    pub fn extra_for_month(&self, month: u32) -> f64 {
        let mut extra = 0.;
        if self.monthly_extra_payment > 0. {
            extra += self.monthly_extra_payment;
        }
        if self.one_time_extra_payment > 0. && month == self.one_time_extra_payment_month {
            extra += self.one_time_extra_payment;
        }
        extra
    }

    pub fn has_extra_payments(&self) -> bool {
        self.monthly_extra_payment > 0. || self.one_time_extra_payment > 0.
    }

    /// The same loan with every extra payment removed.
    pub fn without_extras(&self) -> Self {
        Self {
            monthly_extra_payment: 0.,
            one_time_extra_payment: 0.,
            ..*self
        }
    }

    /// Calendar date of payment `month`, clamped to maturity.
    pub fn date_of_payment(&self, month: u32) -> NaiveDate {
        add_months(self.start_date, month)
            .unwrap_or(self.maturity_date)
            .min(self.maturity_date)
    }
}

pub fn validate(request: &LoanRequest) -> Result<ValidatedRequest> {
    check_terms(request)
        .and_then(|_| resolve_dates(request))
        .map_err(|err| {
            warn!("rejected loan request: {}", err);
            err
        })
}

/// Amount, rate and term checks only; the start and maturity dates are not resolved.
pub fn validate_terms(request: &LoanRequest) -> Result<()> {
    check_terms(request).map_err(|err| {
        warn!("rejected loan terms: {}", err);
        err
    })
}

fn check_terms(request: &LoanRequest) -> Result<()> {
    // `!(x > 0.)` rather than `x <= 0.` so NaN is rejected too
    if !(request.principal > 0. && request.principal.is_finite()) {
        return Err(ValidationError::InvalidPrincipal(request.principal));
    }
    if !(request.annual_rate_percent >= 0. && request.annual_rate_percent.is_finite()) {
        return Err(ValidationError::InvalidRate(request.annual_rate_percent));
    }
    if request.term_months == 0 {
        return Err(ValidationError::InvalidTerm {
            term_months: request.term_months,
            reason: "must be at least one month",
        });
    }
    // bounds every period's interest and the running total
    let max_interest =
        request.principal * (request.annual_rate_percent / 100. / 12.) * f64::from(request.term_months);
    if !max_interest.is_finite() {
        return Err(ValidationError::InvalidRate(request.annual_rate_percent));
    }
    if !is_non_negative_amount(request.monthly_extra_payment) {
        return Err(ValidationError::InvalidExtraPayment {
            field: "monthly_extra_payment",
            amount: request.monthly_extra_payment,
        });
    }
    if !is_non_negative_amount(request.one_time_extra_payment) {
        return Err(ValidationError::InvalidExtraPayment {
            field: "one_time_extra_payment",
            amount: request.one_time_extra_payment,
        });
    }
    if request.one_time_extra_payment_month < 1
        || request.one_time_extra_payment_month > request.term_months
    {
        return Err(ValidationError::InvalidExtraPaymentMonth {
            month: request.one_time_extra_payment_month,
            term_months: request.term_months,
        });
    }
    Ok(())
}

fn resolve_dates(request: &LoanRequest) -> Result<ValidatedRequest> {
    let start_date = request.start_date_or_today();
    let maturity_date =
        add_months(start_date, request.term_months).ok_or(ValidationError::InvalidTerm {
            term_months: request.term_months,
            reason: "maturity date is out of calendar range",
        })?;

    Ok(ValidatedRequest {
        principal: request.principal,
        annual_rate_percent: request.annual_rate_percent,
        term_months: request.term_months,
        monthly_extra_payment: request.monthly_extra_payment,
        one_time_extra_payment: request.one_time_extra_payment,
        one_time_extra_payment_month: request.one_time_extra_payment_month,
        start_date,
        maturity_date,
    })
}

fn is_non_negative_amount(amt: f64) -> bool {
    amt >= 0. && amt.is_finite()
}
