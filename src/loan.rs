use chrono::{Local, Months, NaiveDate};
use std::fmt;

/// Currency precision applied when a value object is emitted.
pub const CURRENCY_DEC_PLACES: i32 = 2;

/// Parameters of a fixed-rate, monthly-paying loan.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    pub monthly_extra_payment: f64,
    pub one_time_extra_payment: f64,
    pub one_time_extra_payment_month: u32,
    pub start_date: Option<NaiveDate>,
}

impl LoanRequest {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            monthly_extra_payment: 0.,
            one_time_extra_payment: 0.,
            one_time_extra_payment_month: 1,
            start_date: None,
        }
    }

    pub fn with_monthly_extra(mut self, amount: f64) -> Self {
        self.monthly_extra_payment = amount;
        self
    }

    pub fn with_one_time_extra(mut self, amount: f64, month: u32) -> Self {
        self.one_time_extra_payment = amount;
        self.one_time_extra_payment_month = month;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// The configured start date, or today's local date when none was given.
    pub fn start_date_or_today(&self) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// One period of an amortization schedule. Monetary fields are rounded to cents.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentEntry {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub scheduled_payment: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub extra_payment: f64,
    pub total_paid_this_period: f64,
    pub remaining_balance: f64,
    pub cumulative_interest: f64,
}

impl fmt::Display for PaymentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, date {}, payment ${:.2}, principal ${:.2}, interest ${:.2}, extra ${:.2}, total ${:.2}, ending balance ${:.2}",
            self.payment_number,
            self.payment_date,
            self.scheduled_payment,
            self.principal_portion,
            self.interest_portion,
            self.extra_payment,
            self.total_paid_this_period,
            self.remaining_balance
        )
    }
}

/// Aggregate view of a computed loan, owning the schedule it was derived from.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanSummary {
    pub principal: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub baseline_interest: f64,
    pub interest_saved: f64,
    pub months_to_payoff: u32,
    pub months_saved: u32,
    pub start_date: NaiveDate,
    pub payoff_date: NaiveDate,
    pub schedule: Vec<PaymentEntry>,
}

impl LoanSummary {
    pub fn show_amortization(&self) {
        for pmt in &self.schedule {
            println!("{}", pmt);
        }
    }
}

impl fmt::Display for LoanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "principal          ${:.2}", self.principal)?;
        writeln!(f, "monthly payment    ${:.2}", self.monthly_payment)?;
        writeln!(f, "total interest     ${:.2}", self.total_interest)?;
        writeln!(f, "total payment      ${:.2}", self.total_payment)?;
        writeln!(
            f,
            "months to payoff   {} ({} saved)",
            self.months_to_payoff, self.months_saved
        )?;
        writeln!(f, "interest saved     ${:.2}", self.interest_saved)?;
        write!(
            f,
            "start {}, payoff {}",
            self.start_date, self.payoff_date
        )
    }
}

pub(crate) fn round(amt: f64, dec: i32) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powi(dec)).round() / 10_f64.powi(dec)
    }
}

pub(crate) fn round_currency(amt: f64) -> f64 {
    round(amt, CURRENCY_DEC_PLACES)
}

/// Calendar-month arithmetic; end-of-month dates clamp (Jan 31 + 1 = Feb 28/29).
pub(crate) fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
