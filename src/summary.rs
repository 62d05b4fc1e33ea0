use log::debug;

use crate::loan::{round_currency, LoanSummary, PaymentEntry};
use crate::schedule::generate;
use crate::validator::ValidatedRequest;

/// Derive totals, payoff timing and prepayment savings from a generated schedule.
///
/// The no-extra baseline is produced by running the same generator with the same
/// `fixed_payment`, so a request without extras saves exactly zero.
pub fn summarize(
    schedule: Vec<PaymentEntry>,
    request: &ValidatedRequest,
    fixed_payment: f64,
) -> LoanSummary {
    let total_interest = interest_paid(&schedule);

    let baseline_interest = if request.has_extra_payments() {
        interest_paid(&generate(&request.without_extras(), fixed_payment))
    } else {
        total_interest
    };

    let months_to_payoff = schedule.len() as u32;

    let summary = LoanSummary {
        principal: round_currency(request.principal),
        monthly_payment: round_currency(fixed_payment),
        total_interest,
        total_payment: round_currency(request.principal + total_interest),
        baseline_interest,
        interest_saved: round_currency(baseline_interest - total_interest),
        months_to_payoff,
        months_saved: request.term_months - months_to_payoff,
        start_date: request.start_date,
        payoff_date: request.date_of_payment(months_to_payoff),
        schedule,
    };
    debug!(
        "summary: payment {}, interest {}, payoff in {} months on {}, saved {}",
        summary.monthly_payment,
        summary.total_interest,
        summary.months_to_payoff,
        summary.payoff_date,
        summary.interest_saved
    );
    summary
}

// cumulative interest is summed at full precision before rounding, unlike a sum of
// the already-rounded per-period portions
fn interest_paid(schedule: &[PaymentEntry]) -> f64 {
    schedule
        .last()
        .map(|pmt| pmt.cumulative_interest)
        .unwrap_or(0.)
}
