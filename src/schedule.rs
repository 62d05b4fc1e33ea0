use log::trace;

use crate::loan::{round_currency, PaymentEntry};
use crate::validator::ValidatedRequest;

/// Balances this close to zero are floating-point residue, not money owed.
const BALANCE_EPSILON: f64 = 1e-9;

/// One period before rounding, carried at full precision.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Period {
    pub month: u32,
    pub interest: f64,
    pub principal: f64,
    pub extra: f64,
    pub total_paid: f64,
    pub end_balance: f64,
}

/// Build the month-by-month schedule for a validated request.
///
/// Interest accrues on the balance carried into the month, before that month's
/// principal and extra payments are applied. The schedule stops at the first
/// month whose ending balance is zero, and never runs past the term.
pub fn generate(request: &ValidatedRequest, fixed_payment: f64) -> Vec<PaymentEntry> {
    let mut cumulative_interest = 0.;

    amortize(request, fixed_payment)
        .into_iter()
        .map(|period| {
            cumulative_interest += period.interest;
            PaymentEntry {
                payment_number: period.month,
                payment_date: request.date_of_payment(period.month),
                scheduled_payment: round_currency(fixed_payment),
                interest_portion: round_currency(period.interest),
                principal_portion: round_currency(period.principal),
                extra_payment: round_currency(period.extra),
                total_paid_this_period: round_currency(period.total_paid),
                remaining_balance: round_currency(period.end_balance),
                cumulative_interest: round_currency(cumulative_interest),
            }
        })
        .collect()
}

/// Full-precision amortization loop shared by the schedule and the summary.
pub(crate) fn amortize(request: &ValidatedRequest, fixed_payment: f64) -> Vec<Period> {
    let monthly_rate = request.monthly_rate();
    let mut periods = Vec::new();
    let mut balance = request.principal;
    let mut month = 0;

    while balance > 0. && month < request.term_months {
        month += 1;

        let interest = balance * monthly_rate;
        // a payment that only covers interest amortizes nothing, it never adds to the balance
        let scheduled_principal = (fixed_payment - interest).max(0.);
        let extra = request.extra_for_month(month);
        let mut principal = scheduled_principal + extra;

        // final-period adjustment, also clears any residue left on the last month of the term
        if principal > balance || month == request.term_months {
            principal = balance;
        }

        balance -= principal;
        if balance < BALANCE_EPSILON {
            balance = 0.;
        }

        // the scheduled share of principal is applied first, extras take what remains
        let applied_extra = (principal - scheduled_principal).clamp(0., extra);

        trace!(
            "pmt # {}, interest {}, principal {}, extra {}, end bal {}",
            month,
            interest,
            principal,
            applied_extra,
            balance
        );

        periods.push(Period {
            month,
            interest,
            principal,
            extra: applied_extra,
            total_paid: interest + principal,
            end_balance: balance,
        });
    }
    periods
}

#[cfg(test)]
mod tests {
    use super::{amortize, generate};
    use crate::loan::LoanRequest;
    use crate::payment::fixed_payment;
    use crate::validator::{validate, ValidatedRequest};
    use chrono::NaiveDate;
    use test_log::test;

    fn validated(request: LoanRequest) -> ValidatedRequest {
        validate(&request.with_start_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())).unwrap()
    }

    fn payment_for(request: &ValidatedRequest) -> f64 {
        fixed_payment(
            request.principal,
            request.annual_rate_percent,
            request.term_months,
        )
    }

    #[test]
    fn test_basic_schedule() {
        let request = validated(LoanRequest::new(10000., 5., 12));
        let schedule = generate(&request, payment_for(&request));

        assert_eq!(schedule.len(), 12);

        let first = &schedule[0];
        assert_eq!(first.payment_number, 1);
        assert_eq!(first.scheduled_payment, 856.07);
        assert_eq!(first.interest_portion, 41.67);
        assert_eq!(first.principal_portion, 814.41);
        assert_eq!(first.extra_payment, 0.);
        assert_eq!(first.total_paid_this_period, 856.07);
        assert_eq!(first.remaining_balance, 9185.59);
        assert_eq!(first.cumulative_interest, 41.67);

        let last = schedule.last().unwrap();
        assert_eq!(last.payment_number, 12);
        assert_eq!(last.remaining_balance, 0.);
        // full-precision interest; rounding the payment to 856.07 first would give 272.84
        assert_eq!(last.cumulative_interest, 272.9);
    }

    #[test]
    fn test_payment_dates_follow_calendar_months() {
        let request = validated(LoanRequest::new(10000., 5., 12));
        let schedule = generate(&request, payment_for(&request));

        assert_eq!(
            schedule[0].payment_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            schedule[1].payment_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert_eq!(
            schedule[11].payment_date,
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_balance_never_increases() {
        let request = validated(
            LoanRequest::new(200000., 6.5, 360)
                .with_monthly_extra(200.)
                .with_one_time_extra(15000., 24),
        );
        let periods = amortize(&request, payment_for(&request));

        let mut previous = request.principal;
        for period in &periods {
            assert!(period.end_balance <= previous);
            assert!(period.end_balance >= 0.);
            previous = period.end_balance;
        }
        assert_eq!(periods.last().unwrap().end_balance, 0.);
        assert!(periods.len() < 360);
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let request = validated(LoanRequest::new(10000., 0., 12));
        let periods = amortize(&request, payment_for(&request));

        assert_eq!(periods.len(), 12);
        assert!(periods.iter().all(|p| p.interest == 0.));
        assert_eq!(periods.last().unwrap().end_balance, 0.);
    }

    #[test]
    fn test_monthly_extra_shortens_schedule() {
        let request = validated(LoanRequest::new(10000., 5., 12).with_monthly_extra(100.));
        let schedule = generate(&request, payment_for(&request));

        assert_eq!(schedule.len(), 11);
        assert_eq!(schedule[0].extra_payment, 100.);
        assert_eq!(schedule[0].principal_portion, 914.41);
        assert_eq!(schedule[0].total_paid_this_period, 956.07);
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.);
    }

    #[test]
    fn test_one_time_extra_applies_once() {
        let request = validated(LoanRequest::new(10000., 5., 12).with_one_time_extra(2000., 3));
        let schedule = generate(&request, payment_for(&request));

        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule[1].extra_payment, 0.);
        assert_eq!(schedule[2].extra_payment, 2000.);
        assert_eq!(schedule[3].extra_payment, 0.);
    }

    #[test]
    fn test_extra_larger_than_balance_is_capped() {
        let request = validated(LoanRequest::new(10000., 5., 12).with_one_time_extra(20000., 1));
        let schedule = generate(&request, payment_for(&request));

        assert_eq!(schedule.len(), 1);
        let only = &schedule[0];
        assert_eq!(only.remaining_balance, 0.);
        assert_eq!(only.principal_portion, 10000.);
        assert_eq!(only.interest_portion, 41.67);
        assert_eq!(only.extra_payment, 9185.59);
        assert_eq!(only.total_paid_this_period, 10041.67);
    }

    #[test]
    fn test_interest_only_payment_holds_balance_until_term_end() {
        let request = validated(LoanRequest::new(10000., 1000., 1200));
        let periods = amortize(&request, payment_for(&request));

        assert_eq!(periods.len(), 1200);
        assert!(periods.iter().all(|p| p.principal >= 0. && p.end_balance.is_finite()));
        assert!(periods[1198].end_balance > 9999.);
        assert_eq!(periods.last().unwrap().end_balance, 0.);
    }

    #[test]
    fn test_final_payment_is_capped_to_balance() {
        let request = validated(LoanRequest::new(10000., 5., 12).with_monthly_extra(100.));
        let periods = amortize(&request, payment_for(&request));

        let last = periods.last().unwrap();
        assert!(last.total_paid <= payment_for(&request) + 100.);
        assert!((last.total_paid - (last.interest + last.principal)).abs() < 1e-9);
    }
}
