/// Fixed monthly payment that fully amortizes `principal` over `term_months`.
///
/// `annual_rate_percent` is a percentage (5.0 for 5%). The annuity formula is taken
/// in its discount form, `P·r / (1 − (1+r)^−n)`, with `ln_1p`/`exp_m1` so it stays
/// finite when `(1+r)^n` overflows or `1+r` rounds to 1. When the interest over the
/// whole term is below `f64` precision (including a zero rate, where the formula is
/// 0/0) the principal is split evenly. The result is not rounded; callers round at
/// their output boundary.
pub fn fixed_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100. / 12.;
    let n = f64::from(term_months);

    if monthly_rate * n < f64::EPSILON {
        return principal / n;
    }

    let discount = -(-n * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / discount
}
