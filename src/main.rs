use amortize::{compute_summary, export, LoanRequest};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

/// Amortization schedule and payoff summary for a fixed-rate monthly loan
#[derive(Parser, Debug)]
#[command(name = "amortize", version, about)]
struct Cli {
    /// Amount borrowed
    #[arg(long, env = "AMORTIZE_PRINCIPAL")]
    principal: f64,

    /// Annual interest rate as a percentage (5 for 5%)
    #[arg(long, env = "AMORTIZE_RATE")]
    rate: f64,

    /// Loan term in months
    #[arg(long, env = "AMORTIZE_TERM_MONTHS", conflicts_with = "term_years")]
    term_months: Option<u32>,

    /// Loan term in years
    #[arg(long, env = "AMORTIZE_TERM_YEARS")]
    term_years: Option<u32>,

    /// Extra principal paid every month
    #[arg(long, default_value_t = 0.)]
    monthly_extra: f64,

    /// Extra principal paid once
    #[arg(long, default_value_t = 0.)]
    one_time_extra: f64,

    /// Month (1-based) of the one-time extra payment
    #[arg(long, default_value_t = 1)]
    one_time_month: u32,

    /// First day of the loan, YYYY-MM-DD; defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Print the schedule as CSV instead of the report
    #[arg(long)]
    csv: bool,

    #[arg(long, env = "AMORTIZE_LOG", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn term_months(&self) -> Result<u32> {
        match (self.term_months, self.term_years) {
            (Some(months), _) => Ok(months),
            (None, Some(years)) => years
                .checked_mul(12)
                .context("term in years is too large"),
            (None, None) => bail!("one of --term-months or --term-years is required"),
        }
    }

    fn loan_request(&self) -> Result<LoanRequest> {
        let mut request = LoanRequest::new(self.principal, self.rate, self.term_months()?)
            .with_monthly_extra(self.monthly_extra)
            .with_one_time_extra(self.one_time_extra, self.one_time_month);
        if let Some(start_date) = self.start_date {
            request = request.with_start_date(start_date);
        }
        Ok(request)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new().with_level(cli.log_level).init()?;

    let request = cli.loan_request()?;
    info!("computing schedule for {:?}", request);

    let summary = compute_summary(&request)?;

    if cli.csv {
        export::write_csv(&summary.schedule, std::io::stdout().lock())?;
    } else {
        println!("{}", summary);
        println!();
        summary.show_amortization();
    }
    Ok(())
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<amortize::PaymentEntry>();
    is_normal::<amortize::LoanSummary>();
    is_normal::<amortize::ValidationError>();
}

#[test]
fn cli_term_in_years() {
    let cli = Cli::parse_from([
        "amortize",
        "--principal",
        "10000",
        "--rate",
        "5",
        "--term-years",
        "2",
        "--start-date",
        "2024-01-01",
    ]);
    let request = cli.loan_request().unwrap();
    assert_eq!(request.term_months, 24);
    assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
}
