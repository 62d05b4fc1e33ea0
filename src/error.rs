use thiserror::Error;

/// Reasons a `LoanRequest` is rejected before any computation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("principal: must be a positive amount, got {0}")]
    InvalidPrincipal(f64),

    #[error("annual_rate_percent: must not be negative or accrue unrepresentable interest, got {0}")]
    InvalidRate(f64),

    #[error("term_months: {reason}, got {term_months}")]
    InvalidTerm { term_months: u32, reason: &'static str },

    #[error("{field}: extra payment must not be negative, got {amount}")]
    InvalidExtraPayment { field: &'static str, amount: f64 },

    #[error("one_time_extra_payment_month: must be within 1..={term_months}, got {month}")]
    InvalidExtraPaymentMonth { month: u32, term_months: u32 },
}

impl ValidationError {
    /// Name of the offending `LoanRequest` field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidPrincipal(_) => "principal",
            ValidationError::InvalidRate(_) => "annual_rate_percent",
            ValidationError::InvalidTerm { .. } => "term_months",
            ValidationError::InvalidExtraPayment { field, .. } => *field,
            ValidationError::InvalidExtraPaymentMonth { .. } => "one_time_extra_payment_month",
        }
    }
}

/// Failure while writing a schedule out as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
