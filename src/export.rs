//! CSV rendering of an amortization schedule.

use std::io::Write;

use crate::error::ExportError;
use crate::loan::PaymentEntry;

const HEADERS: [&str; 7] = [
    "Payment #",
    "Payment Amount",
    "Principal",
    "Interest",
    "Extra Payment",
    "Total Payment",
    "Remaining Balance",
];

/// Write `schedule` as CSV, one row per payment, amounts with two decimals.
pub fn write_csv<W: Write>(schedule: &[PaymentEntry], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for pmt in schedule {
        wtr.write_record([
            pmt.payment_number.to_string(),
            format!("{:.2}", pmt.scheduled_payment),
            format!("{:.2}", pmt.principal_portion),
            format!("{:.2}", pmt.interest_portion),
            format!("{:.2}", pmt.extra_payment),
            format!("{:.2}", pmt.total_paid_this_period),
            format!("{:.2}", pmt.remaining_balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(schedule: &[PaymentEntry]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(schedule, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
