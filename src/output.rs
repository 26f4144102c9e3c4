//! Ledger output: CSV, console tables and JSON
//!
//! The ledger itself only carries semantic field names. Localised column
//! labels live here, at the presentation boundary.

use crate::error::Result;
use crate::schedule::{LedgerRow, LedgerSummary};
use serde::Serialize;
use std::io::Write;

/// Column label set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// Field names (`period`, `principal_payment`, ...)
    #[default]
    Semantic,
    /// Hebrew labels used by the mortgage dashboard
    Hebrew,
}

impl HeaderStyle {
    pub fn labels(&self) -> [&'static str; 6] {
        match self {
            HeaderStyle::Semantic => [
                "period",
                "principal_payment",
                "interest_payment",
                "total_payment",
                "cumulative_payment",
                "balance",
            ],
            HeaderStyle::Hebrew => [
                "חודש",
                "תשלום קרן",
                "תשלום ריבית",
                "החזר חודשי",
                "החזר מצטבר",
                "יתרה",
            ],
        }
    }
}

/// Write ledger rows as CSV. A missing cumulative payment is written as an empty field.
pub fn write_ledger_csv<W: Write>(
    writer: W,
    rows: &[LedgerRow],
    headers: HeaderStyle,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers.labels())?;

    for row in rows {
        csv_writer.write_record([
            row.period.to_string(),
            format!("{:.8}", row.principal_payment),
            format!("{:.8}", row.interest_payment),
            format!("{:.8}", row.total_payment),
            row.cumulative_payment
                .map(|c| format!("{:.8}", c))
                .unwrap_or_default(),
            format!("{:.8}", row.balance),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Print ledger rows as a fixed-width table
pub fn write_ledger_table<W: Write>(
    mut out: W,
    rows: &[LedgerRow],
    headers: HeaderStyle,
) -> Result<()> {
    let [period, principal, interest, total, cumulative, balance] = headers.labels();
    writeln!(
        out,
        "{:>6} {:>18} {:>18} {:>18} {:>18} {:>18}",
        period, principal, interest, total, cumulative, balance
    )?;
    writeln!(out, "{}", "-".repeat(101))?;

    for row in rows {
        let cumulative = row
            .cumulative_payment
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>6} {:>18.2} {:>18.2} {:>18.2} {:>18} {:>18.2}",
            row.period,
            row.principal_payment,
            row.interest_payment,
            row.total_payment,
            cumulative,
            row.balance,
        )?;
    }
    Ok(())
}

/// Print the headline figures of a summary
pub fn write_summary<W: Write>(mut out: W, summary: &LedgerSummary) -> Result<()> {
    writeln!(out, "Summary:")?;
    writeln!(out, "  Total Loan:            {:.2}", summary.principal)?;
    writeln!(out, "  Periods:               {}", summary.periods)?;
    writeln!(out, "  First Payment:         {:.2}", summary.first_payment)?;
    writeln!(out, "  Peak Payment:          {:.2}", summary.peak_payment)?;
    writeln!(out, "  Repayment per Unit:    {:.2}", summary.repayment_per_unit)?;
    writeln!(out, "  Total Payments:        {:.2}", summary.total_payments)?;
    writeln!(out, "  Total Interest (nom.): {:.2}", summary.total_nominal_interest)?;
    writeln!(out, "  Total Indexation:      {:.2}", summary.total_indexation)?;
    Ok(())
}

/// Pretty-printed JSON of any report
pub fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
