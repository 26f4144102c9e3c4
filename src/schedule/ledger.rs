//! Ledger output structures for schedules

use crate::track::RepaymentMethod;
use serde::{Deserialize, Serialize};

/// A single row of schedule output for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// 1-indexed period
    pub period: u32,

    /// Indexed principal portion of the payment
    pub principal_payment: f64,

    /// Indexed interest portion of the payment
    pub interest_payment: f64,

    /// principal_payment + interest_payment
    pub total_payment: f64,

    /// Running sum of total_payment. Only the straight method fills this in.
    pub cumulative_payment: Option<f64>,

    /// Outstanding indexed principal after this period's payment
    pub balance: f64,
}

impl LedgerRow {
    pub fn new(period: u32, principal_payment: f64, interest_payment: f64, balance: f64) -> Self {
        Self {
            period,
            principal_payment,
            interest_payment,
            total_payment: principal_payment + interest_payment,
            cumulative_payment: None,
            balance,
        }
    }

    /// All-zero row used to pad short ledgers when aggregating
    pub fn zero(period: u32) -> Self {
        Self::new(period, 0.0, 0.0, 0.0)
    }
}

/// Fill `cumulative_payment` with the running total, period 1 first
pub fn accumulate_payments(rows: &mut [LedgerRow]) {
    let mut running = 0.0;
    for row in rows.iter_mut() {
        running += row.total_payment;
        row.cumulative_payment = Some(running);
    }
}

/// Complete schedule for one track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Track label, if any
    pub name: Option<String>,

    pub method: RepaymentMethod,

    /// Original (unindexed) principal
    pub principal: f64,

    /// Per-period rows
    pub ledger: Vec<LedgerRow>,

    /// Interest total on the non-indexed stream
    pub total_nominal_interest: f64,
}

impl Schedule {
    pub fn new(method: RepaymentMethod, principal: f64) -> Self {
        Self {
            name: None,
            method,
            principal,
            ledger: Vec::new(),
            total_nominal_interest: 0.0,
        }
    }

    pub fn add_row(&mut self, row: LedgerRow) {
        self.ledger.push(row);
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// First payment, as shown on the track card
    pub fn first_payment(&self) -> f64 {
        self.ledger.first().map(|r| r.total_payment).unwrap_or(0.0)
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_ledger(&self.ledger, self.principal, self.total_nominal_interest)
    }
}

/// Summary statistics for a ledger (single track or whole mortgage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub periods: u32,
    pub principal: f64,
    pub first_payment: f64,
    pub peak_payment: f64,
    pub total_payments: f64,
    pub total_principal_paid: f64,
    pub total_indexed_interest: f64,
    pub total_nominal_interest: f64,
    /// Indexation cost: total_payments - principal - total_nominal_interest
    pub total_indexation: f64,
    /// Amount repaid per unit borrowed
    pub repayment_per_unit: f64,
    pub final_balance: f64,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &[LedgerRow], principal: f64, total_nominal_interest: f64) -> Self {
        let total_payments: f64 = ledger.iter().map(|r| r.total_payment).sum();
        let total_principal_paid: f64 = ledger.iter().map(|r| r.principal_payment).sum();
        let total_indexed_interest: f64 = ledger.iter().map(|r| r.interest_payment).sum();
        let peak_payment = ledger
            .iter()
            .map(|r| r.total_payment)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            periods: ledger.len() as u32,
            principal,
            first_payment: ledger.first().map(|r| r.total_payment).unwrap_or(0.0),
            peak_payment: if ledger.is_empty() { 0.0 } else { peak_payment },
            total_payments,
            total_principal_paid,
            total_indexed_interest,
            total_nominal_interest,
            total_indexation: total_payments - principal - total_nominal_interest,
            repayment_per_unit: if principal != 0.0 { total_payments / principal } else { 0.0 },
            final_balance: ledger.last().map(|r| r.balance).unwrap_or(0.0),
        }
    }
}
