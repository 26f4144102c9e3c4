//! Indexation factors shared by all repayment methods

use crate::track::TrackParams;

/// Monthly rates derived from a track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indexation {
    /// Monthly interest rate as a decimal
    pub monthly_rate: f64,
    /// 1 + inflation / 1200
    pub monthly_index_factor: f64,
}

impl Indexation {
    pub fn from_track(track: &TrackParams) -> Self {
        Self {
            monthly_rate: track.monthly_rate(),
            monthly_index_factor: track.monthly_index_factor(),
        }
    }

    /// Compounded multiplier for period `n` (1-indexed)
    pub fn factor(&self, n: u32) -> f64 {
        self.monthly_index_factor.powf(f64::from(n))
    }

    /// Multipliers for periods 1..=period_count
    pub fn factors(&self, period_count: u32) -> Vec<f64> {
        (1..=period_count).map(|n| self.factor(n)).collect()
    }

    /// Roll the indexed balance forward against a stream of indexed principal payments.
    ///
    /// Starts at `principal * f`, and for every payment subtracts it and then
    /// indexes again: `b[n] = (b[n-1] - p[n]) * f`. The balance therefore runs
    /// one period of indexation ahead of the payment stream.
    pub fn roll_balance(&self, principal: f64, indexed_principal: &[f64]) -> Vec<f64> {
        let f = self.monthly_index_factor;
        let mut balance = principal * f;
        indexed_principal
            .iter()
            .map(|&payment| {
                balance = (balance - payment) * f;
                balance
            })
            .collect()
    }
}
