//! Track parameters: one independently priced component of a mortgage

use crate::error::{Result, ScheduleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annual index rate (percent) used when a track does not specify one.
/// Bank CPI proxy.
pub const DEFAULT_ANNUAL_INDEX_RATE: f64 = 1.48953;

/// Longest schedule accepted: 100 years of monthly periods
pub const MAX_PERIOD_COUNT: u32 = 1200;

/// Repayment method of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentMethod {
    /// Constant nominal payment (annuity / "Spitzer")
    Straight,
    /// Equal principal every period, declining interest
    Declining,
    /// Interest only, full principal at maturity
    Bullet,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::Straight,
        RepaymentMethod::Declining,
        RepaymentMethod::Bullet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::Straight => "straight",
            RepaymentMethod::Declining => "declining",
            RepaymentMethod::Bullet => "bullet",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RepaymentMethod {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(RepaymentMethod::Straight),
            "declining" => Ok(RepaymentMethod::Declining),
            "bullet" => Ok(RepaymentMethod::Bullet),
            other => Err(ScheduleError::UnknownMethod(other.to_string())),
        }
    }
}

/// Parameters of a single track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackParams {
    /// Display label
    #[serde(default)]
    pub name: Option<String>,

    pub method: RepaymentMethod,

    /// Loan amount at period 0
    pub principal: f64,

    /// Percent per year (3.0 = 3%)
    pub annual_interest_rate: f64,

    /// Number of monthly periods
    pub period_count: u32,

    /// Indexation rate, percent per year
    #[serde(default = "default_annual_index_rate")]
    pub annual_index_rate: f64,

    /// Index observations. Only the number of entries drives compounding,
    /// see [`TrackParams::inflation`].
    #[serde(default)]
    pub index_series: Vec<f64>,
}

fn default_annual_index_rate() -> f64 {
    DEFAULT_ANNUAL_INDEX_RATE
}

impl TrackParams {
    /// Create an unindexed track
    pub fn new(
        method: RepaymentMethod,
        principal: f64,
        annual_interest_rate: f64,
        period_count: u32,
    ) -> Self {
        Self {
            name: None,
            method,
            principal,
            annual_interest_rate,
            period_count,
            annual_index_rate: 0.0,
            index_series: Vec::new(),
        }
    }

    /// Attach an indexation rate and series
    pub fn with_indexation(mut self, annual_index_rate: f64, index_series: Vec<f64>) -> Self {
        self.annual_index_rate = annual_index_rate;
        self.index_series = index_series;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Effective annual indexation in percent.
    ///
    /// This is `annual_index_rate * index_series.len()`; the series values are
    /// never read. An empty series therefore switches indexation off and a
    /// single-entry series applies the rate once.
    pub fn inflation(&self) -> f64 {
        self.annual_index_rate * self.index_series.len() as f64
    }

    /// Monthly indexation multiplier
    pub fn monthly_index_factor(&self) -> f64 {
        1.0 + self.inflation() / 1200.0
    }

    /// Monthly interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 1200.0
    }

    /// Reject inputs no schedule can be built from
    pub fn validate(&self) -> Result<()> {
        if self.period_count == 0 || self.period_count > MAX_PERIOD_COUNT {
            return Err(ScheduleError::InvalidPeriod {
                period_count: i64::from(self.period_count),
            });
        }
        let amounts = [
            ("principal", self.principal),
            ("annual_interest_rate", self.annual_interest_rate),
            ("annual_index_rate", self.annual_index_rate),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ScheduleError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}

/// Convert a raw signed period count into a usable one
pub fn period_count_from(raw: i64) -> Result<u32> {
    match u32::try_from(raw) {
        Ok(count) if (1..=MAX_PERIOD_COUNT).contains(&count) => Ok(count),
        _ => Err(ScheduleError::InvalidPeriod { period_count: raw }),
    }
}
