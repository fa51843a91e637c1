//! Model run identification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// GFS issuance cycle. The model runs four times daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cycle {
    /// 00Z run
    Z00,
    /// 06Z run
    Z06,
    /// 12Z run
    Z12,
    /// 18Z run
    Z18,
}

impl Cycle {
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0 => Some(Cycle::Z00),
            6 => Some(Cycle::Z06),
            12 => Some(Cycle::Z12),
            18 => Some(Cycle::Z18),
            _ => None,
        }
    }

    /// Parse the two-digit run-hour strings the UI offers ("00".."18").
    pub fn parse(s: &str) -> Result<Self, ViewerError> {
        match s {
            "00" | "0" => Ok(Cycle::Z00),
            "06" | "6" => Ok(Cycle::Z06),
            "12" => Ok(Cycle::Z12),
            "18" => Ok(Cycle::Z18),
            other => Err(ViewerError::InvalidParameter {
                param: "hour".to_string(),
                message: format!("'{}' is not a GFS run hour (00, 06, 12 or 18)", other),
            }),
        }
    }

    pub fn hour(&self) -> u32 {
        match self {
            Cycle::Z00 => 0,
            Cycle::Z06 => 6,
            Cycle::Z12 => 12,
            Cycle::Z18 => 18,
        }
    }

    pub fn all() -> &'static [Cycle] {
        &[Cycle::Z00, Cycle::Z06, Cycle::Z12, Cycle::Z18]
    }
}

/// Identifies a single model execution: issuance date plus cycle.
///
/// Immutable once built; keys the per-process grid cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId {
    pub date: NaiveDate,
    pub cycle: Cycle,
}

impl RunId {
    pub fn new(date: NaiveDate, cycle: Cycle) -> Self {
        Self { date, cycle }
    }

    /// Date formatted for the remote dataset path (YYYYMMDD).
    pub fn date_compact(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// Two-digit zero-padded run hour.
    pub fn hour_padded(&self) -> String {
        format!("{:02}", self.cycle.hour())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}z", self.date.format("%Y-%m-%d"), self.hour_padded())
    }
}
