use serde::{Deserialize, Serialize};

pub(crate) const GATEKEEPER_PASS: i32 = 90;
pub(crate) const COVERAGE_PASS: i32 = 90;
pub(crate) const COVERAGE_WARNING: i32 = 70;
pub(crate) const QUALITY_PASS: i32 = 75;
pub(crate) const AI_ADOPTION_PASS: i32 = 60;
pub(crate) const DATA_MATURITY_PASS: i32 = 60;

/// Traffic-light verdict attached to every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiStatus {
    Pass,
    Warning,
    Fail,
}

impl KpiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            KpiStatus::Pass => "PASS",
            KpiStatus::Warning => "WARNING",
            KpiStatus::Fail => "FAIL",
        }
    }
}

/// Rounded 0-100 score with its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KpiResult {
    pub score: i32,
    pub status: KpiStatus,
}

impl KpiResult {
    /// Result for inputs that leave nothing to score.
    pub const EMPTY: KpiResult = KpiResult {
        score: 0,
        status: KpiStatus::Fail,
    };

    pub fn is_pass(&self) -> bool {
        self.status == KpiStatus::Pass
    }
}

pub(crate) fn pass_fail(score: i32, pass_at: i32) -> KpiResult {
    let status = if score >= pass_at {
        KpiStatus::Pass
    } else {
        KpiStatus::Fail
    };
    KpiResult { score, status }
}

pub(crate) fn tiered(score: i32, pass_at: i32, warn_at: i32) -> KpiResult {
    let status = if score >= pass_at {
        KpiStatus::Pass
    } else if score >= warn_at {
        KpiStatus::Warning
    } else {
        KpiStatus::Fail
    };
    KpiResult { score, status }
}
