//! KPI scoring engine.
//!
//! Every function here is pure and total: empty or zero-weight input scores
//! `{0, FAIL}` instead of erroring, and unmapped enum values contribute 0 points.

mod actions;
mod maturity;
mod policy;
mod rules;
mod scorecard;

#[cfg(test)]
mod tests;

pub use actions::{
    ai_priorities, coverage_priorities, quality_priorities, ActionArea, PriorityAction, Severity,
    COVERAGE_LOSS_THRESHOLD,
};
pub use maturity::{
    data_maturity_score, DataAssessment, FirstPartyDataLevel, Ga4Level, LevelError,
};
pub use policy::{KpiResult, KpiStatus};
pub use rules::{ai_adoption_score, coverage_score, gatekeeper_score, quality_score};
pub use scorecard::{MaturityScorecard, PriorityWorklist, ScorecardView};
