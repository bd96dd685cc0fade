//! Request-scoped composition of account discovery, performance fetch, and scoring,
//! plus the HTTP surface over it.

pub mod factory;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use factory::{DemoQueryFactory, GoogleAdsQueryFactory};
pub use router::{dashboard_router, ComputeRequest};
pub use service::{
    score_records, DashboardError, DashboardService, PerformanceSnapshot, ScorecardReport,
};
