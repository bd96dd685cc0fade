use super::actions::{
    ai_action, ai_priorities, coverage_action, coverage_priorities, quality_action,
    quality_priorities, PriorityAction,
};
use super::maturity::{data_maturity_score, DataAssessment};
use super::policy::KpiResult;
use super::rules::{ai_adoption_score, coverage_score, gatekeeper_score, quality_score};
use crate::ads::{AdGroup, Campaign};
use serde::Serialize;

/// The five maturity KPIs for one account's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaturityScorecard {
    pub gatekeeper: KpiResult,
    pub coverage: KpiResult,
    pub quality: KpiResult,
    pub ai_adoption: KpiResult,
    pub data: KpiResult,
}

impl MaturityScorecard {
    pub fn compute(
        campaigns: &[Campaign],
        ad_groups: &[AdGroup],
        assessment: Option<&DataAssessment>,
    ) -> Self {
        Self {
            gatekeeper: gatekeeper_score(campaigns),
            coverage: coverage_score(campaigns),
            quality: quality_score(ad_groups),
            ai_adoption: ai_adoption_score(campaigns),
            data: assessment
                .map(data_maturity_score)
                .unwrap_or(KpiResult::EMPTY),
        }
    }

    /// Coverage is only meaningful once campaign naming can be trusted.
    pub fn coverage_visible(&self) -> bool {
        self.gatekeeper.is_pass()
    }

    pub fn view(&self) -> ScorecardView {
        ScorecardView {
            gatekeeper: self.gatekeeper,
            coverage: self.coverage_visible().then_some(self.coverage),
            quality: self.quality,
            ai_adoption: self.ai_adoption,
            data: self.data,
        }
    }

    pub fn worklist(&self, campaigns: &[Campaign], ad_groups: &[AdGroup]) -> PriorityWorklist {
        let coverage = if self.coverage_visible() {
            coverage_priorities(campaigns)
                .into_iter()
                .map(coverage_action)
                .collect()
        } else {
            Vec::new()
        };

        PriorityWorklist {
            coverage,
            quality: quality_priorities(ad_groups)
                .into_iter()
                .map(quality_action)
                .collect(),
            ai_adoption: ai_priorities(campaigns).into_iter().map(ai_action).collect(),
        }
    }
}

/// Serialized scorecard; `coverage` is `null` while the gatekeeper fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardView {
    pub gatekeeper: KpiResult,
    pub coverage: Option<KpiResult>,
    pub quality: KpiResult,
    pub ai_adoption: KpiResult,
    pub data: KpiResult,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityWorklist {
    pub coverage: Vec<PriorityAction>,
    pub quality: Vec<PriorityAction>,
    pub ai_adoption: Vec<PriorityAction>,
}

impl PriorityWorklist {
    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty() && self.quality.is_empty() && self.ai_adoption.is_empty()
    }
}
