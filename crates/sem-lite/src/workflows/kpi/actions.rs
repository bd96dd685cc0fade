use crate::ads::{AdGroup, AdStrength, BiddingStrategyType, Campaign, EntityStatus};
use serde::Serialize;
use std::cmp::Ordering;

/// Lost rank share above which a campaign is worth a coverage fix.
pub const COVERAGE_LOSS_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
}

/// Which KPI an action improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionArea {
    Coverage,
    Quality,
    AiAdoption,
}

/// One row of an optimization worklist, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAction {
    pub area: ActionArea,
    pub entity_id: String,
    pub entity_name: String,
    pub metric_label: &'static str,
    pub metric_value: String,
    pub action: &'static str,
    pub severity: Severity,
}

/// Enabled search campaigns losing meaningful share to Ad Rank, worst first.
pub fn coverage_priorities(campaigns: &[Campaign]) -> Vec<&Campaign> {
    let mut flagged: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| {
            campaign.is_active_search()
                && campaign.metrics.search_lost_is_rank > COVERAGE_LOSS_THRESHOLD
        })
        .collect();
    flagged.sort_by(|a, b| {
        b.metrics
            .search_lost_is_rank
            .partial_cmp(&a.metrics.search_lost_is_rank)
            .unwrap_or(Ordering::Equal)
    });
    flagged
}

/// Enabled ad groups whose creative is below GOOD, busiest first.
pub fn quality_priorities(ad_groups: &[AdGroup]) -> Vec<&AdGroup> {
    let mut flagged: Vec<&AdGroup> = ad_groups
        .iter()
        .filter(|group| {
            group.status == EntityStatus::Enabled
                && matches!(
                    group.ad_strength,
                    AdStrength::Poor | AdStrength::Average | AdStrength::Unknown
                )
        })
        .collect();
    flagged.sort_by(|a, b| b.metrics.impressions.cmp(&a.metrics.impressions));
    flagged
}

/// Enabled campaigns still on manual or reach-only bidding, biggest spend first.
pub fn ai_priorities(campaigns: &[Campaign]) -> Vec<&Campaign> {
    let mut flagged: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| {
            campaign.status == EntityStatus::Enabled
                && matches!(
                    campaign.bidding_strategy_type,
                    BiddingStrategyType::ManualCpc | BiddingStrategyType::TargetImpressionShare
                )
        })
        .collect();
    flagged.sort_by(|a, b| b.metrics.cost_micros.cmp(&a.metrics.cost_micros));
    flagged
}

pub(crate) fn coverage_action(campaign: &Campaign) -> PriorityAction {
    PriorityAction {
        area: ActionArea::Coverage,
        entity_id: campaign.id.clone(),
        entity_name: campaign.name.clone(),
        metric_label: "Lost IS (Rank)",
        metric_value: format!("{:.1}%", campaign.metrics.search_lost_is_rank * 100.0),
        action: "Increase Bid / Improve Quality",
        severity: Severity::High,
    }
}

pub(crate) fn quality_action(group: &AdGroup) -> PriorityAction {
    PriorityAction {
        area: ActionArea::Quality,
        entity_id: group.id.clone(),
        entity_name: group.name.clone(),
        metric_label: "Ad Strength",
        metric_value: group.ad_strength.label().to_string(),
        action: "Add Assets / Pin Less",
        severity: Severity::Medium,
    }
}

pub(crate) fn ai_action(campaign: &Campaign) -> PriorityAction {
    PriorityAction {
        area: ActionArea::AiAdoption,
        entity_id: campaign.id.clone(),
        entity_name: campaign.name.clone(),
        metric_label: "Cost",
        metric_value: format_currency(campaign.metrics.cost_micros),
        action: "Switch to Value Bidding",
        severity: Severity::High,
    }
}

/// Micros to a whole-unit amount with thousands separators.
pub(crate) fn format_currency(micros: u64) -> String {
    let units = (micros as f64 / 1_000_000.0).round() as u64;
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
