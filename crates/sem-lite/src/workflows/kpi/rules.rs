use super::policy::{
    pass_fail, tiered, KpiResult, AI_ADOPTION_PASS, COVERAGE_PASS, COVERAGE_WARNING,
    GATEKEEPER_PASS, QUALITY_PASS,
};
use crate::ads::{AdGroup, AdGroupType, AdStrength, BiddingStrategyType, Campaign};

const NAMING_TAGS: [&str; 3] = ["_brand", "_generic", "_competitor"];
const BRAND_TAG: &str = "_brand";

/// Naming-rule compliance across enabled search campaigns.
pub fn gatekeeper_score(campaigns: &[Campaign]) -> KpiResult {
    let search: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| campaign.is_active_search())
        .collect();

    if search.is_empty() {
        return KpiResult::EMPTY;
    }

    let compliant = search
        .iter()
        .filter(|campaign| {
            let name = campaign.name.to_lowercase();
            NAMING_TAGS.iter().any(|tag| name.contains(tag))
        })
        .count();

    let score = round_score(100.0 * compliant as f64 / search.len() as f64);
    pass_fail(score, GATEKEEPER_PASS)
}

/// Impression-weighted search impression share kept on brand campaigns.
pub fn coverage_score(campaigns: &[Campaign]) -> KpiResult {
    let brand: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| campaign.is_active_search() && campaign.name_contains(BRAND_TAG))
        .collect();

    if brand.is_empty() {
        return KpiResult::EMPTY;
    }

    let share = weighted_average(brand.iter().map(|campaign| {
        (
            1.0 - campaign.metrics.search_lost_is_rank,
            campaign.metrics.impressions,
        )
    }));

    tiered(round_score(100.0 * share), COVERAGE_PASS, COVERAGE_WARNING)
}

/// Impression-weighted ad strength across standard search ad groups.
pub fn quality_score(ad_groups: &[AdGroup]) -> KpiResult {
    let responsive: Vec<&AdGroup> = ad_groups
        .iter()
        .filter(|group| group.ad_group_type == AdGroupType::SearchStandard)
        .collect();

    if responsive.is_empty() {
        return KpiResult::EMPTY;
    }

    let points = weighted_average(
        responsive
            .iter()
            .map(|group| (strength_points(group.ad_strength), group.metrics.impressions)),
    );

    pass_fail(round_score(points), QUALITY_PASS)
}

/// Spend-weighted bidding sophistication across enabled search campaigns.
pub fn ai_adoption_score(campaigns: &[Campaign]) -> KpiResult {
    let search: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| campaign.is_active_search())
        .collect();

    if search.is_empty() {
        return KpiResult::EMPTY;
    }

    let points = weighted_average(search.iter().map(|campaign| {
        (
            bidding_points(campaign.bidding_strategy_type),
            campaign.metrics.cost_micros,
        )
    }));

    pass_fail(round_score(points), AI_ADOPTION_PASS)
}

pub(crate) fn strength_points(strength: AdStrength) -> f64 {
    match strength {
        AdStrength::Excellent => 100.0,
        AdStrength::Good => 75.0,
        AdStrength::Average => 50.0,
        AdStrength::Poor | AdStrength::Unknown => 0.0,
    }
}

pub(crate) fn bidding_points(strategy: BiddingStrategyType) -> f64 {
    match strategy {
        BiddingStrategyType::TargetRoas | BiddingStrategyType::MaximizeConversionValue => 100.0,
        BiddingStrategyType::MaximizeConversions
        | BiddingStrategyType::TargetCpa
        | BiddingStrategyType::TargetImpressionShare => 40.0,
        _ => 0.0,
    }
}

/// `Σ(value × weight) / Σ(weight)`, or 0 when the total weight is 0.
pub(crate) fn weighted_average<I>(samples: I) -> f64
where
    I: IntoIterator<Item = (f64, u64)>,
{
    let (weighted, total) = samples
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(weighted, total), (value, weight)| {
            let weight = weight as f64;
            (weighted + value * weight, total + weight)
        });

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

pub(crate) fn round_score(raw: f64) -> i32 {
    raw.round() as i32
}
