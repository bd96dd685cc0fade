use crate::ads::{
    AdGroup, AdGroupMetrics, AdGroupType, AdStrength, AdvertisingChannelType,
    BiddingStrategyType, Campaign, CampaignMetrics, EntityStatus,
};

pub(super) fn search_campaign(id: &str, name: &str) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        status: EntityStatus::Enabled,
        advertising_channel_type: AdvertisingChannelType::Search,
        bidding_strategy_type: BiddingStrategyType::ManualCpc,
        budget: 1_000_000,
        metrics: CampaignMetrics {
            impressions: 1_000,
            clicks: 10,
            cost_micros: 1_000_000,
            search_lost_is_rank: 0.0,
        },
    }
}

pub(super) fn brand_campaign(id: &str, impressions: u64, lost_is_rank: f64) -> Campaign {
    let mut campaign = search_campaign(id, &format!("KR_Search_Brand_{id}"));
    campaign.metrics.impressions = impressions;
    campaign.metrics.search_lost_is_rank = lost_is_rank;
    campaign
}

pub(super) fn bidding_campaign(id: &str, strategy: BiddingStrategyType, cost_micros: u64) -> Campaign {
    let mut campaign = search_campaign(id, &format!("KR_Generic_{id}"));
    campaign.bidding_strategy_type = strategy;
    campaign.metrics.cost_micros = cost_micros;
    campaign
}

pub(super) fn ad_group(id: &str, strength: AdStrength, impressions: u64) -> AdGroup {
    AdGroup {
        id: id.to_string(),
        name: format!("Ad group {id}"),
        campaign_id: "1".to_string(),
        status: EntityStatus::Enabled,
        ad_group_type: AdGroupType::SearchStandard,
        ad_strength: strength,
        metrics: AdGroupMetrics { impressions },
    }
}

/// `compliant` well-named campaigns followed by `non_compliant` badly named ones.
pub(super) fn named_campaigns(compliant: usize, non_compliant: usize) -> Vec<Campaign> {
    (0..compliant)
        .map(|index| search_campaign(&format!("c{index}"), &format!("KR_Generic_{index}")))
        .chain((0..non_compliant).map(|index| {
            search_campaign(&format!("n{index}"), &format!("Unnamed campaign {index}"))
        }))
        .collect()
}
