//! Validation of raw reporting rows into typed records.
//!
//! The REST API emits camelCase keys and encodes int64 values as JSON strings; the
//! snake_case aliases cover client libraries that forward field paths verbatim.

use super::domain::{
    AdGroup, AdGroupMetrics, AdGroupType, AdStrength, AdvertisingChannelType,
    BiddingStrategyType, Campaign, CampaignMetrics, CustomerId, EntityStatus,
};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("malformed {entity} row: {reason}")]
    Malformed {
        entity: &'static str,
        reason: String,
    },
    #[error("invalid resource name '{0}'")]
    ResourceName(String),
}

/// Child account discovered under a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRow {
    pub client_id: CustomerId,
    pub descriptive_name: Option<String>,
    pub manager: bool,
}

/// The context customer's own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfRow {
    pub id: CustomerId,
    pub descriptive_name: Option<String>,
    pub manager: bool,
}

pub fn parse_hierarchy_row(row: Value) -> Result<HierarchyRow, RowError> {
    let raw: RawHierarchyRow = decode("customer_client", row)?;
    let client_id = CustomerId::parse(&raw.customer_client.client_customer)
        .ok_or_else(|| RowError::ResourceName(raw.customer_client.client_customer.clone()))?;

    Ok(HierarchyRow {
        client_id,
        descriptive_name: raw.customer_client.descriptive_name,
        manager: raw.customer_client.manager,
    })
}

pub fn parse_self_row(row: Value) -> Result<SelfRow, RowError> {
    let raw: RawSelfRow = decode("customer", row)?;
    let id = CustomerId::parse(&raw.customer.id)
        .ok_or_else(|| RowError::ResourceName(raw.customer.id.clone()))?;

    Ok(SelfRow {
        id,
        descriptive_name: raw.customer.descriptive_name,
        manager: raw.customer.manager,
    })
}

pub fn parse_campaign_row(row: Value) -> Result<Campaign, RowError> {
    let raw: RawCampaignRow = decode("campaign", row)?;

    Ok(Campaign {
        id: raw.campaign.id,
        name: raw.campaign.name,
        status: raw.campaign.status,
        advertising_channel_type: raw.campaign.advertising_channel_type,
        bidding_strategy_type: raw.campaign.bidding_strategy_type,
        budget: raw.campaign_budget.amount_micros,
        metrics: CampaignMetrics {
            impressions: raw.metrics.impressions,
            clicks: raw.metrics.clicks,
            cost_micros: raw.metrics.cost_micros,
            search_lost_is_rank: raw.metrics.search_rank_lost_impression_share.unwrap_or(0.0),
        },
    })
}

/// Parses one `ad_group_ad` row into the ad group it belongs to, carrying that single
/// ad's strength and impressions. Use [`collapse_ad_group_rows`] to merge ads.
pub fn parse_ad_group_row(row: Value) -> Result<AdGroup, RowError> {
    let raw: RawAdGroupAdRow = decode("ad_group_ad", row)?;
    let campaign_id = resource_tail(&raw.ad_group.campaign)
        .ok_or_else(|| RowError::ResourceName(raw.ad_group.campaign.clone()))?;

    Ok(AdGroup {
        id: raw.ad_group.id,
        name: raw.ad_group.name,
        campaign_id,
        status: raw.ad_group.status,
        ad_group_type: raw.ad_group.ad_group_type,
        ad_strength: raw.ad_group_ad.ad_strength,
        metrics: AdGroupMetrics {
            impressions: raw.metrics.impressions,
        },
    })
}

/// Merges per-ad rows into one record per ad group, in first-seen order.
///
/// Impressions are summed. The strength comes from the ad with the most impressions;
/// on a tie the earlier row wins.
pub fn collapse_ad_group_rows(rows: Vec<AdGroup>) -> Vec<AdGroup> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<(AdGroup, u64)> = Vec::new();

    for row in rows {
        match slots.get(&row.id) {
            Some(&slot) => {
                let (group, leading_impressions) = &mut merged[slot];
                if row.metrics.impressions > *leading_impressions {
                    *leading_impressions = row.metrics.impressions;
                    group.ad_strength = row.ad_strength;
                }
                group.metrics.impressions = group
                    .metrics
                    .impressions
                    .saturating_add(row.metrics.impressions);
            }
            None => {
                slots.insert(row.id.clone(), merged.len());
                let leading = row.metrics.impressions;
                merged.push((row, leading));
            }
        }
    }

    merged.into_iter().map(|(group, _)| group).collect()
}

/// `customers/1/campaigns/456` -> `456`
fn resource_tail(resource_name: &str) -> Option<String> {
    resource_name
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|tail| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(entity: &'static str, row: Value) -> Result<T, RowError> {
    serde_json::from_value(row).map_err(|err| RowError::Malformed {
        entity,
        reason: err.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct RawHierarchyRow {
    #[serde(rename = "customerClient", alias = "customer_client")]
    customer_client: RawCustomerClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomerClient {
    #[serde(alias = "client_customer")]
    client_customer: String,
    #[serde(
        default,
        alias = "descriptive_name",
        deserialize_with = "empty_string_as_none"
    )]
    descriptive_name: Option<String>,
    #[serde(default)]
    manager: bool,
}

#[derive(Debug, Deserialize)]
struct RawSelfRow {
    customer: RawCustomer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomer {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(
        default,
        alias = "descriptive_name",
        deserialize_with = "empty_string_as_none"
    )]
    descriptive_name: Option<String>,
    #[serde(default)]
    manager: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCampaignRow {
    campaign: RawCampaign,
    #[serde(default, alias = "campaign_budget")]
    campaign_budget: RawBudget,
    #[serde(default)]
    metrics: RawMetrics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCampaign {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    name: String,
    #[serde(default = "unknown_status")]
    status: EntityStatus,
    #[serde(alias = "advertising_channel_type", default = "other_channel")]
    advertising_channel_type: AdvertisingChannelType,
    #[serde(alias = "bidding_strategy_type", default = "unknown_strategy")]
    bidding_strategy_type: BiddingStrategyType,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBudget {
    #[serde(default, alias = "amount_micros", deserialize_with = "int64")]
    amount_micros: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetrics {
    #[serde(default, deserialize_with = "int64")]
    impressions: u64,
    #[serde(default, deserialize_with = "int64")]
    clicks: u64,
    #[serde(default, alias = "cost_micros", deserialize_with = "int64")]
    cost_micros: u64,
    #[serde(default, alias = "search_rank_lost_impression_share")]
    search_rank_lost_impression_share: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdGroupAdRow {
    #[serde(alias = "ad_group")]
    ad_group: RawAdGroup,
    #[serde(alias = "ad_group_ad")]
    ad_group_ad: RawAdGroupAd,
    #[serde(default)]
    metrics: RawMetrics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdGroup {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    name: String,
    campaign: String,
    #[serde(default = "unknown_status")]
    status: EntityStatus,
    #[serde(rename = "type", default = "other_ad_group_type")]
    ad_group_type: AdGroupType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdGroupAd {
    #[serde(default = "unknown_strength", alias = "ad_strength")]
    ad_strength: AdStrength,
}

fn unknown_status() -> EntityStatus {
    EntityStatus::Unknown
}

fn other_channel() -> AdvertisingChannelType {
    AdvertisingChannelType::Other
}

fn unknown_strategy() -> BiddingStrategyType {
    BiddingStrategyType::Unknown
}

fn other_ad_group_type() -> AdGroupType {
    AdGroupType::Other
}

fn unknown_strength() -> AdStrength {
    AdStrength::Unknown
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Unsigned(u64),
    Text(String),
}

fn int64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Scalar::Unsigned(value)) => Ok(value),
        Some(Scalar::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(Scalar::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("'{text}' is not a non-negative integer"))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Unsigned(value) => Ok(value.to_string()),
        Scalar::Text(text) if text.trim().is_empty() => {
            Err(D::Error::custom("identifier must not be empty"))
        }
        Scalar::Text(text) => Ok(text.trim().to_string()),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
