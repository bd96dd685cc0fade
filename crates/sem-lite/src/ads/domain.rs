use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric advertising customer identifier with all formatting removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Accepts `1234567890`, `123-456-7890`, or a `customers/1234567890` resource name.
    pub fn parse(raw: &str) -> Option<Self> {
        let tail = raw.trim().rsplit('/').next().unwrap_or_default();
        let digits: String = tail.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            None
        } else {
            Some(Self(digits))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{value}' is not a customer id"))
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

/// Queryable leaf account produced by hierarchy resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: CustomerId,
    pub name: String,
}

impl Account {
    pub fn new(id: CustomerId, descriptive_name: Option<String>) -> Self {
        let name = descriptive_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Account {id}"));
        Self { id, name }
    }
}

/// Serving status shared by campaigns and ad groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Enabled,
    Paused,
    Removed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertisingChannelType {
    Search,
    Display,
    Shopping,
    Video,
    PerformanceMax,
    DemandGen,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiddingStrategyType {
    ManualCpc,
    ManualCpm,
    ManualCpv,
    MaximizeClicks,
    TargetSpend,
    MaximizeConversions,
    TargetCpa,
    TargetImpressionShare,
    TargetRoas,
    MaximizeConversionValue,
    #[serde(other)]
    Unknown,
}

impl BiddingStrategyType {
    pub fn label(&self) -> &'static str {
        match self {
            BiddingStrategyType::ManualCpc => "MANUAL_CPC",
            BiddingStrategyType::ManualCpm => "MANUAL_CPM",
            BiddingStrategyType::ManualCpv => "MANUAL_CPV",
            BiddingStrategyType::MaximizeClicks => "MAXIMIZE_CLICKS",
            BiddingStrategyType::TargetSpend => "TARGET_SPEND",
            BiddingStrategyType::MaximizeConversions => "MAXIMIZE_CONVERSIONS",
            BiddingStrategyType::TargetCpa => "TARGET_CPA",
            BiddingStrategyType::TargetImpressionShare => "TARGET_IMPRESSION_SHARE",
            BiddingStrategyType::TargetRoas => "TARGET_ROAS",
            BiddingStrategyType::MaximizeConversionValue => "MAXIMIZE_CONVERSION_VALUE",
            BiddingStrategyType::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupType {
    SearchStandard,
    SearchDynamicAds,
    DisplayStandard,
    ShoppingProductAds,
    VideoResponsive,
    #[serde(other)]
    Other,
}

/// Creative sufficiency rating reported for responsive search ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdStrength {
    Excellent,
    Good,
    Average,
    Poor,
    #[serde(other)]
    Unknown,
}

impl AdStrength {
    pub fn label(&self) -> &'static str {
        match self {
            AdStrength::Excellent => "EXCELLENT",
            AdStrength::Good => "GOOD",
            AdStrength::Average => "AVERAGE",
            AdStrength::Poor => "POOR",
            AdStrength::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub cost_micros: u64,
    /// Share of eligible auctions lost to Ad Rank, nominally within `[0, 1]`.
    pub search_lost_is_rank: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    pub advertising_channel_type: AdvertisingChannelType,
    pub bidding_strategy_type: BiddingStrategyType,
    /// Daily budget in micros.
    pub budget: u64,
    pub metrics: CampaignMetrics,
}

impl Campaign {
    pub fn is_active_search(&self) -> bool {
        self.advertising_channel_type == AdvertisingChannelType::Search
            && self.status == EntityStatus::Enabled
    }

    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupMetrics {
    pub impressions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: String,
    pub name: String,
    pub campaign_id: String,
    pub status: EntityStatus,
    #[serde(rename = "type")]
    pub ad_group_type: AdGroupType,
    pub ad_strength: AdStrength,
    pub metrics: AdGroupMetrics,
}
