use super::normalizer::{enum_token, is_blank, normalize_header};
use super::ImportError;
use crate::ads::{
    AdGroup, AdGroupMetrics, AdGroupType, AdStrength, AdvertisingChannelType,
    BiddingStrategyType, Campaign, CampaignMetrics, EntityStatus,
};
use csv::{Reader, StringRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

pub(crate) fn parse_campaigns<R: Read>(reader: R) -> Result<Vec<Campaign>, ImportError> {
    let mut campaigns = Vec::new();
    for_each_row::<_, CampaignExportRow, _>(reader, |line, row| {
        if let Some(campaign) = row.into_campaign(line)? {
            campaigns.push(campaign);
        }
        Ok(())
    })?;
    Ok(campaigns)
}

pub(crate) fn parse_ad_groups<R: Read>(reader: R) -> Result<Vec<AdGroup>, ImportError> {
    let mut ad_groups = Vec::new();
    for_each_row::<_, AdGroupExportRow, _>(reader, |line, row| {
        if let Some(group) = row.into_ad_group(line)? {
            ad_groups.push(group);
        }
        Ok(())
    })?;
    Ok(ad_groups)
}

fn for_each_row<R, T, F>(reader: R, mut apply: F) -> Result<(), ImportError>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(u64, T) -> Result<(), ImportError>,
{
    let mut csv_reader = normalized_reader(reader)?;
    let headers = csv_reader.headers()?.clone();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let row = record.deserialize::<T>(Some(&headers))?;
        apply(line, row)?;
    }

    Ok(())
}

fn normalized_reader<R: Read>(reader: R) -> Result<Reader<R>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: StringRecord = csv_reader.headers()?.iter().map(normalize_header).collect();
    csv_reader.set_headers(headers);
    Ok(csv_reader)
}

#[derive(Debug, Deserialize)]
struct CampaignExportRow {
    #[serde(rename = "campaign id", default)]
    id: Option<String>,
    #[serde(rename = "campaign", default)]
    name: Option<String>,
    #[serde(rename = "campaign status", default)]
    status: Option<String>,
    #[serde(rename = "campaign type", default)]
    channel: Option<String>,
    #[serde(rename = "bid strategy type", default)]
    bid_strategy: Option<String>,
    #[serde(default)]
    budget: Option<String>,
    #[serde(default)]
    impressions: Option<String>,
    #[serde(default)]
    clicks: Option<String>,
    #[serde(default)]
    cost: Option<String>,
    #[serde(rename = "search lost is (rank)", default)]
    lost_rank: Option<String>,
}

impl CampaignExportRow {
    /// `None` for the export's trailing total rows.
    fn into_campaign(self, line: u64) -> Result<Option<Campaign>, ImportError> {
        if is_total_row(self.id.as_deref(), self.name.as_deref()) {
            return Ok(None);
        }

        Ok(Some(Campaign {
            id: required(line, "Campaign ID", self.id)?,
            name: required(line, "Campaign", self.name)?,
            status: label(self.status.as_deref(), EntityStatus::Unknown),
            advertising_channel_type: label(self.channel.as_deref(), AdvertisingChannelType::Other),
            bidding_strategy_type: label(
                self.bid_strategy.as_deref(),
                BiddingStrategyType::Unknown,
            ),
            budget: micros(line, "Budget", self.budget.as_deref())?,
            metrics: CampaignMetrics {
                impressions: count(line, "Impressions", self.impressions.as_deref())?,
                clicks: count(line, "Clicks", self.clicks.as_deref())?,
                cost_micros: micros(line, "Cost", self.cost.as_deref())?,
                search_lost_is_rank: fraction(
                    line,
                    "Search lost IS (rank)",
                    self.lost_rank.as_deref(),
                )?,
            },
        }))
    }
}

#[derive(Debug, Deserialize)]
struct AdGroupExportRow {
    #[serde(rename = "ad group id", default)]
    id: Option<String>,
    #[serde(rename = "ad group", default)]
    name: Option<String>,
    #[serde(rename = "campaign id", default)]
    campaign_id: Option<String>,
    #[serde(rename = "ad group status", default)]
    status: Option<String>,
    #[serde(rename = "ad group type", default)]
    ad_group_type: Option<String>,
    #[serde(rename = "ad strength", default)]
    ad_strength: Option<String>,
    #[serde(default)]
    impressions: Option<String>,
}

impl AdGroupExportRow {
    fn into_ad_group(self, line: u64) -> Result<Option<AdGroup>, ImportError> {
        if is_total_row(self.id.as_deref(), self.name.as_deref()) {
            return Ok(None);
        }

        // The UI labels search ad groups plainly as "Standard".
        let ad_group_type = match self.ad_group_type.as_deref().map(enum_token).as_deref() {
            Some("STANDARD") => AdGroupType::SearchStandard,
            _ => label(self.ad_group_type.as_deref(), AdGroupType::Other),
        };

        Ok(Some(AdGroup {
            id: required(line, "Ad group ID", self.id)?,
            name: required(line, "Ad group", self.name)?,
            campaign_id: self
                .campaign_id
                .filter(|value| !is_blank(value))
                .unwrap_or_default(),
            status: label(self.status.as_deref(), EntityStatus::Unknown),
            ad_group_type,
            ad_strength: label(self.ad_strength.as_deref(), AdStrength::Unknown),
            metrics: AdGroupMetrics {
                impressions: count(line, "Impressions", self.impressions.as_deref())?,
            },
        }))
    }
}

fn is_total_row(id: Option<&str>, name: Option<&str>) -> bool {
    id.map_or(true, is_blank)
        && name.is_some_and(|name| name.trim().to_ascii_lowercase().starts_with("total"))
}

fn required(line: u64, column: &'static str, value: Option<String>) -> Result<String, ImportError> {
    value
        .filter(|value| !is_blank(value))
        .ok_or(ImportError::Missing { line, column })
}

fn label<T: DeserializeOwned>(raw: Option<&str>, fallback: T) -> T {
    raw.filter(|value| !is_blank(value))
        .and_then(|value| serde_json::from_value(Value::String(enum_token(value))).ok())
        .unwrap_or(fallback)
}

fn invalid(line: u64, column: &'static str, value: &str) -> ImportError {
    ImportError::Field {
        line,
        column,
        value: value.to_string(),
    }
}

fn count(line: u64, column: &'static str, raw: Option<&str>) -> Result<u64, ImportError> {
    let Some(raw) = raw.filter(|value| !is_blank(value)) else {
        return Ok(0);
    };
    let digits: String = raw.chars().filter(|c| !matches!(c, ',' | ' ')).collect();
    digits.parse().map_err(|_| invalid(line, column, raw))
}

/// Currency units (`"$4,500.00"`) to micros.
fn micros(line: u64, column: &'static str, raw: Option<&str>) -> Result<u64, ImportError> {
    let Some(raw) = raw.filter(|value| !is_blank(value)) else {
        return Ok(0);
    };
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    let units: f64 = numeric.parse().map_err(|_| invalid(line, column, raw))?;
    if !units.is_finite() || units < 0.0 {
        return Err(invalid(line, column, raw));
    }
    Ok((units * 1_000_000.0).round() as u64)
}

/// `"12.5%"` -> `0.125`; bounded cells such as `"< 10%"` take the bound.
fn fraction(line: u64, column: &'static str, raw: Option<&str>) -> Result<f64, ImportError> {
    let Some(raw) = raw.filter(|value| !is_blank(value)) else {
        return Ok(0.0);
    };
    let unbounded = raw.trim().trim_start_matches(['<', '>']).trim();
    let (number, scale) = match unbounded.strip_suffix('%') {
        Some(percent) => (percent.trim(), 100.0),
        None => (unbounded, 1.0),
    };
    let value: f64 = number.parse().map_err(|_| invalid(line, column, raw))?;
    if !value.is_finite() {
        return Err(invalid(line, column, raw));
    }
    Ok(value / scale)
}
