use super::policy::{pass_fail, KpiResult, DATA_MATURITY_PASS};
use super::rules::round_score;
use serde::{Deserialize, Serialize};

/// D-1: how deeply analytics tagging is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Ga4Level {
    NotImplemented,
    Basic,
    Advanced,
    PrimaryBidSource,
}

impl Ga4Level {
    pub fn points(&self) -> u8 {
        match self {
            Ga4Level::NotImplemented => 0,
            Ga4Level::Basic => 40,
            Ga4Level::Advanced => 70,
            Ga4Level::PrimaryBidSource => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ga4Level::NotImplemented => "Not Implemented",
            Ga4Level::Basic => "Basic Implementation",
            Ga4Level::Advanced => "Advanced (eCommerce/Events)",
            Ga4Level::PrimaryBidSource => "Primary Bid Source (Activated)",
        }
    }
}

impl TryFrom<u8> for Ga4Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Ga4Level::NotImplemented),
            1 => Ok(Ga4Level::Basic),
            2 => Ok(Ga4Level::Advanced),
            3 => Ok(Ga4Level::PrimaryBidSource),
            other => Err(LevelError(other)),
        }
    }
}

impl From<Ga4Level> for u8 {
    fn from(value: Ga4Level) -> Self {
        match value {
            Ga4Level::NotImplemented => 0,
            Ga4Level::Basic => 1,
            Ga4Level::Advanced => 2,
            Ga4Level::PrimaryBidSource => 3,
        }
    }
}

/// D-2: how first-party customer data reaches bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FirstPartyDataLevel {
    NotUsed,
    CustomerMatch,
    EnhancedConversions,
    CdpIntegration,
}

impl FirstPartyDataLevel {
    pub fn points(&self) -> u8 {
        match self {
            FirstPartyDataLevel::NotUsed => 0,
            FirstPartyDataLevel::CustomerMatch => 40,
            FirstPartyDataLevel::EnhancedConversions => 70,
            FirstPartyDataLevel::CdpIntegration => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FirstPartyDataLevel::NotUsed => "Not Used",
            FirstPartyDataLevel::CustomerMatch => "Customer Match (List Upload)",
            FirstPartyDataLevel::EnhancedConversions => "Enhanced Conversions",
            FirstPartyDataLevel::CdpIntegration => "CDP / API Integration",
        }
    }
}

impl TryFrom<u8> for FirstPartyDataLevel {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FirstPartyDataLevel::NotUsed),
            1 => Ok(FirstPartyDataLevel::CustomerMatch),
            2 => Ok(FirstPartyDataLevel::EnhancedConversions),
            3 => Ok(FirstPartyDataLevel::CdpIntegration),
            other => Err(LevelError(other)),
        }
    }
}

impl From<FirstPartyDataLevel> for u8 {
    fn from(value: FirstPartyDataLevel) -> Self {
        match value {
            FirstPartyDataLevel::NotUsed => 0,
            FirstPartyDataLevel::CustomerMatch => 1,
            FirstPartyDataLevel::EnhancedConversions => 2,
            FirstPartyDataLevel::CdpIntegration => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("maturity level must be between 0 and 3, got {0}")]
pub struct LevelError(pub u8);

/// Manual self-assessment supplied alongside the platform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAssessment {
    pub ga4: Ga4Level,
    pub first_party: FirstPartyDataLevel,
}

impl DataAssessment {
    pub fn from_levels(ga4: u8, first_party: u8) -> Result<Self, LevelError> {
        Ok(Self {
            ga4: Ga4Level::try_from(ga4)?,
            first_party: FirstPartyDataLevel::try_from(first_party)?,
        })
    }
}

pub fn data_maturity_score(assessment: &DataAssessment) -> KpiResult {
    let total = f64::from(assessment.ga4.points()) + f64::from(assessment.first_party.points());
    pass_fail(round_score(total / 2.0), DATA_MATURITY_PASS)
}
