//! Boundary with the advertising platform: typed records, the query capability, and
//! validation of the loosely typed rows it returns.

mod client;
mod demo;
pub mod domain;
pub mod gaql;
mod query;
pub mod rows;

pub use client::GoogleAdsClient;
pub use demo::DemoAdsClient;
pub use domain::{
    Account, AdGroup, AdGroupMetrics, AdGroupType, AdStrength, AdvertisingChannelType,
    BiddingStrategyType, Campaign, CampaignMetrics, CustomerId, EntityStatus,
};
pub use query::{AdsQuery, Credentials, QueryError, QueryFactory};
pub use rows::RowError;
