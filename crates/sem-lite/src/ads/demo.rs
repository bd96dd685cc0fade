use super::domain::CustomerId;
use super::query::{AdsQuery, QueryError};
use async_trait::async_trait;
use serde_json::{json, Value};

const DEMO_MANAGER: &str = "1000000001";
const DEMO_MANAGER_CHILDREN: [(&str, &str); 2] = [
    ("1234567890", "Demo Account A (Global Brand)"),
    ("0987654321", "Demo Account B (Regional Search)"),
];
const DEMO_STANDALONE: (&str, &str) = ("1122334455", "Demo Account C (Standalone)");

/// In-memory reporting API serving a fixed fixture.
///
/// Only wired in when demo mode is switched on explicitly; it never stands in for a
/// failing live connection.
#[derive(Debug, Clone, Default)]
pub struct DemoAdsClient;

impl DemoAdsClient {
    /// Leaf account the fixture's campaigns belong to.
    pub const DEFAULT_CUSTOMER: &'static str = DEMO_MANAGER_CHILDREN[0].0;

    pub fn new() -> Self {
        Self
    }

    /// Raw campaign rows in the reporting API's wire shape.
    pub fn campaign_rows() -> Vec<Value> {
        [
            ("1", "KR_Search_Brand_Genesis", "SEARCH", "TARGET_IMPRESSION_SHARE", 5_000_000u64, 15_000u64, 3_000u64, 4_500_000_000u64, 0.05),
            ("2", "KR_Search_Generic_SUV", "SEARCH", "MAXIMIZE_CONVERSIONS", 3_000_000, 45_000, 1_200, 2_800_000_000, 0.25),
            ("3", "KR_Search_Competitor_Kia", "SEARCH", "MANUAL_CPC", 1_000_000, 5_000, 200, 800_000_000, 0.6),
            ("4", "US_Search_Brand_Sonata", "SEARCH", "TARGET_ROAS", 2_000_000, 12_000, 2_500, 3_000_000_000, 0.02),
            ("5", "KR_Display_Retargeting", "DISPLAY", "TARGET_CPA", 1_500_000, 100_000, 500, 1_200_000_000, 0.0),
            ("6", "Bad_Campaign_Name_Example", "SEARCH", "MANUAL_CPC", 500_000, 2_000, 50, 400_000_000, 0.8),
        ]
        .into_iter()
        .map(
            |(id, name, channel, strategy, budget, impressions, clicks, cost, lost)| {
                json!({
                    "campaign": {
                        "resourceName": format!("customers/{}/campaigns/{id}", DEMO_MANAGER_CHILDREN[0].0),
                        "id": id,
                        "name": name,
                        "status": "ENABLED",
                        "advertisingChannelType": channel,
                        "biddingStrategyType": strategy,
                    },
                    "campaignBudget": { "amountMicros": budget.to_string() },
                    "metrics": {
                        "impressions": impressions.to_string(),
                        "clicks": clicks.to_string(),
                        "costMicros": cost.to_string(),
                        "searchRankLostImpressionShare": lost,
                    }
                })
            },
        )
        .collect()
    }

    /// Raw per-ad rows; ad group 101 carries two ads to exercise row collapsing.
    pub fn ad_group_ad_rows() -> Vec<Value> {
        [
            ("101", "Genesis_Sedan_Exact", "1", "EXCELLENT", 8_000u64),
            ("101", "Genesis_Sedan_Exact", "1", "GOOD", 2_000),
            ("102", "Genesis_SUV_Broad", "1", "GOOD", 5_000),
            ("201", "SantaFe_General", "2", "AVERAGE", 30_000),
            ("202", "Tucson_Promo", "2", "POOR", 15_000),
        ]
        .into_iter()
        .map(|(id, name, campaign, strength, impressions)| {
            json!({
                "adGroup": {
                    "id": id,
                    "name": name,
                    "campaign": format!("customers/{}/campaigns/{campaign}", DEMO_MANAGER_CHILDREN[0].0),
                    "status": "ENABLED",
                    "type": "SEARCH_STANDARD",
                },
                "adGroupAd": { "adStrength": strength },
                "metrics": { "impressions": impressions.to_string() }
            })
        })
        .collect()
    }

    fn hierarchy_rows(context: &CustomerId) -> Vec<Value> {
        if context.as_str() != DEMO_MANAGER {
            return Vec::new();
        }

        DEMO_MANAGER_CHILDREN
            .iter()
            .map(|(id, name)| {
                json!({
                    "customerClient": {
                        "clientCustomer": format!("customers/{id}"),
                        "descriptiveName": name,
                        "manager": false,
                        "status": "ENABLED",
                    }
                })
            })
            .collect()
    }

    fn self_rows(context: &CustomerId) -> Vec<Value> {
        let (name, manager) = if context.as_str() == DEMO_MANAGER {
            ("Demo Manager", true)
        } else if context.as_str() == DEMO_STANDALONE.0 {
            (DEMO_STANDALONE.1, false)
        } else {
            return Vec::new();
        };

        vec![json!({
            "customer": {
                "id": context.as_str(),
                "descriptiveName": name,
                "manager": manager,
            }
        })]
    }
}

#[async_trait]
impl AdsQuery for DemoAdsClient {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        [DEMO_MANAGER, DEMO_STANDALONE.0]
            .iter()
            .map(|id| {
                CustomerId::parse(id)
                    .ok_or_else(|| QueryError::Decode(format!("invalid demo customer '{id}'")))
            })
            .collect()
    }

    async fn search(&self, context: &CustomerId, gaql: &str) -> Result<Vec<Value>, QueryError> {
        let rows = if gaql.contains("FROM customer_client") {
            Self::hierarchy_rows(context)
        } else if gaql.contains("FROM customer ") {
            Self::self_rows(context)
        } else if gaql.contains("FROM ad_group_ad") {
            Self::ad_group_ad_rows()
        } else if gaql.contains("FROM campaign") {
            Self::campaign_rows()
        } else {
            return Err(QueryError::Api {
                status: 400,
                message: "demo data does not cover this query".to_string(),
            });
        };

        Ok(rows)
    }
}
