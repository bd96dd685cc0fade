use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ads::gaql;
use crate::ads::rows::{collapse_ad_group_rows, parse_ad_group_row, parse_campaign_row};
use crate::ads::{Account, AdGroup, AdsQuery, Campaign, CustomerId, QueryError, RowError};
use crate::workflows::accounts::{AccountHierarchyResolver, ResolveError};
use crate::workflows::kpi::{DataAssessment, MaturityScorecard, PriorityWorklist, ScorecardView};

/// Composes account discovery, data fetch, and scoring over one query capability.
pub struct DashboardService<Q> {
    query: Arc<Q>,
    resolver: AccountHierarchyResolver<Q>,
    default_customer: Option<CustomerId>,
}

impl<Q> DashboardService<Q>
where
    Q: AdsQuery + 'static,
{
    pub fn new(query: Arc<Q>) -> Self {
        let resolver = AccountHierarchyResolver::new(Arc::clone(&query));
        Self {
            query,
            resolver,
            default_customer: None,
        }
    }

    /// Customer used when a request names none.
    pub fn with_default_customer(mut self, customer: Option<CustomerId>) -> Self {
        self.default_customer = customer;
        self
    }

    /// Leaf accounts reachable by the current credential.
    pub async fn accounts(&self) -> Result<Vec<Account>, DashboardError> {
        Ok(self.resolver.resolve_accessible().await?)
    }

    /// Campaign and ad group records for one customer over the reporting window.
    pub async fn performance(
        &self,
        customer_id: Option<CustomerId>,
    ) -> Result<PerformanceSnapshot, DashboardError> {
        let customer_id = customer_id
            .or_else(|| self.default_customer.clone())
            .ok_or(DashboardError::MissingCustomer)?;

        let (campaign_rows, ad_rows) = futures::future::join(
            self.query.search(&customer_id, gaql::CAMPAIGN_PERFORMANCE),
            self.query.search(&customer_id, gaql::AD_GROUP_AD_PERFORMANCE),
        )
        .await;

        let campaigns = campaign_rows?
            .into_iter()
            .map(parse_campaign_row)
            .collect::<Result<Vec<_>, _>>()?;
        let ad_groups = ad_rows?
            .into_iter()
            .map(parse_ad_group_row)
            .collect::<Result<Vec<_>, _>>()?;
        let ad_groups = collapse_ad_group_rows(ad_groups);

        info!(
            customer_id = %customer_id,
            campaigns = campaigns.len(),
            ad_groups = ad_groups.len(),
            "fetched performance data"
        );

        Ok(PerformanceSnapshot {
            customer_id,
            campaigns,
            ad_groups,
        })
    }

    /// Fetches one customer's data and scores it.
    pub async fn scorecard(
        &self,
        customer_id: Option<CustomerId>,
        assessment: Option<DataAssessment>,
    ) -> Result<ScorecardReport, DashboardError> {
        let snapshot = self.performance(customer_id).await?;
        let mut report = score_records(&snapshot.campaigns, &snapshot.ad_groups, assessment);
        report.customer_id = Some(snapshot.customer_id);
        Ok(report)
    }
}

/// Scores records supplied directly by the caller.
pub fn score_records(
    campaigns: &[Campaign],
    ad_groups: &[AdGroup],
    assessment: Option<DataAssessment>,
) -> ScorecardReport {
    let scorecard = MaturityScorecard::compute(campaigns, ad_groups, assessment.as_ref());

    ScorecardReport {
        customer_id: None,
        scorecard: scorecard.view(),
        priorities: scorecard.worklist(campaigns, ad_groups),
        data_assessment: assessment,
        generated_at: Utc::now(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub customer_id: CustomerId,
    pub campaigns: Vec<Campaign>,
    pub ad_groups: Vec<AdGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub scorecard: ScorecardView,
    pub priorities: PriorityWorklist,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_assessment: Option<DataAssessment>,
    pub generated_at: DateTime<Utc>,
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("unauthorized: sign in with an advertising account")]
    Unauthorized,
    #[error("no customer id supplied and no default customer configured")]
    MissingCustomer,
    #[error(transparent)]
    Query(QueryError),
    #[error(transparent)]
    Row(#[from] RowError),
}

impl DashboardError {
    fn from_query(error: QueryError) -> Self {
        if error.is_unauthenticated() {
            Self::Unauthorized
        } else {
            Self::Query(error)
        }
    }
}

impl From<ResolveError> for DashboardError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::Unauthorized => Self::Unauthorized,
            ResolveError::Listing(error) => Self::from_query(error),
        }
    }
}

impl From<QueryError> for DashboardError {
    fn from(value: QueryError) -> Self {
        Self::from_query(value)
    }
}
