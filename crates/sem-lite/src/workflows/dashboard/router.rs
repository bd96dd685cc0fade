use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{score_records, DashboardError, DashboardService};
use crate::ads::{AdGroup, Campaign, Credentials, CustomerId, QueryFactory};
use crate::error::AppError;
use crate::workflows::kpi::DataAssessment;

/// Router builder exposing the dashboard's account, performance, and scorecard endpoints.
pub fn dashboard_router<F>(factory: Arc<F>) -> Router
where
    F: QueryFactory,
{
    Router::new()
        .route("/api/v1/accounts", get(accounts_handler::<F>))
        .route("/api/v1/performance", get(performance_handler::<F>))
        .route("/api/v1/scorecard", get(scorecard_handler::<F>))
        .route("/api/v1/scorecard/compute", post(compute_handler))
        .with_state(factory)
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerParams {
    pub customer_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScorecardParams {
    pub customer_id: Option<String>,
    pub ga4_level: Option<u8>,
    pub first_party_level: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub ad_groups: Vec<AdGroup>,
    #[serde(default)]
    pub data_assessment: Option<DataAssessment>,
}

pub(crate) async fn accounts_handler<F>(
    State(factory): State<Arc<F>>,
    headers: HeaderMap,
) -> Response
where
    F: QueryFactory,
{
    let service = match connect(factory.as_ref(), &headers) {
        Ok(service) => service,
        Err(error) => return dashboard_error(error),
    };

    match service.accounts().await {
        Ok(accounts) => (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response(),
        Err(error) => dashboard_error(error),
    }
}

pub(crate) async fn performance_handler<F>(
    State(factory): State<Arc<F>>,
    headers: HeaderMap,
    Query(params): Query<CustomerParams>,
) -> Response
where
    F: QueryFactory,
{
    let customer_id = match customer_param(params.customer_id.as_deref()) {
        Ok(customer_id) => customer_id,
        Err(response) => return response,
    };
    let service = match connect(factory.as_ref(), &headers) {
        Ok(service) => service,
        Err(error) => return dashboard_error(error),
    };

    match service.performance(customer_id).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => dashboard_error(error),
    }
}

pub(crate) async fn scorecard_handler<F>(
    State(factory): State<Arc<F>>,
    headers: HeaderMap,
    Query(params): Query<ScorecardParams>,
) -> Response
where
    F: QueryFactory,
{
    let customer_id = match customer_param(params.customer_id.as_deref()) {
        Ok(customer_id) => customer_id,
        Err(response) => return response,
    };
    let assessment = match (params.ga4_level, params.first_party_level) {
        (None, None) => None,
        (ga4, first_party) => {
            match DataAssessment::from_levels(ga4.unwrap_or(0), first_party.unwrap_or(0)) {
                Ok(assessment) => Some(assessment),
                Err(error) => return AppError::from(error).into_response(),
            }
        }
    };
    let service = match connect(factory.as_ref(), &headers) {
        Ok(service) => service,
        Err(error) => return dashboard_error(error),
    };

    match service.scorecard(customer_id, assessment).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => dashboard_error(error),
    }
}

pub(crate) async fn compute_handler(Json(request): Json<ComputeRequest>) -> Response {
    let report = score_records(
        &request.campaigns,
        &request.ad_groups,
        request.data_assessment,
    );
    (StatusCode::OK, Json(report)).into_response()
}

fn connect<F>(
    factory: &F,
    headers: &HeaderMap,
) -> Result<DashboardService<F::Query>, DashboardError>
where
    F: QueryFactory,
{
    let credentials = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(Credentials::from_authorization_header);

    let query = factory
        .connect(credentials)?
        .ok_or(DashboardError::Unauthorized)?;

    Ok(DashboardService::new(Arc::new(query)).with_default_customer(factory.default_customer()))
}

fn customer_param(raw: Option<&str>) -> Result<Option<CustomerId>, Response> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => CustomerId::parse(value)
            .map(Some)
            .ok_or_else(|| bad_request(format!("'{value}' is not a customer id"))),
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

pub(crate) fn dashboard_error(error: DashboardError) -> Response {
    AppError::from(error).into_response()
}
