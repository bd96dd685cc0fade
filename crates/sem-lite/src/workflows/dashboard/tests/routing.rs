use super::common::*;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::ads::{DemoAdsClient, QueryError};
use crate::config::GoogleAdsConfig;
use crate::workflows::dashboard::router::accounts_handler;
use crate::workflows::dashboard::{dashboard_router, DemoQueryFactory, GoogleAdsQueryFactory};

#[tokio::test]
async fn accounts_handler_requires_a_credential() {
    let factory = Arc::new(FixedFactory::signed_in_only(DemoAdsClient::new()));

    let response = accounts_handler(State(factory), HeaderMap::new()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("unauthorized"));
}

#[tokio::test]
async fn accounts_route_lists_leaves_for_signed_in_user() {
    let router = dashboard_router(Arc::new(FixedFactory::signed_in_only(DemoAdsClient::new())));

    let response = router
        .oneshot(signed_in_get("/api/v1/accounts"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let accounts = body["accounts"].as_array().expect("accounts array");
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0]["id"], "1234567890");
}

#[tokio::test]
async fn demo_factory_serves_anonymous_requests() {
    let router = dashboard_router(Arc::new(DemoQueryFactory));

    let response = router
        .oneshot(get("/api/v1/performance"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["customerId"], "1234567890");
    assert_eq!(body["campaigns"].as_array().expect("campaigns").len(), 6);
    assert_eq!(body["adGroups"][0]["type"], "SEARCH_STANDARD");
}

#[tokio::test]
async fn performance_route_rejects_unparseable_customer() {
    let router = dashboard_router(Arc::new(DemoQueryFactory));

    let response = router
        .oneshot(get("/api/v1/performance?customer_id=not-a-number"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn performance_route_without_customer_or_default_is_bad_request() {
    let router = dashboard_router(Arc::new(FixedFactory::open(DemoAdsClient::new())));

    let response = router
        .oneshot(get("/api/v1/performance"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scorecard_route_includes_data_maturity_and_hides_coverage() {
    let factory = FixedFactory::open(DemoAdsClient::new()).with_default_customer("1234567890");
    let router = dashboard_router(Arc::new(factory));

    let response = router
        .oneshot(get("/api/v1/scorecard?ga4_level=3&first_party_level=2"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["customerId"], "1234567890");
    assert_eq!(body["scorecard"]["data"]["score"], 85);
    assert_eq!(body["scorecard"]["data"]["status"], "PASS");
    assert!(body["scorecard"]["coverage"].is_null());
    assert_eq!(body["dataAssessment"]["ga4"], 3);
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn scorecard_route_rejects_out_of_range_levels() {
    let router = dashboard_router(Arc::new(DemoQueryFactory));

    let response = router
        .oneshot(get("/api/v1/scorecard?ga4_level=7"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let factory = FixedFactory::open(FailingQuery(QueryError::Transport(
        "connection refused".to_string(),
    )));
    let router = dashboard_router(Arc::new(factory));

    let response = router
        .oneshot(get("/api/v1/scorecard?customer_id=1234567890"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn live_factory_without_developer_token_is_a_server_error() {
    let factory = GoogleAdsQueryFactory::new(GoogleAdsConfig::default()).expect("http client");
    let router = dashboard_router(Arc::new(factory));

    let anonymous = router
        .clone()
        .oneshot(get("/api/v1/accounts"))
        .await
        .expect("route responds");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let signed_in = router
        .oneshot(signed_in_get("/api/v1/accounts"))
        .await
        .expect("route responds");
    assert_eq!(signed_in.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn compute_route_scores_supplied_records() {
    let router = dashboard_router(Arc::new(DemoQueryFactory));
    let payload = json!({
        "campaigns": [
            {
                "id": "1",
                "name": "KR_Brand_1",
                "status": "ENABLED",
                "advertisingChannelType": "SEARCH",
                "biddingStrategyType": "TARGET_ROAS",
                "budget": 1000000,
                "metrics": {
                    "impressions": 1000,
                    "clicks": 10,
                    "costMicros": 5000000,
                    "searchLostIsRank": 0.1
                }
            }
        ],
        "dataAssessment": { "ga4": 1, "firstParty": 1 }
    });

    let response = router
        .oneshot(post_json("/api/v1/scorecard/compute", &payload))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["scorecard"]["gatekeeper"]["score"], 100);
    assert_eq!(body["scorecard"]["coverage"]["score"], 90);
    assert_eq!(body["scorecard"]["coverage"]["status"], "PASS");
    assert_eq!(body["scorecard"]["aiAdoption"]["score"], 100);
    assert_eq!(body["scorecard"]["quality"]["score"], 0);
    assert_eq!(body["scorecard"]["data"]["score"], 40);
    assert_eq!(body["priorities"]["coverage"][0]["metricValue"], "10.0%");
    assert!(body.get("customerId").is_none());
}

#[tokio::test]
async fn compute_route_rejects_invalid_levels() {
    let router = dashboard_router(Arc::new(DemoQueryFactory));
    let payload = json!({ "campaigns": [], "dataAssessment": { "ga4": 9, "firstParty": 0 } });

    let response = router
        .oneshot(post_json("/api/v1/scorecard/compute", &payload))
        .await
        .expect("route responds");

    assert!(response.status().is_client_error());
}
