use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::{json, Value};

use crate::ads::{
    AdsQuery, Credentials, CustomerId, DemoAdsClient, QueryError, QueryFactory,
};
use crate::workflows::dashboard::DashboardService;

/// Query double that fails every call with the same error.
#[derive(Debug, Clone)]
pub(super) struct FailingQuery(pub(super) QueryError);

#[async_trait]
impl AdsQuery for FailingQuery {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        Err(self.0.clone())
    }

    async fn search(&self, _context: &CustomerId, _gaql: &str) -> Result<Vec<Value>, QueryError> {
        Err(self.0.clone())
    }
}

/// Query double whose reporting rows are missing required fields.
#[derive(Debug, Clone, Default)]
pub(super) struct MalformedRowsQuery;

#[async_trait]
impl AdsQuery for MalformedRowsQuery {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        Ok(Vec::new())
    }

    async fn search(&self, _context: &CustomerId, _gaql: &str) -> Result<Vec<Value>, QueryError> {
        Ok(vec![json!({ "campaign": { "status": "ENABLED" } })])
    }
}

/// Hands out clones of one query, optionally demanding a bearer credential first.
pub(super) struct FixedFactory<Q> {
    query: Q,
    require_credentials: bool,
    default_customer: Option<CustomerId>,
}

impl<Q> FixedFactory<Q> {
    pub(super) fn open(query: Q) -> Self {
        Self {
            query,
            require_credentials: false,
            default_customer: None,
        }
    }

    pub(super) fn signed_in_only(query: Q) -> Self {
        Self {
            require_credentials: true,
            ..Self::open(query)
        }
    }

    pub(super) fn with_default_customer(mut self, customer: &str) -> Self {
        self.default_customer = CustomerId::parse(customer);
        self
    }
}

impl<Q> QueryFactory for FixedFactory<Q>
where
    Q: AdsQuery + Clone + 'static,
{
    type Query = Q;

    fn connect(&self, credentials: Option<Credentials>) -> Result<Option<Q>, QueryError> {
        if self.require_credentials && credentials.is_none() {
            return Ok(None);
        }
        Ok(Some(self.query.clone()))
    }

    fn default_customer(&self) -> Option<CustomerId> {
        self.default_customer.clone()
    }
}

pub(super) fn demo_service() -> DashboardService<DemoAdsClient> {
    DashboardService::new(Arc::new(DemoAdsClient::new()))
}

pub(super) fn customer(raw: &str) -> CustomerId {
    CustomerId::parse(raw).expect("valid customer id")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) fn signed_in_get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, "Bearer ya29.test-token")
        .body(Body::empty())
        .expect("request builds")
}

pub(super) fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("body serializes")))
        .expect("request builds")
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
