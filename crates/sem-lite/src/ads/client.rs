use super::domain::CustomerId;
use super::query::{AdsQuery, Credentials, QueryError};
use crate::config::GoogleAdsConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// REST client for the reporting API, bound to one user's credentials.
#[derive(Clone)]
pub struct GoogleAdsClient {
    http: Client,
    endpoint: String,
    developer_token: String,
    credentials: Credentials,
}

impl std::fmt::Debug for GoogleAdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdsClient")
            .field("endpoint", &self.endpoint)
            .field("developer_token", &"<redacted>")
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl GoogleAdsClient {
    /// Shared HTTP client honoring the configured timeout.
    pub fn http_client(config: &GoogleAdsConfig) -> Result<Client, QueryError> {
        Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| QueryError::Transport(err.to_string()))
    }

    pub fn new(
        http: Client,
        config: &GoogleAdsConfig,
        credentials: Credentials,
    ) -> Result<Self, QueryError> {
        let developer_token = config
            .developer_token
            .clone()
            .ok_or(QueryError::MissingConfiguration("GOOGLE_ADS_DEVELOPER_TOKEN"))?;

        Ok(Self {
            http,
            endpoint: format!("{}/{}", config.base_url, config.api_version),
            developer_token,
            credentials,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.credentials.access_token())
            .header("developer-token", &self.developer_token)
    }

    async fn search_page(
        &self,
        context: &CustomerId,
        gaql: &str,
        page_token: Option<String>,
    ) -> Result<SearchResponse, QueryError> {
        let url = format!("{}/customers/{}/googleAds:search", self.endpoint, context);
        let request = self
            .authorized(self.http.post(&url))
            .header("login-customer-id", context.as_str())
            .json(&SearchRequest {
                query: gaql,
                page_token,
            });

        let response = send(request).await?;
        let response = check_status(response, Some(context)).await?;
        response
            .json::<SearchResponse>()
            .await
            .map_err(|err| QueryError::Decode(err.to_string()))
    }
}

#[async_trait]
impl AdsQuery for GoogleAdsClient {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        let url = format!("{}/customers:listAccessibleCustomers", self.endpoint);
        let response = send(self.authorized(self.http.get(&url))).await?;
        let response = check_status(response, None).await?;
        let body = response
            .json::<AccessibleCustomersResponse>()
            .await
            .map_err(|err| QueryError::Decode(err.to_string()))?;

        body.resource_names
            .iter()
            .map(|name| {
                CustomerId::parse(name)
                    .ok_or_else(|| QueryError::Decode(format!("invalid resource name '{name}'")))
            })
            .collect()
    }

    async fn search(&self, context: &CustomerId, gaql: &str) -> Result<Vec<Value>, QueryError> {
        let mut rows = Vec::new();
        let mut page_token = None;

        loop {
            debug!(customer_id = %context, "issuing reporting query");
            let page = self.search_page(context, gaql, page_token).await?;
            rows.extend(page.results);
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(rows)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, QueryError> {
    request
        .send()
        .await
        .map_err(|err| QueryError::Transport(err.to_string()))
}

async fn check_status(
    response: Response,
    context: Option<&CustomerId>,
) -> Result<Response, QueryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(QueryError::Unauthenticated),
        StatusCode::FORBIDDEN => Err(QueryError::PermissionDenied {
            customer_id: context
                .map(|id| id.to_string())
                .unwrap_or_else(|| "accessible customers".to_string()),
        }),
        _ => {
            let message = response.text().await.unwrap_or_default();
            Err(QueryError::Api {
                status: status.as_u16(),
                message: message.trim().to_string(),
            })
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessibleCustomersResponse {
    #[serde(default)]
    resource_names: Vec<String>,
}
