use reqwest::Client;

use crate::ads::{
    Credentials, CustomerId, DemoAdsClient, GoogleAdsClient, QueryError, QueryFactory,
};
use crate::config::GoogleAdsConfig;

/// Builds live reporting clients sharing one connection pool.
#[derive(Debug, Clone)]
pub struct GoogleAdsQueryFactory {
    http: Client,
    config: GoogleAdsConfig,
}

impl GoogleAdsQueryFactory {
    pub fn new(config: GoogleAdsConfig) -> Result<Self, QueryError> {
        let http = GoogleAdsClient::http_client(&config)?;
        Ok(Self { http, config })
    }
}

impl QueryFactory for GoogleAdsQueryFactory {
    type Query = GoogleAdsClient;

    fn connect(&self, credentials: Option<Credentials>) -> Result<Option<Self::Query>, QueryError> {
        let Some(credentials) = credentials else {
            return Ok(None);
        };
        GoogleAdsClient::new(self.http.clone(), &self.config, credentials).map(Some)
    }

    fn default_customer(&self) -> Option<CustomerId> {
        self.config.default_customer_id.clone()
    }
}

/// Serves the built-in demo fixture to every request, signed in or not.
#[derive(Debug, Clone, Default)]
pub struct DemoQueryFactory;

impl QueryFactory for DemoQueryFactory {
    type Query = DemoAdsClient;

    fn connect(&self, _credentials: Option<Credentials>) -> Result<Option<Self::Query>, QueryError> {
        Ok(Some(DemoAdsClient::new()))
    }

    fn default_customer(&self) -> Option<CustomerId> {
        CustomerId::parse(DemoAdsClient::DEFAULT_CUSTOMER)
    }
}
