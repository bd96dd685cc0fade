use super::domain::CustomerId;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// OAuth access token for the signed-in user, injected per request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    pub fn bearer(access_token: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            None
        } else {
            Some(Self { access_token })
        }
    }

    /// Parses an `Authorization: Bearer <token>` header value.
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if scheme.eq_ignore_ascii_case("bearer") {
            Self::bearer(token)
        } else {
            None
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Failure reported by the credentialed query capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("credential rejected by the advertising platform")]
    Unauthenticated,
    #[error("permission denied for customer {customer_id}")]
    PermissionDenied { customer_id: String },
    #[error("advertising API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("advertising API unreachable: {0}")]
    Transport(String),
    #[error("unexpected advertising API payload: {0}")]
    Decode(String),
    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),
}

impl QueryError {
    /// True when the credential itself is bad, as opposed to a single account failing.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, QueryError::Unauthenticated)
    }
}

/// Credentialed access to the reporting API.
///
/// `search` runs a GAQL query with `context` used both as the target customer and as
/// the login-customer-id, returning loosely typed result rows for the caller to validate.
#[async_trait]
pub trait AdsQuery: Send + Sync {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError>;

    async fn search(&self, context: &CustomerId, gaql: &str) -> Result<Vec<Value>, QueryError>;
}

#[async_trait]
impl<T> AdsQuery for Arc<T>
where
    T: AdsQuery + ?Sized,
{
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        (**self).list_accessible_customers().await
    }

    async fn search(&self, context: &CustomerId, gaql: &str) -> Result<Vec<Value>, QueryError> {
        (**self).search(context, gaql).await
    }
}

/// Builds a query capability for one request's credentials.
///
/// Returns `None` when the request cannot be served, e.g. no credential was supplied
/// outside of demo mode.
pub trait QueryFactory: Send + Sync + 'static {
    type Query: AdsQuery + 'static;

    fn connect(&self, credentials: Option<Credentials>) -> Result<Option<Self::Query>, QueryError>;

    fn default_customer(&self) -> Option<CustomerId> {
        None
    }
}
