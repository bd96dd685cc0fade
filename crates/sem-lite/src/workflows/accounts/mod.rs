//! Discovery of queryable leaf accounts beneath the accounts a credential can reach.

use crate::ads::gaql;
use crate::ads::rows::{parse_hierarchy_row, parse_self_row};
use crate::ads::{Account, AdsQuery, CustomerId, QueryError};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Fatal resolution failures. Per-account problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unauthorized: the credential was rejected")]
    Unauthorized,
    #[error("could not list accessible accounts: {0}")]
    Listing(QueryError),
}

/// Marker for a lookup aborted because the credential itself was rejected.
struct CredentialRejected;

/// Walks manager/client hierarchies and flattens them into unique leaf accounts.
pub struct AccountHierarchyResolver<Q: ?Sized> {
    query: Arc<Q>,
}

impl<Q> AccountHierarchyResolver<Q>
where
    Q: AdsQuery + ?Sized,
{
    pub fn new(query: Arc<Q>) -> Self {
        Self { query }
    }

    /// Lists the credential's top-level accounts, then resolves each of them.
    pub async fn resolve_accessible(&self) -> Result<Vec<Account>, ResolveError> {
        let top_level = self
            .query
            .list_accessible_customers()
            .await
            .map_err(|err| {
                if err.is_unauthenticated() {
                    ResolveError::Unauthorized
                } else {
                    ResolveError::Listing(err)
                }
            })?;

        self.resolve(&top_level).await
    }

    /// Leaf accounts reachable from `top_level`, in input order, first occurrence kept.
    ///
    /// Lookups run concurrently; results are merged in the order of `top_level` so the
    /// dedup outcome never depends on which query finished first.
    pub async fn resolve(&self, top_level: &[CustomerId]) -> Result<Vec<Account>, ResolveError> {
        let lookups = join_all(top_level.iter().map(|id| self.leaves_under(id))).await;

        let mut discovered = Vec::new();
        for lookup in lookups {
            match lookup {
                Ok(leaves) => discovered.extend(leaves),
                Err(CredentialRejected) => return Err(ResolveError::Unauthorized),
            }
        }

        let discovered_count = discovered.len();
        let accounts = dedup_accounts(discovered);
        info!(
            top_level = top_level.len(),
            discovered = discovered_count,
            unique = accounts.len(),
            "resolved leaf accounts"
        );

        Ok(accounts)
    }

    async fn leaves_under(&self, top: &CustomerId) -> Result<Vec<Account>, CredentialRejected> {
        match self.query.search(top, gaql::CHILD_LEAF_ACCOUNTS).await {
            Ok(rows) => {
                let leaves: Vec<Account> = rows
                    .into_iter()
                    .filter_map(|row| match parse_hierarchy_row(row) {
                        Ok(child) if !child.manager => {
                            Some(Account::new(child.client_id, child.descriptive_name))
                        }
                        Ok(_) => None,
                        Err(err) => {
                            warn!(customer_id = %top, error = %err, "skipping hierarchy row");
                            None
                        }
                    })
                    .collect();

                if !leaves.is_empty() {
                    return Ok(leaves);
                }
                debug!(customer_id = %top, "hierarchy query found no leaves; checking self record");
            }
            Err(err) if err.is_unauthenticated() => return Err(CredentialRejected),
            Err(err) => {
                warn!(customer_id = %top, error = %err, "hierarchy query failed; checking self record");
            }
        }

        self.self_as_leaf(top)
            .await
            .map(|leaf| leaf.into_iter().collect())
    }

    async fn self_as_leaf(&self, top: &CustomerId) -> Result<Option<Account>, CredentialRejected> {
        let rows = match self.query.search(top, gaql::SELF_ACCOUNT).await {
            Ok(rows) => rows,
            Err(err) if err.is_unauthenticated() => return Err(CredentialRejected),
            Err(err) => {
                warn!(customer_id = %top, error = %err, "self query failed; skipping account");
                return Ok(None);
            }
        };

        let Some(row) = rows.into_iter().next() else {
            warn!(customer_id = %top, "self query returned no record; skipping account");
            return Ok(None);
        };

        match parse_self_row(row) {
            Ok(own) if own.manager => {
                warn!(customer_id = %top, "manager account has no reachable leaves; skipping");
                Ok(None)
            }
            Ok(own) => Ok(Some(Account::new(own.id, own.descriptive_name))),
            Err(err) => {
                warn!(customer_id = %top, error = %err, "invalid self record; skipping account");
                Ok(None)
            }
        }
    }
}

/// Keeps the first account seen for every id, preserving order.
pub fn dedup_accounts(accounts: Vec<Account>) -> Vec<Account> {
    let mut seen = HashSet::new();
    accounts
        .into_iter()
        .filter(|account| seen.insert(account.id.clone()))
        .collect()
}
