use super::*;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Hierarchy,
    SelfRecord,
}

/// Reporting double answering from a per-(customer, query) script.
#[derive(Default)]
struct ScriptedQuery {
    listing: Option<Result<Vec<&'static str>, QueryError>>,
    responses: HashMap<(String, Kind), Result<Vec<Value>, QueryError>>,
    yields: HashMap<String, usize>,
    calls: Mutex<Vec<(String, Kind)>>,
}

impl ScriptedQuery {
    fn hierarchy(mut self, customer: &str, rows: Vec<Value>) -> Self {
        self.responses
            .insert((customer.to_string(), Kind::Hierarchy), Ok(rows));
        self
    }

    fn hierarchy_fails(mut self, customer: &str, error: QueryError) -> Self {
        self.responses
            .insert((customer.to_string(), Kind::Hierarchy), Err(error));
        self
    }

    fn own_record(mut self, customer: &str, name: &str, manager: bool) -> Self {
        self.responses.insert(
            (customer.to_string(), Kind::SelfRecord),
            Ok(vec![json!({
                "customer": { "id": customer, "descriptiveName": name, "manager": manager }
            })]),
        );
        self
    }

    fn own_record_fails(mut self, customer: &str, error: QueryError) -> Self {
        self.responses
            .insert((customer.to_string(), Kind::SelfRecord), Err(error));
        self
    }

    fn slow(mut self, customer: &str, yields: usize) -> Self {
        self.yields.insert(customer.to_string(), yields);
        self
    }

    fn listing(mut self, listing: Result<Vec<&'static str>, QueryError>) -> Self {
        self.listing = Some(listing);
        self
    }

    fn calls_for(&self, kind: Kind) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(_, called)| *called == kind)
            .map(|(customer, _)| customer.clone())
            .collect()
    }
}

#[async_trait]
impl AdsQuery for ScriptedQuery {
    async fn list_accessible_customers(&self) -> Result<Vec<CustomerId>, QueryError> {
        match self.listing.clone().unwrap_or_else(|| Ok(Vec::new())) {
            Ok(ids) => Ok(ids.into_iter().map(ids_of).collect()),
            Err(error) => Err(error),
        }
    }

    async fn search(&self, context: &CustomerId, gaql: &str) -> Result<Vec<Value>, QueryError> {
        let kind = if gaql == gaql::CHILD_LEAF_ACCOUNTS {
            Kind::Hierarchy
        } else if gaql == gaql::SELF_ACCOUNT {
            Kind::SelfRecord
        } else {
            panic!("unexpected query: {gaql}");
        };
        self.calls
            .lock()
            .expect("calls lock")
            .push((context.as_str().to_string(), kind));

        for _ in 0..self.yields.get(context.as_str()).copied().unwrap_or(0) {
            tokio::task::yield_now().await;
        }

        self.responses
            .get(&(context.as_str().to_string(), kind))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn ids_of(raw: &str) -> CustomerId {
    CustomerId::parse(raw).expect("valid customer id")
}

fn ids(raw: &[&str]) -> Vec<CustomerId> {
    raw.iter().map(|id| ids_of(id)).collect()
}

fn client(id: &str, name: &str, manager: bool) -> Value {
    json!({
        "customerClient": {
            "clientCustomer": format!("customers/{id}"),
            "descriptiveName": name,
            "manager": manager,
            "status": "ENABLED"
        }
    })
}

fn summary(accounts: &[Account]) -> Vec<(String, String)> {
    accounts
        .iter()
        .map(|account| (account.id.as_str().to_string(), account.name.clone()))
        .collect()
}

fn resolver(query: ScriptedQuery) -> (AccountHierarchyResolver<ScriptedQuery>, Arc<ScriptedQuery>) {
    let query = Arc::new(query);
    (AccountHierarchyResolver::new(Arc::clone(&query)), query)
}

#[tokio::test]
async fn shared_leaf_keeps_first_manager_entry() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy("1", vec![client("100", "X", false)])
            .hierarchy("2", vec![client("100", "X-dup", false), client("200", "Y", false)]),
    );

    let accounts = resolver.resolve(&ids(&["1", "2"])).await.expect("resolves");

    assert_eq!(
        summary(&accounts),
        vec![
            ("100".to_string(), "X".to_string()),
            ("200".to_string(), "Y".to_string())
        ]
    );
}

#[tokio::test]
async fn nested_managers_are_excluded() {
    let (resolver, _) = resolver(ScriptedQuery::default().hierarchy(
        "1",
        vec![client("10", "Sub-manager", true), client("11", "Leaf", false)],
    ));

    let accounts = resolver.resolve(&ids(&["1"])).await.expect("resolves");

    assert_eq!(summary(&accounts), vec![("11".to_string(), "Leaf".to_string())]);
}

#[tokio::test]
async fn empty_hierarchy_falls_back_to_own_record() {
    let (resolver, query) = resolver(
        ScriptedQuery::default()
            .hierarchy("3", Vec::new())
            .own_record("3", "Standalone", false),
    );

    let accounts = resolver.resolve(&ids(&["3"])).await.expect("resolves");

    assert_eq!(summary(&accounts), vec![("3".to_string(), "Standalone".to_string())]);
    assert_eq!(query.calls_for(Kind::SelfRecord), vec!["3".to_string()]);
}

#[tokio::test]
async fn failed_hierarchy_query_falls_back_to_own_record() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy_fails(
                "4",
                QueryError::Api {
                    status: 400,
                    message: "customer_client not queryable".to_string(),
                },
            )
            .own_record("4", "Direct", false),
    );

    let accounts = resolver.resolve(&ids(&["4"])).await.expect("resolves");

    assert_eq!(summary(&accounts), vec![("4".to_string(), "Direct".to_string())]);
}

#[tokio::test]
async fn manager_without_leaves_contributes_nothing() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy("5", vec![client("50", "Only managers", true)])
            .own_record("5", "Empty MCC", true),
    );

    let accounts = resolver.resolve(&ids(&["5"])).await.expect("resolves");

    assert!(accounts.is_empty());
}

#[tokio::test]
async fn one_failing_account_does_not_affect_the_others() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy("1", vec![client("100", "X", false)])
            .hierarchy_fails(
                "6",
                QueryError::PermissionDenied {
                    customer_id: "6".to_string(),
                },
            )
            .own_record_fails("6", QueryError::Transport("connection reset".to_string()))
            .hierarchy("2", vec![client("200", "Y", false)]),
    );

    let accounts = resolver
        .resolve(&ids(&["1", "6", "2"]))
        .await
        .expect("resolves");

    assert_eq!(
        summary(&accounts),
        vec![
            ("100".to_string(), "X".to_string()),
            ("200".to_string(), "Y".to_string())
        ]
    );
}

#[tokio::test]
async fn malformed_rows_are_skipped() {
    let (resolver, _) = resolver(ScriptedQuery::default().hierarchy(
        "1",
        vec![
            json!({ "customerClient": { "clientCustomer": "customers/" } }),
            json!({ "unexpected": true }),
            client("101", "Kept", false),
        ],
    ));

    let accounts = resolver.resolve(&ids(&["1"])).await.expect("resolves");

    assert_eq!(summary(&accounts), vec![("101".to_string(), "Kept".to_string())]);
}

#[tokio::test]
async fn missing_name_gets_placeholder() {
    let (resolver, _) = resolver(ScriptedQuery::default().hierarchy(
        "1",
        vec![json!({ "customerClient": { "clientCustomer": "customers/777", "manager": false } })],
    ));

    let accounts = resolver.resolve(&ids(&["1"])).await.expect("resolves");

    assert_eq!(accounts[0].name, "Account 777");
}

#[tokio::test]
async fn rejected_credential_is_fatal() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy("1", vec![client("100", "X", false)])
            .hierarchy_fails("2", QueryError::Unauthenticated),
    );

    let error = resolver
        .resolve(&ids(&["1", "2"]))
        .await
        .expect_err("credential rejected");

    assert!(matches!(error, ResolveError::Unauthorized));
}

#[tokio::test]
async fn merge_order_follows_input_not_completion() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .hierarchy("1", vec![client("100", "From first", false)])
            .hierarchy("2", vec![client("100", "From second", false)])
            .slow("1", 16),
    );

    let accounts = resolver.resolve(&ids(&["1", "2"])).await.expect("resolves");

    assert_eq!(
        summary(&accounts),
        vec![("100".to_string(), "From first".to_string())]
    );
}

#[tokio::test]
async fn empty_input_resolves_to_nothing() {
    let (resolver, query) = resolver(ScriptedQuery::default());

    let accounts = resolver.resolve(&[]).await.expect("resolves");

    assert!(accounts.is_empty());
    assert!(query.calls_for(Kind::Hierarchy).is_empty());
}

#[tokio::test]
async fn accessible_listing_feeds_resolution() {
    let (resolver, _) = resolver(
        ScriptedQuery::default()
            .listing(Ok(vec!["1", "3"]))
            .hierarchy("1", vec![client("100", "X", false)])
            .own_record("3", "Standalone", false),
    );

    let accounts = resolver.resolve_accessible().await.expect("resolves");

    assert_eq!(
        summary(&accounts),
        vec![
            ("100".to_string(), "X".to_string()),
            ("3".to_string(), "Standalone".to_string())
        ]
    );
}

#[tokio::test]
async fn listing_failures_are_classified() {
    let (unauthorized, _) =
        resolver(ScriptedQuery::default().listing(Err(QueryError::Unauthenticated)));
    assert!(matches!(
        unauthorized.resolve_accessible().await,
        Err(ResolveError::Unauthorized)
    ));

    let (broken, _) = resolver(
        ScriptedQuery::default().listing(Err(QueryError::Transport("timeout".to_string()))),
    );
    assert!(matches!(
        broken.resolve_accessible().await,
        Err(ResolveError::Listing(QueryError::Transport(_)))
    ));
}

#[tokio::test]
async fn demo_fixture_resolves_manager_children_and_standalone() {
    let resolver = AccountHierarchyResolver::new(Arc::new(crate::ads::DemoAdsClient::new()));

    let accounts = resolver.resolve_accessible().await.expect("resolves");

    let ids: Vec<&str> = accounts.iter().map(|account| account.id.as_str()).collect();
    assert_eq!(ids, vec!["1234567890", "0987654321", "1122334455"]);
}

#[test]
fn dedup_keeps_first_occurrence() {
    let accounts = dedup_accounts(vec![
        Account::new(ids_of("1"), Some("a".to_string())),
        Account::new(ids_of("2"), None),
        Account::new(ids_of("1"), Some("b".to_string())),
    ]);

    assert_eq!(
        summary(&accounts),
        vec![
            ("1".to_string(), "a".to_string()),
            ("2".to_string(), "Account 2".to_string())
        ]
    );
}
