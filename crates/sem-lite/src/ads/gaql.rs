//! GAQL statements issued against the reporting API.

/// Enabled, non-manager accounts anywhere below the context customer.
pub const CHILD_LEAF_ACCOUNTS: &str = "\
SELECT customer_client.client_customer, customer_client.descriptive_name, \
customer_client.manager, customer_client.status \
FROM customer_client \
WHERE customer_client.manager = FALSE \
AND customer_client.status = 'ENABLED'";

/// The context customer's own identity record.
pub const SELF_ACCOUNT: &str = "\
SELECT customer.id, customer.descriptive_name, customer.manager \
FROM customer \
LIMIT 1";

pub const CAMPAIGN_PERFORMANCE: &str = "\
SELECT campaign.id, campaign.name, campaign.status, \
campaign.advertising_channel_type, campaign.bidding_strategy_type, \
campaign_budget.amount_micros, metrics.impressions, metrics.clicks, \
metrics.cost_micros, metrics.search_rank_lost_impression_share \
FROM campaign \
WHERE campaign.status = 'ENABLED' \
AND campaign.advertising_channel_type = 'SEARCH' \
AND segments.date DURING LAST_30_DAYS";

/// One row per ad; rows are collapsed to ad groups after validation.
pub const AD_GROUP_AD_PERFORMANCE: &str = "\
SELECT ad_group.id, ad_group.name, ad_group.campaign, ad_group.status, \
ad_group.type, ad_group_ad.ad_strength, metrics.impressions \
FROM ad_group_ad \
WHERE ad_group.status = 'ENABLED' \
AND campaign.status = 'ENABLED' \
AND segments.date DURING LAST_30_DAYS";
