//! AWS Cost Optimization Hub integration.
//!
//! The SDK is async; [`HubClient`] owns a current-thread Tokio runtime and
//! blocks on one page fetch at a time, so the rest of the program stays a
//! plain synchronous pipeline.

use aws_config::BehaviorVersion;
use aws_sdk_costoptimizationhub::Client;
use aws_sdk_costoptimizationhub::config::Region;
use aws_sdk_costoptimizationhub::error::DisplayErrorContext;
use aws_sdk_costoptimizationhub::primitives::DateTimeFormat;
use aws_sdk_costoptimizationhub::types::{
    ActionType, Filter, ImplementationEffort, ResourceType, Tag,
};
use tokio::runtime::Runtime;

use crate::domain::{Page, Recommendation};
use crate::error::AppError;

/// Synchronous client for the recommendation listing endpoint.
pub struct HubClient {
    client: Client,
    runtime: Runtime,
}

impl HubClient {
    /// Build a client from ambient AWS configuration.
    ///
    /// Credentials and shared settings come from the SDK default chain
    /// (environment, shared config files, instance metadata); a `.env` file is
    /// honored if present. Only the region is pinned explicitly, since the hub
    /// is served out of a single region regardless of where resources live.
    pub fn from_env(region: &str) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::new(3, format!("Failed to start async runtime: {e}")))?;
        let config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );
        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }

    /// Lazily iterate pages of the filtered recommendation listing.
    ///
    /// Each `next()` performs exactly one synchronous page fetch; records keep
    /// API arrival order. The sequence is finite and non-restartable. A failed
    /// fetch yields the error and ends the iteration, because the next page
    /// token is lost with the failed response.
    pub fn pages(&self, filter: Filter) -> RecommendationPages<'_> {
        RecommendationPages {
            hub: self,
            filter,
            next_token: None,
            index: 0,
            done: false,
        }
    }

    fn fetch_page(
        &self,
        filter: &Filter,
        next_token: Option<String>,
    ) -> Result<(Vec<Recommendation>, Option<String>), AppError> {
        let output = self
            .runtime
            .block_on(
                self.client
                    .list_recommendations()
                    .filter(filter.clone())
                    .include_all_recommendations(true)
                    .set_next_token(next_token)
                    .send(),
            )
            .map_err(|e| {
                AppError::new(
                    4,
                    format!("ListRecommendations failed: {}", DisplayErrorContext(&e)),
                )
            })?;

        let records = output.items().iter().map(to_record).collect();
        Ok((records, output.next_token().map(str::to_string)))
    }
}

/// Lazy page iterator returned by [`HubClient::pages`].
pub struct RecommendationPages<'a> {
    hub: &'a HubClient,
    filter: Filter,
    next_token: Option<String>,
    index: usize,
    done: bool,
}

impl Iterator for RecommendationPages<'_> {
    type Item = Result<Page, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.hub.fetch_page(&self.filter, self.next_token.take()) {
            Ok((records, token)) => {
                let page = Page {
                    index: self.index,
                    records,
                };
                self.index += 1;
                self.done = token.is_none();
                self.next_token = token;
                Some(Ok(page))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// The static listing filter: every action type, effort level, and resource
/// type the hub reports on, with no account or tag restrictions.
pub fn default_filter() -> Filter {
    Filter::builder()
        .set_action_types(Some(vec![
            ActionType::Rightsize,
            ActionType::Stop,
            ActionType::Upgrade,
            ActionType::PurchaseSavingsPlans,
            ActionType::PurchaseReservedInstances,
            ActionType::MigrateToGraviton,
        ]))
        .set_implementation_efforts(Some(vec![
            ImplementationEffort::VeryLow,
            ImplementationEffort::Low,
            ImplementationEffort::Medium,
            ImplementationEffort::High,
            ImplementationEffort::VeryHigh,
        ]))
        .set_resource_types(Some(vec![
            ResourceType::Ec2Instance,
            ResourceType::LambdaFunction,
            ResourceType::EbsVolume,
            ResourceType::EcsService,
            ResourceType::Ec2AutoScalingGroup,
            ResourceType::Ec2InstanceSavingsPlans,
            ResourceType::ComputeSavingsPlans,
            ResourceType::SageMakerSavingsPlans,
            ResourceType::Ec2ReservedInstances,
            ResourceType::RdsReservedInstances,
            ResourceType::OpenSearchReservedInstances,
            ResourceType::RedshiftReservedInstances,
            ResourceType::ElastiCacheReservedInstances,
        ]))
        .build()
}

/// Flatten one SDK item into the domain record.
///
/// Direct passthrough: enums via `as_str`, timestamps rendered RFC 3339, tags
/// joined into a single cell. Absent fields stay `None`.
fn to_record(item: &aws_sdk_costoptimizationhub::types::Recommendation) -> Recommendation {
    Recommendation {
        account_id: item.account_id().map(str::to_string),
        action_type: item.action_type().map(|v| v.to_string()),
        currency_code: item.currency_code().map(str::to_string),
        current_resource_summary: item.current_resource_summary().map(str::to_string),
        current_resource_type: item.current_resource_type().map(|v| v.to_string()),
        estimated_monthly_cost: item.estimated_monthly_cost(),
        estimated_monthly_savings: item.estimated_monthly_savings(),
        estimated_savings_percentage: item.estimated_savings_percentage(),
        implementation_effort: item.implementation_effort().map(|v| v.to_string()),
        last_refresh_timestamp: item
            .last_refresh_timestamp()
            .and_then(|t| t.fmt(DateTimeFormat::DateTime).ok()),
        recommendation_id: item.recommendation_id().map(str::to_string),
        recommendation_lookback_period_in_days: item.recommendation_lookback_period_in_days(),
        recommended_resource_summary: item.recommended_resource_summary().map(str::to_string),
        recommended_resource_type: item.recommended_resource_type().map(|v| v.to_string()),
        region: item.region().map(str::to_string),
        resource_arn: item.resource_arn().map(str::to_string),
        resource_id: item.resource_id().map(str::to_string),
        restart_needed: item.restart_needed(),
        rollback_possible: item.rollback_possible(),
        source: item.source().map(|v| v.as_str().to_string()),
        tags: format_tags(item.tags()),
    }
}

/// Join resource tags into one `key=value;key=value` cell.
fn format_tags(tags: &[Tag]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    let joined = tags
        .iter()
        .map(|t| {
            format!(
                "{}={}",
                t.key().unwrap_or_default(),
                t.value().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(";");
    Some(joined)
}
