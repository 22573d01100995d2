//! Amazon QuickSight metadata source backed by `aws-sdk-quicksight`.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_quicksight::Client;
use aws_sdk_quicksight::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_types::region::Region;
use lineage_model::ResourceKind;
use lineage_model::schema::{
    ENVELOPE_DASHBOARD,
    ENVELOPE_DATA_SET,
    ENVELOPE_DATA_SOURCE,
    ENVELOPE_DEFINITION,
    FIELD_NAME,
    FIELD_NEXT_TOKEN,
    ID_ANALYSIS,
    list_items_field,
};
use serde_json::{Map, Value};
use tracing::debug;

use super::{ApiError, MetadataSource, convert};

/// Settings shared by every client the source builds.
#[derive(Debug, Clone, Default)]
pub struct QuickSightSettings {
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

impl QuickSightSettings {
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

/// Metadata source issuing QuickSight API calls for one region.
#[derive(Clone)]
pub struct QuickSightSource {
    client: Client,
    region: String,
}

impl QuickSightSource {
    /// Builds a client for `region` from the default AWS provider chain.
    ///
    /// Credentials are resolved lazily by the SDK on the first call, so a
    /// credential problem surfaces as a transport error of that call.
    pub async fn connect(region: &str, settings: &QuickSightSettings) -> Self {
        debug!(region, "building QuickSight client");
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(profile) = settings.profile.as_deref() {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = settings.endpoint_url.as_deref() {
            loader = loader.endpoint_url(endpoint_url);
        }
        let config = loader.load().await;
        Self {
            client: Client::new(&config),
            region: region.to_string(),
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    async fn list_data_sets(
        &self,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        let output = self
            .client
            .list_data_sets()
            .aws_account_id(account_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::DataSet.list_operation(), &err))?;
        let items = output
            .data_set_summaries()
            .iter()
            .map(convert::data_set_summary)
            .collect();
        Ok(page(ResourceKind::DataSet, items, output.next_token()))
    }

    async fn list_data_sources(
        &self,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        let output = self
            .client
            .list_data_sources()
            .aws_account_id(account_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::DataSource.list_operation(), &err))?;
        let items = output
            .data_sources()
            .iter()
            .map(convert::data_source_summary)
            .collect();
        Ok(page(ResourceKind::DataSource, items, output.next_token()))
    }

    async fn list_analyses(
        &self,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        let output = self
            .client
            .list_analyses()
            .aws_account_id(account_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::Analysis.list_operation(), &err))?;
        let items = output
            .analysis_summary_list()
            .iter()
            .map(convert::analysis_summary)
            .collect();
        Ok(page(ResourceKind::Analysis, items, output.next_token()))
    }

    async fn list_dashboards(
        &self,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        let output = self
            .client
            .list_dashboards()
            .aws_account_id(account_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::Dashboard.list_operation(), &err))?;
        let items = output
            .dashboard_summary_list()
            .iter()
            .map(convert::dashboard_summary)
            .collect();
        Ok(page(ResourceKind::Dashboard, items, output.next_token()))
    }

    async fn describe_data_set(&self, account_id: &str, id: &str) -> Result<Value, ApiError> {
        let output = self
            .client
            .describe_data_set()
            .aws_account_id(account_id)
            .data_set_id(id)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::DataSet.describe_operation(), &err))?;
        Ok(envelope(
            ENVELOPE_DATA_SET,
            output.data_set().map(convert::data_set),
        ))
    }

    async fn describe_data_source(&self, account_id: &str, id: &str) -> Result<Value, ApiError> {
        let output = self
            .client
            .describe_data_source()
            .aws_account_id(account_id)
            .data_source_id(id)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::DataSource.describe_operation(), &err))?;
        Ok(envelope(
            ENVELOPE_DATA_SOURCE,
            output.data_source().map(convert::data_source),
        ))
    }

    async fn describe_analysis(&self, account_id: &str, id: &str) -> Result<Value, ApiError> {
        let output = self
            .client
            .describe_analysis_definition()
            .aws_account_id(account_id)
            .analysis_id(id)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::Analysis.describe_operation(), &err))?;
        let mut response = envelope(
            ENVELOPE_DEFINITION,
            output.definition().map(convert::analysis_definition),
        );
        if let Value::Object(map) = &mut response {
            if let Some(analysis_id) = output.analysis_id() {
                map.insert(ID_ANALYSIS.to_string(), Value::String(analysis_id.to_string()));
            }
            if let Some(name) = output.name() {
                map.insert(FIELD_NAME.to_string(), Value::String(name.to_string()));
            }
        }
        Ok(response)
    }

    async fn describe_dashboard(&self, account_id: &str, id: &str) -> Result<Value, ApiError> {
        let output = self
            .client
            .describe_dashboard()
            .aws_account_id(account_id)
            .dashboard_id(id)
            .send()
            .await
            .map_err(|err| api_error(ResourceKind::Dashboard.describe_operation(), &err))?;
        Ok(envelope(
            ENVELOPE_DASHBOARD,
            output.dashboard().map(convert::dashboard),
        ))
    }
}

#[async_trait]
impl MetadataSource for QuickSightSource {
    async fn list_page(
        &self,
        kind: ResourceKind,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        match kind {
            ResourceKind::DataSet => self.list_data_sets(account_id, next_token).await,
            ResourceKind::DataSource => self.list_data_sources(account_id, next_token).await,
            ResourceKind::Analysis => self.list_analyses(account_id, next_token).await,
            ResourceKind::Dashboard => self.list_dashboards(account_id, next_token).await,
        }
    }

    async fn describe(
        &self,
        kind: ResourceKind,
        account_id: &str,
        resource_id: &str,
    ) -> Result<Value, ApiError> {
        match kind {
            ResourceKind::DataSet => self.describe_data_set(account_id, resource_id).await,
            ResourceKind::DataSource => self.describe_data_source(account_id, resource_id).await,
            ResourceKind::Analysis => self.describe_analysis(account_id, resource_id).await,
            ResourceKind::Dashboard => self.describe_dashboard(account_id, resource_id).await,
        }
    }
}

fn page(kind: ResourceKind, items: Vec<Value>, next_token: Option<&str>) -> Value {
    let mut map = Map::new();
    map.insert(list_items_field(kind).to_string(), Value::Array(items));
    if let Some(token) = next_token {
        map.insert(FIELD_NEXT_TOKEN.to_string(), Value::String(token.to_string()));
    }
    Value::Object(map)
}

fn envelope(key: &str, body: Option<Value>) -> Value {
    let mut map = Map::new();
    if let Some(body) = body {
        map.insert(key.to_string(), body);
    }
    Value::Object(map)
}

fn api_error<E, R>(operation: &'static str, err: &SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let service_error = err.as_service_error();
    let code = service_error
        .and_then(ProvideErrorMetadata::code)
        .map(str::to_string);
    let message = service_error
        .and_then(ProvideErrorMetadata::message)
        .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string);
    ApiError::new(operation, code, message)
}
