use lineage_model::ResourceKind;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::LineageMcp;

/// Parameters shared by the listing tools.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListParams {
    /// AWS account id that owns the QuickSight resources.
    pub account_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

/// Tool error payload for a listing whose enumeration failed.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ListingFailure {
    pub resource_type: String,
    pub error: String,
}

impl LineageMcp {
    async fn list_kind(
        &self,
        kind: ResourceKind,
        params: ListParams,
    ) -> Result<CallToolResult, ErrorData> {
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        match control.list_names(kind).await {
            Ok(names) => Ok(CallToolResult::success(vec![Content::json(names)?])),
            Err(err) => {
                warn!(%kind, error = %err, "listing failed");
                Ok(CallToolResult::error(vec![Content::json(ListingFailure {
                    resource_type: kind.label().to_string(),
                    error: err.to_string(),
                })?]))
            }
        }
    }
}

#[tool_router(router = tool_router_listing, vis = "pub")]
impl LineageMcp {
    #[tool(description = "Map every dataset id in the account to its name.")]
    async fn list_datasets(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.list_kind(ResourceKind::DataSet, params).await
    }

    #[tool(description = "Map every data source id in the account to its name.")]
    async fn list_datasources(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.list_kind(ResourceKind::DataSource, params).await
    }

    #[tool(description = "Map every analysis id in the account to its name.")]
    async fn list_analyses(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.list_kind(ResourceKind::Analysis, params).await
    }

    #[tool(description = "Map every dashboard id in the account to its name.")]
    async fn list_dashboards(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.list_kind(ResourceKind::Dashboard, params).await
    }
}
