use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::LineageMcp;

/// Parameters for counting the resources of an account.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OverviewParams {
    /// AWS account id that owns the QuickSight resources.
    pub account_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

#[tool_router(router = tool_router_overview, vis = "pub")]
impl LineageMcp {
    #[tool(
        description = "Count the datasets, data sources, analyses and dashboards of a QuickSight account. Kinds that could not be enumerated are reported under `errors`."
    )]
    async fn quicksight_overview(
        &self,
        Parameters(params): Parameters<OverviewParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        let counts = control.overview().await;
        Ok(CallToolResult::success(vec![Content::json(counts)?]))
    }
}
