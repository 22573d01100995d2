use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{LineageMcp, helpers};

/// Parameters for analyzing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeDataSetParams {
    pub account_id: String,
    pub dataset_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

/// Parameters for analyzing a data source.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeDataSourceParams {
    pub account_id: String,
    pub datasource_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

/// Parameters for analyzing an analysis.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeAnalysisParams {
    pub account_id: String,
    pub analysis_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

/// Parameters for analyzing a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeDashboardParams {
    pub account_id: String,
    pub dashboard_id: String,
    /// AWS region; defaults to the server's configured region.
    pub region: Option<String>,
}

#[tool_router(router = tool_router_analyze, vis = "pub")]
impl LineageMcp {
    #[tool(
        description = "Describe a dataset: physical tables and their data sources, logical transformations, output columns and import mode."
    )]
    async fn analyze_dataset(
        &self,
        Parameters(params): Parameters<AnalyzeDataSetParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let dataset_id = helpers::require_non_empty("dataset_id", &params.dataset_id)?;
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        let lineage = control.analyze_data_set(dataset_id).await;
        Ok(CallToolResult::success(vec![Content::json(lineage)?]))
    }

    #[tool(description = "Describe a data source's connection parameters.")]
    async fn analyze_datasource(
        &self,
        Parameters(params): Parameters<AnalyzeDataSourceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let datasource_id = helpers::require_non_empty("datasource_id", &params.datasource_id)?;
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        let lineage = control.analyze_data_source(datasource_id).await;
        Ok(CallToolResult::success(vec![Content::json(lineage)?]))
    }

    #[tool(
        description = "Describe an analysis definition: dataset declarations, sheets, calculated fields, parameters and filter groups."
    )]
    async fn analyze_analysis(
        &self,
        Parameters(params): Parameters<AnalyzeAnalysisParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let analysis_id = helpers::require_non_empty("analysis_id", &params.analysis_id)?;
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        let lineage = control.analyze_analysis(analysis_id).await;
        Ok(CallToolResult::success(vec![Content::json(lineage)?]))
    }

    #[tool(
        description = "Describe a dashboard's published version: source analysis ARN, dataset ARNs and sheets."
    )]
    async fn analyze_dashboard(
        &self,
        Parameters(params): Parameters<AnalyzeDashboardParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let dashboard_id = helpers::require_non_empty("dashboard_id", &params.dashboard_id)?;
        let control = self
            .control_for(&params.account_id, params.region.as_deref())
            .await?;
        let lineage = control.analyze_dashboard(dashboard_id).await;
        Ok(CallToolResult::success(vec![Content::json(lineage)?]))
    }
}
