use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::LineageMcp;

/// Payload listing the MCP commands this server exposes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands of this server.".to_string(),
                "health - Returns 'ok'.".to_string(),
                "quicksight_overview - Count datasets, data sources, analyses and dashboards."
                    .to_string(),
                "list_datasets - Map dataset ids to names.".to_string(),
                "list_datasources - Map data source ids to names.".to_string(),
                "list_analyses - Map analysis ids to names.".to_string(),
                "list_dashboards - Map dashboard ids to names.".to_string(),
                "analyze_dataset - Physical tables, logical transformations and output columns of a dataset."
                    .to_string(),
                "analyze_datasource - Connection parameters of a data source.".to_string(),
                "analyze_analysis - Dataset declarations, sheets and derived fields of an analysis."
                    .to_string(),
                "analyze_dashboard - Source analysis and bound datasets of a dashboard."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl LineageMcp {
    #[tool(description = "List the MCP commands of this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
