//! MCP server implementation for quicksight-lineage.
//!
//! This crate wires the lineage control plane into rmcp tool handlers and
//! exposes the overview, listing and analysis tools.

mod helpers;
mod tools;
pub mod server;

use lineage_core::control::LineageControlPlane;
use lineage_core::services::SourceFactory;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

pub use tools::context::HelpCommands;

const SERVER_INSTRUCTIONS: &str = r"quicksight-lineage exposes read-only lineage queries over Amazon QuickSight metadata.

Lineage chain: Dashboard -> Analysis -> DataSet -> DataSource.

Workflow:
1. Call `quicksight_overview` with an `account_id` to see how many datasets, data sources,
   analyses and dashboards exist.
2. Enumerate ids with `list_datasets`, `list_datasources`, `list_analyses` or `list_dashboards`.
   Each returns a map of id to display name.
3. Walk the chain with the analyze tools:
   - `analyze_dashboard` returns the source analysis ARN and the dataset ARNs it binds.
   - `analyze_analysis` returns dataset declarations, sheets, calculated fields, parameters and filters.
   - `analyze_dataset` returns physical tables, logical transformations, output columns and import mode.
   - `analyze_datasource` returns the connection parameters of a data source.

Notes:
- `region` is optional on every tool and defaults to the server's configured region.
- ARNs in dashboard and analysis records end in the id of the referenced resource.
- A failed lookup returns `{<IdField>, Error}` instead of the record.
- `health` returns `ok`; `help` lists every tool.";

/// MCP server wrapper around the source factory and tool routers.
#[derive(Clone)]
pub struct LineageMcp {
    tool_router: ToolRouter<Self>,
    factory: SourceFactory,
}

impl LineageMcp {
    #[must_use]
    pub fn new(factory: SourceFactory) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_overview()
            + Self::tool_router_listing()
            + Self::tool_router_analyze()
            + Self::tool_router_context();
        Self {
            tool_router,
            factory,
        }
    }

    #[must_use]
    pub fn default_region(&self) -> &str {
        self.factory.default_region()
    }

    /// Validates the account id and builds a control plane over a fresh
    /// source for the requested region.
    pub(crate) async fn control_for(
        &self,
        account_id: &str,
        region: Option<&str>,
    ) -> Result<LineageControlPlane, ErrorData> {
        let account_id = helpers::require_non_empty("account_id", account_id)?;
        self.factory
            .control_plane(account_id, region)
            .await
            .map_err(helpers::map_source_err)
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl LineageMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for LineageMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
