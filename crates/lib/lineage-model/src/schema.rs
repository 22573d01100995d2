use crate::models::ResourceKind;

pub const DEFAULT_REGION: &str = "us-east-1";

pub const FIELD_NEXT_TOKEN: &str = "NextToken";
pub const FIELD_NAME: &str = "Name";
pub const FIELD_ERROR: &str = "Error";

pub const LIST_DATA_SETS_ITEMS: &str = "DataSetSummaries";
pub const LIST_DATA_SOURCES_ITEMS: &str = "DataSources";
pub const LIST_ANALYSES_ITEMS: &str = "AnalysisSummaryList";
pub const LIST_DASHBOARDS_ITEMS: &str = "DashboardSummaryList";

pub const ID_DATA_SET: &str = "DataSetId";
pub const ID_DATA_SOURCE: &str = "DataSourceId";
pub const ID_ANALYSIS: &str = "AnalysisId";
pub const ID_DASHBOARD: &str = "DashboardId";

pub const ENVELOPE_DATA_SET: &str = "DataSet";
pub const ENVELOPE_DATA_SOURCE: &str = "DataSource";
pub const ENVELOPE_DEFINITION: &str = "Definition";
pub const ENVELOPE_DASHBOARD: &str = "Dashboard";
pub const ENVELOPE_VERSION: &str = "Version";

pub const FIELD_PHYSICAL_TABLE_MAP: &str = "PhysicalTableMap";
pub const FIELD_LOGICAL_TABLE_MAP: &str = "LogicalTableMap";
pub const FIELD_OUTPUT_COLUMNS: &str = "OutputColumns";
pub const FIELD_IMPORT_MODE: &str = "ImportMode";
pub const FIELD_DATA_SOURCE_PARAMETERS: &str = "DataSourceParameters";
pub const FIELD_DATA_SET_IDENTIFIER_DECLARATIONS: &str = "DataSetIdentifierDeclarations";
pub const FIELD_SHEETS: &str = "Sheets";
pub const FIELD_CALCULATED_FIELDS: &str = "CalculatedFields";
pub const FIELD_PARAMETER_DECLARATIONS: &str = "ParameterDeclarations";
pub const FIELD_FILTER_GROUPS: &str = "FilterGroups";
pub const FIELD_SOURCE_ENTITY_ARN: &str = "SourceEntityArn";
pub const FIELD_DATA_SET_ARNS: &str = "DataSetArns";

/// Name of the array holding summaries in a list response for `kind`.
#[must_use]
pub const fn list_items_field(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::DataSet => LIST_DATA_SETS_ITEMS,
        ResourceKind::DataSource => LIST_DATA_SOURCES_ITEMS,
        ResourceKind::Analysis => LIST_ANALYSES_ITEMS,
        ResourceKind::Dashboard => LIST_DASHBOARDS_ITEMS,
    }
}

/// Name of the identifier field for `kind`, in summaries and lineage records.
#[must_use]
pub const fn id_field(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::DataSet => ID_DATA_SET,
        ResourceKind::DataSource => ID_DATA_SOURCE,
        ResourceKind::Analysis => ID_ANALYSIS,
        ResourceKind::Dashboard => ID_DASHBOARD,
    }
}
