use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FIELD_ERROR, id_field};

/// Resource types that take part in the lineage chain
/// Dashboard -> Analysis -> `DataSet` -> `DataSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    DataSet,
    DataSource,
    Analysis,
    Dashboard,
}

impl ResourceKind {
    /// Enumeration order used by the overview.
    pub const ALL: [Self; 4] = [Self::DataSet, Self::DataSource, Self::Analysis, Self::Dashboard];

    /// Plural label used in counts, errors and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DataSet => "datasets",
            Self::DataSource => "datasources",
            Self::Analysis => "analyses",
            Self::Dashboard => "dashboards",
        }
    }

    #[must_use]
    pub const fn list_operation(self) -> &'static str {
        match self {
            Self::DataSet => "ListDataSets",
            Self::DataSource => "ListDataSources",
            Self::Analysis => "ListAnalyses",
            Self::Dashboard => "ListDashboards",
        }
    }

    #[must_use]
    pub const fn describe_operation(self) -> &'static str {
        match self {
            Self::DataSet => "DescribeDataSet",
            Self::DataSource => "DescribeDataSource",
            Self::Analysis => "DescribeAnalysisDefinition",
            Self::Dashboard => "DescribeDashboard",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity projection of a list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
}

/// Lineage fields of a dataset: its extraction sources, transformation layers
/// and exposed columns.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetLineage {
    pub data_set_id: String,
    pub physical_table_map: Value,
    pub logical_table_map: Value,
    pub output_columns: Value,
    pub import_mode: Value,
}

/// Connection parameters of a data source. Data sources are the leaves of the
/// lineage chain.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DataSourceLineage {
    pub data_source_id: String,
    pub data_source_parameters: Value,
}

/// Dataset bindings and derived definitions of an analysis.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisLineage {
    pub analysis_id: String,
    pub data_set_identifier: Value,
    pub sheets: Value,
    pub calculated_fields: Value,
    pub parameter_declarations: Value,
    pub filter_groups: Value,
}

/// Source analysis and bound datasets of a published dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardLineage {
    pub dashboard_id: String,
    pub analysis_arn: Value,
    pub data_set_arns: Value,
    pub sheets: Value,
}

/// Record produced when a detail lookup fails. Serializes as exactly
/// `{<IdField>: id, "Error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub kind: ResourceKind,
    pub id: String,
    pub error: String,
}

impl LookupFailure {
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            error: error.into(),
        }
    }
}

impl Serialize for LookupFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(id_field(self.kind), &self.id)?;
        map.serialize_entry(FIELD_ERROR, &self.error)?;
        map.end()
    }
}

/// Outcome of a detail lookup. Every lookup yields one of the two shapes; a
/// failure never aborts the caller.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Lineage<T> {
    Resolved(T),
    Failed(LookupFailure),
}

impl<T> Lineage<T> {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub const fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(record) => Some(record),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&LookupFailure> {
        match self {
            Self::Resolved(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// Resource counts reported by the overview. `errors` lists the kinds whose
/// enumeration failed and is omitted when every kind succeeded.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ResourceCounts {
    pub datasets_count: usize,
    pub datasources_count: usize,
    pub analyses_count: usize,
    pub dashboards_count: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl ResourceCounts {
    pub fn set_count(&mut self, kind: ResourceKind, count: usize) {
        match kind {
            ResourceKind::DataSet => self.datasets_count = count,
            ResourceKind::DataSource => self.datasources_count = count,
            ResourceKind::Analysis => self.analyses_count = count,
            ResourceKind::Dashboard => self.dashboards_count = count,
        }
    }

    #[must_use]
    pub const fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::DataSet => self.datasets_count,
            ResourceKind::DataSource => self.datasources_count,
            ResourceKind::Analysis => self.analyses_count,
            ResourceKind::Dashboard => self.dashboards_count,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_serializes_id_field_and_error_only() {
        let failure = LookupFailure::new(ResourceKind::Analysis, "a-1", "boom");
        let value = serde_json::to_value(Lineage::<AnalysisLineage>::Failed(failure))
            .expect("failure should serialize");
        assert_eq!(value, json!({"AnalysisId": "a-1", "Error": "boom"}));
    }

    #[test]
    fn data_set_lineage_uses_wire_names() {
        let record = DataSetLineage {
            data_set_id: "ds".to_string(),
            physical_table_map: json!({}),
            logical_table_map: json!({}),
            output_columns: json!([]),
            import_mode: json!("SPICE"),
        };
        let value = serde_json::to_value(Lineage::Resolved(record)).expect("record should serialize");
        let mut keys: Vec<_> = value
            .as_object()
            .expect("record should be an object")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "DataSetId",
                "ImportMode",
                "LogicalTableMap",
                "OutputColumns",
                "PhysicalTableMap",
            ]
        );
    }

    #[test]
    fn counts_omit_errors_when_complete() {
        let mut counts = ResourceCounts::default();
        counts.set_count(ResourceKind::Dashboard, 3);
        let value = serde_json::to_value(&counts).expect("counts should serialize");
        assert_eq!(
            value,
            json!({
                "datasets_count": 0,
                "datasources_count": 0,
                "analyses_count": 0,
                "dashboards_count": 3,
            })
        );
    }
}
