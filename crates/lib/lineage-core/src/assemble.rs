//! Projection of describe responses into lineage records.
//!
//! Each resource type has a fixed extraction schema applied the same way no
//! matter how much optional data the payload carries. Dependency links are
//! copied as raw ids and ARNs; nothing here checks that the referenced
//! resource exists.

use std::{error::Error, fmt};

use lineage_model::schema::{
    ENVELOPE_DASHBOARD,
    ENVELOPE_DATA_SET,
    ENVELOPE_DATA_SOURCE,
    ENVELOPE_DEFINITION,
    ENVELOPE_VERSION,
    FIELD_CALCULATED_FIELDS,
    FIELD_DATA_SET_ARNS,
    FIELD_DATA_SET_IDENTIFIER_DECLARATIONS,
    FIELD_DATA_SOURCE_PARAMETERS,
    FIELD_FILTER_GROUPS,
    FIELD_IMPORT_MODE,
    FIELD_LOGICAL_TABLE_MAP,
    FIELD_NAME,
    FIELD_OUTPUT_COLUMNS,
    FIELD_PARAMETER_DECLARATIONS,
    FIELD_PHYSICAL_TABLE_MAP,
    FIELD_SHEETS,
    FIELD_SOURCE_ENTITY_ARN,
    id_field,
};
use lineage_model::{
    AnalysisLineage,
    DashboardLineage,
    DataSetLineage,
    DataSourceLineage,
    ResourceKind,
    ResourceSummary,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    MissingField(String),
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(path) => write!(f, "response is missing required field {path}"),
        }
    }
}

impl Error for AssembleError {}

fn required<'a>(value: &'a Value, parent: &str, field: &str) -> Result<&'a Value, AssembleError> {
    value
        .get(field)
        .ok_or_else(|| AssembleError::MissingField(format!("{parent}.{field}")))
}

fn list_or_empty(value: Option<&Value>, field: &str) -> Value {
    value
        .and_then(|value| value.get(field))
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

/// Projects a `DescribeDataSet` response. The dataset envelope and all four
/// lineage fields are required.
///
/// # Errors
/// Returns `AssembleError::MissingField` naming the first absent field.
pub fn data_set(data_set_id: &str, response: &Value) -> Result<DataSetLineage, AssembleError> {
    let body = required(response, "response", ENVELOPE_DATA_SET)?;
    Ok(DataSetLineage {
        data_set_id: data_set_id.to_string(),
        physical_table_map: required(body, ENVELOPE_DATA_SET, FIELD_PHYSICAL_TABLE_MAP)?.clone(),
        logical_table_map: required(body, ENVELOPE_DATA_SET, FIELD_LOGICAL_TABLE_MAP)?.clone(),
        output_columns: required(body, ENVELOPE_DATA_SET, FIELD_OUTPUT_COLUMNS)?.clone(),
        import_mode: required(body, ENVELOPE_DATA_SET, FIELD_IMPORT_MODE)?.clone(),
    })
}

/// Projects a `DescribeDataSource` response. The envelope and the connection
/// parameters are required.
///
/// # Errors
/// Returns `AssembleError::MissingField` naming the first absent field.
pub fn data_source(
    data_source_id: &str,
    response: &Value,
) -> Result<DataSourceLineage, AssembleError> {
    let body = required(response, "response", ENVELOPE_DATA_SOURCE)?;
    Ok(DataSourceLineage {
        data_source_id: data_source_id.to_string(),
        data_source_parameters: required(body, ENVELOPE_DATA_SOURCE, FIELD_DATA_SOURCE_PARAMETERS)?
            .clone(),
    })
}

/// Projects a `DescribeAnalysisDefinition` response. Every part of the
/// definition is optional and defaults to an empty list.
#[must_use]
pub fn analysis(analysis_id: &str, response: &Value) -> AnalysisLineage {
    let definition = response.get(ENVELOPE_DEFINITION);
    AnalysisLineage {
        analysis_id: analysis_id.to_string(),
        data_set_identifier: list_or_empty(definition, FIELD_DATA_SET_IDENTIFIER_DECLARATIONS),
        sheets: list_or_empty(definition, FIELD_SHEETS),
        calculated_fields: list_or_empty(definition, FIELD_CALCULATED_FIELDS),
        parameter_declarations: list_or_empty(definition, FIELD_PARAMETER_DECLARATIONS),
        filter_groups: list_or_empty(definition, FIELD_FILTER_GROUPS),
    }
}

/// Projects a `DescribeDashboard` response from its published version. A
/// missing source analysis ARN becomes `""`; missing lists become `[]`.
#[must_use]
pub fn dashboard(dashboard_id: &str, response: &Value) -> DashboardLineage {
    let version = response
        .get(ENVELOPE_DASHBOARD)
        .and_then(|dashboard| dashboard.get(ENVELOPE_VERSION));
    DashboardLineage {
        dashboard_id: dashboard_id.to_string(),
        analysis_arn: version
            .and_then(|version| version.get(FIELD_SOURCE_ENTITY_ARN))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
        data_set_arns: list_or_empty(version, FIELD_DATA_SET_ARNS),
        sheets: list_or_empty(version, FIELD_SHEETS),
    }
}

/// Reduces a list entry to its id and display name. Entries without a string
/// id yield `None`; a missing name becomes `""`.
#[must_use]
pub fn summary(kind: ResourceKind, entry: &Value) -> Option<ResourceSummary> {
    let id = entry.get(id_field(kind)).and_then(Value::as_str)?;
    let name = entry
        .get(FIELD_NAME)
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(ResourceSummary {
        id: id.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value
            .as_object()
            .expect("record should serialize to an object")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn data_set_projection_drops_unlisted_fields() {
        let response = json!({
            "DataSet": {
                "DataSetId": "ds-1",
                "Arn": "arn:aws:quicksight:us-east-1:123:dataset/ds-1",
                "Name": "Orders",
                "PhysicalTableMap": {"t1": {"RelationalTable": {"DataSourceArn": "arn:src"}}},
                "LogicalTableMap": {"l1": {"Alias": "orders"}},
                "OutputColumns": [{"Name": "id", "Type": "INTEGER"}],
                "ImportMode": "SPICE",
                "Permissions": ["ignored"],
            },
            "RequestId": "r-1",
        });

        let record = data_set("ds-1", &response).expect("projection should succeed");
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(
            keys(&value),
            vec![
                "DataSetId",
                "ImportMode",
                "LogicalTableMap",
                "OutputColumns",
                "PhysicalTableMap",
            ]
        );
        assert_eq!(
            value["PhysicalTableMap"]["t1"]["RelationalTable"]["DataSourceArn"],
            json!("arn:src")
        );
    }

    #[test]
    fn data_set_requires_every_lineage_field() {
        let response = json!({
            "DataSet": {
                "PhysicalTableMap": {},
                "LogicalTableMap": {},
                "ImportMode": "DIRECT_QUERY",
            }
        });

        let err = data_set("ds-1", &response).expect_err("projection should fail");
        assert_eq!(
            err,
            AssembleError::MissingField("DataSet.OutputColumns".to_string())
        );
    }

    #[test]
    fn data_source_requires_parameters() {
        let ok = data_source(
            "src-1",
            &json!({"DataSource": {"DataSourceParameters": {"AthenaParameters": {"WorkGroup": "primary"}}}}),
        )
        .expect("projection should succeed");
        assert_eq!(
            ok.data_source_parameters,
            json!({"AthenaParameters": {"WorkGroup": "primary"}})
        );

        let err = data_source("src-1", &json!({"DataSource": {"Name": "uploads"}}))
            .expect_err("projection should fail");
        assert_eq!(
            err,
            AssembleError::MissingField("DataSource.DataSourceParameters".to_string())
        );
    }

    #[test]
    fn analysis_defaults_missing_definition_parts() {
        let record = analysis(
            "an-1",
            &json!({"Definition": {"CalculatedFields": [{"Name": "margin"}]}}),
        );
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(
            keys(&value),
            vec![
                "AnalysisId",
                "CalculatedFields",
                "DataSetIdentifier",
                "FilterGroups",
                "ParameterDeclarations",
                "Sheets",
            ]
        );
        assert_eq!(value["CalculatedFields"], json!([{"Name": "margin"}]));
        assert_eq!(value["Sheets"], json!([]));
    }

    #[test]
    fn dashboard_reads_published_version() {
        let record = dashboard(
            "db-1",
            &json!({
                "Dashboard": {
                    "Version": {
                        "SourceEntityArn": "arn:analysis/an-1",
                        "DataSetArns": ["arn:dataset/ds-1"],
                    }
                }
            }),
        );
        assert_eq!(record.analysis_arn, json!("arn:analysis/an-1"));
        assert_eq!(record.data_set_arns, json!(["arn:dataset/ds-1"]));
        assert_eq!(record.sheets, json!([]));

        let empty = dashboard("db-2", &json!({}));
        assert_eq!(empty.analysis_arn, json!(""));
    }

    #[test]
    fn summary_requires_string_id() {
        let entry = json!({"DataSetId": "a", "Name": "A", "Arn": "arn:a"});
        assert_eq!(
            summary(ResourceKind::DataSet, &entry),
            Some(ResourceSummary {
                id: "a".to_string(),
                name: "A".to_string(),
            })
        );
        assert_eq!(summary(ResourceKind::DataSet, &json!({"Name": "orphan"})), None);
        assert_eq!(
            summary(ResourceKind::Dashboard, &json!({"DashboardId": "d"}))
                .map(|summary| summary.name),
            Some(String::new())
        );
    }
}
