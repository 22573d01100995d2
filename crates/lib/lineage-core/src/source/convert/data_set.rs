use aws_sdk_quicksight::types::{
    CalculatedColumn,
    ColumnDescription,
    ColumnTag,
    DataSet,
    InputColumn,
    JoinInstruction,
    JoinKeyProperties,
    LogicalTable,
    LogicalTableSource,
    OutputColumn,
    PhysicalTable,
    TablePathElement,
    TransformOperation,
    UploadSettings,
};
use lineage_model::schema::{
    FIELD_IMPORT_MODE,
    FIELD_LOGICAL_TABLE_MAP,
    FIELD_NAME,
    FIELD_OUTPUT_COLUMNS,
    FIELD_PHYSICAL_TABLE_MAP,
    ID_DATA_SET,
};
use serde_json::Value;

use super::{Fields, Wire, array, tagged, unlisted_member};

pub(crate) fn data_set(data_set: &DataSet) -> Value {
    let mut fields = Fields::new()
        .put(ID_DATA_SET, data_set.data_set_id())
        .put(FIELD_NAME, data_set.name())
        .put("Arn", data_set.arn());

    if let Some(tables) = data_set.physical_table_map() {
        let map = tables
            .iter()
            .map(|(table_id, table)| (table_id.clone(), physical_table(table)))
            .collect();
        fields = fields.put_value(FIELD_PHYSICAL_TABLE_MAP, Value::Object(map));
    }
    if let Some(tables) = data_set.logical_table_map() {
        let map = tables
            .iter()
            .map(|(table_id, table)| (table_id.clone(), logical_table(table)))
            .collect();
        fields = fields.put_value(FIELD_LOGICAL_TABLE_MAP, Value::Object(map));
    }

    fields
        .put_value(FIELD_OUTPUT_COLUMNS, array(data_set.output_columns(), output_column))
        .put(FIELD_IMPORT_MODE, data_set.import_mode())
        .build()
}

fn physical_table(table: &PhysicalTable) -> Value {
    match table {
        PhysicalTable::RelationalTable(relational) => tagged(
            "RelationalTable",
            Fields::new()
                .put("DataSourceArn", relational.data_source_arn())
                .put("Catalog", relational.catalog())
                .put("Schema", relational.schema())
                .put(FIELD_NAME, relational.name())
                .put_value("InputColumns", array(relational.input_columns(), input_column))
                .build(),
        ),
        PhysicalTable::CustomSql(custom) => tagged(
            "CustomSql",
            Fields::new()
                .put("DataSourceArn", custom.data_source_arn())
                .put(FIELD_NAME, custom.name())
                .put("SqlQuery", custom.sql_query())
                .put_list("Columns", custom.columns(), input_column)
                .build(),
        ),
        PhysicalTable::S3Source(s3) => tagged(
            "S3Source",
            Fields::new()
                .put("DataSourceArn", s3.data_source_arn())
                .put_nested("UploadSettings", s3.upload_settings(), upload_settings)
                .put_value("InputColumns", array(s3.input_columns(), input_column))
                .build(),
        ),
        PhysicalTable::SaaSTable(saas) => tagged(
            "SaaSTable",
            Fields::new()
                .put("DataSourceArn", saas.data_source_arn())
                .put_value("TablePath", array(saas.table_path(), table_path_element))
                .put_value("InputColumns", array(saas.input_columns(), input_column))
                .build(),
        ),
        other => unlisted_member(other),
    }
}

fn upload_settings(settings: &UploadSettings) -> Value {
    Fields::new()
        .put("Format", settings.format())
        .put("StartFromRow", settings.start_from_row())
        .put("ContainsHeader", settings.contains_header())
        .put("TextQualifier", settings.text_qualifier())
        .put("Delimiter", settings.delimiter())
        .put("CustomCellAddressRange", settings.custom_cell_address_range())
        .build()
}

fn table_path_element(element: &TablePathElement) -> Value {
    Fields::new()
        .put(FIELD_NAME, element.name())
        .put("Id", element.id())
        .build()
}

fn input_column(column: &InputColumn) -> Value {
    Fields::new()
        .put(FIELD_NAME, column.name())
        .put("Id", column.id())
        .put("Type", column.r#type())
        .put("SubType", column.sub_type())
        .build()
}

fn logical_table(table: &LogicalTable) -> Value {
    Fields::new()
        .put("Alias", table.alias())
        .put_list("DataTransforms", table.data_transforms(), transform_operation)
        .put_nested("Source", table.source(), logical_table_source)
        .build()
}

fn logical_table_source(source: &LogicalTableSource) -> Value {
    Fields::new()
        .put_nested("JoinInstruction", source.join_instruction(), join_instruction)
        .put("PhysicalTableId", source.physical_table_id())
        .put("DataSetArn", source.data_set_arn())
        .build()
}

fn join_instruction(join: &JoinInstruction) -> Value {
    Fields::new()
        .put("LeftOperand", join.left_operand())
        .put("RightOperand", join.right_operand())
        .put_nested("LeftJoinKeyProperties", join.left_join_key_properties(), join_key)
        .put_nested("RightJoinKeyProperties", join.right_join_key_properties(), join_key)
        .put("Type", join.r#type())
        .put("OnClause", join.on_clause())
        .build()
}

fn join_key(properties: &JoinKeyProperties) -> Value {
    Fields::new().put("UniqueKey", properties.unique_key()).build()
}

fn transform_operation(operation: &TransformOperation) -> Value {
    match operation {
        TransformOperation::ProjectOperation(project) => tagged(
            "ProjectOperation",
            Fields::new()
                .put("Alias", project.alias())
                .put_value(
                    "ProjectedColumns",
                    array(project.projected_columns(), |column| column.wire()),
                )
                .build(),
        ),
        TransformOperation::FilterOperation(filter) => tagged(
            "FilterOperation",
            Fields::new()
                .put("ConditionExpression", filter.condition_expression())
                .build(),
        ),
        TransformOperation::CreateColumnsOperation(create) => tagged(
            "CreateColumnsOperation",
            Fields::new()
                .put("Alias", create.alias())
                .put_value("Columns", array(create.columns(), calculated_column))
                .build(),
        ),
        TransformOperation::RenameColumnOperation(rename) => tagged(
            "RenameColumnOperation",
            Fields::new()
                .put("ColumnName", rename.column_name())
                .put("NewColumnName", rename.new_column_name())
                .build(),
        ),
        TransformOperation::CastColumnTypeOperation(cast) => tagged(
            "CastColumnTypeOperation",
            Fields::new()
                .put("ColumnName", cast.column_name())
                .put("NewColumnType", cast.new_column_type())
                .put("SubType", cast.sub_type())
                .put("Format", cast.format())
                .build(),
        ),
        TransformOperation::TagColumnOperation(tag) => tagged(
            "TagColumnOperation",
            Fields::new()
                .put("ColumnName", tag.column_name())
                .put_value("Tags", array(tag.tags(), column_tag))
                .build(),
        ),
        TransformOperation::UntagColumnOperation(untag) => tagged(
            "UntagColumnOperation",
            Fields::new()
                .put("ColumnName", untag.column_name())
                .put_value("TagNames", array(untag.tag_names(), |name| name.wire()))
                .build(),
        ),
        TransformOperation::OverrideDatasetParameterOperation(overriding) => tagged(
            "OverrideDatasetParameterOperation",
            Fields::new()
                .put("ParameterName", overriding.parameter_name())
                .put("NewParameterName", overriding.new_parameter_name())
                .build(),
        ),
        other => unlisted_member(other),
    }
}

fn calculated_column(column: &CalculatedColumn) -> Value {
    Fields::new()
        .put("ColumnName", column.column_name())
        .put("ColumnId", column.column_id())
        .put("Expression", column.expression())
        .build()
}

fn column_tag(tag: &ColumnTag) -> Value {
    Fields::new()
        .put("ColumnGeographicRole", tag.column_geographic_role())
        .put_nested("ColumnDescription", tag.column_description(), |description: &ColumnDescription| {
            Fields::new().put("Text", description.text()).build()
        })
        .build()
}

fn output_column(column: &OutputColumn) -> Value {
    Fields::new()
        .put(FIELD_NAME, column.name())
        .put("Id", column.id())
        .put("Description", column.description())
        .put("Type", column.r#type())
        .put("SubType", column.sub_type())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_quicksight::types::{
        ColumnDataSubType,
        ColumnDataType,
        CustomSql,
        DataSetImportMode,
        FileFormat,
        InputColumnDataType,
        JoinType,
        ProjectOperation,
        RelationalTable,
        RenameColumnOperation,
        S3Source,
        TextQualifier,
    };
    use serde_json::json;

    const SOURCE_ARN: &str = "arn:aws:quicksight:us-east-1:111122223333:datasource/src-1";

    fn column(name: &str, data_type: InputColumnDataType) -> InputColumn {
        InputColumn::builder()
            .name(name)
            .r#type(data_type)
            .build()
            .expect("input column")
    }

    #[test]
    fn data_set_keeps_physical_lineage_links() {
        let orders = RelationalTable::builder()
            .data_source_arn(SOURCE_ARN)
            .schema("sales")
            .name("orders")
            .input_columns(column("order_id", InputColumnDataType::String))
            .input_columns(
                InputColumn::builder()
                    .name("amount")
                    .r#type(InputColumnDataType::Decimal)
                    .sub_type(ColumnDataSubType::Fixed)
                    .build()
                    .expect("input column"),
            )
            .build()
            .expect("relational table");
        let record = DataSet::builder()
            .data_set_id("ds-1")
            .name("Orders")
            .physical_table_map("orders", PhysicalTable::RelationalTable(orders))
            .output_columns(
                OutputColumn::builder()
                    .name("order_id")
                    .r#type(ColumnDataType::String)
                    .build(),
            )
            .import_mode(DataSetImportMode::DirectQuery)
            .build();

        assert_eq!(
            data_set(&record),
            json!({
                "DataSetId": "ds-1",
                "Name": "Orders",
                "PhysicalTableMap": {
                    "orders": {
                        "RelationalTable": {
                            "DataSourceArn": SOURCE_ARN,
                            "Schema": "sales",
                            "Name": "orders",
                            "InputColumns": [
                                {"Name": "order_id", "Type": "STRING"},
                                {"Name": "amount", "Type": "DECIMAL", "SubType": "FIXED"}
                            ]
                        }
                    }
                },
                "OutputColumns": [{"Name": "order_id", "Type": "STRING"}],
                "ImportMode": "DIRECT_QUERY"
            })
        );
    }

    #[test]
    fn data_set_without_maps_emits_empty_output_columns() {
        let record = DataSet::builder().data_set_id("ds-2").build();
        assert_eq!(
            data_set(&record),
            json!({"DataSetId": "ds-2", "OutputColumns": []})
        );
    }

    #[test]
    fn s3_source_keeps_upload_settings() {
        let s3 = S3Source::builder()
            .data_source_arn(SOURCE_ARN)
            .upload_settings(
                UploadSettings::builder()
                    .format(FileFormat::Csv)
                    .start_from_row(2)
                    .contains_header(true)
                    .text_qualifier(TextQualifier::DoubleQuote)
                    .delimiter(",")
                    .build(),
            )
            .input_columns(column("region", InputColumnDataType::String))
            .build()
            .expect("s3 source");

        assert_eq!(
            physical_table(&PhysicalTable::S3Source(s3)),
            json!({
                "S3Source": {
                    "DataSourceArn": SOURCE_ARN,
                    "UploadSettings": {
                        "Format": "CSV",
                        "StartFromRow": 2,
                        "ContainsHeader": true,
                        "TextQualifier": "DOUBLE_QUOTE",
                        "Delimiter": ","
                    },
                    "InputColumns": [{"Name": "region", "Type": "STRING"}]
                }
            })
        );
    }

    #[test]
    fn custom_sql_relays_query_text() {
        let custom = CustomSql::builder()
            .data_source_arn(SOURCE_ARN)
            .name("recent")
            .sql_query("SELECT * FROM orders WHERE day > now() - 7")
            .build()
            .expect("custom sql");

        assert_eq!(
            physical_table(&PhysicalTable::CustomSql(custom)),
            json!({
                "CustomSql": {
                    "DataSourceArn": SOURCE_ARN,
                    "Name": "recent",
                    "SqlQuery": "SELECT * FROM orders WHERE day > now() - 7"
                }
            })
        );
    }

    #[test]
    fn logical_table_converts_join_and_transforms() {
        let join = JoinInstruction::builder()
            .left_operand("orders")
            .right_operand("customers")
            .r#type(JoinType::Left)
            .on_clause("orders.customer_id = customers.id")
            .build()
            .expect("join instruction");
        let table = LogicalTable::builder()
            .alias("joined")
            .source(LogicalTableSource::builder().join_instruction(join).build())
            .data_transforms(TransformOperation::RenameColumnOperation(
                RenameColumnOperation::builder()
                    .column_name("amt")
                    .new_column_name("amount")
                    .build()
                    .expect("rename operation"),
            ))
            .data_transforms(TransformOperation::ProjectOperation(
                ProjectOperation::builder()
                    .projected_columns("amount")
                    .build()
                    .expect("project operation"),
            ))
            .build()
            .expect("logical table");

        assert_eq!(
            logical_table(&table),
            json!({
                "Alias": "joined",
                "DataTransforms": [
                    {"RenameColumnOperation": {"ColumnName": "amt", "NewColumnName": "amount"}},
                    {"ProjectOperation": {"ProjectedColumns": ["amount"]}}
                ],
                "Source": {
                    "JoinInstruction": {
                        "LeftOperand": "orders",
                        "RightOperand": "customers",
                        "Type": "LEFT",
                        "OnClause": "orders.customer_id = customers.id"
                    }
                }
            })
        );
    }

    #[test]
    fn logical_table_over_another_data_set_keeps_its_arn() {
        let table = LogicalTable::builder()
            .alias("upstream")
            .source(
                LogicalTableSource::builder()
                    .data_set_arn("arn:aws:quicksight:us-east-1:111122223333:dataset/ds-0")
                    .build(),
            )
            .build()
            .expect("logical table");

        assert_eq!(
            logical_table(&table),
            json!({
                "Alias": "upstream",
                "Source": {"DataSetArn": "arn:aws:quicksight:us-east-1:111122223333:dataset/ds-0"}
            })
        );
    }
}
