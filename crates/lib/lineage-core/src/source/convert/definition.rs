use aws_sdk_quicksight::types::{
    AnalysisDefinition,
    CalculatedField,
    ColumnIdentifier,
    Dashboard,
    DashboardVersion,
    DataSetIdentifierDeclaration,
    Filter,
    FilterGroup,
    ParameterDeclaration,
    Sheet,
    SheetDefinition,
    Visual,
};
use lineage_model::schema::{
    ENVELOPE_VERSION,
    FIELD_CALCULATED_FIELDS,
    FIELD_DATA_SET_ARNS,
    FIELD_DATA_SET_IDENTIFIER_DECLARATIONS,
    FIELD_FILTER_GROUPS,
    FIELD_NAME,
    FIELD_PARAMETER_DECLARATIONS,
    FIELD_SHEETS,
    FIELD_SOURCE_ENTITY_ARN,
    ID_DASHBOARD,
};
use serde_json::Value;

use super::{Fields, Wire, array};

pub(crate) fn analysis_definition(definition: &AnalysisDefinition) -> Value {
    Fields::new()
        .put_value(
            FIELD_DATA_SET_IDENTIFIER_DECLARATIONS,
            array(definition.data_set_identifier_declarations(), data_set_identifier),
        )
        .put_value(FIELD_SHEETS, array(definition.sheets(), sheet_definition))
        .put_value(
            FIELD_CALCULATED_FIELDS,
            array(definition.calculated_fields(), calculated_field),
        )
        .put_value(
            FIELD_PARAMETER_DECLARATIONS,
            array(definition.parameter_declarations(), parameter_declaration),
        )
        .put_value(FIELD_FILTER_GROUPS, array(definition.filter_groups(), filter_group))
        .build()
}

fn data_set_identifier(declaration: &DataSetIdentifierDeclaration) -> Value {
    Fields::new()
        .put("Identifier", declaration.identifier())
        .put("DataSetArn", declaration.data_set_arn())
        .build()
}

fn sheet_definition(sheet: &SheetDefinition) -> Value {
    Fields::new()
        .put("SheetId", sheet.sheet_id())
        .put(FIELD_NAME, sheet.name())
        .put("Title", sheet.title())
        .put("Description", sheet.description())
        .put("ContentType", sheet.content_type())
        .put_list("Visuals", sheet.visuals(), visual)
        .build()
}

fn visual(visual: &Visual) -> Value {
    one_of!(visual, |member| Fields::new().put("VisualId", member.visual_id()).build(), {
        table_visual => "TableVisual",
        pivot_table_visual => "PivotTableVisual",
        bar_chart_visual => "BarChartVisual",
        kpi_visual => "KPIVisual",
        pie_chart_visual => "PieChartVisual",
        gauge_chart_visual => "GaugeChartVisual",
        line_chart_visual => "LineChartVisual",
        heat_map_visual => "HeatMapVisual",
        tree_map_visual => "TreeMapVisual",
        geospatial_map_visual => "GeospatialMapVisual",
        filled_map_visual => "FilledMapVisual",
        layer_map_visual => "LayerMapVisual",
        funnel_chart_visual => "FunnelChartVisual",
        scatter_plot_visual => "ScatterPlotVisual",
        combo_chart_visual => "ComboChartVisual",
        box_plot_visual => "BoxPlotVisual",
        waterfall_visual => "WaterfallVisual",
        histogram_visual => "HistogramVisual",
        word_cloud_visual => "WordCloudVisual",
        insight_visual => "InsightVisual",
        sankey_diagram_visual => "SankeyDiagramVisual",
        custom_content_visual => "CustomContentVisual",
        empty_visual => "EmptyVisual",
        radar_chart_visual => "RadarChartVisual",
        plugin_visual => "PluginVisual",
    })
}

fn calculated_field(field: &CalculatedField) -> Value {
    Fields::new()
        .put("DataSetIdentifier", field.data_set_identifier())
        .put(FIELD_NAME, field.name())
        .put("Expression", field.expression())
        .build()
}

fn parameter_declaration(declaration: &ParameterDeclaration) -> Value {
    one_of!(declaration, |member| Fields::new().put(FIELD_NAME, member.name()).build(), {
        string_parameter_declaration => "StringParameterDeclaration",
        decimal_parameter_declaration => "DecimalParameterDeclaration",
        integer_parameter_declaration => "IntegerParameterDeclaration",
        date_time_parameter_declaration => "DateTimeParameterDeclaration",
    })
}

fn filter_group(group: &FilterGroup) -> Value {
    Fields::new()
        .put("FilterGroupId", group.filter_group_id())
        .put_value("Filters", array(group.filters(), filter))
        .put("CrossDataset", group.cross_dataset())
        .build()
}

fn filter(filter: &Filter) -> Value {
    one_of!(
        filter,
        |member| Fields::new()
            .put("FilterId", member.filter_id())
            .put_nested("Column", member.column(), column_identifier)
            .build(),
        {
            category_filter => "CategoryFilter",
            numeric_range_filter => "NumericRangeFilter",
            numeric_equality_filter => "NumericEqualityFilter",
            time_equality_filter => "TimeEqualityFilter",
            time_range_filter => "TimeRangeFilter",
            relative_dates_filter => "RelativeDatesFilter",
            top_bottom_filter => "TopBottomFilter",
            nested_filter => "NestedFilter",
        }
    )
}

fn column_identifier(column: &ColumnIdentifier) -> Value {
    Fields::new()
        .put("DataSetIdentifier", column.data_set_identifier())
        .put("ColumnName", column.column_name())
        .build()
}

pub(crate) fn dashboard(dashboard: &Dashboard) -> Value {
    Fields::new()
        .put(ID_DASHBOARD, dashboard.dashboard_id())
        .put(FIELD_NAME, dashboard.name())
        .put("Arn", dashboard.arn())
        .put_nested(ENVELOPE_VERSION, dashboard.version(), dashboard_version)
        .build()
}

fn dashboard_version(version: &DashboardVersion) -> Value {
    Fields::new()
        .put("VersionNumber", version.version_number())
        .put("Status", version.status())
        .put("Arn", version.arn())
        .put(FIELD_SOURCE_ENTITY_ARN, version.source_entity_arn())
        .put_value(
            FIELD_DATA_SET_ARNS,
            array(version.data_set_arns(), |arn| arn.wire()),
        )
        .put("Description", version.description())
        .put("ThemeArn", version.theme_arn())
        .put_value(FIELD_SHEETS, array(version.sheets(), sheet))
        .build()
}

fn sheet(sheet: &Sheet) -> Value {
    Fields::new()
        .put("SheetId", sheet.sheet_id())
        .put(FIELD_NAME, sheet.name())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_quicksight::types::{
        CategoryFilter,
        CrossDatasetTypes,
        ParameterValueType,
        ResourceStatus,
        StringParameterDeclaration,
        TableVisual,
    };
    use serde_json::json;

    const DATA_SET_ARN: &str = "arn:aws:quicksight:us-east-1:111122223333:dataset/ds-1";

    fn analysis_fixture() -> AnalysisDefinition {
        let table = TableVisual::builder()
            .visual_id("visual-1")
            .build()
            .expect("table visual");
        let region_filter = CategoryFilter::builder()
            .filter_id("filter-1")
            .column(
                ColumnIdentifier::builder()
                    .data_set_identifier("orders")
                    .column_name("region")
                    .build()
                    .expect("column identifier"),
            )
            .build()
            .expect("category filter");

        AnalysisDefinition::builder()
            .data_set_identifier_declarations(
                DataSetIdentifierDeclaration::builder()
                    .identifier("orders")
                    .data_set_arn(DATA_SET_ARN)
                    .build()
                    .expect("identifier declaration"),
            )
            .sheets(
                SheetDefinition::builder()
                    .sheet_id("sheet-1")
                    .name("Overview")
                    .visuals(Visual::builder().table_visual(table).build())
                    .build()
                    .expect("sheet definition"),
            )
            .calculated_fields(
                CalculatedField::builder()
                    .data_set_identifier("orders")
                    .name("margin")
                    .expression("{revenue} - {cost}")
                    .build()
                    .expect("calculated field"),
            )
            .parameter_declarations(
                ParameterDeclaration::builder()
                    .string_parameter_declaration(
                        StringParameterDeclaration::builder()
                            .parameter_value_type(ParameterValueType::SingleValued)
                            .name("Region")
                            .build()
                            .expect("string parameter"),
                    )
                    .build(),
            )
            .filter_groups(
                FilterGroup::builder()
                    .filter_group_id("group-1")
                    .filters(Filter::builder().category_filter(region_filter).build())
                    .cross_dataset(CrossDatasetTypes::SingleDataset)
                    .build()
                    .expect("filter group"),
            )
            .build()
            .expect("analysis definition")
    }

    #[test]
    fn analysis_definition_keeps_data_set_bindings() {
        assert_eq!(
            analysis_definition(&analysis_fixture()),
            json!({
                "DataSetIdentifierDeclarations": [
                    {"Identifier": "orders", "DataSetArn": DATA_SET_ARN}
                ],
                "Sheets": [{
                    "SheetId": "sheet-1",
                    "Name": "Overview",
                    "Visuals": [{"TableVisual": {"VisualId": "visual-1"}}]
                }],
                "CalculatedFields": [{
                    "DataSetIdentifier": "orders",
                    "Name": "margin",
                    "Expression": "{revenue} - {cost}"
                }],
                "ParameterDeclarations": [
                    {"StringParameterDeclaration": {"Name": "Region"}}
                ],
                "FilterGroups": [{
                    "FilterGroupId": "group-1",
                    "Filters": [{
                        "CategoryFilter": {
                            "FilterId": "filter-1",
                            "Column": {"DataSetIdentifier": "orders", "ColumnName": "region"}
                        }
                    }],
                    "CrossDataset": "SINGLE_DATASET"
                }]
            })
        );
    }

    #[test]
    fn dashboard_version_keeps_source_entity_and_data_sets() {
        let dashboard_record = Dashboard::builder()
            .dashboard_id("db-1")
            .name("Sales")
            .version(
                DashboardVersion::builder()
                    .version_number(4)
                    .status(ResourceStatus::CreationSuccessful)
                    .source_entity_arn("arn:aws:quicksight:us-east-1:111122223333:analysis/an-1")
                    .data_set_arns(DATA_SET_ARN)
                    .sheets(Sheet::builder().sheet_id("sheet-1").name("Overview").build())
                    .build(),
            )
            .build();

        assert_eq!(
            dashboard(&dashboard_record),
            json!({
                "DashboardId": "db-1",
                "Name": "Sales",
                "Version": {
                    "VersionNumber": 4,
                    "Status": "CREATION_SUCCESSFUL",
                    "SourceEntityArn": "arn:aws:quicksight:us-east-1:111122223333:analysis/an-1",
                    "DataSetArns": [DATA_SET_ARN],
                    "Sheets": [{"SheetId": "sheet-1", "Name": "Overview"}]
                }
            })
        );
    }

    #[test]
    fn dashboard_without_version_omits_it() {
        let dashboard_record = Dashboard::builder().dashboard_id("db-2").build();
        assert_eq!(dashboard(&dashboard_record), json!({"DashboardId": "db-2"}));
    }
}
