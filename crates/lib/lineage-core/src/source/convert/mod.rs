//! Conversion of QuickSight SDK structures into wire-shaped JSON.
//!
//! Every union member is emitted under its wire name and converted field by
//! field. Absent optional fields are omitted rather than emitted as null.
//! Visual and filter bodies carry their identifiers and column bindings;
//! chart formatting is not relayed.

use std::fmt::Debug;

use aws_sdk_quicksight::types::{
    AnalysisSummary,
    AuthenticationType,
    ColumnDataSubType,
    ColumnDataType,
    ColumnTagName,
    CrossDatasetTypes,
    DashboardSummary,
    DataSetImportMode,
    DataSetSummary,
    DataSource,
    DataSourceType,
    FileFormat,
    GeoSpatialDataRole,
    InputColumnDataType,
    JoinType,
    ParameterValueType,
    ResourceStatus,
    SheetContentType,
    StarburstProductType,
    TextQualifier,
    WebCrawlerAuthType,
};
use lineage_model::schema::{
    FIELD_IMPORT_MODE,
    FIELD_NAME,
    ID_ANALYSIS,
    ID_DASHBOARD,
    ID_DATA_SET,
    ID_DATA_SOURCE,
};
use serde_json::{Map, Value};

/// Emits one tagged entry per populated member of an SDK "one of" structure.
///
/// `$body` is expanded once per member so it can read each member's own type.
macro_rules! one_of {
    ($value:expr, |$member:ident| $body:expr, { $($accessor:ident => $tag:literal),+ $(,)? }) => {{
        let mut map = ::serde_json::Map::new();
        $(
            if let Some($member) = $value.$accessor() {
                map.insert($tag.to_string(), $body);
            }
        )+
        ::serde_json::Value::Object(map)
    }};
}

mod data_set;
mod data_source;
mod definition;

pub(crate) use data_set::data_set;
pub(crate) use data_source::data_source;
pub(crate) use definition::{analysis_definition, dashboard};

/// Scalar SDK values that render as a single JSON value. Implemented for both
/// the required (`&str`, `i32`) and optional (`Option<&str>`, `Option<i32>`)
/// accessor shapes so converters read the same either way.
pub(crate) trait Wire {
    fn wire(self) -> Value;
}

impl Wire for &str {
    fn wire(self) -> Value {
        Value::String(self.to_string())
    }
}

impl Wire for &String {
    fn wire(self) -> Value {
        Value::String(self.clone())
    }
}

impl Wire for Option<&str> {
    fn wire(self) -> Value {
        self.map_or(Value::Null, Wire::wire)
    }
}

impl Wire for bool {
    fn wire(self) -> Value {
        Value::Bool(self)
    }
}

impl Wire for Option<bool> {
    fn wire(self) -> Value {
        self.map_or(Value::Null, Value::Bool)
    }
}

impl Wire for i32 {
    fn wire(self) -> Value {
        Value::from(self)
    }
}

impl Wire for Option<i32> {
    fn wire(self) -> Value {
        self.map_or(Value::Null, Value::from)
    }
}

impl Wire for i64 {
    fn wire(self) -> Value {
        Value::from(self)
    }
}

impl Wire for Option<i64> {
    fn wire(self) -> Value {
        self.map_or(Value::Null, Value::from)
    }
}

macro_rules! wire_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Wire for &$ty {
                fn wire(self) -> Value {
                    Value::String(self.as_str().to_string())
                }
            }

            impl Wire for Option<&$ty> {
                fn wire(self) -> Value {
                    self.map_or(Value::Null, Wire::wire)
                }
            }
        )+
    };
}

wire_enum!(
    AuthenticationType,
    ColumnDataSubType,
    ColumnDataType,
    ColumnTagName,
    CrossDatasetTypes,
    DataSetImportMode,
    DataSourceType,
    FileFormat,
    GeoSpatialDataRole,
    InputColumnDataType,
    JoinType,
    ParameterValueType,
    ResourceStatus,
    SheetContentType,
    StarburstProductType,
    TextQualifier,
    WebCrawlerAuthType,
);

/// Normalizes required (`&T`) and optional (`Option<&T>`) nested structures.
pub(crate) trait MaybeRef<'a, T> {
    fn maybe(self) -> Option<&'a T>;
}

impl<'a, T> MaybeRef<'a, T> for &'a T {
    fn maybe(self) -> Option<&'a T> {
        Some(self)
    }
}

impl<'a, T> MaybeRef<'a, T> for Option<&'a T> {
    fn maybe(self) -> Option<&'a T> {
        self
    }
}

/// JSON object builder that drops null values.
pub(crate) struct Fields(Map<String, Value>);

impl Fields {
    pub(crate) fn new() -> Self {
        Self(Map::new())
    }

    pub(crate) fn put(self, key: &str, value: impl Wire) -> Self {
        self.put_value(key, value.wire())
    }

    pub(crate) fn put_value(mut self, key: &str, value: Value) -> Self {
        if !value.is_null() {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    /// Inserts a nested structure when present.
    pub(crate) fn put_nested<'a, T: 'a>(
        self,
        key: &str,
        value: impl MaybeRef<'a, T>,
        convert: impl FnOnce(&'a T) -> Value,
    ) -> Self {
        match value.maybe() {
            Some(value) => self.put_value(key, convert(value)),
            None => self,
        }
    }

    /// Inserts a list unless it is empty.
    pub(crate) fn put_list<T>(self, key: &str, items: &[T], convert: impl Fn(&T) -> Value) -> Self {
        if items.is_empty() {
            return self;
        }
        self.put_value(key, array(items, convert))
    }

    pub(crate) fn build(self) -> Value {
        Value::Object(self.0)
    }
}

pub(crate) fn array<T>(items: &[T], convert: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(convert).collect())
}

pub(crate) fn tagged(tag: &str, body: Value) -> Value {
    let mut map = Map::new();
    map.insert(tag.to_string(), body);
    Value::Object(map)
}

/// Union members added after this build of the SDK carry no readable
/// payload; only their member name survives.
pub(crate) fn unlisted_member<T: Debug>(member: &T) -> Value {
    let rendered = format!("{member:?}");
    let name = rendered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown");
    tagged(name, Value::Object(Map::new()))
}

pub(crate) fn data_set_summary(summary: &DataSetSummary) -> Value {
    Fields::new()
        .put(ID_DATA_SET, summary.data_set_id())
        .put(FIELD_NAME, summary.name())
        .put("Arn", summary.arn())
        .put(FIELD_IMPORT_MODE, summary.import_mode())
        .build()
}

pub(crate) fn data_source_summary(source: &DataSource) -> Value {
    Fields::new()
        .put(ID_DATA_SOURCE, source.data_source_id())
        .put(FIELD_NAME, source.name())
        .put("Arn", source.arn())
        .put("Type", source.r#type())
        .put("Status", source.status())
        .build()
}

pub(crate) fn analysis_summary(summary: &AnalysisSummary) -> Value {
    Fields::new()
        .put(ID_ANALYSIS, summary.analysis_id())
        .put(FIELD_NAME, summary.name())
        .put("Arn", summary.arn())
        .put("Status", summary.status())
        .build()
}

pub(crate) fn dashboard_summary(summary: &DashboardSummary) -> Value {
    Fields::new()
        .put(ID_DASHBOARD, summary.dashboard_id())
        .put(FIELD_NAME, summary.name())
        .put("Arn", summary.arn())
        .put("PublishedVersionNumber", summary.published_version_number())
        .build()
}
