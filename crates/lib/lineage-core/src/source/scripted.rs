//! In-memory metadata source replaying scripted responses.
//!
//! Pages are served in order with generated continuation tokens
//! (`page-1`, `page-2`, ...). Every requested token is recorded so callers can
//! assert the order in which pages were fetched.

use std::collections::HashMap;

use async_trait::async_trait;
use lineage_model::ResourceKind;
use lineage_model::schema::{FIELD_NEXT_TOKEN, list_items_field};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{ApiError, MetadataSource};

const TOKEN_PREFIX: &str = "page-";

#[derive(Debug, Default)]
pub struct ScriptedSource {
    pages: HashMap<ResourceKind, Vec<Result<Vec<Value>, ApiError>>>,
    details: HashMap<(ResourceKind, String), Result<Value, ApiError>>,
    requested_tokens: Mutex<Vec<(ResourceKind, Option<String>)>>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page of summaries for `kind`.
    #[must_use]
    pub fn with_page(mut self, kind: ResourceKind, items: Vec<Value>) -> Self {
        self.pages.entry(kind).or_default().push(Ok(items));
        self
    }

    /// Appends a page for `kind` whose fetch fails.
    #[must_use]
    pub fn with_failing_page(mut self, kind: ResourceKind, error: ApiError) -> Self {
        self.pages.entry(kind).or_default().push(Err(error));
        self
    }

    /// Registers the describe response for one resource.
    #[must_use]
    pub fn with_detail(
        mut self,
        kind: ResourceKind,
        resource_id: impl Into<String>,
        response: Value,
    ) -> Self {
        self.details.insert((kind, resource_id.into()), Ok(response));
        self
    }

    /// Registers a failing describe call for one resource.
    #[must_use]
    pub fn with_detail_error(
        mut self,
        kind: ResourceKind,
        resource_id: impl Into<String>,
        error: ApiError,
    ) -> Self {
        self.details.insert((kind, resource_id.into()), Err(error));
        self
    }

    /// Tokens requested for `kind`, in call order.
    pub async fn requested_tokens(&self, kind: ResourceKind) -> Vec<Option<String>> {
        self.requested_tokens
            .lock()
            .await
            .iter()
            .filter(|(requested, _)| *requested == kind)
            .map(|(_, token)| token.clone())
            .collect()
    }
}

fn page_index(kind: ResourceKind, token: Option<&str>) -> Result<usize, ApiError> {
    let Some(token) = token else {
        return Ok(0);
    };
    token
        .strip_prefix(TOKEN_PREFIX)
        .and_then(|index| index.parse().ok())
        .ok_or_else(|| {
            ApiError::new(
                kind.list_operation(),
                Some("InvalidNextTokenException".to_string()),
                format!("unknown continuation token: {token}"),
            )
        })
}

#[async_trait]
impl MetadataSource for ScriptedSource {
    async fn list_page(
        &self,
        kind: ResourceKind,
        _account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError> {
        self.requested_tokens
            .lock()
            .await
            .push((kind, next_token.clone()));

        let index = page_index(kind, next_token.as_deref())?;
        let pages = self.pages.get(&kind).map_or(&[][..], Vec::as_slice);
        let items = match pages.get(index) {
            Some(Ok(items)) => items.clone(),
            Some(Err(err)) => return Err(err.clone()),
            None if index == 0 => Vec::new(),
            None => {
                return Err(ApiError::new(
                    kind.list_operation(),
                    Some("InvalidNextTokenException".to_string()),
                    format!("no page at index {index}"),
                ));
            }
        };

        let mut response = Map::new();
        response.insert(list_items_field(kind).to_string(), Value::Array(items));
        if index + 1 < pages.len() {
            response.insert(
                FIELD_NEXT_TOKEN.to_string(),
                Value::String(format!("{TOKEN_PREFIX}{}", index + 1)),
            );
        }
        Ok(Value::Object(response))
    }

    async fn describe(
        &self,
        kind: ResourceKind,
        _account_id: &str,
        resource_id: &str,
    ) -> Result<Value, ApiError> {
        self.details
            .get(&(kind, resource_id.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::not_found(
                    kind.describe_operation(),
                    format!("{resource_id} does not exist"),
                ))
            })
    }
}
