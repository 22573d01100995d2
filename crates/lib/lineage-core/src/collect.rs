//! Exhaustive pagination over token-based list operations.
//!
//! One paginator serves every resource type: it is parameterised by the fetch
//! operation, the name of the array holding each page's items, and the name of
//! the continuation token field.

use std::future::Future;
use std::{error::Error, fmt};

use lineage_model::ResourceKind;
use lineage_model::schema::{FIELD_NEXT_TOKEN, list_items_field};
use serde_json::Value;
use tracing::debug;

use crate::source::ApiError;

/// Field names describing one paginated list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub items_field: &'static str,
    pub token_field: &'static str,
}

impl PageSpec {
    #[must_use]
    pub const fn new(items_field: &'static str, token_field: &'static str) -> Self {
        Self {
            items_field,
            token_field,
        }
    }

    /// Page layout of the list operation for `kind`.
    #[must_use]
    pub const fn for_kind(kind: ResourceKind) -> Self {
        Self::new(list_items_field(kind), FIELD_NEXT_TOKEN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectFailure {
    Fetch(ApiError),
    Malformed { field: &'static str, found: &'static str },
}

/// Enumeration aborted on `page` (1-based). Items gathered from earlier pages
/// are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectError {
    pub page: usize,
    pub failure: CollectFailure,
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            CollectFailure::Fetch(err) => write!(f, "page {} failed: {err}", self.page),
            CollectFailure::Malformed { field, found } => write!(
                f,
                "page {} is malformed: expected an array in {field}, found {found}",
                self.page
            ),
        }
    }
}

impl Error for CollectError {}

/// Fetches every page and concatenates their items in page order.
///
/// The first call carries no token; each later call carries the token returned
/// by the previous page. A missing, null or empty token ends the enumeration.
/// A missing or null items field counts as an empty page.
///
/// # Errors
/// Returns `CollectError` for the first page that fails to fetch or does not
/// hold an array in `layout.items_field`. No partial sequence is returned.
pub async fn collect_all<F, Fut>(layout: PageSpec, mut fetch: F) -> Result<Vec<Value>, CollectError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Value, ApiError>>,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;
    let mut page = 0;

    loop {
        page += 1;
        let mut response = fetch(next_token.take()).await.map_err(|err| CollectError {
            page,
            failure: CollectFailure::Fetch(err),
        })?;

        match response.get_mut(layout.items_field).map(Value::take) {
            Some(Value::Array(batch)) => {
                debug!(page, count = batch.len(), "collected page");
                items.extend(batch);
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                return Err(CollectError {
                    page,
                    failure: CollectFailure::Malformed {
                        field: layout.items_field,
                        found: json_type(&other),
                    },
                });
            }
        }

        next_token = response
            .get(layout.token_field)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        if next_token.is_none() {
            break;
        }
    }

    Ok(items)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;

    const LAYOUT: PageSpec = PageSpec::new("Items", "NextToken");

    fn scripted(
        pages: Vec<Result<Value, ApiError>>,
    ) -> (
        impl FnMut(Option<String>) -> std::future::Ready<Result<Value, ApiError>>,
        std::rc::Rc<std::cell::RefCell<Vec<Option<String>>>>,
    ) {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let recorder = seen.clone();
        let mut pages: VecDeque<_> = pages.into();
        let fetch = move |token: Option<String>| {
            recorder.borrow_mut().push(token);
            std::future::ready(
                pages
                    .pop_front()
                    .unwrap_or_else(|| Err(ApiError::transport("List", "no more pages"))),
            )
        };
        (fetch, seen)
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let (fetch, seen) = scripted(vec![
            Ok(json!({"Items": [1, 2], "NextToken": "t1"})),
            Ok(json!({"Items": [3], "NextToken": "t2"})),
            Ok(json!({"Items": [4, 5, 6]})),
        ]);

        let items = collect_all(LAYOUT, fetch).await.expect("collection should succeed");

        assert_eq!(items, vec![json!(1), json!(2), json!(3), json!(4), json!(5), json!(6)]);
        assert_eq!(
            *seen.borrow(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_after_first_page_discards_progress() {
        let (fetch, _) = scripted(vec![
            Ok(json!({"Items": [1, 2], "NextToken": "t1"})),
            Err(ApiError::new(
                "List",
                Some("ThrottlingException".to_string()),
                "slow down",
            )),
        ]);

        let err = collect_all(LAYOUT, fetch).await.expect_err("collection should fail");

        assert_eq!(err.page, 2);
        assert!(matches!(err.failure, CollectFailure::Fetch(_)));
    }

    #[tokio::test]
    async fn empty_token_and_missing_items_end_cleanly() {
        let (fetch, seen) = scripted(vec![Ok(json!({"NextToken": ""}))]);

        let items = collect_all(LAYOUT, fetch).await.expect("collection should succeed");

        assert!(items.is_empty());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn non_array_items_are_malformed() {
        let (fetch, _) = scripted(vec![Ok(json!({"Items": "oops"}))]);

        let err = collect_all(LAYOUT, fetch).await.expect_err("collection should fail");

        assert_eq!(
            err.failure,
            CollectFailure::Malformed {
                field: "Items",
                found: "a string",
            }
        );
    }
}
