use std::borrow::Cow;

use lineage_core::services::SourceError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Rejects blank identifiers before any client is built.
pub(crate) fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, ErrorData> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(mcp_err(
            ErrorCode::INVALID_PARAMS,
            format!("{field} must not be empty"),
        ));
    }
    Ok(trimmed)
}

pub(crate) fn map_source_err(err: SourceError) -> ErrorData {
    match err {
        SourceError::InvalidRegion(_) => mcp_err(ErrorCode::INVALID_PARAMS, err.to_string()),
        SourceError::BuildFailed(_) => mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()),
    }
}
