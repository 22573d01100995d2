//! Metadata source interface and implementations.
//!
//! A source answers one list page or one describe call per request and hands
//! back the platform's wire-shaped JSON. Pagination, projection and failure
//! policy live above this seam.

mod convert;
pub mod quicksight;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

use std::{error::Error, fmt};

use async_trait::async_trait;
use lineage_model::ResourceKind;
use serde_json::Value;

pub use quicksight::{QuickSightSource, QuickSightSettings};
#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedSource;

/// Read-only access to the metadata API for one account and region.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches one page of summaries for `kind`.
    ///
    /// The response carries the summaries under the kind's list items field and
    /// the continuation token under `NextToken`.
    ///
    /// # Errors
    /// Returns `ApiError` if the remote call fails.
    async fn list_page(
        &self,
        kind: ResourceKind,
        account_id: &str,
        next_token: Option<String>,
    ) -> Result<Value, ApiError>;

    /// Describes a single resource.
    ///
    /// # Errors
    /// Returns `ApiError` if the remote call fails.
    async fn describe(
        &self,
        kind: ResourceKind,
        account_id: &str,
        resource_id: &str,
    ) -> Result<Value, ApiError>;
}

/// Classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotFound,
    AccessDenied,
    Throttled,
    Rejected,
    Service,
    Transport,
}

impl ApiErrorKind {
    /// Classifies a service error code. Calls that failed before the service
    /// answered carry no code.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None => Self::Transport,
            Some("ResourceNotFoundException") => Self::NotFound,
            Some("AccessDeniedException") => Self::AccessDenied,
            Some("ThrottlingException") => Self::Throttled,
            Some(
                "InvalidParameterValueException"
                | "InvalidParameterException"
                | "UnsupportedUserEditionException"
                | "UnsupportedPricingPlanException",
            ) => Self::Rejected,
            Some(_) => Self::Service,
        }
    }

    /// Whether the failure describes the caller's request rather than the
    /// health of the service.
    #[must_use]
    pub const fn is_client_side(self) -> bool {
        matches!(self, Self::NotFound | Self::AccessDenied | Self::Rejected)
    }
}

/// A failed remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    operation: &'static str,
    code: Option<String>,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        operation: &'static str,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ApiErrorKind::from_code(code.as_deref()),
            operation,
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            operation,
            Some("ResourceNotFoundException".to_string()),
            message,
        )
    }

    #[must_use]
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(operation, None, message)
    }

    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} failed ({code}): {}", self.operation, self.message),
            None => write!(f, "{} failed: {}", self.operation, self.message),
        }
    }
}

impl Error for ApiError {}
