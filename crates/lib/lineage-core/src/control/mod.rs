use std::{error::Error, fmt, sync::Arc};

use lineage_model::ResourceKind;
use tracing::Span;

use crate::assemble::AssembleError;
use crate::collect::CollectError;
use crate::source::{ApiError, MetadataSource};

pub mod detail;
pub mod listing;

#[derive(Debug)]
pub enum ControlError {
    Api(ApiError),
    Assemble(AssembleError),
    Enumeration {
        kind: ResourceKind,
        source: CollectError,
    },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Assemble(err) => write!(f, "{err}"),
            Self::Enumeration { kind, source } => write!(f, "listing {kind}: {source}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Assemble(err) => Some(err),
            Self::Enumeration { source, .. } => Some(source),
        }
    }
}

impl From<ApiError> for ControlError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<AssembleError> for ControlError {
    fn from(err: AssembleError) -> Self {
        Self::Assemble(err)
    }
}

/// Lineage queries for one account and region.
///
/// A control plane is built per invocation and owns the `lineage` span every
/// event of that invocation is emitted in.
#[derive(Clone)]
pub struct LineageControlPlane {
    source: Arc<dyn MetadataSource>,
    account_id: String,
    region: String,
    span: Span,
}

impl LineageControlPlane {
    pub fn new(
        source: Arc<dyn MetadataSource>,
        account_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let account_id = account_id.into();
        let region = region.into();
        let span = tracing::info_span!("lineage", account_id = %account_id, region = %region);
        Self {
            source,
            account_id,
            region,
            span,
        }
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

impl fmt::Debug for LineageControlPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineageControlPlane")
            .field("account_id", &self.account_id)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
