use std::error::Error;
use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use lineage_model::schema::DEFAULT_REGION;
use tracing::debug;

use crate::control::LineageControlPlane;
use crate::source::MetadataSource;

pub type BuildSourceFuture = BoxFuture<'static, Result<Arc<dyn MetadataSource>, SourceError>>;
pub type BuildSourceFn = Arc<dyn Fn(String) -> BuildSourceFuture + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    InvalidRegion(String),
    BuildFailed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion(region) => write!(f, "invalid region: {region:?}"),
            Self::BuildFailed(message) => write!(f, "failed to build metadata source: {message}"),
        }
    }
}

impl Error for SourceError {}

/// Builds a fresh metadata source for every invocation.
///
/// Nothing is cached between calls: each control plane gets its own source
/// bound to the requested region.
#[derive(Clone)]
pub struct SourceFactory {
    build_source: BuildSourceFn,
    default_region: String,
}

impl SourceFactory {
    pub fn new(build_source: BuildSourceFn) -> Self {
        Self {
            build_source,
            default_region: DEFAULT_REGION.to_string(),
        }
    }

    /// Factory handing out the same source on every call.
    pub fn from_source(source: Arc<dyn MetadataSource>) -> Self {
        Self::new(Arc::new(move |_region: String| {
            let source = source.clone();
            async move { Ok::<_, SourceError>(source) }.boxed()
        }))
    }

    #[must_use]
    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    #[must_use]
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Resolves a requested region, falling back to the default when the
    /// request is absent or blank.
    ///
    /// # Errors
    /// Returns `SourceError::InvalidRegion` if the resolved region is blank or
    /// is not a lowercase region code.
    pub fn resolve_region(&self, requested: Option<&str>) -> Result<String, SourceError> {
        let region = requested
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| self.default_region.trim());
        let valid = !region.is_empty()
            && region
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if valid {
            Ok(region.to_string())
        } else {
            Err(SourceError::InvalidRegion(region.to_string()))
        }
    }

    /// Builds a control plane over a new source for `account_id` and the
    /// resolved region.
    ///
    /// # Errors
    /// Returns `SourceError` if the region is invalid or the source cannot be
    /// built.
    pub async fn control_plane(
        &self,
        account_id: &str,
        region: Option<&str>,
    ) -> Result<LineageControlPlane, SourceError> {
        let region = self.resolve_region(region)?;
        debug!(account_id, region = %region, "building metadata source");
        let source = (self.build_source)(region.clone()).await?;
        Ok(LineageControlPlane::new(source, account_id, region))
    }
}

impl fmt::Debug for SourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFactory")
            .field("default_region", &self.default_region)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::source::ScriptedSource;

    fn build_test_factory(
        calls: Arc<AtomicUsize>,
        regions: Arc<Mutex<Vec<String>>>,
    ) -> SourceFactory {
        let build = Arc::new(move |region: String| {
            let calls = calls.clone();
            let regions = regions.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                regions
                    .lock()
                    .map_err(|err| SourceError::BuildFailed(err.to_string()))?
                    .push(region);
                let source: Arc<dyn MetadataSource> = Arc::new(ScriptedSource::new());
                Ok::<_, SourceError>(source)
            }
            .boxed()
        });
        SourceFactory::new(build)
    }

    #[tokio::test]
    async fn builds_a_fresh_source_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let regions = Arc::new(Mutex::new(Vec::new()));
        let factory = build_test_factory(calls.clone(), regions.clone());

        let first = factory.control_plane("123", None).await.unwrap();
        let second = factory.control_plane("123", Some("eu-west-1")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.region(), "us-east-1");
        assert_eq!(second.region(), "eu-west-1");
        assert_eq!(
            *regions.lock().unwrap(),
            vec!["us-east-1".to_string(), "eu-west-1".to_string()]
        );
    }

    #[test]
    fn blank_region_uses_default() {
        let factory = SourceFactory::from_source(Arc::new(ScriptedSource::new()))
            .with_default_region("ap-southeast-2");

        assert_eq!(factory.resolve_region(Some("   ")).unwrap(), "ap-southeast-2");
        assert_eq!(factory.resolve_region(None).unwrap(), "ap-southeast-2");
        assert_eq!(factory.resolve_region(Some(" us-west-2 ")).unwrap(), "us-west-2");
    }

    #[tokio::test]
    async fn invalid_region_is_rejected_before_build() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = build_test_factory(calls.clone(), Arc::new(Mutex::new(Vec::new())))
            .with_default_region("");

        let err = factory.control_plane("123", None).await.unwrap_err();
        assert_eq!(err, SourceError::InvalidRegion(String::new()));

        let err = factory
            .control_plane("123", Some("us east 1"))
            .await
            .unwrap_err();
        assert_eq!(err, SourceError::InvalidRegion("us east 1".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
