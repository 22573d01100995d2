use std::sync::Arc;
use std::time::Duration;

use lineage_core::services::{BuildSourceFn, BuildSourceFuture, SourceError, SourceFactory};
use lineage_core::source::{MetadataSource, QuickSightSettings, QuickSightSource};
use tracing::debug;

use crate::config::LineageConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a factory that connects a new QuickSight client on every call.
pub fn build_factory(config: &LineageConfig) -> SourceFactory {
    let mut settings = QuickSightSettings::default();
    if let Some(profile) = config.aws_profile.as_deref() {
        settings = settings.with_profile(profile);
    }
    if let Some(endpoint_url) = config.endpoint_url.as_deref() {
        settings = settings.with_endpoint_url(endpoint_url);
    }

    let build: BuildSourceFn = Arc::new(move |region: String| {
        let settings = settings.clone();
        Box::pin(async move {
            let source = tokio::time::timeout(
                CONNECT_TIMEOUT,
                QuickSightSource::connect(&region, &settings),
            )
            .await
            .map_err(|_| {
                SourceError::BuildFailed(format!(
                    "loading AWS configuration for {region} timed out"
                ))
            })?;
            debug!(region = source.region(), "QuickSight source ready");
            Ok::<Arc<dyn MetadataSource>, SourceError>(Arc::new(source))
        }) as BuildSourceFuture
    });

    SourceFactory::new(build).with_default_region(config.default_region.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_uses_configured_default_region() {
        let config = LineageConfig {
            default_region: "eu-central-1".to_string(),
            aws_profile: None,
            endpoint_url: None,
            enable_stdio: true,
            http_serve: false,
            http_addr: "127.0.0.1:4030".parse().expect("valid HTTP addr"),
            http_sessions: true,
            http_keep_alive: None,
            log_filter: "info".to_string(),
        };

        let factory = build_factory(&config);

        assert_eq!(factory.default_region(), "eu-central-1");
        assert_eq!(
            factory.resolve_region(None).expect("region should resolve"),
            "eu-central-1"
        );
    }
}
