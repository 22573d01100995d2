use std::collections::BTreeMap;

use lineage_model::{ResourceCounts, ResourceKind, ResourceSummary};
use serde_json::Value;
use tracing::{Instrument, info, warn};

use super::{ControlError, LineageControlPlane};
use crate::assemble;
use crate::collect::{PageSpec, collect_all};

impl LineageControlPlane {
    /// Enumerates every summary of `kind`, following continuation tokens.
    ///
    /// # Errors
    /// Returns `ControlError::Enumeration` if any page fails; nothing gathered
    /// before the failure is returned.
    pub async fn list_all(&self, kind: ResourceKind) -> Result<Vec<Value>, ControlError> {
        collect_all(PageSpec::for_kind(kind), |token| {
            self.source.list_page(kind, &self.account_id, token)
        })
        .instrument(self.span.clone())
        .await
        .map_err(|source| ControlError::Enumeration { kind, source })
    }

    /// Enumerates `kind` and reduces each entry to its id and name, in remote
    /// order. Entries without an id are skipped.
    ///
    /// # Errors
    /// Returns `ControlError` if enumeration fails.
    pub async fn list_summaries(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>, ControlError> {
        let entries = self.list_all(kind).await?;
        Ok(self.span.in_scope(|| {
            entries
                .iter()
                .filter_map(|entry| {
                    let summary = assemble::summary(kind, entry);
                    if summary.is_none() {
                        warn!(%kind, "skipping summary without an id");
                    }
                    summary
                })
                .collect()
        }))
    }

    /// Maps every id of `kind` to its display name. A repeated id keeps the
    /// last name seen.
    ///
    /// # Errors
    /// Returns `ControlError` if enumeration fails.
    pub async fn list_names(
        &self,
        kind: ResourceKind,
    ) -> Result<BTreeMap<String, String>, ControlError> {
        Ok(self
            .list_summaries(kind)
            .await?
            .into_iter()
            .map(|summary| (summary.id, summary.name))
            .collect())
    }

    /// Counts every resource kind, one kind after another.
    ///
    /// A kind whose enumeration fails is counted as 0 and its error is
    /// recorded under its label; the other kinds are still counted.
    pub async fn overview(&self) -> ResourceCounts {
        let mut counts = ResourceCounts::default();
        for kind in ResourceKind::ALL {
            match self.list_all(kind).await {
                Ok(entries) => {
                    self.span.in_scope(|| info!("found {} {kind}", entries.len()));
                    counts.set_count(kind, entries.len());
                }
                Err(err) => {
                    self.span
                        .in_scope(|| warn!(%kind, error = %err, "enumeration failed"));
                    counts.errors.insert(kind.label().to_string(), err.to_string());
                }
            }
        }
        counts
    }
}
