use lineage_model::{
    AnalysisLineage,
    DashboardLineage,
    DataSetLineage,
    DataSourceLineage,
    Lineage,
    LookupFailure,
    ResourceKind,
};
use serde_json::Value;
use tracing::{Instrument, debug, error, warn};

use super::{ControlError, LineageControlPlane};
use crate::assemble;

impl LineageControlPlane {
    /// Describes a dataset and projects its sources, transformations and
    /// output columns. Failures come back as a `{DataSetId, Error}` record.
    pub async fn analyze_data_set(&self, data_set_id: &str) -> Lineage<DataSetLineage> {
        let result = match self.describe(ResourceKind::DataSet, data_set_id).await {
            Ok(response) => assemble::data_set(data_set_id, &response).map_err(ControlError::from),
            Err(err) => Err(err),
        };
        self.settle(ResourceKind::DataSet, data_set_id, result)
    }

    /// Describes a data source and projects its connection parameters.
    pub async fn analyze_data_source(&self, data_source_id: &str) -> Lineage<DataSourceLineage> {
        let result = match self.describe(ResourceKind::DataSource, data_source_id).await {
            Ok(response) => {
                assemble::data_source(data_source_id, &response).map_err(ControlError::from)
            }
            Err(err) => Err(err),
        };
        self.settle(ResourceKind::DataSource, data_source_id, result)
    }

    /// Describes an analysis definition and projects its dataset bindings,
    /// sheets and derived definitions.
    pub async fn analyze_analysis(&self, analysis_id: &str) -> Lineage<AnalysisLineage> {
        let result = self
            .describe(ResourceKind::Analysis, analysis_id)
            .await
            .map(|response| assemble::analysis(analysis_id, &response));
        self.settle(ResourceKind::Analysis, analysis_id, result)
    }

    /// Describes a dashboard and projects its source analysis and bound
    /// datasets.
    pub async fn analyze_dashboard(&self, dashboard_id: &str) -> Lineage<DashboardLineage> {
        let result = self
            .describe(ResourceKind::Dashboard, dashboard_id)
            .await
            .map(|response| assemble::dashboard(dashboard_id, &response));
        self.settle(ResourceKind::Dashboard, dashboard_id, result)
    }

    async fn describe(&self, kind: ResourceKind, resource_id: &str) -> Result<Value, ControlError> {
        self.source
            .describe(kind, &self.account_id, resource_id)
            .instrument(self.span.clone())
            .await
            .map_err(ControlError::from)
    }

    fn settle<T>(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        result: Result<T, ControlError>,
    ) -> Lineage<T> {
        let _entered = self.span.enter();
        match result {
            Ok(record) => {
                debug!(%kind, resource_id, "lineage resolved");
                Lineage::Resolved(record)
            }
            Err(err) => {
                match &err {
                    ControlError::Api(api) if api.kind().is_client_side() => {
                        warn!(%kind, resource_id, error = %err, "lookup failed");
                    }
                    _ => error!(%kind, resource_id, error = %err, "lookup failed"),
                }
                Lineage::Failed(LookupFailure::new(kind, resource_id, err.to_string()))
            }
        }
    }
}
