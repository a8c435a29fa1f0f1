use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use giftscan_core::{
    finalize_results, ExclusionSet, ExclusionSource, IdRange, ItemRecord, ModelCatalog, Query,
    QueryError, RequestedRange, UNKNOWN_OWNER,
};
use tokio::sync::mpsc;

use crate::{AdmissionGate, FailureKind, FetchError, ItemFetcher};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Most fetches in flight at once within one query.
    pub max_in_flight: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { max_in_flight: 100 }
    }
}

/// Validates a query, fetches every id in its range through an admission gate,
/// and returns the filtered records in id order.
#[derive(Clone)]
pub struct QueryPipeline {
    catalog: Arc<ModelCatalog>,
    exclusions: Arc<dyn ExclusionSource>,
    fetcher: Arc<dyn ItemFetcher>,
    settings: PipelineSettings,
}

impl QueryPipeline {
    pub fn new(
        catalog: Arc<ModelCatalog>,
        exclusions: Arc<dyn ExclusionSource>,
        fetcher: Arc<dyn ItemFetcher>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            catalog,
            exclusions,
            fetcher,
            settings,
        }
    }

    pub async fn run(&self, query: &Query) -> Result<Vec<ItemRecord>, QueryError> {
        let max_id = self
            .catalog
            .max_id(&query.model)
            .ok_or_else(|| QueryError::InvalidModel(query.model.clone()))?;
        let range = RequestedRange::parse(&query.id_range)?.clamp(max_id);
        let exclusions = self.exclusions.load()?;

        let Some(range) = range else {
            engine_info!(
                "Query model={} id_range={} is empty after clamping to 1..={}",
                query.model,
                query.id_range,
                max_id
            );
            return Ok(Vec::new());
        };

        engine_info!(
            "Query model={} ids={}..={} tasks={} limit={} order={:?}",
            query.model,
            range.start(),
            range.end(),
            range.len(),
            query.limit,
            query.order
        );

        let candidates = self.collect(&query.model, range, &exclusions).await;
        let candidate_count = candidates.len();
        let results = finalize_results(candidates, query.order, query.limit);

        engine_info!(
            "Query model={} done: candidates={} returned={}",
            query.model,
            candidate_count,
            results.len()
        );
        Ok(results)
    }

    /// Spawns one task per id right away; the gate decides when each may fetch.
    /// Tasks only report back over the channel, so this loop is the sole writer
    /// of the accumulator. Tasks are detached: dropping this future does not
    /// cancel fetches already scheduled.
    async fn collect(
        &self,
        model: &str,
        range: IdRange,
        exclusions: &ExclusionSet,
    ) -> Vec<ItemRecord> {
        let gate = AdmissionGate::new(self.settings.max_in_flight);
        let (tx, mut rx) = mpsc::unbounded_channel::<(u64, Result<ItemRecord, FetchError>)>();

        for id in range.ids() {
            let gate = gate.clone();
            let fetcher = self.fetcher.clone();
            let tx = tx.clone();
            let model = model.to_string();
            tokio::spawn(async move {
                let outcome = match gate.acquire().await {
                    Ok(permit) => {
                        let outcome = fetcher.fetch(&model, id).await;
                        permit.release();
                        outcome
                    }
                    Err(err) => Err(FetchError::new(FailureKind::Cancelled, err.to_string())),
                };
                let _ = tx.send((id, outcome));
            });
        }
        drop(tx);

        let mut accepted = Vec::new();
        while let Some((id, outcome)) = rx.recv().await {
            match outcome {
                Ok(record) if record.owner == UNKNOWN_OWNER => {
                    engine_debug!("{}-{} dropped: owner unresolved", model, id);
                }
                Ok(record) if exclusions.is_excluded(&record.owner) => {
                    engine_debug!("{}-{} dropped: owner {} excluded", model, id, record.owner);
                }
                Ok(record) => accepted.push(record),
                Err(err) if err.kind.is_transport() => {
                    engine_warn!("{}-{} fetch failed: {}", model, id, err);
                }
                Err(err) => {
                    engine_debug!("{}-{} dropped: {}", model, id, err);
                }
            }
        }
        accepted
    }
}
