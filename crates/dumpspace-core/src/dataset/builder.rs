//! Batched, yielding dataset build pipeline

use super::Dataset;
use crate::config::EngineConfig;
use crate::error::{DumpError, DumpResult};
use crate::index::IndexBuilder;
use crate::inheritance::InheritanceGraph;
use crate::model::EntityKind;
use crate::normalize::{Normalizer, RawDataset};
use crate::progress::{BuildPhase, ProgressSink, ProgressTracker};
use crate::scheduler::Scheduler;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument};

/// Per-build state threaded through every checkpoint
pub(crate) struct BuildContext<'a> {
    generation: u64,
    current: &'a AtomicU64,
    scheduler: Arc<dyn Scheduler>,
    progress: ProgressTracker<'a>,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(
        generation: u64,
        current: &'a AtomicU64,
        scheduler: Arc<dyn Scheduler>,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            generation,
            current,
            scheduler,
            progress: ProgressTracker::new(sink),
        }
    }

    fn ensure_current(&self) -> DumpResult<()> {
        let current = self.current.load(Ordering::SeqCst);
        if current != self.generation {
            debug!(generation = self.generation, current, "Build superseded");
            return Err(DumpError::superseded(self.generation));
        }
        Ok(())
    }

    /// Report progress, yield, then make sure no newer load started meanwhile
    async fn checkpoint(
        &mut self,
        phase: BuildPhase,
        done: usize,
        total: usize,
        label: String,
    ) -> DumpResult<()> {
        self.progress.report(phase, done, total, label);
        self.scheduler.yield_now().await;
        self.ensure_current()
    }
}

/// Normalize, resolve inheritance and index `raw` in yielding batches
#[instrument(skip_all, fields(generation = ctx.generation, records = raw.total_records()))]
pub(crate) async fn build_dataset(
    raw: RawDataset,
    config: EngineConfig,
    ctx: &mut BuildContext<'_>,
) -> DumpResult<Dataset> {
    ctx.ensure_current()?;
    let batch_size = config.index.batch_size.max(1);

    info!("Normalizing records");
    let total_records = raw.total_records();
    let mut done = 0;
    let mut normalizer = Normalizer::new();
    for kind in EntityKind::ALL {
        for batch in raw.records(kind).chunks(batch_size) {
            for record in batch {
                normalizer.ingest(kind, record);
            }
            done += batch.len();
            ctx.checkpoint(
                BuildPhase::Normalizing,
                done,
                total_records,
                format!("Normalizing {} records ({}/{})", kind, done, total_records),
            )
            .await?;
        }
    }
    let (store, report) = normalizer.finish();
    drop(raw);
    info!(
        entities = store.len(),
        skipped = report.total_skipped(),
        duplicates = report.duplicates,
        "Normalization complete"
    );

    info!("Resolving inheritance");
    let graph = InheritanceGraph::from_store(&store);
    let class_names: Vec<&str> = store.class_likes().map(|(_, c)| c.name.as_str()).collect();
    let total_types = class_names.len();
    ctx.checkpoint(BuildPhase::Inheritance, 0, total_types, "Linking parents".to_string())
        .await?;
    for (i, batch) in class_names.chunks(batch_size).enumerate() {
        for name in batch {
            graph.warm(name);
        }
        let done = (i * batch_size + batch.len()).min(total_types);
        ctx.checkpoint(
            BuildPhase::Inheritance,
            done,
            total_types,
            format!("Computing closures ({}/{})", done, total_types),
        )
        .await?;
    }

    info!("Building search index");
    let total_entities = store.len();
    let mut builder = IndexBuilder::new(&config.index, &graph);
    let entities: Vec<_> = store.iter().collect();
    for batch in entities.chunks(batch_size) {
        for (id, entity) in batch {
            builder.index_entity(*id, entity);
        }
        let done = builder.indexed();
        ctx.checkpoint(
            BuildPhase::SearchIndex,
            done,
            total_entities,
            format!("Indexing ({}/{})", done, total_entities),
        )
        .await?;
    }
    let indexes = builder.finish();
    drop(entities);

    ctx.ensure_current()?;
    ctx.progress
        .report(BuildPhase::Ready, 1, 1, BuildPhase::Ready.title().to_string());
    info!(
        name_terms = indexes.name.term_count(),
        entities = total_entities,
        "Dataset ready"
    );

    Ok(Dataset::from_parts(
        ctx.generation,
        config,
        store,
        report,
        graph,
        indexes,
        Arc::clone(&ctx.scheduler),
    ))
}
