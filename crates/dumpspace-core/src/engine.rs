//! Engine facade owning the current dataset generation
//!
//! Every [`ReflectionEngine::load`] starts a new generation. A build checks
//! the generation counter after each yield and abandons itself as soon as a
//! newer load has started. Finished datasets are published atomically
//! through a watch channel, so readers only ever see complete datasets.

use crate::config::EngineConfig;
use crate::dataset::{BuildContext, Dataset, build_dataset};
use crate::error::{DumpError, DumpResult};
use crate::normalize::RawDataset;
use crate::progress::ProgressSink;
use crate::scheduler::{Scheduler, TokioScheduler};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// What the engine currently holds
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing loaded yet, or the last build was abandoned
    #[default]
    Empty,
    /// A build for this generation is in progress
    Building { generation: u64 },
    /// A complete dataset
    Ready(Arc<Dataset>),
}

impl LoadState {
    pub fn is_building(&self) -> bool {
        matches!(self, Self::Building { .. })
    }
}

/// Resets the state when a build ends without publishing
struct BuildTicket<'a> {
    state: &'a watch::Sender<LoadState>,
    generation: u64,
    armed: bool,
}

impl BuildTicket<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BuildTicket<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let generation = self.generation;
        self.state.send_if_modified(|state| match state {
            LoadState::Building { generation: g } if *g == generation => {
                *state = LoadState::Empty;
                true
            }
            _ => false,
        });
    }
}

pub struct ReflectionEngine {
    config: EngineConfig,
    scheduler: Arc<dyn Scheduler>,
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
}

impl ReflectionEngine {
    /// Engine yielding to the tokio runtime between batches
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scheduler(config, Arc::new(TokioScheduler))
    }

    pub fn with_scheduler(config: EngineConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        let (state, _) = watch::channel(LoadState::Empty);
        Self {
            config,
            scheduler,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generation of the most recent load
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_building(&self) -> bool {
        self.state.borrow().is_building()
    }

    /// Ready dataset, without waiting for a running build
    pub fn current(&self) -> Option<Arc<Dataset>> {
        match &*self.state.borrow() {
            LoadState::Ready(dataset) => Some(Arc::clone(dataset)),
            _ => None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Build and publish a dataset, replacing whatever was loaded before
    ///
    /// Fails with [`DumpError::Superseded`] when another load starts before
    /// this one finishes; the newer load then owns the engine.
    #[instrument(skip_all, fields(records = raw.total_records()))]
    pub async fn load(&self, raw: RawDataset, sink: &dyn ProgressSink) -> DumpResult<Arc<Dataset>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "Starting dataset load");
        self.state.send_replace(LoadState::Building { generation });
        let ticket = BuildTicket {
            state: &self.state,
            generation,
            armed: true,
        };

        let mut ctx = BuildContext::new(
            generation,
            &self.generation,
            Arc::clone(&self.scheduler),
            sink,
        );
        let dataset = match build_dataset(raw, self.config.clone(), &mut ctx).await {
            Ok(dataset) => Arc::new(dataset),
            Err(err) => {
                warn!(generation, error = %err, "Dataset load abandoned");
                return Err(err);
            }
        };

        let published = self.state.send_if_modified(|state| match state {
            LoadState::Building { generation: g } if *g == generation => {
                *state = LoadState::Ready(Arc::clone(&dataset));
                true
            }
            _ => false,
        });
        ticket.disarm();

        if !published {
            return Err(DumpError::superseded(generation));
        }
        info!(generation, entities = dataset.store().len(), "Dataset published");
        Ok(dataset)
    }

    /// Newest complete dataset, waiting for a running build to finish
    pub async fn dataset(&self) -> DumpResult<Arc<Dataset>> {
        let mut receiver = self.state.subscribe();
        let state = receiver
            .wait_for(|state| !state.is_building())
            .await
            .map_err(|_| DumpError::Cancelled)?;
        match &*state {
            LoadState::Ready(dataset) => Ok(Arc::clone(dataset)),
            _ => Err(DumpError::NotLoaded),
        }
    }
}

impl Default for ReflectionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
