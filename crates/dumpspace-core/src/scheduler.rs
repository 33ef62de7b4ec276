//! Scheduler trait - the yield point between work batches
//!
//! Long operations (index builds, scoped searches) process fixed-size
//! batches and call [`Scheduler::yield_now`] after each one, handing control
//! back to the host event loop so progress reporting and other tasks can
//! interleave.

use async_trait::async_trait;

/// Hands control back to the host between batches
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Yield once
    async fn yield_now(&self);
}

/// Yields to the tokio runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn yield_now(&self) {
        tokio::task::yield_now().await;
    }
}

/// Never yields; batches run back to back
///
/// For synchronous hosts and deterministic tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScheduler;

#[async_trait]
impl Scheduler for InlineScheduler {
    async fn yield_now(&self) {}
}
