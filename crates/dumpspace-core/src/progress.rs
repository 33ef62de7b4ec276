//! Build progress reporting

use serde::Serialize;
use std::fmt;

/// Stage of a dataset build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhase {
    Normalizing,
    Inheritance,
    SearchIndex,
    Ready,
}

impl BuildPhase {
    /// Percent range this phase covers
    pub fn span(&self) -> (u8, u8) {
        match self {
            Self::Normalizing => (0, 40),
            Self::Inheritance => (40, 55),
            Self::SearchIndex => (55, 99),
            Self::Ready => (100, 100),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Normalizing => "Normalizing records",
            Self::Inheritance => "Resolving inheritance",
            Self::SearchIndex => "Building search index",
            Self::Ready => "Ready",
        }
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One progress update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProgress {
    /// 0..=100, never decreasing within one build
    pub percent: u8,
    pub phase: BuildPhase,
    pub label: String,
}

/// Receives progress updates during a build
///
/// Closures taking a [`BuildProgress`] implement this trait.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: BuildProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(BuildProgress) + Send + Sync,
{
    fn report(&self, progress: BuildProgress) {
        self(progress)
    }
}

/// Discards all progress updates
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn report(&self, _progress: BuildProgress) {}
}

/// Maps per-phase completion onto the overall percentage
pub(crate) struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    last: u8,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(sink: &'a dyn ProgressSink) -> Self {
        Self { sink, last: 0 }
    }

    pub(crate) fn report(
        &mut self,
        phase: BuildPhase,
        done: usize,
        total: usize,
        label: impl Into<String>,
    ) {
        let (start, end) = phase.span();
        let fraction = if total == 0 {
            1.0
        } else {
            (done as f64 / total as f64).min(1.0)
        };
        let percent = start + ((end - start) as f64 * fraction).round() as u8;
        self.last = self.last.max(percent);
        self.sink.report(BuildProgress {
            percent: self.last,
            phase,
            label: label.into(),
        });
    }

    pub(crate) fn percent(&self) -> u8 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_tracker_is_monotonic_and_bounded() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: BuildProgress| seen.lock().push(p.percent);
        let mut tracker = ProgressTracker::new(&sink);

        tracker.report(BuildPhase::Normalizing, 0, 10, "start");
        tracker.report(BuildPhase::Normalizing, 10, 10, "done");
        tracker.report(BuildPhase::Inheritance, 0, 0, "empty phase");
        tracker.report(BuildPhase::Normalizing, 5, 10, "late straggler");
        tracker.report(BuildPhase::SearchIndex, 50, 100, "half");
        tracker.report(BuildPhase::Ready, 0, 0, "ready");

        assert_eq!(tracker.percent(), 100);
        assert_eq!(seen.into_inner(), vec![0, 40, 55, 55, 77, 100]);
    }

    #[test]
    fn test_phase_spans_cover_zero_to_hundred() {
        assert_eq!(BuildPhase::Normalizing.span().0, 0);
        assert_eq!(BuildPhase::Normalizing.span().1, BuildPhase::Inheritance.span().0);
        assert_eq!(BuildPhase::Inheritance.span().1, BuildPhase::SearchIndex.span().0);
        assert_eq!(BuildPhase::Ready.span(), (100, 100));
    }
}
