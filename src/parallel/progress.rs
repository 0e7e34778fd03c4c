use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// How often the live progress line is redrawn
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Shared progress counters for one batch run.
///
/// Counts are atomics; the failed-name list sits behind a mutex. A worker calls
/// [`increment`](Self::increment) once per finished job and additionally
/// [`record_failure`](Self::record_failure) for each failed one. Every increment
/// also advances the attached progress bar, which stays hidden until a
/// [`ProgressTicker`] gives it a draw target.
pub struct ProgressTracker {
    total: usize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    failed_names: Mutex<Vec<String>>,
    bar: ProgressBar,
}

/// Point-in-time view of a [`ProgressTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Final, read-only outcome of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failed_names: Vec<String>,
}

impl RunSummary {
    /// Summary for a run that found nothing to do
    pub fn empty() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            failed_names: Vec::new(),
        }
    }
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            failed_names: Mutex::new(Vec::new()),
            bar: ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden()),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    /// Record a failed job by name. Call after [`increment`](Self::increment)
    /// for the same job so a snapshot never shows more failures than completions.
    pub fn record_failure(&self, name: &str) {
        let mut names = self
            .failed_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        names.push(name.to_string());
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        // failed is read first: every failure increment is preceded by a completion increment
        let failed = self.failed.load(Ordering::SeqCst);
        let completed = self.completed.load(Ordering::SeqCst);
        ProgressSnapshot {
            completed,
            failed,
            total: self.total,
        }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    pub fn failed_names(&self) -> Vec<String> {
        self.failed_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Freeze the counters into a [`RunSummary`]. Only meaningful once the pool has joined.
    pub fn summary(&self) -> RunSummary {
        let failed_names = self.failed_names();
        let failed = failed_names.len();
        RunSummary {
            total: self.total,
            succeeded: self.total.saturating_sub(failed),
            failed,
            failed_names,
        }
    }
}

/// Live `{label}: {completed}/{total}` bar over a tracker, redrawn on a steady tick.
///
/// The bar only draws when its target is a terminal. [`stop`](Self::stop)
/// clears it and always writes one plain `\r{label}: n/N` line to `out`.
pub struct ProgressTicker {
    tracker: Arc<ProgressTracker>,
    label: String,
    out: Arc<Mutex<dyn Write + Send>>,
}

impl ProgressTicker {
    pub fn start_with(
        label: &str,
        tracker: Arc<ProgressTracker>,
        target: ProgressDrawTarget,
        out: Arc<Mutex<dyn Write + Send>>,
    ) -> Result<Self> {
        let bar = tracker.bar();
        bar.set_style(ProgressStyle::with_template("{msg}: {pos}/{len}")?);
        bar.set_message(label.to_string());
        bar.set_length(tracker.total() as u64);
        bar.set_draw_target(target);
        bar.enable_steady_tick(DEFAULT_TICK_INTERVAL);

        Ok(Self {
            tracker,
            label: label.to_string(),
            out,
        })
    }

    /// Stop ticking, clear the bar, then print the final line.
    ///
    /// The final line is drawn after the tick thread is gone, so it always
    /// reflects the counters as they stand once the pool has finished.
    pub fn stop(self) -> ProgressSnapshot {
        self.tracker.bar().finish_and_clear();
        let snapshot = self.tracker.snapshot();

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "\r{}: {}/{}", self.label, snapshot.completed, snapshot.total);
        let _ = out.flush();
        snapshot
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        let bar = self.tracker.bar();
        if !bar.is_finished() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let tracker = ProgressTracker::new(3);
        tracker.increment();
        tracker.increment();
        tracker.record_failure("beta");
        tracker.increment();

        assert_eq!(
            tracker.snapshot(),
            ProgressSnapshot {
                completed: 3,
                failed: 1,
                total: 3
            }
        );

        let summary = tracker.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_names, vec!["beta".to_string()]);
    }

    #[test]
    fn test_snapshot_never_shows_more_failures_than_completions() {
        let tracker = Arc::new(ProgressTracker::new(4000));

        std::thread::scope(|s| {
            for worker in 0..4 {
                let tracker = tracker.clone();
                s.spawn(move || {
                    for i in 0..1000 {
                        tracker.increment();
                        if i % 2 == 0 {
                            tracker.record_failure(&format!("w{worker}-{i}"));
                        }
                    }
                });
            }

            let tracker = tracker.clone();
            s.spawn(move || {
                for _ in 0..10_000 {
                    let snap = tracker.snapshot();
                    assert!(snap.failed <= snap.completed);
                    assert!(snap.completed <= snap.total);
                }
            });
        });

        assert_eq!(tracker.snapshot().completed, 4000);
        assert_eq!(tracker.summary().failed, 2000);
    }

    #[test]
    fn test_ticker_final_line_reaches_total() {
        let tracker = Arc::new(ProgressTracker::new(2));
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ticker = ProgressTicker::start_with(
            "Bundling repositories",
            tracker.clone(),
            ProgressDrawTarget::hidden(),
            buffer.clone(),
        )
        .unwrap();
        tracker.increment();
        std::thread::sleep(Duration::from_millis(20));
        tracker.increment();

        let last = ticker.stop();
        assert_eq!(last.completed, 2);
        assert_eq!(tracker.bar().position(), 2);
        assert!(tracker.bar().is_finished());

        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(text.ends_with("\rBundling repositories: 2/2\n"));
    }
}
