use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

/// Counts outcomes while resolving or expanding many list items and logs
/// periodic progress plus a final summary
pub struct ProgressTracker {
    total: usize,
    resolved: usize,
    duplicate: usize,
    failed: usize,
    skipped: usize,
    start_time: Instant,
    progress_interval: usize,
    last_progress_log: usize,
    error_counts: HashMap<String, usize>,
}

impl ProgressTracker {
    /// `progress_interval`: log progress every N items
    pub fn new(total: usize, progress_interval: usize) -> Self {
        if total > 10 {
            info!("Starting: {} items to process", total);
        }
        Self {
            total,
            resolved: 0,
            duplicate: 0,
            failed: 0,
            skipped: 0,
            start_time: Instant::now(),
            progress_interval: progress_interval.max(1),
            last_progress_log: 0,
            error_counts: HashMap::new(),
        }
    }

    pub fn record_resolved(&mut self) {
        self.resolved += 1;
    }

    /// Resolved to an item that was already collected
    pub fn record_duplicate(&mut self) {
        self.duplicate += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Failure grouped under `error_category` in the summary
    pub fn record_failed_with_error(&mut self, error_category: &str) {
        self.failed += 1;
        *self.error_counts.entry(error_category.to_string()).or_insert(0) += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn resolved(&self) -> usize {
        self.resolved
    }

    pub fn duplicate(&self) -> usize {
        self.duplicate
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Call after each item with its 1-based position
    pub fn log_progress(&mut self, current: usize) {
        if current - self.last_progress_log < self.progress_interval && current != self.total {
            return;
        }
        let elapsed = self.start_time.elapsed().as_secs_f64();
        // Instant batches don't need progress lines
        if elapsed < 0.5 && current < self.total {
            return;
        }
        let rate = if elapsed > 0.0 { current as f64 / elapsed } else { 0.0 };
        info!(
            "Progress: {}/{} ({:.1} items/sec) | Resolved: {} | Duplicate: {} | Failed: {} | Skipped: {}",
            current, self.total, rate, self.resolved, self.duplicate, self.failed, self.skipped
        );
        self.last_progress_log = current;
    }

    pub fn log_summary(&self, operation_name: &str) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if self.failed > 0 {
            warn!(
                "{} completed: {} total in {:.1}s | Resolved: {} | Duplicate: {} | Failed: {} | Skipped: {}",
                operation_name,
                self.total,
                elapsed,
                self.resolved,
                self.duplicate,
                self.failed,
                self.skipped
            );

            if !self.error_counts.is_empty() {
                let mut entries: Vec<_> = self.error_counts.iter().collect();
                entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                let breakdown: Vec<String> = entries
                    .iter()
                    .map(|(category, count)| format!("{}: {}", category, count))
                    .collect();
                info!("Error breakdown: {}", breakdown.join(", "));
            }
        } else {
            info!(
                "{} completed: {} total in {:.1}s | Resolved: {} | Duplicate: {} | Skipped: {}",
                operation_name, self.total, elapsed, self.resolved, self.duplicate, self.skipped
            );
        }
    }
}
