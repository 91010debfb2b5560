use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::info;

use crate::definition::cross_file::ScanStats;

const SUMMARY_EVERY: u64 = 200;

/// Where a go-to-definition request found its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolvedBy {
    Include,
    Local,
    CrossFile,
    Nothing,
}

/// Runtime counters for go-to-definition requests.
///
/// Every request re-scans the project, so `scripts_read` and the average
/// latency show what that costs on real projects.
#[derive(Default)]
pub(crate) struct GotoDefPerf {
    requests: AtomicU64,
    include_hits: AtomicU64,
    local_hits: AtomicU64,
    cross_file_hits: AtomicU64,
    misses: AtomicU64,
    candidates_scanned: AtomicU64,
    scripts_read: AtomicU64,
    total_elapsed_ns: AtomicU64,
}

impl GotoDefPerf {
    pub(crate) fn record(
        &self,
        elapsed: Duration,
        resolved_by: ResolvedBy,
        stats: ScanStats,
    ) {
        let requests = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        let counter = match resolved_by {
            ResolvedBy::Include => &self.include_hits,
            ResolvedBy::Local => &self.local_hits,
            ResolvedBy::CrossFile => &self.cross_file_hits,
            ResolvedBy::Nothing => &self.misses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.candidates_scanned.fetch_add(stats.candidates as u64, Ordering::Relaxed);
        self.scripts_read.fetch_add(stats.scripts_read as u64, Ordering::Relaxed);

        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.total_elapsed_ns.fetch_add(elapsed_ns, Ordering::Relaxed);

        if requests % SUMMARY_EVERY == 0 {
            self.log_summary();
        }
    }

    pub(crate) fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub(crate) fn log_summary(&self) {
        let requests = self.requests.load(Ordering::Relaxed);
        if requests == 0 {
            info!("[perf][goto-def] no requests recorded yet");
            return;
        }

        let include_hits = self.include_hits.load(Ordering::Relaxed);
        let local_hits = self.local_hits.load(Ordering::Relaxed);
        let cross_file_hits = self.cross_file_hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let candidates_scanned = self.candidates_scanned.load(Ordering::Relaxed);
        let scripts_read = self.scripts_read.load(Ordering::Relaxed);
        let total_elapsed_ns = self.total_elapsed_ns.load(Ordering::Relaxed);

        let avg_ms = total_elapsed_ns as f64 / requests as f64 / 1_000_000.0;
        let avg_candidates = candidates_scanned as f64 / requests as f64;
        let avg_reads = scripts_read as f64 / requests as f64;

        info!(
            "[perf][goto-def] requests={requests}, include={include_hits}, local={local_hits}, \
             cross_file={cross_file_hits}, misses={misses}, avg_candidates={avg_candidates:.1}, \
             avg_reads={avg_reads:.1}, avg_ms={avg_ms:.2}"
        );
    }
}
