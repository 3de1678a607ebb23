//! Search counters for diagnostics and tuning.

/// Counters accumulated by a [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered by the recursive search (root children and below)
    pub nodes: u64,
    /// Nodes scored with the static evaluation (terminal or depth 0)
    pub leaf_evals: u64,
    /// Transposition-table lookups
    pub cache_probes: u64,
    /// Lookups that returned a usable value
    pub cache_hits: u64,
    /// Values written to the table
    pub cache_stores: u64,
    /// Alpha-beta cutoffs (remaining siblings skipped)
    pub cutoffs: u64,
}

impl SearchStats {
    /// Cache hit rate in percent
    pub fn cache_hit_rate(&self) -> f64 {
        if self.cache_probes == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.cache_probes as f64 * 100.0
        }
    }

    /// Add another set of counters into this one
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaf_evals += other.leaf_evals;
        self.cache_probes += other.cache_probes;
        self.cache_hits += other.cache_hits;
        self.cache_stores += other.cache_stores;
        self.cutoffs += other.cutoffs;
    }
}
