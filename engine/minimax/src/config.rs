//! Search configuration parameters.

use std::fmt;
use std::str::FromStr;

use crate::transposition::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};

/// When a cached value computed at one remaining depth may answer a probe at
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPolicy {
    /// Only entries recorded at exactly the probed remaining depth are used.
    /// Results are identical to an uncached search.
    #[default]
    Exact,
    /// Entries recorded at the probed depth or deeper are used. Fewer nodes,
    /// but the result may differ from an uncached search of the same depth.
    AtLeast,
}

/// Window used to score each root move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootWindow {
    /// Every root child gets the full `(-inf, +inf)` window, so every root
    /// score is exact.
    #[default]
    Fresh,
    /// The best score so far narrows the window for later root children.
    /// The chosen move is the same; only the best score is exact.
    Shared,
}

/// Error returned when parsing a policy name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParsePolicyError {
    kind: &'static str,
    value: String,
}

impl ParsePolicyError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for DepthPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(DepthPolicy::Exact),
            "at_least" | "at-least" | "atleast" => Ok(DepthPolicy::AtLeast),
            _ => Err(ParsePolicyError::new("depth policy", s)),
        }
    }
}

impl fmt::Display for DepthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthPolicy::Exact => write!(f, "exact"),
            DepthPolicy::AtLeast => write!(f, "at_least"),
        }
    }
}

impl FromStr for RootWindow {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh" => Ok(RootWindow::Fresh),
            "shared" => Ok(RootWindow::Shared),
            _ => Err(ParsePolicyError::new("root window", s)),
        }
    }
}

impl fmt::Display for RootWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootWindow::Fresh => write!(f, "fresh"),
            RootWindow::Shared => write!(f, "shared"),
        }
    }
}

/// Configuration for minimax search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Remaining depth given to the root search when a driver picks a move.
    pub depth: u32,

    /// Cache reuse rule across remaining depths.
    pub depth_policy: DepthPolicy,

    /// Window handed to each root child.
    pub root_window: RootWindow,

    /// Whether drivers create a transposition table for their searches.
    pub use_cache: bool,

    /// Initial bucket count of driver-created tables.
    pub cache_capacity: usize,

    /// Load factor at which driver-created tables start growing.
    pub max_load_factor: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            depth_policy: DepthPolicy::Exact,
            root_window: RootWindow::Fresh,
            use_cache: true,
            cache_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl SearchConfig {
    /// Shallow, cache-enabled config for tests.
    pub fn for_testing() -> Self {
        Self {
            depth: 3,
            cache_capacity: 64,
            ..Self::default()
        }
    }

    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: set cache depth policy.
    pub fn with_depth_policy(mut self, policy: DepthPolicy) -> Self {
        self.depth_policy = policy;
        self
    }

    /// Builder pattern: set root window handling.
    pub fn with_root_window(mut self, window: RootWindow) -> Self {
        self.root_window = window;
        self
    }

    /// Builder pattern: enable or disable the transposition table.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Builder pattern: set initial table size and growth threshold.
    pub fn with_cache_sizing(mut self, capacity: usize, max_load_factor: f64) -> Self {
        self.cache_capacity = capacity;
        self.max_load_factor = max_load_factor;
        self
    }
}
