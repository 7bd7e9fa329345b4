//! Per-client call counter backing the refine endpoint's usage limit.
//!
//! Counts live only in process memory and are never decremented or expired;
//! a client that crosses the limit stays over it until the process restarts.
//! The count is incremented before it is compared, so with a limit of `n` the
//! `n + 1`-th call is the first one refused.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::defaults;
use crate::error::{Error, Result};

/// Outcome of recording one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageDecision {
    /// Post-increment count is within the limit.
    Allowed { count: u64 },
    /// Post-increment count exceeds the limit.
    Exceeded { count: u64 },
}

/// Shared usage table keyed by client identifier.
#[derive(Debug)]
pub struct UsageTable {
    limit: u64,
    counts: Mutex<HashMap<String, u64>>,
}

impl Default for UsageTable {
    fn default() -> Self {
        Self::new(defaults::USAGE_LIMIT)
    }
}

impl UsageTable {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Maximum number of allowed calls per client.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    // Counters stay consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Increment the caller's count and compare it against the limit.
    pub fn record(&self, client: &str) -> UsageDecision {
        let count = {
            let mut counts = self.lock();
            let entry = counts.entry(client.to_string()).or_insert(0);
            *entry = entry.saturating_add(1);
            *entry
        };

        debug!(client = %client, count, limit = self.limit, "Recorded call");

        if count > self.limit {
            UsageDecision::Exceeded { count }
        } else {
            UsageDecision::Allowed { count }
        }
    }

    /// Record a call, failing with [`Error::RateLimited`] once over the limit.
    pub fn check(&self, client: &str) -> Result<u64> {
        match self.record(client) {
            UsageDecision::Allowed { count } => Ok(count),
            UsageDecision::Exceeded { .. } => Err(Error::RateLimited {
                client: client.to_string(),
                limit: self.limit,
            }),
        }
    }

    /// Current count for a client (0 if never seen).
    pub fn count(&self, client: &str) -> u64 {
        self.lock().get(client).copied().unwrap_or(0)
    }

    /// Number of distinct clients seen.
    pub fn client_count(&self) -> usize {
        self.lock().len()
    }
}
