//! Provider-owned result cache.
//!
//! One entry per (implementation type, contract). An entry starts as the
//! match result and is upgraded to the adapter type once one is
//! synthesized; an adapter entry is never replaced. Entries for different
//! keys live in different shards and do not contend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use conform_ir::{ImplTy, TypeIdx};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::matcher::MatchResult;
use crate::synth::AdapterType;

/// Cache key: implementation type and contract.
pub type CacheKey = (ImplTy, TypeIdx);

/// What is known about a key.
#[derive(Clone, Debug)]
pub enum CacheEntry {
    /// An adapter type has been published.
    Adapter(Arc<AdapterType>),
    /// The matcher has run; the result may be satisfied or not.
    Matched(Arc<MatchResult>),
}

impl CacheEntry {
    /// The match result behind this entry.
    pub fn match_result(&self) -> &Arc<MatchResult> {
        match self {
            CacheEntry::Adapter(adapter) => adapter.match_result(),
            CacheEntry::Matched(result) => result,
        }
    }
}

/// Snapshot of the cache counters.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct CacheStats {
    pub matcher_runs: u64,
    pub syntheses: u64,
    /// Syntheses that lost the race to publish.
    pub discarded_syntheses: u64,
    pub hits: u64,
}

#[derive(Default)]
struct Counters {
    matcher_runs: AtomicU64,
    syntheses: AtomicU64,
    discarded_syntheses: AtomicU64,
    hits: AtomicU64,
}

/// Concurrent memo of match results and adapter types.
#[derive(Default)]
pub struct ResultCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    counters: Counters,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `key`, counting a hit if present.
    pub fn get(&self, key: CacheKey) -> Option<CacheEntry> {
        let entry = self.entries.get(&key).map(|e| e.value().clone());
        if entry.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// Record a fresh matcher run. If another thread stored an entry first,
    /// that entry wins and is returned.
    pub(crate) fn record_match(&self, key: CacheKey, result: Arc<MatchResult>) -> CacheEntry {
        self.counters.matcher_runs.fetch_add(1, Ordering::Relaxed);
        match self.entries.entry(key) {
            Entry::Occupied(slot) => slot.get().clone(),
            Entry::Vacant(slot) => slot.insert(CacheEntry::Matched(result)).value().clone(),
        }
    }

    /// Publish a synthesized adapter type. The first published type for a
    /// key is kept; later ones are discarded and the published one returned.
    pub(crate) fn publish(&self, key: CacheKey, adapter: Arc<AdapterType>) -> Arc<AdapterType> {
        self.counters.syntheses.fetch_add(1, Ordering::Relaxed);
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                if let CacheEntry::Adapter(published) = slot.get() {
                    let published = Arc::clone(published);
                    self.counters
                        .discarded_syntheses
                        .fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        kept = published.id().raw(),
                        discarded = adapter.id().raw(),
                        "discarded adapter type"
                    );
                    return published;
                }
                slot.insert(CacheEntry::Adapter(Arc::clone(&adapter)));
            }
            Entry::Vacant(slot) => {
                slot.insert(CacheEntry::Adapter(Arc::clone(&adapter)));
            }
        }
        tracing::debug!(id = adapter.id().raw(), name = adapter.name(), "published adapter type");
        adapter
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            matcher_runs: self.counters.matcher_runs.load(Ordering::Relaxed),
            syntheses: self.counters.syntheses.load(Ordering::Relaxed),
            discarded_syntheses: self.counters.discarded_syntheses.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats())
            .finish()
    }
}
