use std::collections::HashSet;

use dashmap::DashMap;
use tracing::trace;

use crate::config::{CouplingFilterConfig, CouplingPredicate, FilterError};
use crate::model::{Method, MethodCoupling};

/// Sink for couplings discovered by a bytecode visitor, one call site at a time.
pub trait Collector: Send + Sync {
    /// Offer one coupling. Returns `true` when it was accepted by the filter
    /// and not already present.
    fn collect_method_coupling(&self, coupling: MethodCoupling) -> bool;
}

/// Filters, deduplicates, and orders method couplings.
///
/// Couplings are grouped by source method with set semantics over
/// `(source, target)`. Insertion is safe from many threads at once; the
/// insert for a given source method holds that key's shard lock, so
/// concurrent duplicates still collapse to one edge.
#[derive(Debug, Default)]
pub struct UsageCollector {
    method_refs: DashMap<Method, HashSet<MethodCoupling>>,
    predicate: CouplingPredicate,
}

impl UsageCollector {
    /// A collector that accepts every coupling.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that drops couplings rejected by `config`.
    ///
    /// Invalid patterns in `config` are rejected here, never at insert time.
    pub fn with_filter(config: &CouplingFilterConfig) -> Result<Self, FilterError> {
        Ok(Self { method_refs: DashMap::new(), predicate: CouplingPredicate::compile(config)? })
    }

    /// Offer every coupling from `couplings`; returns how many were newly added.
    pub fn collect_all<I>(&self, couplings: I) -> usize
    where
        I: IntoIterator<Item = MethodCoupling>,
    {
        couplings
            .into_iter()
            .map(|coupling| self.collect_method_coupling(coupling))
            .filter(|&added| added)
            .count()
    }

    /// Every accepted coupling, sorted by source then target.
    ///
    /// Does not clear anything; repeated calls reflect the current state.
    pub fn method_couplings(&self) -> Vec<MethodCoupling> {
        let mut couplings = Vec::new();
        for entry in self.method_refs.iter() {
            couplings.extend(entry.value().iter().cloned());
        }
        couplings.sort();
        couplings
    }

    /// Number of distinct couplings held.
    pub fn len(&self) -> usize {
        self.method_refs.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collector for UsageCollector {
    fn collect_method_coupling(&self, coupling: MethodCoupling) -> bool {
        if !self.predicate.accepts(&coupling) {
            trace!(coupling = %coupling, "coupling filtered out");
            return false;
        }
        self.method_refs.entry(coupling.source.clone()).or_default().insert(coupling)
    }
}
