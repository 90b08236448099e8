//! Visit tallies: the approximate PageRank read-out of random walks.
//!
//! Long teleporting walks visit each node with a frequency that approaches its PageRank
//! score. This module only counts; exact scores are out of scope.

use std::collections::HashMap;
use std::hash::Hash;

use crate::topk::{normalize, top_k};

/// Per-node visit counts, kept in first-visit order.
#[derive(Debug, Clone)]
pub struct VisitCounts<N: Eq + Hash> {
    order: Vec<N>,
    counts: Vec<usize>,
    slots: HashMap<N, usize>,
    total: usize,
}

impl<N: Clone + Eq + Hash> Default for VisitCounts<N> {
    fn default() -> Self {
        Self { order: Vec::new(), counts: Vec::new(), slots: HashMap::new(), total: 0 }
    }
}

impl<N: Clone + Eq + Hash> VisitCounts<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_walk<I: IntoIterator<Item = N>>(walk: I) -> Self {
        let mut counts = Self::new();
        counts.extend(walk);
        counts
    }

    pub fn record(&mut self, node: N) {
        let slot = match self.slots.get(&node) {
            Some(&slot) => slot,
            None => {
                let slot = self.order.len();
                self.slots.insert(node.clone(), slot);
                self.order.push(node);
                self.counts.push(0);
                slot
            }
        };
        self.counts[slot] += 1;
        self.total += 1;
    }

    pub fn count(&self, node: &N) -> usize {
        self.slots.get(node).map_or(0, |&slot| self.counts[slot])
    }

    /// Visits recorded, repeats included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Distinct nodes visited.
    pub fn distinct(&self) -> usize {
        self.order.len()
    }

    /// Visit share per node, summing to 1 (empty when nothing was recorded).
    pub fn frequencies(&self) -> Vec<(N, f64)> {
        let mut shares: Vec<f64> = self.counts.iter().map(|&c| c as f64).collect();
        normalize(&mut shares);
        self.order.iter().cloned().zip(shares).collect()
    }

    /// The `k` most visited nodes with their visit shares, most visited first.
    pub fn top(&self, k: usize) -> Vec<(N, f64)> {
        let mut shares: Vec<f64> = self.counts.iter().map(|&c| c as f64).collect();
        normalize(&mut shares);
        top_k(&shares, k)
            .into_iter()
            .map(|(slot, share)| (self.order[slot].clone(), share))
            .collect()
    }
}

impl<N: Clone + Eq + Hash> Extend<N> for VisitCounts<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, walk: I) {
        for node in walk {
            self.record(node);
        }
    }
}

impl<N: Clone + Eq + Hash> FromIterator<N> for VisitCounts<N> {
    fn from_iter<I: IntoIterator<Item = N>>(walk: I) -> Self {
        Self::from_walk(walk)
    }
}
