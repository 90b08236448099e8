//! Ranking helpers for visit scores.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` largest positive, finite scores as `(index, score)`, best first.
///
/// Equal scores keep the lower index first, so rankings over first-visit order are stable.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    // Min-heap on (score, Reverse(index)): the root is the entry to evict next.
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        heap.push(Reverse((s, Reverse(i))));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut ranked: Vec<(NotNan<f64>, usize)> =
        heap.into_iter().map(|Reverse((s, Reverse(i)))| (s, i)).collect();
    ranked.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked.into_iter().map(|(s, i)| (i, s.into_inner())).collect()
}

/// Scale `scores` in place so they sum to 1. All-zero input is left alone.
pub fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores {
            *s /= sum;
        }
    }
}
