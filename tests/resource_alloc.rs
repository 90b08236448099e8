use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

use pagewalk::{LinkGraph, RandomWalker, WalkConfig};

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[derive(Debug, Clone)]
struct RefAdj {
    nodes: Vec<usize>,
    adj: Vec<Vec<usize>>,
}

impl LinkGraph for RefAdj {
    type Node = usize;

    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn links_from(&self, node: &usize) -> Option<&[usize]> {
        self.adj.get(*node).map(Vec::as_slice)
    }
}

#[test]
fn advancing_a_walker_does_not_allocate() {
    // This is a “resource consumption” test: stepping a walker only moves a cursor over the
    // immutable graph. Collecting the walk allocates; pulling it step by step must not.

    // Chain graph with a dead end at the tail, so both follow-link and forced teleports run.
    let n = 1_000usize;
    let mut adj = vec![Vec::new(); n];
    for (i, links) in adj.iter_mut().enumerate().take(n - 1) {
        links.push(i + 1);
    }
    let g = RefAdj { nodes: (0..n).collect(), adj };
    let config = WalkConfig::new(0.85).with_step_limit(50_000).with_seed(123);

    // Same seed, same path: a warm-up run registers every log callsite the measured run hits.
    RandomWalker::new(&g, &0, config).unwrap().for_each(drop);

    let mut walker = RandomWalker::new(&g, &0, config).unwrap();
    let r_stream = Region::new(&GLOBAL);
    let mut steps = 0usize;
    while walker.advance().is_some() {
        steps += 1;
    }
    let s_stream = r_stream.change();
    assert_eq!(steps, config.step_limit + 1);
    assert!(walker.teleports() > 0);

    assert_eq!(
        s_stream.allocations, 0,
        "stepping allocated {} times over {steps} steps",
        s_stream.allocations
    );

    // Collecting the same walk is the allocating baseline.
    let r_collect = Region::new(&GLOBAL);
    let walk: Vec<usize> = RandomWalker::new(&g, &0, config).unwrap().collect();
    let s_collect = r_collect.change();
    assert_eq!(walk.len(), steps);
    assert!(s_collect.allocations > 0);
}
