//! Random walks with teleportation.

use std::iter::FusedIterator;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::graph::LinkGraph;
use crate::{Error, Result};

pub const DEFAULT_STEP_LIMIT: usize = 20;

/// Walk parameters.
///
/// `jump_prob` is the per-step probability of attempting to follow an out-link; the
/// remaining `1 - jump_prob` is spent on teleports. There is no default; call sites pick
/// it (0.85 and 0.75 are both common).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Steps after the first one; a walk emits `step_limit + 1` nodes, so `usize::MAX` is
    /// rejected.
    pub step_limit: usize,
    pub jump_prob: f64,
    pub seed: u64,
}

impl WalkConfig {
    pub fn new(jump_prob: f64) -> Self {
        Self { step_limit: DEFAULT_STEP_LIMIT, jump_prob, seed: 42 }
    }

    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.jump_prob) {
            return Err(Error::InvalidParameter(format!(
                "jump_prob must be in [0, 1], got {}",
                self.jump_prob
            )));
        }
        if self.step_limit == usize::MAX {
            return Err(Error::InvalidParameter(
                "step_limit must be below usize::MAX (a walk emits step_limit + 1 nodes)".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single PageRank-style random walk.
///
/// Each call to [`advance`](Self::advance) either follows a random out-link of the current
/// node (with probability `jump_prob`) or teleports to a uniformly random node. A dead end
/// or a drawn self-loop turns a follow-link attempt into a teleport.
///
/// The walk yields exactly `step_limit + 1` nodes. Every yielded node comes after a step, so
/// the first one is where the walk lands from the start node, not the start node itself
/// (read that from [`current`](Self::current) before advancing). Once the walk ends it stays
/// ended; start a new walker for another walk.
#[derive(Debug)]
pub struct RandomWalker<'g, G: LinkGraph, R = ChaCha8Rng> {
    graph: &'g G,
    current: G::Node,
    steps_taken: usize,
    step_limit: usize,
    jump_prob: f64,
    teleports: usize,
    rng: R,
}

impl<'g, G: LinkGraph> RandomWalker<'g, G, ChaCha8Rng> {
    /// Walker seeded from `config.seed`.
    pub fn new(graph: &'g G, start: &G::Node, config: WalkConfig) -> Result<Self> {
        Self::with_rng(graph, start, config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<'g, G: LinkGraph, R: Rng> RandomWalker<'g, G, R> {
    /// Walker driven by a caller-supplied generator; `config.seed` is ignored.
    pub fn with_rng(graph: &'g G, start: &G::Node, config: WalkConfig, rng: R) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(Error::InvalidGraphReference);
        }
        config.validate()?;
        if !graph.contains(start) {
            return Err(Error::InvalidStartNode(format!("{start:?}")));
        }
        debug!(
            start = ?start,
            nodes = graph.node_count(),
            step_limit = config.step_limit,
            jump_prob = config.jump_prob,
            "starting random walk"
        );
        Ok(Self {
            graph,
            current: start.clone(),
            steps_taken: 0,
            step_limit: config.step_limit,
            jump_prob: config.jump_prob,
            teleports: 0,
            rng,
        })
    }

    /// Take one step and return the node landed on, or `None` once the walk is over.
    ///
    /// The step happens before the node is returned: the first call never hands back the
    /// start node unless the step itself lands there.
    pub fn advance(&mut self) -> Option<&G::Node> {
        if self.is_finished() {
            return None;
        }
        if self.rng.random::<f64>() < self.jump_prob {
            self.follow_link();
        } else {
            self.teleport();
        }
        self.steps_taken += 1;
        Some(&self.current)
    }

    fn follow_link(&mut self) {
        let graph = self.graph;
        let next = graph
            .links_from(&self.current)
            .and_then(|links| links.choose(&mut self.rng));
        match next {
            Some(node) if *node != self.current => self.current = node.clone(),
            Some(_) => {
                trace!(node = ?self.current, "self-loop, teleporting");
                self.teleport();
            }
            None => {
                trace!(node = ?self.current, "dead end, teleporting");
                self.teleport();
            }
        }
    }

    fn teleport(&mut self) {
        // Non-empty: checked at construction and the graph is immutable.
        let nodes = self.graph.nodes();
        let i = self.rng.random_range(0..nodes.len());
        self.current = nodes[i].clone();
        self.teleports += 1;
    }

    pub fn current(&self) -> &G::Node {
        &self.current
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn jump_prob(&self) -> f64 {
        self.jump_prob
    }

    /// Teleports so far, whether drawn or forced by a dead end or self-loop.
    pub fn teleports(&self) -> usize {
        self.teleports
    }

    pub fn is_finished(&self) -> bool {
        self.steps_taken > self.step_limit
    }

    fn remaining(&self) -> usize {
        (self.step_limit + 1).saturating_sub(self.steps_taken)
    }
}

impl<G: LinkGraph, R: Rng> Iterator for RandomWalker<'_, G, R> {
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        self.advance().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<G: LinkGraph, R: Rng> ExactSizeIterator for RandomWalker<'_, G, R> {}

impl<G: LinkGraph, R: Rng> FusedIterator for RandomWalker<'_, G, R> {}

/// SplitMix64 finalizer; spreads `seed ^ index` into independent per-walk seeds.
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    x
}

fn walk_seed(seed: u64, walk: usize) -> u64 {
    mix64(seed ^ walk as u64)
}

/// `num_walks` independent walks from `start`.
///
/// Walk `i` is seeded from `(config.seed, i)` alone, so the output matches
/// [`generate_walks_parallel`] exactly.
pub fn generate_walks<G: LinkGraph>(
    graph: &G,
    start: &G::Node,
    config: WalkConfig,
    num_walks: usize,
) -> Result<Vec<Vec<G::Node>>> {
    debug!(num_walks, step_limit = config.step_limit, "generating walks");
    (0..num_walks)
        .map(|i| {
            let cfg = config.with_seed(walk_seed(config.seed, i));
            RandomWalker::new(graph, start, cfg).map(|w| w.collect::<Vec<_>>())
        })
        .collect()
}

/// Parallel [`generate_walks`].
///
/// Invariant: output is stable for a fixed `seed`, independent of Rayon thread count.
#[cfg(feature = "parallel")]
pub fn generate_walks_parallel<G>(
    graph: &G,
    start: &G::Node,
    config: WalkConfig,
    num_walks: usize,
) -> Result<Vec<Vec<G::Node>>>
where
    G: LinkGraph + Sync,
    G::Node: Send + Sync,
{
    use rayon::prelude::*;

    debug!(num_walks, step_limit = config.step_limit, "generating walks in parallel");
    (0..num_walks)
        .into_par_iter()
        .map(|i| {
            let cfg = config.with_seed(walk_seed(config.seed, i));
            RandomWalker::new(graph, start, cfg).map(|w| w.collect::<Vec<_>>())
        })
        .collect()
}
