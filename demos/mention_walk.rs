//! End-to-end sketch: edge list → graph → teleporting walk → approximate PageRank.
//!
//! Point it at a two-column CSV of "who mentions whom":
//!
//! ```bash
//! WALK_EDGELIST=/path/to/mentions.csv WALK_START=hamilton cargo run --example mention_walk
//! ```
//!
//! Without `WALK_EDGELIST`, a small built-in sample is used. Set `RUST_LOG=pagewalk=debug`
//! to see the walker's log events.

use pagewalk::{describe_edge, parse_edges, read_edges, DirectedGraph, VisitCounts, WalkConfig};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
burr,hamilton
burr,hamilton
burr,washington
hamilton,burr
hamilton,eliza
hamilton,washington
hamilton,hamilton
eliza,hamilton
eliza,angelica
angelica,eliza
angelica,hamilton
washington,hamilton
jefferson,hamilton
jefferson,washington
madison,jefferson
lafayette,washington
mulligan,lafayette
";

fn main() -> pagewalk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let edges = match std::env::var("WALK_EDGELIST") {
        Ok(path) => read_edges(path)?,
        Err(_) => parse_edges(SAMPLE)?,
    };
    println!("{}", describe_edge(&edges, 0)?);

    let graph = DirectedGraph::from_edges(edges);
    println!("{graph}");

    let start = std::env::var("WALK_START")
        .unwrap_or_else(|_| graph.nodes().first().cloned().unwrap_or_default());

    // One short walk, printed step by step.
    let walk: Vec<String> = graph.walker(&start, WalkConfig::new(0.85).with_seed(9))?.collect();
    println!("\nwalk from {start}: {}", walk.join(" -> "));

    // One long walk; visit shares approximate PageRank.
    let long = WalkConfig::new(0.85).with_step_limit(200_000).with_seed(9);
    let visits = VisitCounts::from_walk(graph.walker(&start, long)?);

    println!("\ntop-10 by visit share ({} steps):", visits.total());
    for (node, share) in visits.top(10) {
        println!("  {node:12}  share={share:.4}");
    }
    Ok(())
}
