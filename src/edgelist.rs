//! Edge-list loading from two-column CSV text.
//!
//! Format: one `source,destination` record per line, with standard CSV quoting (a quoted
//! field may contain commas, and `""` inside quotes is a literal quote). Extra columns are
//! ignored, fields are trimmed of surrounding whitespace, and blank lines or lines starting
//! with `#` are skipped.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::graph::Edge;
use crate::{Error, Result};

pub fn parse_edges(text: &str) -> Result<Vec<Edge<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut edges = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse {
            line: e.position().map_or(0, |p| p.line() as usize),
            message: e.to_string(),
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        match (record.get(0), record.get(1)) {
            (Some(src), Some(dst)) if !src.is_empty() && !dst.is_empty() => {
                edges.push((src.to_string(), dst.to_string()));
            }
            _ => {
                return Err(Error::Parse {
                    line: record.position().map_or(0, |p| p.line() as usize),
                    message: format!(
                        "expected `source,destination`, got {:?}",
                        record.iter().collect::<Vec<_>>()
                    ),
                });
            }
        }
    }
    Ok(edges)
}

pub fn read_edges(path: impl AsRef<Path>) -> Result<Vec<Edge<String>>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let edges = parse_edges(&text)?;
    debug!(path = %path.display(), edges = edges.len(), "loaded edge list");
    Ok(edges)
}

/// Prose description of edge `n`, e.g.
/// `Element 0 of the edge list is ('burr', 'hamilton'). This means that Burr mentions Hamilton.`
pub fn describe_edge(edges: &[Edge<String>], n: usize) -> Result<String> {
    let (src, dst) = edges.get(n).ok_or(Error::IndexOutOfBounds(n))?;
    Ok(format!(
        "Element {n} of the edge list is ('{src}', '{dst}'). This means that {} mentions {}.",
        capitalize(src),
        capitalize(dst)
    ))
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
