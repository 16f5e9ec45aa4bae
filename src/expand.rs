//! Bounded expansion of the imported-by graph.
//!
//! Starting from a set of root records, the expander follows each node's
//! importers, capping the walk by node budget and optional depth. The
//! walk is stack-driven (LIFO): when a cap cuts it short, the nodes that
//! survive are the ones nearest the most recently discovered branch, and
//! edges pointing at discarded nodes are filtered out afterwards so the
//! result never dangles.

use std::collections::{HashMap, HashSet};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;

use crate::compare::ModuleComparison;
use crate::name::{normalize_name, strip_loader_prefix};
use crate::stats::StatsDocument;

pub const DEFAULT_NODE_LIMIT: usize = 1000;

const MAX_BUBBLE_AREA: f64 = 100.0;
const MIN_BUBBLE_AREA: f64 = 20.0;

/// Node ids are Base64 (URL-safe, unpadded) so arbitrary module names are
/// usable as identifiers in graph-rendering layers and URL paths.
pub fn encode_id(name: &str) -> String {
    URL_SAFE_NO_PAD.encode(name)
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Render-ready node: sizes in bytes, bubble area as a visual hint,
/// depth as discovered by the walk.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub from_size: u64,
    pub to_size: u64,
    pub area: f64,
    pub depth: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    /// Nodes deeper than this are cut off. `None` is unbounded.
    pub max_depth: Option<u32>,
    /// Node budget; the walk stops once it is spent. Zero yields an
    /// empty graph.
    pub limit: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            limit: DEFAULT_NODE_LIMIT,
        }
    }
}

#[derive(Debug)]
pub struct Expansion<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<GraphEdge>,
}

/// Walk the imported-by relation from `roots`.
///
/// `neighbors` yields a node's importers; unseen ones are pushed at
/// `depth + 1`. An edge is recorded for every neighbor occurrence,
/// whether or not the neighbor is ever visited. Nodes come back
/// stable-sorted by depth; edges are filtered against the surviving node
/// set whenever a cap cut the walk short (filtering unconditionally would
/// be equivalent, it just has nothing to remove on a complete walk).
pub fn expand<'a, T, N>(
    roots: &[&'a T],
    opts: &ExpandOptions,
    name_of: impl Fn(&T) -> &str,
    mut neighbors: impl FnMut(&'a T) -> Vec<&'a T>,
    mut create_node: impl FnMut(&'a T, &str, u32) -> N,
) -> Expansion<N> {
    let mut queue: Vec<(&'a T, u32)> = roots.iter().map(|&node| (node, 0)).collect();
    let mut seen: HashSet<String> = roots.iter().map(|&node| name_of(node).to_string()).collect();
    let mut nodes: Vec<(u32, String, N)> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut budget = opts.limit;
    let mut needs_filtering = false;

    while let Some((node, depth)) = queue.pop() {
        if let Some(max) = opts.max_depth
            && depth > max
        {
            needs_filtering = true;
            break;
        }

        // The budget is spent per popped node, before it is emitted; the
        // rest of the queue is discarded, not drained.
        if budget == 0 {
            needs_filtering = true;
            break;
        }
        budget -= 1;

        let source = encode_id(name_of(node));
        for found in neighbors(node) {
            let found_name = name_of(found);
            let target = encode_id(found_name);
            if !seen.contains(found_name) {
                seen.insert(found_name.to_string());
                queue.push((found, depth + 1));
            }
            edges.push(GraphEdge {
                id: format!("edge{source}to{target}"),
                source: source.clone(),
                target,
            });
        }

        let built = create_node(node, &source, depth);
        nodes.push((depth, source, built));
    }

    nodes.sort_by_key(|&(depth, _, _)| depth);

    if needs_filtering {
        let kept: HashSet<&str> = nodes.iter().map(|(_, id, _)| id.as_str()).collect();
        edges.retain(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()));
    }

    Expansion {
        nodes: nodes.into_iter().map(|(_, _, node)| node).collect(),
        edges,
    }
}

/// The full graph view-model for one expansion: nodes, edges, and the
/// ids of nodes reached directly from a bundle entry point.
#[derive(Debug, Serialize)]
pub struct ComparisonGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub entries: Vec<String>,
}

/// Expand around module-comparison roots, following the reasons of both
/// the old and new underlying records. Importers that don't resolve to a
/// comparison record are dropped. Bubble area scales with `to_size`
/// relative to the largest `to_size` in scope.
pub fn expand_module_comparison(
    old: &StatsDocument,
    new: &StatsDocument,
    comparisons: &HashMap<String, ModuleComparison>,
    roots: &[&ModuleComparison],
    opts: &ExpandOptions,
) -> ComparisonGraph {
    let max_size = comparisons.values().map(|c| c.to_size).max().unwrap_or(0);
    let mut entries: Vec<String> = Vec::new();

    let expansion = expand(
        roots,
        opts,
        |node| node.name.as_str(),
        |node| {
            let mut found = Vec::new();
            for (doc, module_ref) in [(old, node.old), (new, node.new)] {
                let Some(r) = module_ref else { continue };
                let Some(record) = doc.module_at(r) else {
                    continue;
                };
                for reason in &record.reasons {
                    if let Some(importer) = reason.module_name.as_deref()
                        && let Some(other) = comparisons.get(normalize_name(importer))
                    {
                        found.push(other);
                    }
                    if let Some(hint) = &reason.kind
                        && hint.contains("entry")
                    {
                        let id = encode_id(&node.name);
                        if !entries.contains(&id) {
                            entries.push(id);
                        }
                    }
                }
            }
            found
        },
        |node, id, depth| {
            #[allow(clippy::cast_precision_loss)]
            let weight = if max_size == 0 {
                0.0
            } else {
                node.to_size as f64 / max_size as f64
            };
            GraphNode {
                id: id.to_string(),
                label: strip_loader_prefix(&node.name).to_string(),
                from_size: node.from_size,
                to_size: node.to_size,
                area: (MAX_BUBBLE_AREA * weight).max(MIN_BUBBLE_AREA),
                depth,
            }
        },
    );

    ComparisonGraph {
        nodes: expansion.nodes,
        edges: expansion.edges,
        entries,
    }
}
