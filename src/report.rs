//! Terminal and JSON rendering of analysis results.

use serde::Serialize;

use crate::analysis::Analysis;
use crate::compare::{ComparisonMap, ModuleComparison, NodeModuleComparison};
use crate::expand::ComparisonGraph;
use crate::stats::ChunkId;
use crate::suggest::{Suggestion, Tone};

#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.0} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{bytes} B")
    }
}

pub fn format_signed_size(delta: i64) -> String {
    let sign = if delta < 0 { "-" } else { "+" };
    format!("{sign}{}", format_size(delta.unsigned_abs()))
}

/// Fraction (0..1) as a percentage; "n/a" for NaN inputs.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_nan() {
        return "n/a".to_string();
    }
    let percent = fraction * 100.0;
    if (percent - percent.round()).abs() < 0.05 {
        format!("{percent:.0}%")
    } else {
        format!("{percent:.1}%")
    }
}

/// Relative size change: equal sizes are `+0%`, growth from zero is
/// `new`, anything else is a signed percentage.
#[allow(clippy::cast_precision_loss)]
pub fn format_percent_difference(from: u64, to: u64) -> String {
    if from == to {
        return "+0%".to_string();
    }
    if from == 0 {
        return "new".to_string();
    }
    let delta = to as f64 / from as f64 - 1.0;
    let sign = if delta < 0.0 { "-" } else { "+" };
    format!("{sign}{}", format_percent(delta.abs()))
}

#[allow(clippy::cast_possible_wrap)]
fn size_delta(from: u64, to: u64) -> i64 {
    to as i64 - from as i64
}

fn print_size_row(label: &str, from: u64, to: u64) {
    println!(
        "  {:<18} {:>10} -> {:<10} {} ({})",
        label,
        format_size(from),
        format_size(to),
        format_signed_size(size_delta(from, to)),
        format_percent_difference(from, to),
    );
}

#[allow(clippy::cast_possible_wrap)]
fn print_count_row(label: &str, from: usize, to: usize) {
    let delta = to as i64 - from as i64;
    let sign = if delta < 0 { "" } else { "+" };
    println!("  {label:<18} {from:>10} -> {to:<10} {sign}{delta}");
}

/// Modules with a nonzero size delta, largest absolute change first.
fn modules_by_delta(modules: &ComparisonMap) -> Vec<&ModuleComparison> {
    let mut list: Vec<_> = modules.values().filter(|m| m.delta() != 0).collect();
    list.sort_by(|a, b| {
        b.delta()
            .abs()
            .cmp(&a.delta().abs())
            .then_with(|| a.name.cmp(&b.name))
    });
    list
}

/// Packages that were added, removed, or changed size.
fn changed_packages(packages: &[NodeModuleComparison]) -> Vec<&NodeModuleComparison> {
    packages
        .iter()
        .filter(|p| p.old.is_none() || p.new.is_none() || p.delta() != 0)
        .collect()
}

#[allow(clippy::cast_sign_loss)]
fn display_count(len: usize, top: i32) -> usize {
    if top < 0 { len } else { len.min(top as usize) }
}

#[allow(clippy::too_many_arguments)]
pub fn print_comparison(
    old: &mut Analysis,
    new: &mut Analysis,
    chunk: Option<ChunkId>,
    modules: &ComparisonMap,
    packages: &[NodeModuleComparison],
    tips: &[Suggestion],
    top: i32,
) {
    println!("Overview:");
    print_size_row(
        "Total chunk size",
        old.total_chunk_size(),
        new.total_chunk_size(),
    );
    print_size_row(
        "Entry chunk size",
        old.entry_chunk_size(),
        new.entry_chunk_size(),
    );
    print_size_row(
        "Node module size",
        old.node_module_size(chunk),
        new.node_module_size(chunk),
    );
    print_count_row("Modules", old.module_count(chunk), new.module_count(chunk));
    print_count_row(
        "Packages",
        old.package_count(chunk),
        new.package_count(chunk),
    );
    println!(
        "  {:<18} {:>10} -> {}",
        "Tree shakable",
        format_percent(old.tree_shakable_percent(chunk)),
        format_percent(new.tree_shakable_percent(chunk)),
    );

    if !tips.is_empty() {
        println!();
        for tip in tips {
            let marker = match tip.tone {
                Tone::Advice => "!",
                Tone::Praise => "*",
            };
            println!("  {marker} {}", tip.message);
        }
    }

    let changed = changed_packages(packages);
    if !changed.is_empty() {
        println!();
        println!(
            "{} package{} changed:",
            changed.len(),
            if changed.len() == 1 { "" } else { "s" }
        );
        for pkg in &changed {
            let status = if pkg.old.is_none() {
                "+"
            } else if pkg.new.is_none() {
                "-"
            } else {
                "~"
            };
            println!(
                "  {status} {:<38} {:>10} -> {:<10} {}",
                pkg.name,
                format_size(pkg.from_size()),
                format_size(pkg.to_size()),
                format_percent_difference(pkg.from_size(), pkg.to_size()),
            );
        }
    }

    if top != 0 {
        let by_delta = modules_by_delta(modules);
        let count = display_count(by_delta.len(), top);
        if count > 0 {
            println!();
            println!("Modules by size change:");
            for m in &by_delta[..count] {
                println!(
                    "  {:<50} {:>8}  ({} -> {})",
                    m.name,
                    format_signed_size(m.delta()),
                    format_size(m.from_size),
                    format_size(m.to_size),
                );
            }
            if by_delta.len() > count {
                println!("  ... and {} more modules", by_delta.len() - count);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn print_comparison_json(
    old: &mut Analysis,
    new: &mut Analysis,
    chunk: Option<ChunkId>,
    modules: &ComparisonMap,
    packages: &[NodeModuleComparison],
    tips: &[Suggestion],
    top: i32,
) {
    let by_delta = modules_by_delta(modules);
    let count = display_count(by_delta.len(), top);
    let json = JsonComparison {
        overview: JsonOverviewDelta {
            total_chunk_size_bytes: JsonSizeDelta::new(
                old.total_chunk_size(),
                new.total_chunk_size(),
            ),
            entry_chunk_size_bytes: JsonSizeDelta::new(
                old.entry_chunk_size(),
                new.entry_chunk_size(),
            ),
            node_module_size_bytes: JsonSizeDelta::new(
                old.node_module_size(chunk),
                new.node_module_size(chunk),
            ),
            module_count: JsonCountDelta::new(old.module_count(chunk), new.module_count(chunk)),
            package_count: JsonCountDelta::new(old.package_count(chunk), new.package_count(chunk)),
            tree_shakable_percent: JsonRatioDelta {
                from: old.tree_shakable_percent(chunk),
                to: new.tree_shakable_percent(chunk),
            },
        },
        suggestions: tips.to_vec(),
        packages: packages
            .iter()
            .map(|pkg| JsonPackageDiff {
                name: pkg.name.clone(),
                status: if pkg.old.is_none() {
                    "added"
                } else if pkg.new.is_none() {
                    "removed"
                } else if pkg.delta() == 0 {
                    "unchanged"
                } else {
                    "changed"
                },
                from_size_bytes: pkg.from_size(),
                to_size_bytes: pkg.to_size(),
                delta_bytes: pkg.delta(),
                import_kinds: pkg
                    .new
                    .as_ref()
                    .or(pkg.old.as_ref())
                    .map(|p| p.kinds.label()),
            })
            .collect(),
        modules: by_delta[..count]
            .iter()
            .map(|m| JsonModuleDiff {
                name: m.name.clone(),
                kind: m.kind,
                package: m.package.clone(),
                from_size_bytes: m.from_size,
                to_size_bytes: m.to_size,
                delta_bytes: m.delta(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
}

pub fn print_overview(analysis: &mut Analysis, chunk: Option<ChunkId>) {
    let average = analysis.average_chunk_size();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average_text = if average.is_nan() {
        "n/a".to_string()
    } else {
        format_size(average.round() as u64)
    };

    println!("  {:<18} {:>10}", "Chunks", analysis.doc().chunks.len());
    println!(
        "  {:<18} {:>10}",
        "Total chunk size",
        format_size(analysis.total_chunk_size())
    );
    println!(
        "  {:<18} {:>10}",
        "Entry chunk size",
        format_size(analysis.entry_chunk_size())
    );
    println!("  {:<18} {average_text:>10}", "Avg chunk size");
    println!("  {:<18} {:>10}", "Modules", analysis.module_count(chunk));
    println!("  {:<18} {:>10}", "Packages", analysis.package_count(chunk));
    println!(
        "  {:<18} {:>10}",
        "Node module size",
        format_size(analysis.node_module_size(chunk))
    );
    println!(
        "  {:<18} {:>10}",
        "Tree shakable",
        format_percent(analysis.tree_shakable_percent(chunk))
    );
}

pub fn print_overview_json(analysis: &mut Analysis, chunk: Option<ChunkId>) {
    let average = analysis.average_chunk_size();
    let json = JsonOverview {
        chunk_count: analysis.doc().chunks.len(),
        total_chunk_size_bytes: analysis.total_chunk_size(),
        entry_chunk_size_bytes: analysis.entry_chunk_size(),
        average_chunk_size_bytes: if average.is_nan() { None } else { Some(average) },
        module_count: analysis.module_count(chunk),
        package_count: analysis.package_count(chunk),
        node_module_size_bytes: analysis.node_module_size(chunk),
        tree_shakable_percent: analysis.tree_shakable_percent(chunk),
    };
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
}

pub fn print_packages(analysis: &mut Analysis, chunk: Option<ChunkId>) {
    let packages = analysis.packages(chunk);
    if packages.is_empty() {
        println!("No node modules found in the stats document.");
        return;
    }

    println!(
        "{} package{}:\n",
        packages.len(),
        if packages.len() == 1 { "" } else { "s" }
    );
    for pkg in packages.values() {
        println!(
            "  {:<40} {:>10}  {:<7} {} module{}",
            pkg.name,
            format_size(pkg.total_size),
            pkg.kinds.label(),
            pkg.modules.len(),
            if pkg.modules.len() == 1 { "" } else { "s" }
        );
    }
}

pub fn print_packages_json(analysis: &mut Analysis, chunk: Option<ChunkId>) {
    let packages = analysis.packages(chunk);
    let json = JsonPackages {
        package_count: packages.len(),
        packages: packages
            .values()
            .map(|pkg| JsonPackage {
                name: pkg.name.clone(),
                total_size_bytes: pkg.total_size,
                module_count: pkg.modules.len(),
                import_kinds: pkg.kinds.label(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
}

pub fn print_graph(graph: &ComparisonGraph) {
    println!(
        "{} node{}, {} edge{}, {} entry point{}\n",
        graph.nodes.len(),
        if graph.nodes.len() == 1 { "" } else { "s" },
        graph.edges.len(),
        if graph.edges.len() == 1 { "" } else { "s" },
        graph.entries.len(),
        if graph.entries.len() == 1 { "" } else { "s" },
    );
    for node in &graph.nodes {
        println!(
            "  depth {}  {:<50} {} -> {}",
            node.depth,
            node.label,
            format_size(node.from_size),
            format_size(node.to_size),
        );
    }
}

pub fn print_graph_json(graph: &ComparisonGraph) {
    println!("{}", serde_json::to_string_pretty(graph).unwrap());
}

// JSON output types

#[derive(Serialize)]
struct JsonComparison {
    overview: JsonOverviewDelta,
    suggestions: Vec<Suggestion>,
    packages: Vec<JsonPackageDiff>,
    modules: Vec<JsonModuleDiff>,
}

#[derive(Serialize)]
struct JsonOverviewDelta {
    total_chunk_size_bytes: JsonSizeDelta,
    entry_chunk_size_bytes: JsonSizeDelta,
    node_module_size_bytes: JsonSizeDelta,
    module_count: JsonCountDelta,
    package_count: JsonCountDelta,
    tree_shakable_percent: JsonRatioDelta,
}

#[derive(Serialize)]
struct JsonSizeDelta {
    from: u64,
    to: u64,
    delta: i64,
}

impl JsonSizeDelta {
    fn new(from: u64, to: u64) -> Self {
        Self {
            from,
            to,
            delta: size_delta(from, to),
        }
    }
}

#[derive(Serialize)]
struct JsonCountDelta {
    from: usize,
    to: usize,
    delta: i64,
}

impl JsonCountDelta {
    #[allow(clippy::cast_possible_wrap)]
    fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            delta: to as i64 - from as i64,
        }
    }
}

#[derive(Serialize)]
struct JsonRatioDelta {
    from: f64,
    to: f64,
}

#[derive(Serialize)]
struct JsonPackageDiff {
    name: String,
    status: &'static str,
    from_size_bytes: u64,
    to_size_bytes: u64,
    delta_bytes: i64,
    import_kinds: Option<&'static str>,
}

#[derive(Serialize)]
struct JsonModuleDiff {
    name: String,
    kind: crate::name::ModuleKind,
    package: Option<String>,
    from_size_bytes: u64,
    to_size_bytes: u64,
    delta_bytes: i64,
}

#[derive(Serialize)]
struct JsonOverview {
    chunk_count: usize,
    total_chunk_size_bytes: u64,
    entry_chunk_size_bytes: u64,
    average_chunk_size_bytes: Option<f64>,
    module_count: usize,
    package_count: usize,
    node_module_size_bytes: u64,
    tree_shakable_percent: f64,
}

#[derive(Serialize)]
struct JsonPackages {
    package_count: usize,
    packages: Vec<JsonPackage>,
}

#[derive(Serialize)]
struct JsonPackage {
    name: String,
    total_size_bytes: u64,
    module_count: usize,
    import_kinds: &'static str,
}
