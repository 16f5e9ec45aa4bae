//! Scalar metrics over one statistics document.
//!
//! All functions are pure and total: empty documents produce the
//! documented sentinel values instead of panicking.

use crate::packages::PackageMap;
use crate::stats::StatsDocument;

/// Summed size of all chunks, in bytes.
pub fn total_chunk_size(doc: &StatsDocument) -> u64 {
    doc.chunks.iter().map(|c| c.size).sum()
}

/// Summed size of the entry chunks, in bytes.
pub fn entry_chunk_size(doc: &StatsDocument) -> u64 {
    doc.chunks.iter().filter(|c| c.entry).map(|c| c.size).sum()
}

/// Mean chunk size in bytes. NaN when the document has no chunks;
/// callers render that as "n/a" rather than dividing blind.
#[allow(clippy::cast_precision_loss)]
pub fn average_chunk_size(doc: &StatsDocument) -> f64 {
    total_chunk_size(doc) as f64 / doc.chunks.len() as f64
}

/// Summed size of all external packages, in bytes.
pub fn node_module_size(packages: &PackageMap) -> u64 {
    packages.values().map(|p| p.total_size).sum()
}

/// Fraction of packages imported exclusively as ES modules. 1.0 when
/// there are no packages: nothing to shake means no penalty.
#[allow(clippy::cast_precision_loss)]
pub fn tree_shakable_percent(packages: &PackageMap) -> f64 {
    if packages.is_empty() {
        return 1.0;
    }
    let shakable = packages
        .values()
        .filter(|p| p.kinds.is_tree_shakable())
        .count();
    shakable as f64 / packages.len() as f64
}
