//! Flattening of the document's module list.
//!
//! Concatenation groups are expanded into their children; the synthetic
//! group record itself is never emitted, but stays reachable from each
//! child ref via [`StatsDocument::concatenation_parent`].

use crate::stats::{ChunkId, ModuleRef, StatsDocument};

/// Flatten `doc.modules` into refs, optionally filtered to one chunk.
///
/// Emission follows source order; children keep their order within a
/// group. The chunk filter is checked against the top-level record, so a
/// group's membership decides for all of its children.
#[allow(clippy::cast_possible_truncation)]
pub fn extract_modules(doc: &StatsDocument, chunk: Option<ChunkId>) -> Vec<ModuleRef> {
    let mut out = Vec::new();
    for (top, parent) in doc.modules.iter().enumerate() {
        if let Some(filter) = chunk
            && !parent.chunks.contains(&filter)
        {
            continue;
        }

        let top = top as u32;
        match &parent.modules {
            None => out.push(ModuleRef { top, child: None }),
            Some(children) => {
                for child in 0..children.len() as u32 {
                    out.push(ModuleRef {
                        top,
                        child: Some(child),
                    });
                }
            }
        }
    }
    out
}
