//! Analysis: owns a statistics document and memoizes derived data.
//!
//! An [`Analysis`] is the primary interface for library consumers (CLI,
//! comparison, suggestions). It wraps one [`StatsDocument`] together with
//! [`Memo`] tables keyed by chunk filter, so repeated queries reuse the
//! flattened module list and package aggregates instead of rescanning the
//! document. Methods take `&mut self` for the memo writes; results are
//! handed out as shared `Rc`s.

use std::rc::Rc;

use crate::cache::Memo;
use crate::extract::extract_modules;
use crate::metrics;
use crate::packages::{PackageMap, aggregate_refs};
use crate::stats::{ChunkId, ModuleRef, StatsDocument};

pub struct Analysis {
    doc: StatsDocument,
    modules: Memo<Option<ChunkId>, Vec<ModuleRef>>,
    packages: Memo<Option<ChunkId>, PackageMap>,
}

impl Analysis {
    pub fn new(doc: StatsDocument) -> Self {
        Self {
            doc,
            modules: Memo::new(),
            packages: Memo::new(),
        }
    }

    pub fn doc(&self) -> &StatsDocument {
        &self.doc
    }

    /// Flattened module refs, memoized per chunk filter.
    pub fn modules(&mut self, chunk: Option<ChunkId>) -> Rc<Vec<ModuleRef>> {
        let doc = &self.doc;
        self.modules
            .get_or_insert_with(chunk, || extract_modules(doc, chunk))
    }

    /// Package aggregates, memoized per chunk filter.
    pub fn packages(&mut self, chunk: Option<ChunkId>) -> Rc<PackageMap> {
        let refs = self.modules(chunk);
        let doc = &self.doc;
        self.packages
            .get_or_insert_with(chunk, || aggregate_refs(doc, &refs))
    }

    pub fn module_count(&mut self, chunk: Option<ChunkId>) -> usize {
        self.modules(chunk).len()
    }

    pub fn package_count(&mut self, chunk: Option<ChunkId>) -> usize {
        self.packages(chunk).len()
    }

    pub fn node_module_size(&mut self, chunk: Option<ChunkId>) -> u64 {
        metrics::node_module_size(&self.packages(chunk))
    }

    pub fn tree_shakable_percent(&mut self, chunk: Option<ChunkId>) -> f64 {
        metrics::tree_shakable_percent(&self.packages(chunk))
    }

    pub fn total_chunk_size(&self) -> u64 {
        metrics::total_chunk_size(&self.doc)
    }

    pub fn entry_chunk_size(&self) -> u64 {
        metrics::entry_chunk_size(&self.doc)
    }

    pub fn average_chunk_size(&self) -> f64 {
        metrics::average_chunk_size(&self.doc)
    }
}
