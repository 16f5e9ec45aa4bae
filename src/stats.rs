//! Build-statistics document model.
//!
//! A [`StatsDocument`] is the deserialized form of a bundler's statistics
//! output: an ordered list of [`ModuleRecord`]s (possibly nested one level
//! deep for concatenation groups) and an ordered list of [`ChunkRecord`]s.
//! Documents are semi-trusted: every field tolerates being absent and
//! unknown fields are ignored, so a partial or oddly-shaped stats file
//! yields empty collections rather than a parse error.
//!
//! Modules are addressed by dense [`ModuleRef`] indices instead of
//! references, so derived data (extractions, aggregates) can be cached and
//! outlive any particular borrow of the document. A ref is only meaningful
//! against the document that produced it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ChunkId(pub u32);

/// One output bundle: a named chunk with a byte size and an entry flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkRecord {
    pub id: Option<ChunkId>,
    pub names: Vec<String>,
    pub size: u64,
    pub entry: bool,
}

/// Why a module was included: which module imported it, and how.
///
/// The `kind` hint is the bundler's dependency-type string; substrings
/// `cjs`, `harmony`, and `entry` are the ones the analysis cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reason {
    pub module_name: Option<String>,
    pub module_identifier: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A single compiled module, or a concatenation group when `modules` is
/// present (the children are the real modules; the group is synthetic).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleRecord {
    /// Raw identifier, possibly prefixed with a loader chain
    /// (`"<loaders>!<path>"`).
    pub identifier: String,
    /// Friendly name; concatenation groups carry a `" + N modules"` suffix.
    pub name: String,
    pub size: u64,
    pub chunks: Vec<ChunkId>,
    pub reasons: Vec<Reason>,
    /// Children of a concatenation group. `None` for plain modules.
    pub modules: Option<Vec<ModuleRecord>>,
}

/// Dense index of a module within a [`StatsDocument`]: the position in the
/// top-level list, plus the position within a concatenation group when the
/// module was extracted out of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    pub top: u32,
    pub child: Option<u32>,
}

impl ModuleRef {
    /// Ref of the concatenation group this module was extracted from, if any.
    pub fn parent_ref(self) -> Option<ModuleRef> {
        self.child.map(|_| ModuleRef {
            top: self.top,
            child: None,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsDocument {
    pub modules: Vec<ModuleRecord>,
    pub chunks: Vec<ChunkRecord>,
}

impl StatsDocument {
    /// Resolve a ref against this document. Returns `None` for refs that
    /// don't point at anything here (e.g. a ref from another document).
    pub fn module_at(&self, r: ModuleRef) -> Option<&ModuleRecord> {
        let top = self.modules.get(r.top as usize)?;
        match r.child {
            None => Some(top),
            Some(child) => top.modules.as_ref()?.get(child as usize),
        }
    }

    /// The concatenation group a child module was extracted from.
    /// `None` for top-level modules.
    pub fn concatenation_parent(&self, r: ModuleRef) -> Option<&ModuleRecord> {
        self.module_at(r.parent_ref()?)
    }
}
