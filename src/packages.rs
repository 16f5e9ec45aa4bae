//! Aggregation of modules into their owning external packages.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::extract::extract_modules;
use crate::name::package_name;
use crate::stats::{ChunkId, ModuleRecord, ModuleRef, StatsDocument};

bitflags! {
    /// How a module is imported, accumulated across its reasons. Empty
    /// means no recognizable hint was seen; both flags set means the
    /// module is pulled in through both module systems.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ImportKinds: u8 {
        const ES_MODULE = 1 << 1;
        const COMMON_JS = 1 << 2;
    }
}

impl ImportKinds {
    /// A package only ever imported as ES modules can be tree-shaken.
    pub fn is_tree_shakable(self) -> bool {
        self.contains(Self::ES_MODULE) && !self.contains(Self::COMMON_JS)
    }

    pub fn label(self) -> &'static str {
        if self == Self::ES_MODULE | Self::COMMON_JS {
            "esm+cjs"
        } else if self.contains(Self::ES_MODULE) {
            "esm"
        } else if self.contains(Self::COMMON_JS) {
            "cjs"
        } else {
            "?"
        }
    }
}

/// Import kinds seen across a module's reasons. A hint mentioning `cjs`
/// counts as CommonJS even if it also mentions `harmony`.
pub fn import_kinds(module: &ModuleRecord) -> ImportKinds {
    let mut kinds = ImportKinds::empty();
    for reason in &module.reasons {
        let Some(hint) = &reason.kind else { continue };
        if hint.contains("cjs") {
            kinds |= ImportKinds::COMMON_JS;
        } else if hint.contains("harmony") {
            kinds |= ImportKinds::ES_MODULE;
        }
    }
    kinds
}

/// Aggregate record for one external package.
#[derive(Debug, Clone)]
pub struct NodeModule {
    pub name: String,
    /// Summed size of the constituent modules, in bytes.
    pub total_size: u64,
    pub modules: Vec<ModuleRef>,
    pub kinds: ImportKinds,
}

impl NodeModule {
    fn new(name: String) -> Self {
        Self {
            name,
            total_size: 0,
            modules: Vec::new(),
            kinds: ImportKinds::empty(),
        }
    }
}

/// Packages keyed by name; BTreeMap keeps iteration deterministic.
pub type PackageMap = BTreeMap<String, NodeModule>;

/// Group already-extracted modules by owning package.
pub fn aggregate_refs(doc: &StatsDocument, refs: &[ModuleRef]) -> PackageMap {
    let mut packages = PackageMap::new();
    for &r in refs {
        let Some(module) = doc.module_at(r) else {
            continue;
        };
        let Some(name) = package_name(&module.identifier) else {
            continue;
        };

        let entry = packages
            .entry(name.clone())
            .or_insert_with(|| NodeModule::new(name));
        entry.total_size += module.size;
        entry.kinds |= import_kinds(module);
        entry.modules.push(r);
    }
    packages
}

/// Extract and aggregate in one step.
pub fn aggregate(doc: &StatsDocument, chunk: Option<ChunkId>) -> PackageMap {
    aggregate_refs(doc, &extract_modules(doc, chunk))
}
