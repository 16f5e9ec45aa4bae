//! Old/new comparison of two statistics documents.
//!
//! Modules are joined across builds by normalized name, packages by
//! package name. A side that is missing contributes a zero size and no
//! ref; nothing in here fails on partial input.

use std::collections::{BTreeMap, HashMap};

use crate::extract::extract_modules;
use crate::name::{ModuleKind, classify, normalize_name, package_name};
use crate::packages::{NodeModule, PackageMap};
use crate::stats::{ChunkId, ModuleRef, StatsDocument};

/// One module's before/after record. `old`/`new` refs resolve against the
/// document they were extracted from.
#[derive(Debug, Clone)]
pub struct ModuleComparison {
    /// Normalized name: the join key across the two builds.
    pub name: String,
    pub kind: ModuleKind,
    /// Owning external package, when the module lives under one.
    pub package: Option<String>,
    pub from_size: u64,
    pub to_size: u64,
    pub old: Option<ModuleRef>,
    pub new: Option<ModuleRef>,
}

impl ModuleComparison {
    #[allow(clippy::cast_possible_wrap)]
    pub fn delta(&self) -> i64 {
        self.to_size as i64 - self.from_size as i64
    }
}

/// Comparison records keyed by normalized module name.
pub type ComparisonMap = HashMap<String, ModuleComparison>;

/// Join the flattened module lists of two documents. Modules without an
/// identifier are skipped; when several modules normalize to the same
/// name, the last one in source order wins.
pub fn compare_modules(
    old: &StatsDocument,
    new: &StatsDocument,
    chunk: Option<ChunkId>,
) -> ComparisonMap {
    let mut output = ComparisonMap::new();

    for r in extract_modules(old, chunk) {
        let Some(m) = old.module_at(r) else { continue };
        if m.identifier.is_empty() {
            continue;
        }
        let name = normalize_name(&m.name).to_string();
        output.insert(
            name.clone(),
            ModuleComparison {
                name,
                kind: classify(&m.identifier),
                package: package_name(&m.identifier),
                from_size: m.size,
                to_size: 0,
                old: Some(r),
                new: None,
            },
        );
    }

    for r in extract_modules(new, chunk) {
        let Some(m) = new.module_at(r) else { continue };
        if m.identifier.is_empty() {
            continue;
        }
        let name = normalize_name(&m.name);
        if let Some(existing) = output.get_mut(name) {
            existing.new = Some(r);
            existing.to_size = m.size;
        } else {
            output.insert(
                name.to_string(),
                ModuleComparison {
                    name: name.to_string(),
                    kind: classify(&m.identifier),
                    package: package_name(&m.identifier),
                    from_size: 0,
                    to_size: m.size,
                    old: None,
                    new: Some(r),
                },
            );
        }
    }

    output
}

/// One package's before/after aggregates.
#[derive(Debug, Clone)]
pub struct NodeModuleComparison {
    pub name: String,
    pub old: Option<NodeModule>,
    pub new: Option<NodeModule>,
}

impl NodeModuleComparison {
    pub fn from_size(&self) -> u64 {
        self.old.as_ref().map_or(0, |p| p.total_size)
    }

    pub fn to_size(&self) -> u64 {
        self.new.as_ref().map_or(0, |p| p.total_size)
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn delta(&self) -> i64 {
        self.to_size() as i64 - self.from_size() as i64
    }
}

/// Union of two package aggregate maps, sorted by package name.
pub fn compare_node_modules(old: &PackageMap, new: &PackageMap) -> Vec<NodeModuleComparison> {
    let mut output: BTreeMap<&str, NodeModuleComparison> = BTreeMap::new();

    for (name, pkg) in old {
        output.insert(
            name,
            NodeModuleComparison {
                name: name.clone(),
                old: Some(pkg.clone()),
                new: None,
            },
        );
    }

    for (name, pkg) in new {
        if let Some(cmp) = output.get_mut(name.as_str()) {
            cmp.new = Some(pkg.clone());
        } else {
            output.insert(
                name,
                NodeModuleComparison {
                    name: name.clone(),
                    old: None,
                    new: Some(pkg.clone()),
                },
            );
        }
    }

    output.into_values().collect()
}
