//! Module-identifier utilities.
//!
//! Raw identifiers carry loader-chain prefixes (`"babel-loader!src/x.js"`)
//! and concatenation suffixes (`"src/x.js + 3 modules"`). Stripping both
//! yields the stable name used to join modules across two builds whose
//! concatenation groupings may differ.

use serde::Serialize;

/// Everything after the last `!` in a loader-chain identifier; the input
/// unchanged when there is no loader prefix.
pub fn strip_loader_prefix(identifier: &str) -> &str {
    match identifier.rfind('!') {
        Some(i) => &identifier[i + 1..],
        None => identifier,
    }
}

/// Strips trailing `" + N modules"` concatenation suffixes. Idempotent:
/// repeated application yields the same name.
pub fn normalize_name(identifier: &str) -> &str {
    let mut name = identifier;
    while let Some(stripped) = strip_concat_suffix(name) {
        name = stripped;
    }
    name
}

fn strip_concat_suffix(name: &str) -> Option<&str> {
    let rest = name.strip_suffix(" modules")?;
    let digits_stripped = rest.trim_end_matches(|c: char| c.is_ascii_digit());
    if digits_stripped.len() == rest.len() {
        return None;
    }
    digits_stripped.strip_suffix(" + ")
}

/// The external package owning an identifier, from its rightmost
/// `node_modules` path segment: `.../node_modules/lodash/x.js` is
/// `lodash`, `.../node_modules/@scope/pkg/x.js` is `@scope/pkg`.
/// `None` when the identifier is not under `node_modules`.
pub fn package_name(identifier: &str) -> Option<String> {
    let path = strip_loader_prefix(identifier);
    let parts: Vec<&str> = path.split(['/', '\\']).collect();
    for i in (0..parts.len()).rev() {
        if parts[i] != "node_modules" {
            continue;
        }
        let name = *parts.get(i + 1)?;
        if name.starts_with('@') {
            let scoped = *parts.get(i + 2)?;
            return Some(format!("{name}/{scoped}"));
        }
        return Some(name.to_string());
    }
    None
}

/// Coarse module classification, by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Javascript,
    Style,
    External,
    NodeModule,
}

/// Style markers win over the `external ` prefix, which wins over a
/// `node_modules` path segment; anything else is first-party Javascript.
pub fn classify(identifier: &str) -> ModuleKind {
    if identifier.contains("style-loader") || identifier.contains("css-loader") {
        ModuleKind::Style
    } else if identifier.starts_with("external ") {
        ModuleKind::External
    } else if identifier.contains("node_modules") {
        ModuleKind::NodeModule
    } else {
        ModuleKind::Javascript
    }
}
