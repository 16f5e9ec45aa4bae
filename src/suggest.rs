//! Advisory findings derived from comparison metrics.
//!
//! Each tip inspects one aspect of the two builds and either flags a
//! regression or praises an improvement. Thresholds carry a slack epsilon
//! so byte-level noise between builds doesn't trigger advice.

use serde::Serialize;

use crate::analysis::Analysis;
use crate::report::{format_percent, format_size};

/// Size changes smaller than this are treated as noise.
const SIZE_EPSILON: u64 = 2 * 1024;
/// An entry chunk larger than this is flagged even when it is not the
/// majority of the build.
const LARGE_ENTRY_SIZE: u64 = 512 * 1024;
/// Builds smaller than this are too small for entry-chunk advice.
const TRIVIAL_TOTAL_SIZE: u64 = 128 * 1024;
/// Minimum acceptable fraction of ES-module-only packages.
const TREE_SHAKABLE_FLOOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Advice,
    Praise,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub tone: Tone,
    pub message: String,
}

impl Suggestion {
    fn advice(message: String) -> Self {
        Self {
            tone: Tone::Advice,
            message,
        }
    }

    fn praise(message: String) -> Self {
        Self {
            tone: Tone::Praise,
            message,
        }
    }
}

/// All applicable tips for an old/new build pair, in a stable order.
pub fn suggestions(old: &mut Analysis, new: &mut Analysis) -> Vec<Suggestion> {
    let mut out = Vec::new();
    out.extend(node_module_size_tip(old, new));
    out.extend(entrypoint_tip(new));
    out.extend(tree_shake_tip(new));
    out
}

fn node_module_size_tip(old: &mut Analysis, new: &mut Analysis) -> Option<Suggestion> {
    let from = old.node_module_size(None);
    let to = new.node_module_size(None);
    if to > from + SIZE_EPSILON {
        return Some(Suggestion::advice(format!(
            "the size of node modules grew from {} to {}",
            format_size(from),
            format_size(to)
        )));
    }
    if to + SIZE_EPSILON < from {
        return Some(Suggestion::praise(format!(
            "dropped {} from node modules size",
            format_size(from - to)
        )));
    }
    None
}

fn entrypoint_tip(new: &mut Analysis) -> Option<Suggestion> {
    let total = new.total_chunk_size();
    let entry = new.entry_chunk_size();
    let is_majority = entry > total / 2;

    if (is_majority || entry > LARGE_ENTRY_SIZE) && total > TRIVIAL_TOTAL_SIZE {
        let message = if is_majority {
            format!(
                "the entrypoint contains the majority ({}) of the code",
                format_size(entry)
            )
        } else {
            format!("the entrypoint is fairly large ({})", format_size(entry))
        };
        return Some(Suggestion::advice(message));
    }

    if total > 0 && entry < total / 5 {
        #[allow(clippy::cast_precision_loss)]
        return Some(Suggestion::praise(format!(
            "the entrypoint is {} of the total code size",
            format_percent(entry as f64 / total as f64)
        )));
    }
    None
}

fn tree_shake_tip(new: &mut Analysis) -> Option<Suggestion> {
    let percent = new.tree_shakable_percent(None);
    if percent > TREE_SHAKABLE_FLOOR {
        return None;
    }
    Some(Suggestion::advice(format!(
        "{} of the dependencies aren't tree shaken",
        format_percent(1.0 - percent)
    )))
}
