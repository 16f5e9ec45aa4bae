// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use caliper::stats::StatsDocument;

/// Baseline ("old") build statistics.
///
/// Structure:
///   chunk 0 "main"   entry, 300 KB
///   chunk 1 "vendor"  100 KB
///   ./src/index.js              entry module, chunk 0
///   ./src/app.js + 1 modules    concatenation group, chunk 0
///     ./src/app.js                imported by index (harmony)
///     ./src/util.js               imported by app (harmony)
///   ./src/legacy.js             imported by index (cjs); removed in new
///   lodash                      chunk 1, imported by app (cjs)
pub const OLD_STATS: &str = r#"{
  "chunks": [
    {"id": 0, "names": ["main"], "size": 300000, "entry": true},
    {"id": 1, "names": ["vendor"], "size": 100000, "entry": false}
  ],
  "modules": [
    {
      "identifier": "/repo/src/index.js",
      "name": "./src/index.js",
      "size": 1000,
      "chunks": [0],
      "reasons": [{"type": "entry"}]
    },
    {
      "identifier": "/repo/src/app.js + 1 modules",
      "name": "./src/app.js + 1 modules",
      "size": 3000,
      "chunks": [0],
      "reasons": [],
      "modules": [
        {
          "identifier": "/repo/src/app.js",
          "name": "./src/app.js",
          "size": 2000,
          "chunks": [0],
          "reasons": [{"moduleName": "./src/index.js", "type": "harmony import specifier"}]
        },
        {
          "identifier": "/repo/src/util.js",
          "name": "./src/util.js",
          "size": 1000,
          "chunks": [0],
          "reasons": [{"moduleName": "./src/app.js", "type": "harmony import specifier"}]
        }
      ]
    },
    {
      "identifier": "/repo/src/legacy.js",
      "name": "./src/legacy.js",
      "size": 500,
      "chunks": [0],
      "reasons": [{"moduleName": "./src/index.js", "type": "cjs require"}]
    },
    {
      "identifier": "/repo/node_modules/lodash/index.js",
      "name": "./node_modules/lodash/index.js",
      "size": 70000,
      "chunks": [1],
      "reasons": [{"moduleName": "./src/app.js", "type": "cjs require"}]
    }
  ]
}"#;

/// Current ("new") build statistics.
///
/// Differences from [`OLD_STATS`]:
///   - index grew 1000 -> 1200, app grew 2000 -> 2500
///   - the concatenation group gained ./src/fresh.js (new-only module)
///   - ./src/legacy.js is gone (old-only module)
///   - lodash grew 70000 -> 72000, still cjs-imported
///   - @scope/newpkg added, harmony-imported (tree shakable)
pub const NEW_STATS: &str = r#"{
  "chunks": [
    {"id": 0, "names": ["main"], "size": 280000, "entry": true},
    {"id": 1, "names": ["vendor"], "size": 126000, "entry": false}
  ],
  "modules": [
    {
      "identifier": "/repo/src/index.js",
      "name": "./src/index.js",
      "size": 1200,
      "chunks": [0],
      "reasons": [{"type": "entry"}]
    },
    {
      "identifier": "/repo/src/app.js + 2 modules",
      "name": "./src/app.js + 2 modules",
      "size": 4300,
      "chunks": [0],
      "reasons": [],
      "modules": [
        {
          "identifier": "/repo/src/app.js",
          "name": "./src/app.js",
          "size": 2500,
          "chunks": [0],
          "reasons": [{"moduleName": "./src/index.js", "type": "harmony import specifier"}]
        },
        {
          "identifier": "/repo/src/util.js",
          "name": "./src/util.js",
          "size": 1000,
          "chunks": [0],
          "reasons": [{"moduleName": "./src/app.js", "type": "harmony import specifier"}]
        },
        {
          "identifier": "/repo/src/fresh.js",
          "name": "./src/fresh.js",
          "size": 800,
          "chunks": [0],
          "reasons": [{"moduleName": "./src/app.js", "type": "harmony import specifier"}]
        }
      ]
    },
    {
      "identifier": "/repo/node_modules/lodash/index.js",
      "name": "./node_modules/lodash/index.js",
      "size": 72000,
      "chunks": [1],
      "reasons": [{"moduleName": "./src/app.js", "type": "cjs require"}]
    },
    {
      "identifier": "/repo/node_modules/@scope/newpkg/lib/x.js",
      "name": "./node_modules/@scope/newpkg/lib/x.js",
      "size": 5000,
      "chunks": [1],
      "reasons": [{"moduleName": "./src/app.js", "type": "harmony import specifier"}]
    }
  ]
}"#;

pub fn old_doc() -> StatsDocument {
    serde_json::from_str(OLD_STATS).unwrap()
}

pub fn new_doc() -> StatsDocument {
    serde_json::from_str(NEW_STATS).unwrap()
}

/// The fixture pair written to disk for CLI tests. Caller must keep the
/// returned value alive (dropping `TempDir` deletes the files).
pub struct StatsPair {
    pub dir: tempfile::TempDir,
    pub old: PathBuf,
    pub new: PathBuf,
}

impl StatsPair {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.json");
        let new = dir.path().join("new.json");
        std::fs::write(&old, OLD_STATS).unwrap();
        std::fs::write(&new, NEW_STATS).unwrap();
        Self { dir, old, new }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
