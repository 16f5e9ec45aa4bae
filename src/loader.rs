//! Loading statistics documents from disk.
//!
//! Stats files are JSON, optionally gzipped (`.gz`, or detected by magic
//! bytes). Multi-megabyte stats JSON parses slowly, so a decoded document
//! is kept in a binary sidecar next to the source file (`<file>.cache`),
//! validated by the source's size and mtime. The sidecar is rebuilt
//! silently when missing, stale, or undecodable, and skipped entirely
//! with `no_cache`; cache trouble must never break a run.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::stats::StatsDocument;

const CACHE_SUFFIX: &str = ".cache";
const CACHE_VERSION: u32 = 1;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Serialize, Deserialize)]
struct CacheEnvelope {
    version: u32,
    source_len: u64,
    source_mtime_nanos: u64,
    doc: StatsDocument,
}

fn mtime_nanos(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .and_then(|d| u64::try_from(d.as_nanos()).ok())
}

pub fn cache_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(CACHE_SUFFIX);
    PathBuf::from(os)
}

/// Load a statistics document, preferring the sidecar cache unless
/// `no_cache` is set.
pub fn load_stats(path: &Path, no_cache: bool) -> Result<StatsDocument, Error> {
    if !no_cache && let Some(doc) = load_cached(path) {
        return Ok(doc);
    }

    let doc = read_stats(path)?;
    if !no_cache {
        save_cache(path, &doc);
    }
    Ok(doc)
}

/// Read and parse a stats file, decompressing when it is gzipped.
pub fn read_stats(path: &Path) -> Result<StatsDocument, Error> {
    let raw = fs::read(path).map_err(|e| Error::StatsRead(path.to_path_buf(), e))?;

    let json = if is_gzipped(path, &raw) {
        let mut decoder = GzDecoder::new(raw.as_slice());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::StatsRead(path.to_path_buf(), e))?;
        decompressed
    } else {
        raw
    };

    serde_json::from_slice(&json).map_err(|e| Error::StatsParse(path.to_path_buf(), e))
}

fn is_gzipped(path: &Path, raw: &[u8]) -> bool {
    path.extension().is_some_and(|ext| ext == "gz") || raw.starts_with(&GZIP_MAGIC)
}

/// Try the sidecar cache. `None` when it is missing, stale, or does not
/// decode.
fn load_cached(path: &Path) -> Option<StatsDocument> {
    let data = fs::read(cache_path(path)).ok()?;
    let envelope: CacheEnvelope = bitcode::deserialize(&data).ok()?;

    if envelope.version != CACHE_VERSION {
        return None;
    }
    let current_len = fs::metadata(path).ok()?.len();
    let current_mtime = mtime_nanos(path)?;
    if envelope.source_len != current_len || envelope.source_mtime_nanos != current_mtime {
        return None;
    }

    Some(envelope.doc)
}

fn save_cache(path: &Path, doc: &StatsDocument) {
    let Some(source_len) = fs::metadata(path).ok().map(|m| m.len()) else {
        return;
    };
    let Some(source_mtime_nanos) = mtime_nanos(path) else {
        return;
    };

    let envelope = CacheEnvelope {
        version: CACHE_VERSION,
        source_len,
        source_mtime_nanos,
        doc: doc.clone(),
    };
    let data = match bitcode::serialize(&envelope) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("warning: failed to serialize stats cache: {e}");
            return;
        }
    };
    if let Err(e) = fs::write(cache_path(path), &data) {
        eprintln!("warning: failed to write stats cache: {e}");
    }
}
