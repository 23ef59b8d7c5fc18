//! Tileset documents on disk

use crate::io::configuration::{OUTPUT_SUFFIX, TILESET_EXTENSION};
use crate::io::error::{Result, WfcError, file_system_error};
use crate::tiles::prototype::TileSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse a tileset from JSON text
///
/// The result is not validated; `Solver::run` does that.
///
/// # Errors
///
/// Returns `Parse` if the text is not a well-formed tileset document
pub fn tileset_from_str(json: &str) -> Result<TileSet> {
    serde_json::from_str(json).map_err(|source| WfcError::Parse {
        path: PathBuf::from("<inline>"),
        source,
    })
}

/// Read and parse a tileset file
///
/// # Errors
///
/// Returns `FileSystem` if the file can't be read and `Parse` if its
/// contents are not a tileset document
pub fn load_tileset(path: &Path) -> Result<TileSet> {
    let json =
        fs::read_to_string(path).map_err(|e| file_system_error(path, "read tileset", e))?;
    let tileset: TileSet = serde_json::from_str(&json).map_err(|source| WfcError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        tiles = tileset.tiles.len(),
        edge_types = tileset.edge_types.len(),
        "loaded tileset"
    );
    Ok(tileset)
}

/// Write a tileset as pretty-printed JSON
///
/// # Errors
///
/// Returns `Parse` if serialization fails and `FileSystem` if the file
/// can't be written
pub fn save_tileset(tileset: &TileSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tileset).map_err(|source| WfcError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| file_system_error(path, "write tileset", e))
}

/// Whether a path names a tileset document
///
/// Result documents share the extension and are excluded by their suffix.
pub fn is_tileset_path(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some(TILESET_EXTENSION);
    let is_result = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
    is_json && !is_result
}
