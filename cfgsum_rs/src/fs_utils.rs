use std::io;
use std::path::{Path, PathBuf};

use crate::error::InputError;

pub const CONFIG_EXT: &str = "cfg";
pub const LIST_EXT: &str = "csv";

/// Resolve the primary input into the list of `.cfg` files to read.
///
/// A `.cfg` path is used as-is; a `.csv` path is a list file. Anything else
/// is rejected before any processing happens.
pub fn resolve_config_inputs(input: &Path) -> Result<Vec<PathBuf>, InputError> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        CONFIG_EXT => Ok(vec![input.to_path_buf()]),
        LIST_EXT => read_list_file(input),
        _ => Err(InputError::UnrecognizedInputShape {
            path: input.to_path_buf(),
            config_ext: CONFIG_EXT.to_string(),
            list_ext: LIST_EXT.to_string(),
        }),
    }
}

/// One path per non-empty row (first CSV field).
pub fn read_list_file(path: &Path) -> Result<Vec<PathBuf>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::UnreadableList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_list(&content))
}

pub fn parse_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let cleaned = strip_path_decoration(first_field(line));
            if cleaned.is_empty() {
                None
            } else {
                Some(PathBuf::from(cleaned))
            }
        })
        .collect()
}

fn first_field(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('"') {
        return rest.split('"').next().unwrap_or_default();
    }
    line.split(',').next().unwrap_or_default()
}

/// `PosixPath('/a/b.cfg')` -> `/a/b.cfg`, as written by tools that dump path
/// objects verbatim.
pub fn strip_path_decoration(raw: &str) -> &str {
    let mut s = raw.trim();
    for prefix in ["PosixPath(", "WindowsPath(", "Path("] {
        if let Some(inner) = s.strip_prefix(prefix) {
            s = inner.strip_suffix(')').unwrap_or(inner).trim();
            break;
        }
    }
    s.trim_matches(|c| c == '\'' || c == '"').trim()
}

/// Path as shown in reports: everything after `marker` when present.
pub fn display_path(path: &Path, marker: Option<&str>) -> String {
    let full = path.to_string_lossy();
    match marker.filter(|m| !m.is_empty()) {
        Some(m) => match full.split_once(m) {
            Some((_, rest)) => rest.to_string(),
            None => full.to_string(),
        },
        None => full.to_string(),
    }
}

/// Read a source file as text. Bytes that are not UTF-8 (legacy Latin-1
/// comments) become U+FFFD instead of failing the whole file.
pub fn read_source_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn short_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
