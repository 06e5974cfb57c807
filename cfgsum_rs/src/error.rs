use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run. Everything else (missing cfg or native files,
/// routines that cannot be found) is logged and skipped.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input must be a .{config_ext} file or a .{list_ext} file listing them, got {path}")]
    UnrecognizedInputShape {
        path: PathBuf,
        config_ext: String,
        list_ext: String,
    },

    #[error("failed to read list file {path}: {source}")]
    UnreadableList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write workbook {path}: {reason}")]
    UnwritableOutput { path: PathBuf, reason: String },
}
