//! Workbook layout and persistence.
//!
//! [`emitter::emit`] lays the inventory out as tables on named sheets of a
//! [`TabularSink`]; the in-memory [`Workbook`] sink is then saved as xlsx or
//! JSON depending on the output extension.

pub mod emitter;
pub mod json;
pub mod sink;
pub mod xlsx;

use std::path::Path;

use crate::error::InputError;

pub use emitter::{EmitStats, ReportLayout, emit, sheet_name};
pub use sink::{Table, TabularSink, Workbook};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Xlsx }
    }
}

/// Replace whatever is at `path` with `workbook`.
pub fn write_workbook(workbook: &Workbook, path: &Path) -> Result<OutputFormat, InputError> {
    let unwritable = |reason: String| InputError::UnwritableOutput {
        path: path.to_path_buf(),
        reason,
    };

    if path.exists() {
        std::fs::remove_file(path).map_err(|e| unwritable(e.to_string()))?;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| unwritable(e.to_string()))?;
    }

    let format = OutputFormat::from_path(path);
    match format {
        OutputFormat::Xlsx => xlsx::save_xlsx(workbook, path).map_err(|e| unwritable(e.to_string()))?,
        OutputFormat::Json => json::save_json(workbook, path).map_err(|e| unwritable(e.to_string()))?,
    }
    Ok(format)
}
