//! Grouping, deduplication and the native-source join.
//!
//! Input is every parsed [`FunctorRecord`] plus the [`NativeIndex`]; output
//! is one [`TypeReport`] per calculator type and the registration summary.

pub mod dedup;
pub mod grouping;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::fs_utils::{display_path, short_name};
use crate::native::NativeIndex;
use crate::types::{FunctorRecord, OUTPUTNAME_KEY};

pub use dedup::{DedupRow, dedup_rows, property_columns};
pub use grouping::{CalculatorGroup, group_by_type};

#[derive(Clone, Debug, Default)]
pub struct InventoryOptions {
    pub repo_root_marker: Option<String>,
    /// Also list registrations no configured type claims.
    pub include_unattributed: bool,
}

/// A source file column of the wide table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileColumn {
    pub path: PathBuf,
    pub header: String,
}

/// Everything shown on one calculator-type sheet.
#[derive(Clone, Debug)]
pub struct TypeReport {
    pub calculator_type: String,
    /// Sorted display paths of the files using this type.
    pub used_in: Vec<String>,
    /// `(property, default)` rows of the defaults block.
    pub defaults: Vec<(String, String)>,
    /// Property columns of the wide table (includes `outputname`).
    pub properties: Vec<String>,
    pub file_columns: Vec<FileColumn>,
    pub rows: Vec<DedupRow>,
}

/// One line of the registration summary sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    pub tab: String,
    pub registered_name: String,
    pub calculator_type: String,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    pub reports: Vec<TypeReport>,
    pub summary: Vec<SummaryRow>,
}

impl Inventory {
    pub fn build(
        records: impl IntoIterator<Item = FunctorRecord>,
        native: &NativeIndex,
        options: &InventoryOptions,
    ) -> Self {
        let groups = group_by_type(records);
        let reports = groups
            .iter()
            .map(|g| build_type_report(g, native, options))
            .collect();
        let summary = attribute_registrations(&groups, native, options.include_unattributed);
        Self { reports, summary }
    }
}

fn build_type_report(
    group: &CalculatorGroup,
    native: &NativeIndex,
    options: &InventoryOptions,
) -> TypeReport {
    let marker = options.repo_root_marker.as_deref();
    let properties = property_columns(&group.functors);
    TypeReport {
        calculator_type: group.calculator_type.clone(),
        used_in: group.files.iter().map(|f| display_path(f, marker)).collect(),
        defaults: default_rows(&properties, native, &group.calculator_type),
        file_columns: file_columns(group.files.iter().map(PathBuf::as_path), marker),
        rows: dedup_rows(&group.functors, &properties),
        properties,
    }
}

/// Configured property names (minus `outputname`) with their native default,
/// followed by defaults the native code reads that no cfg ever sets.
fn default_rows(
    properties: &[String],
    native: &NativeIndex,
    calculator_type: &str,
) -> Vec<(String, String)> {
    let declared: Vec<(String, String)> = native
        .defaults_for(calculator_type)
        .map(|d| d.properties.clone())
        .unwrap_or_default();
    let lookup: HashMap<String, &str> = declared
        .iter()
        .rev()
        .map(|(name, value)| (name.to_lowercase(), value.as_str()))
        .collect();

    let mut rows: Vec<(String, String)> = properties
        .iter()
        .filter(|p| p.as_str() != OUTPUTNAME_KEY)
        .map(|p| (p.clone(), lookup.get(p).copied().unwrap_or_default().to_string()))
        .collect();

    for (name, value) in &declared {
        let lowered = name.to_lowercase();
        if lowered == OUTPUTNAME_KEY || rows.iter().any(|(p, _)| p.to_lowercase() == lowered) {
            continue;
        }
        rows.push((name.clone(), value.clone()));
    }
    rows
}

/// Short file names as column headers; files sharing a short name fall back
/// to their display path so neither column is lost.
fn file_columns<'a>(files: impl Iterator<Item = &'a Path>, marker: Option<&str>) -> Vec<FileColumn> {
    let files: Vec<&Path> = files.collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for f in &files {
        *counts.entry(short_name(f)).or_default() += 1;
    }
    files
        .into_iter()
        .map(|f| {
            let short = short_name(f);
            let header = if counts.get(&short).copied().unwrap_or_default() > 1 {
                display_path(f, marker)
            } else {
                short
            };
            FileColumn {
                path: f.to_path_buf(),
                header,
            }
        })
        .collect()
}

/// One summary row per (registration, group) pair where the implementation
/// id starts with the group's type, compared case-insensitively.
fn attribute_registrations(
    groups: &[CalculatorGroup],
    native: &NativeIndex,
    include_unattributed: bool,
) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    for (path, entries) in &native.registrations {
        let tab = short_name(path);
        for entry in entries {
            let implementation = entry.implementation_id.to_lowercase();
            let mut attributed = false;
            for group in groups {
                if implementation.starts_with(&group.calculator_type.to_lowercase()) {
                    attributed = true;
                    rows.push(SummaryRow {
                        tab: tab.clone(),
                        registered_name: entry.registered_name.clone(),
                        calculator_type: group.calculator_type.clone(),
                        description: String::new(),
                    });
                }
            }
            if !attributed && include_unattributed {
                rows.push(SummaryRow {
                    tab: tab.clone(),
                    registered_name: entry.registered_name.clone(),
                    calculator_type: String::new(),
                    description: String::new(),
                });
            }
        }
    }
    rows
}
