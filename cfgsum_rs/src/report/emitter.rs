use tracing::debug;

use crate::config::ReportConfig;
use crate::inventory::{Inventory, SummaryRow, TypeReport};

use super::sink::{Table, TabularSink};

/// Rows left between the end of one block and the next block's header.
const BLOCK_GAP: usize = 2;

#[derive(Clone, Debug)]
pub struct ReportLayout {
    pub sheet_name_limit: usize,
    pub summary_sheet: String,
    pub membership_marker: String,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl ReportLayout {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            sheet_name_limit: config.sheet_name_limit,
            summary_sheet: config.summary_sheet.clone(),
            membership_marker: config.membership_marker.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub type_sheets: usize,
    pub skipped_types: usize,
    pub summary_rows: usize,
}

/// Sheet name for a calculator type: the type cut to the length limit.
/// Collisions are not resolved. Characters a particular file format rejects
/// are the writer's business.
pub fn sheet_name(calculator_type: &str, limit: usize) -> String {
    calculator_type.chars().take(limit).collect()
}

/// Write every non-empty type report and the summary sheet into `sink`.
pub fn emit(inventory: &Inventory, sink: &mut dyn TabularSink, layout: &ReportLayout) -> EmitStats {
    let mut stats = EmitStats::default();

    for report in &inventory.reports {
        if report.rows.is_empty() {
            debug!("type {} has no named rows, no sheet written", report.calculator_type);
            stats.skipped_types += 1;
            continue;
        }
        let sheet = sheet_name(&report.calculator_type, layout.sheet_name_limit);
        let mut start = 0;
        for table in type_tables(report, &layout.membership_marker) {
            sink.write_table(&sheet, start, &table);
            start += table.rows.len() + BLOCK_GAP;
        }
        stats.type_sheets += 1;
    }

    if !inventory.summary.is_empty() {
        sink.write_table(&layout.summary_sheet, 0, &summary_table(&inventory.summary));
        stats.summary_rows = inventory.summary.len();
    }

    stats
}

/// Used-in list, property defaults and the wide table, top to bottom.
fn type_tables(report: &TypeReport, marker: &str) -> [Table; 3] {
    let mut used_in = Table::new(["CFG Files"]);
    for file in &report.used_in {
        used_in.push_row(vec![file.clone()]);
    }

    let mut defaults = Table::new(["Property Name", "Default Value"]);
    for (name, value) in &report.defaults {
        defaults.push_row(vec![name.clone(), value.clone()]);
    }

    let mut headers = vec!["Cashflow".to_string(), "Name".to_string()];
    headers.extend(report.properties.iter().cloned());
    headers.extend(report.file_columns.iter().map(|c| c.header.clone()));
    let mut wide = Table::new(headers);
    for row in &report.rows {
        let mut cells = vec![row.cashflow.clone(), row.name.clone()];
        cells.extend(row.values.iter().cloned());
        cells.extend(report.file_columns.iter().map(|c| {
            if row.files.contains(&c.path) {
                marker.to_string()
            } else {
                String::new()
            }
        }));
        wide.push_row(cells);
    }

    [used_in, defaults, wide]
}

fn summary_table(rows: &[SummaryRow]) -> Table {
    let mut table = Table::new(["Tab", "Calculator Name", "Type", "Description"]);
    for row in rows {
        table.push_row(vec![
            row.tab.clone(),
            row.registered_name.clone(),
            row.calculator_type.clone(),
            row.description.clone(),
        ]);
    }
    table
}
