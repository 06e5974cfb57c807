use std::path::Path;

use rust_xlsxwriter::{Format, Worksheet, XlsxError};

use super::sink::{Block, Workbook};

/// Excel refuses longer sheet names.
const MAX_SHEET_NAME: usize = 31;

/// Persist `workbook` as an `.xlsx` file. Header rows are bold.
///
/// Sheets whose names become equal once made xlsx-safe share one worksheet,
/// later blocks overwriting earlier cells.
pub fn save_xlsx(workbook: &Workbook, path: &Path) -> Result<(), XlsxError> {
    let mut book = rust_xlsxwriter::Workbook::new();
    let header = Format::new().set_bold();
    let mut placed: Vec<String> = Vec::new();

    for sheet in &workbook.sheets {
        let name = xlsx_sheet_name(&sheet.name);
        let lowered = name.to_lowercase();
        let worksheet = match placed.iter().position(|n| *n == lowered) {
            Some(index) => book.worksheet_from_index(index)?,
            None => {
                placed.push(lowered);
                let worksheet = book.add_worksheet();
                worksheet.set_name(name.as_str())?;
                worksheet
            }
        };
        for block in &sheet.blocks {
            write_block(worksheet, block, &header)?;
        }
    }
    if workbook.sheets.is_empty() {
        // A workbook needs at least one visible sheet.
        book.add_worksheet();
    }

    book.save(path)
}

/// `[]:*?/\` become `_`, edge apostrophes are dropped, the result is cut to
/// 31 characters and never left empty.
pub fn xlsx_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let trimmed: String = cleaned
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME)
        .collect();
    if trimmed.trim().is_empty() {
        "_".to_string()
    } else {
        trimmed
    }
}

struct Cell<'a> {
    row: u32,
    col: u16,
    value: &'a str,
    header: bool,
}

/// Every cell of `block`, blanks included, so a block written over an
/// earlier one never leaves stale values behind.
fn block_cells(block: &Block) -> impl Iterator<Item = Cell<'_>> {
    let top = block.start_row;
    let headers = block.table.headers.iter().enumerate().map(move |(col, title)| Cell {
        row: row_index(top),
        col: col_index(col),
        value: title.as_str(),
        header: true,
    });
    let rows = block.table.rows.iter().enumerate().flat_map(move |(offset, row)| {
        row.iter().enumerate().map(move |(col, value)| Cell {
            row: row_index(top + offset + 1),
            col: col_index(col),
            value: value.as_str(),
            header: false,
        })
    });
    headers.chain(rows)
}

fn write_block(worksheet: &mut Worksheet, block: &Block, header: &Format) -> Result<(), XlsxError> {
    for cell in block_cells(block) {
        if cell.header {
            worksheet.write_string_with_format(cell.row, cell.col, cell.value, header)?;
        } else if cell.value.is_empty() {
            worksheet.clear_cell(cell.row, cell.col);
        } else {
            worksheet.write_string(cell.row, cell.col, cell.value)?;
        }
    }
    Ok(())
}

// Out-of-range indices saturate and are rejected by the writer.
fn row_index(row: usize) -> u32 {
    u32::try_from(row).unwrap_or(u32::MAX)
}

fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
