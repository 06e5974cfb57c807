use serde::Serialize;

/// Header row plus data rows, written as one block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Destination for report tables: a named sheet and a row offset.
pub trait TabularSink {
    fn write_table(&mut self, sheet: &str, start_row: usize, table: &Table);
}

/// A table placed at a row offset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub start_row: usize,
    #[serde(flatten)]
    pub table: Table,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub blocks: Vec<Block>,
}

/// In-memory workbook; persisted by [`super::xlsx`] or [`super::json`].
///
/// Sheet names compare case-insensitively, as spreadsheet applications do,
/// so two tables aimed at colliding names land on the same sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let lowered = name.to_lowercase();
        self.sheets.iter().find(|s| s.name.to_lowercase() == lowered)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

impl TabularSink for Workbook {
    fn write_table(&mut self, sheet: &str, start_row: usize, table: &Table) {
        let lowered = sheet.to_lowercase();
        let block = Block {
            start_row,
            table: table.clone(),
        };
        match self
            .sheets
            .iter_mut()
            .find(|s| s.name.to_lowercase() == lowered)
        {
            Some(existing) => existing.blocks.push(block),
            None => self.sheets.push(Sheet {
                name: sheet.to_string(),
                blocks: vec![block],
            }),
        }
    }
}
