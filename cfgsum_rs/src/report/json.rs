use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::sink::Workbook;

/// Persist `workbook` as pretty-printed JSON (`{"sheets": [...]}`).
pub fn save_json(workbook: &Workbook, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, workbook)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
