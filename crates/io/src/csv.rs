// CSV report export

use std::path::Path;

use carsales_engine::ReportTable;

/// Write the table only: header row, then one row per record.
pub fn export(table: &ReportTable, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for record in table.to_string_rows() {
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
