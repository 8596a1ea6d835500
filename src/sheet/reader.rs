use crate::error::AgentError;
use crate::sheet::models::SheetRow;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Parses xlsx, xls, xlsb or ods bytes and returns the rows of the first
/// sheet, using its first row as column names.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<SheetRow>, AgentError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AgentError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AgentError::Parse("workbook contains no sheets".to_string()))?
        .map_err(|e| AgentError::Parse(e.to_string()))?;

    Ok(rows_from_range(&range))
}

/// Blank header cells drop their column, a repeated header keeps its first
/// column, and rows with no text at all are skipped.
pub fn rows_from_range(range: &Range<Data>) -> Vec<SheetRow> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let columns: Vec<Option<String>> = header
        .iter()
        .map(|cell| Some(cell_text(cell)).filter(|t| !t.is_empty()))
        .collect();

    rows.filter_map(|row| {
        let mut cells = BTreeMap::new();
        for (column, cell) in columns.iter().zip(row) {
            if let Some(column) = column {
                cells.entry(column.clone()).or_insert_with(|| cell_text(cell));
            }
        }
        cells.values().any(|v| !v.is_empty()).then_some(cells)
    })
    .enumerate()
    .map(|(i, cells)| SheetRow::new(i + 1, cells))
    .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}
