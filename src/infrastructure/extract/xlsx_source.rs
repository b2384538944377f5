// ============================================================
// XLSX EXTRACTION
// ============================================================
// Read the internal tracking sheet from uploaded workbook bytes

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::protocol::{SourceLayout, StatusRecord};

/// Extracts (protocol, status) pairs from the first worksheet of a
/// headerless internal export
pub struct XlsxExtractor {
    /// Column positions to read from each row
    layout: SourceLayout,
}

impl XlsxExtractor {
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    /// Open the workbook bytes and extract one record per row of the
    /// first worksheet that carries a protocol identifier. Fails when
    /// the sheet is narrower than the configured layout.
    pub fn extract(&self, bytes: &[u8]) -> Result<Vec<StatusRecord>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| AppError::load("internal sheet is not a readable workbook", e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                AppError::load(
                    "internal sheet has no worksheets",
                    "expected data on the first worksheet",
                )
            })?
            .map_err(|e| AppError::load("internal sheet: first worksheet is unreadable", e))?;

        self.extract_records(&range)
    }

    fn extract_records(&self, range: &Range<Data>) -> Result<Vec<StatusRecord>> {
        let (start, end) = match (range.start(), range.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::load(
                    "internal sheet is empty",
                    "the first worksheet contains no cells",
                ))
            }
        };

        let width = end.1 as usize + 1;
        if width < self.layout.required_columns() {
            return Err(AppError::load(
                format!(
                    "internal sheet has {} column(s) but the layout needs at least {}",
                    width,
                    self.layout.required_columns()
                ),
                format!(
                    "protocol expected in column {}, status in column {}",
                    self.layout.protocol_column, self.layout.status_column
                ),
            ));
        }

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in start.0..=end.0 {
            let protocol = self.cell_text(range, row, self.layout.protocol_column);
            let status = self.cell_text(range, row, self.layout.status_column);

            if protocol.trim().is_empty() {
                dropped += 1;
                continue;
            }

            records.push(StatusRecord::new(protocol, status));
        }

        if dropped > 0 {
            debug!("internal sheet: {} row(s) without a protocol dropped", dropped);
        }

        Ok(records)
    }

    /// Render one cell as text. Numeric cells print the way the
    /// spreadsheet shows them, so a protocol stored as the number 7001
    /// comes back as "7001" rather than "7001.0".
    fn cell_text(&self, range: &Range<Data>, row: u32, column: usize) -> String {
        match range.get_value((row, column as u32)) {
            None | Some(Data::Empty) => String::new(),
            Some(cell) => cell.as_string().unwrap_or_else(|| cell.to_string()),
        }
    }
}
