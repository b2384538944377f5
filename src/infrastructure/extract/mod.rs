// ============================================================
// SHEET EXTRACTION
// ============================================================
// Decode uploaded sheet bytes into protocol status records

mod csv_source;
mod xlsx_source;

pub use csv_source::CsvExtractor;
pub use xlsx_source::XlsxExtractor;
