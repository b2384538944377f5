// ============================================================
// CSV EXTRACTION
// ============================================================
// Parse the carrier export with delimiter detection and
// Western-European decoding

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::protocol::{SourceLayout, StatusRecord};

/// Extracts (protocol, status) pairs from a headerless carrier CSV
pub struct CsvExtractor {
    /// Column positions to read from each row
    layout: SourceLayout,

    /// Delimiter character; `None` means detect it from the content
    delimiter: Option<u8>,
}

impl CsvExtractor {
    /// Create an extractor that detects the delimiter on its own
    pub fn new(layout: SourceLayout) -> Self {
        Self {
            layout,
            delimiter: None,
        }
    }

    /// Force a delimiter instead of detecting one
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Decode the uploaded bytes and extract one record per row that
    /// carries a protocol identifier. Fails when the sheet is narrower
    /// than the configured layout.
    pub fn extract(&self, bytes: &[u8]) -> Result<Vec<StatusRecord>> {
        let content = self.decode(bytes);
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(&content));

        self.extract_records(&content, delimiter)
    }

    /// Decode sheet bytes as Windows-1252. Carrier exports use a
    /// Western-European single-byte encoding, never UTF-8; a leading
    /// BOM still switches decoding to the Unicode flavor it announces.
    fn decode(&self, bytes: &[u8]) -> String {
        let (content, encoding, had_errors) = WINDOWS_1252.decode(bytes);
        if had_errors {
            warn!(
                "carrier sheet: bytes invalid for {} replaced during decode",
                encoding.name()
            );
        }

        content.into_owned()
    }

    fn extract_records(&self, content: &str, delimiter: u8) -> Result<Vec<StatusRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        let mut widest_row = 0usize;
        let mut dropped = 0usize;

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::load(format!("carrier sheet: row {} is not valid CSV", index + 1), e)
            })?;

            widest_row = widest_row.max(record.len());

            // Short rows read as if padded with empty cells, the way a
            // spreadsheet application renders a ragged export
            let protocol = record.get(self.layout.protocol_column).unwrap_or("");
            let status = record.get(self.layout.status_column).unwrap_or("");

            if protocol.trim().is_empty() {
                dropped += 1;
                continue;
            }

            records.push(StatusRecord::new(protocol, status));
        }

        if widest_row < self.layout.required_columns() {
            return Err(AppError::load(
                format!(
                    "carrier sheet has {} column(s) but the layout needs at least {}",
                    widest_row,
                    self.layout.required_columns()
                ),
                format!(
                    "protocol expected in column {}, status in column {}",
                    self.layout.protocol_column, self.layout.status_column
                ),
            ));
        }

        if dropped > 0 {
            debug!("carrier sheet: {} row(s) without a protocol dropped", dropped);
        }

        Ok(records)
    }

    /// Detect the delimiter (comma, semicolon, tab, pipe) by scoring
    /// how consistently each candidate splits the first lines
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.chars().filter(|&c| c as u8 == delimiter).count())
                .collect();

            // Score by frequency and consistency (low standard deviation)
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
