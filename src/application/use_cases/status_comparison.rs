// ============================================================
// STATUS COMPARISON USE CASE
// ============================================================
// Orchestrate sheet extraction, the protocol join, and the
// equal/divergent classification

use std::collections::HashMap;

use tracing::info;

use crate::domain::error::Result;
use crate::domain::protocol::{
    CompareConfig, ComparisonRecord, ComparisonReport, SourceLayout, StatusRecord,
};
use crate::infrastructure::extract::{CsvExtractor, XlsxExtractor};

/// Status comparison use case
pub struct StatusComparison {
    /// Column layout of the carrier CSV
    carrier_layout: SourceLayout,

    /// Column layout of the internal XLSX
    internal_layout: SourceLayout,

    /// Synonym table applied before equality is decided
    config: CompareConfig,
}

impl StatusComparison {
    /// Create a comparison with explicit layouts and synonyms
    pub fn new(
        carrier_layout: SourceLayout,
        internal_layout: SourceLayout,
        config: CompareConfig,
    ) -> Self {
        Self {
            carrier_layout,
            internal_layout,
            config,
        }
    }

    /// Create with the layouts and synonyms of the known exports
    pub fn default_config() -> Self {
        Self::new(
            SourceLayout::carrier(),
            SourceLayout::internal(),
            CompareConfig::default(),
        )
    }

    /// Full pipeline: extract both sheets, then compare them. One run
    /// is an independent computation over its own two input buffers;
    /// nothing is kept between runs.
    pub fn run(&self, carrier_bytes: &[u8], internal_bytes: &[u8]) -> Result<ComparisonReport> {
        let (carrier, internal) = self.load_sources(carrier_bytes, internal_bytes)?;
        Ok(self.compare(&carrier, &internal))
    }

    /// Extract records from both uploads. Either sheet failing to load
    /// fails the whole run; no partial record set survives.
    pub fn load_sources(
        &self,
        carrier_bytes: &[u8],
        internal_bytes: &[u8],
    ) -> Result<(Vec<StatusRecord>, Vec<StatusRecord>)> {
        let carrier = CsvExtractor::new(self.carrier_layout).extract(carrier_bytes)?;
        let internal = XlsxExtractor::new(self.internal_layout).extract(internal_bytes)?;

        info!(
            "loaded {} carrier and {} internal record(s)",
            carrier.len(),
            internal.len()
        );

        Ok((carrier, internal))
    }

    /// Inner-join both record sets on the normalized protocol and
    /// classify every joined pair. Total for empty inputs: no overlap
    /// is an empty report, never an error.
    pub fn compare(&self, carrier: &[StatusRecord], internal: &[StatusRecord]) -> ComparisonReport {
        // Index the internal sheet by normalized protocol. A protocol
        // listed N times keeps all N statuses in sheet order, so
        // duplicated keys join pairwise like a relational inner join.
        let mut internal_index: HashMap<String, Vec<String>> = HashMap::new();
        for record in internal {
            let normalized = record.normalized();
            if normalized.protocol.is_empty() {
                continue;
            }
            internal_index
                .entry(normalized.protocol)
                .or_default()
                .push(normalized.status);
        }

        let mut divergent = Vec::new();
        let mut equal = Vec::new();

        for record in carrier {
            let normalized = record.normalized();
            if normalized.protocol.is_empty() {
                continue;
            }

            // Inner join: carrier-only protocols produce no outcome
            let internal_statuses = match internal_index.get(&normalized.protocol) {
                Some(statuses) => statuses,
                None => continue,
            };

            for internal_status in internal_statuses {
                // A pair with either status missing is incomplete data,
                // excluded from both outcome sets
                if normalized.status.is_empty() || internal_status.is_empty() {
                    continue;
                }

                // Outcomes carry the normalized originals; the synonym
                // rewrite only ever decides equality
                let outcome = ComparisonRecord::new(
                    normalized.protocol.clone(),
                    normalized.status.clone(),
                    internal_status.clone(),
                );

                if self.config.canonical(&normalized.status)
                    == self.config.canonical(internal_status)
                {
                    equal.push(outcome);
                } else {
                    divergent.push(outcome);
                }
            }
        }

        let report = ComparisonReport::new(divergent, equal);
        info!(
            "comparison finished: {} equal, {} divergent",
            report.equal_count, report.divergent_count
        );

        report
    }
}

impl Default for StatusComparison {
    fn default() -> Self {
        Self::default_config()
    }
}
