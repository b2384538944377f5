// ============================================================
// COMPARISON REPORT TYPES
// ============================================================
// Output of one comparison run, ready for serialization

use serde::{Deserialize, Serialize};

/// A protocol present in both sheets, with the status each side reports.
/// Statuses are the normalized originals, not the synonym-rewritten
/// values used to decide equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Protocol identifier shared by both sheets
    pub protocol: String,

    /// Status reported by the carrier
    pub carrier_status: String,

    /// Status tracked internally
    pub internal_status: String,
}

impl ComparisonRecord {
    /// Create a new comparison record
    pub fn new(
        protocol: impl Into<String>,
        carrier_status: impl Into<String>,
        internal_status: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            carrier_status: carrier_status.into(),
            internal_status: internal_status.into(),
        }
    }
}

/// Result of comparing the carrier sheet against the internal sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Number of joined protocols whose statuses agree
    pub equal_count: usize,

    /// Number of joined protocols whose statuses differ
    pub divergent_count: usize,

    /// Joined protocols with differing statuses
    pub divergent_records: Vec<ComparisonRecord>,

    /// Joined protocols with agreeing statuses
    pub equal_records: Vec<ComparisonRecord>,
}

impl ComparisonReport {
    /// Build a report from the two classified record sets
    pub fn new(divergent_records: Vec<ComparisonRecord>, equal_records: Vec<ComparisonRecord>) -> Self {
        Self {
            equal_count: equal_records.len(),
            divergent_count: divergent_records.len(),
            divergent_records,
            equal_records,
        }
    }

    /// Total number of records that survived the join
    pub fn total(&self) -> usize {
        self.equal_count + self.divergent_count
    }

    /// True when the join produced no classifiable records
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
