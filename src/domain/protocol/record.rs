// ============================================================
// PROTOCOL RECORD TYPES
// ============================================================
// Data structures representing extracted sheet content

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which uploaded sheet a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// The carrier export (CSV)
    Carrier,

    /// The internal tracking export (XLSX)
    Internal,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Carrier => "carrier",
            SourceKind::Internal => "internal",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a source sheet reduced to the two columns that matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Protocol identifier, kept as text even when it looks numeric
    pub protocol: String,

    /// Status value as reported by the source
    pub status: String,
}

impl StatusRecord {
    /// Create a new status record
    pub fn new(protocol: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            status: status.into(),
        }
    }

    /// Whether this record carries a usable protocol identifier
    pub fn has_protocol(&self) -> bool {
        !self.protocol.trim().is_empty()
    }

    /// Trim and uppercase both fields. Joining and comparison always
    /// operate on the normalized form; the raw form is discarded.
    pub fn normalized(&self) -> Self {
        Self {
            protocol: self.protocol.trim().to_uppercase(),
            status: self.status.trim().to_uppercase(),
        }
    }
}
