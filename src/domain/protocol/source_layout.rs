// ============================================================
// SOURCE LAYOUT
// ============================================================
// Column positions for the two headerless sheet formats

use serde::{Deserialize, Serialize};

use super::SourceKind;

/// Zero-based column positions within a headerless sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLayout {
    /// Column holding the protocol identifier
    pub protocol_column: usize,

    /// Column holding the status value
    pub status_column: usize,
}

impl SourceLayout {
    /// Layout of the carrier CSV export: protocol in the third column,
    /// status in the twentieth
    pub fn carrier() -> Self {
        Self {
            protocol_column: 2,
            status_column: 19,
        }
    }

    /// Layout of the internal XLSX export: status in the first column,
    /// protocol in the fourth
    pub fn internal() -> Self {
        Self {
            protocol_column: 3,
            status_column: 0,
        }
    }

    /// Default layout for a given source
    pub fn for_source(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Carrier => Self::carrier(),
            SourceKind::Internal => Self::internal(),
        }
    }

    /// Minimum number of columns a sheet must have to satisfy this layout
    pub fn required_columns(&self) -> usize {
        self.protocol_column.max(self.status_column) + 1
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.protocol_column == self.status_column {
            return Err("protocol_column and status_column must differ".to_string());
        }
        Ok(())
    }
}
