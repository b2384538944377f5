// ============================================================
// PROTOCOL DOMAIN LAYER
// ============================================================
// Core types for protocol status reconciliation
// No I/O, no async, no external dependencies beyond serde

mod compare_config;
mod record;
mod report;
mod source_layout;

pub use compare_config::CompareConfig;
pub use record::{SourceKind, StatusRecord};
pub use report::{ComparisonRecord, ComparisonReport};
pub use source_layout::SourceLayout;
