pub mod error;

// Protocol reconciliation module
pub mod protocol;
