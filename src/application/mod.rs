pub mod use_cases;

pub use use_cases::status_comparison::StatusComparison;
