pub mod status_comparison;
