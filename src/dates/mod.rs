// src/dates/mod.rs
pub mod annotate;
pub mod fiscal;
pub mod format;
pub mod start_year;

// Re-export key date helpers for convenience
pub use annotate::annotate_year;
pub use fiscal::FiscalConfig;
pub use start_year::extract_start_year;
