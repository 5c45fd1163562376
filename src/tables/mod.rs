// src/tables/mod.rs
pub mod classify;
pub mod consolidate;
pub mod model;
pub mod signature;

// Re-export key table types for convenience
pub use classify::{classify, SheetDescriptor};
pub use consolidate::consolidate;
pub use model::{CellValue, Table};
