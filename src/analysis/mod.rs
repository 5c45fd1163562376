// src/analysis/mod.rs
pub mod loader;
pub mod models;

pub use loader::load_analysis;
pub use models::{DocumentAnalysis, JobInput, JobResult};
