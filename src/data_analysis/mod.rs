// src/data_analysis/mod.rs

pub mod mismatch;
pub mod summary;

// src/data_analysis/mod.rs
