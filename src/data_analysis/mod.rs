// src/data_analysis/mod.rs

pub mod attitude_stats;
pub mod boundary_agreement;
pub mod boundary_detection;
pub mod episode_stats;
pub mod sentinel_filter;

// src/data_analysis/mod.rs
