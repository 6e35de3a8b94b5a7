// src/data_input/mod.rs

pub mod telemetry_parser;
pub mod telemetry_record;

// src/data_input/mod.rs
