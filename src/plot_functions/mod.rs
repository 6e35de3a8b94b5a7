// src/plot_functions/mod.rs

pub mod plot_attitude_radians;
pub mod plot_attitude_timeseries;

// src/plot_functions/mod.rs
