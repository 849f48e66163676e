pub mod compute;
pub mod config;
pub mod curve;
pub mod genotypes;
pub mod grid;
