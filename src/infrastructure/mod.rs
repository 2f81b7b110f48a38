pub mod artifacts;
pub mod dataset;
