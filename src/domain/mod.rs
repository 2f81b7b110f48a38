// Domain-specific error types
pub mod errors;

// Feature column order and vector shape
pub mod feature_order;

// Core request/response types
pub mod types;
