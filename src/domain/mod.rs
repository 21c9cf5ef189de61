// Price history domain
pub mod market;

// Feature table, classifier contract and predictions
pub mod ml;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
