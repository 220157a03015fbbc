// Derived statistics and views
pub mod performance;

// Storage port
pub mod repositories;

// Core trading domain
pub mod trading;

// Domain-specific error types
pub mod errors;
