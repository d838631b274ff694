//! Samplers

mod random;

// Re-export
pub use random::*;
