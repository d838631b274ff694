//! Textures

#[macro_use]
extern crate log;

mod constant;
mod imagemap;

// Re-export
pub use constant::*;
pub use imagemap::*;
