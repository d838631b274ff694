//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
#[macro_use]
pub mod geometry;
pub mod image_io;
pub mod interaction;
pub mod microfacet;
pub mod mipmap;
pub mod parallel;
pub mod paramset;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod spectrum;
pub mod texture;
