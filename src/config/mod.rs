//! Configuration module for SheetSync
//!
//! Provides CLI arguments, built-in defaults and the runtime
//! configuration passed to the sync engine.

mod settings;

pub use settings::*;
