//! # Rendering Module
//!
//! Plain-text output: narration, status, and the debug map.

pub mod debug_map;
pub mod display;

pub use debug_map::*;
pub use display::*;
