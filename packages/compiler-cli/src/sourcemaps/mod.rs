//! Source Maps
//!
//! Re-pointing emitted source maps at their original sources after the
//! emitted files have been relocated.

pub mod raw_source_map;

pub use raw_source_map::{relocate_source_map, RawSourceMap};
