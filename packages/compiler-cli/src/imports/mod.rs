//! Imports
//!
//! Rewriting of relative module specifiers so they keep resolving once every
//! file has moved to its output directory.

pub mod rewriter;
pub mod transform;

pub use rewriter::{ImportRewriter, SpecifierRewrite, UnresolvedSpecifier};
pub use transform::ImportSpecifierTransform;
