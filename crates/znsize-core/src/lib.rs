//! Core types, the DOM access trait and error types for the ZnSize sizing engine.
//!
//! This crate provides the foundational types used across the other znsize crates:
//! - Geometry and dimension value types
//! - The [`Page`] trait every measurement reads the document through
//! - Strategy identifiers and engine options
//! - Error types

pub mod dom;
pub mod errors;
pub mod methods;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use dom::*;
pub use errors::*;
pub use methods::*;
pub use types::*;
