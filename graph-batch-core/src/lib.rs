//! Core types and abstractions for graph-batch packing
//!
//! This crate provides the data model shared by the batch-packing
//! algorithms and the epoch driver: field values and their sentinel
//! encodings, entities, graph components, field specifications, stacked
//! batches, and the component-source abstraction everything is read
//! through.

#![warn(missing_docs)]

pub mod batch;
pub mod component;
pub mod error;
pub mod schema;
pub mod source;
pub mod value;

// Re-export key types for convenience
pub use batch::{Batch, FieldColumn};
pub use component::{Component, Entity};
pub use error::{Error, Result};
pub use schema::{FieldDef, FieldKind, FieldSpec};
pub use source::{ComponentSource, InMemorySource};
pub use value::{FieldValue, MISSING_VALUE, UNKNOWN_VALUE};
