#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for dynflags.
//!
//! - `types` - the `TypeExpr` model, erasure and checked constructors
//! - `tuple` - tuple desugaring into `System.ValueTuple` chains
//! - `notation` - textual type notation (lexer and parser)
//! - `colors` - terminal color palette

mod colors;
mod display;
pub mod notation;
pub mod tuple;
mod types;

#[cfg(test)]
mod display_tests;

pub use colors::Colors;
pub use notation::{NotationError, parse_type};
pub use types::{
    DYNAMIC_NAME, ErasedType, GenericSegment, GenericType, ModelError, NULLABLE_CARRIER,
    OBJECT_NAMES, TypeExpr,
};
