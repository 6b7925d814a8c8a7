#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Dynamic transform flags.
//!
//! Metadata erases `dynamic` to `object`. A marker attribute carries one
//! flag per slot of the erased type's canonical walk, saying which `object`
//! leaves were `dynamic`.
//!
//! - `walker` - canonical slot order, shared by both directions
//! - `codec` - `encode` / `decode`, decode policy
//! - `site` - leading slots for custom modifiers and by-ref kinds
//! - `marker` - absent / bare / explicit marker forms
//! - `trace` - walk tracing

mod codec;
mod error;
mod limits;
mod marker;
mod site;
mod trace;
mod walker;

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod site_tests;

pub use codec::{DecodePolicy, DynamicFlagCodec, decode, encode};
pub use error::CodecError;
pub use limits::WalkLimits;
pub use marker::Marker;
pub use site::{RefKind, SignatureSite};
pub use trace::{NoopTracer, PrintTracer, Verbosity, WalkTracer};
pub use walker::{ShapeFold, Slot, SlotInfo, SlotKind, TypeShapeWalker, slot_label};
