//! Dynamic transform flags: encoding and decoding.
//!
//! `encode` walks a resolved type and emits one flag per slot, `true` exactly
//! at the `dynamic` leaves. `decode` walks the erased skeleton in the same
//! order and turns every `object` leaf flagged `true` back into `dynamic`.
//!
//! ```text
//! Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>
//!   #0 Outer.Inner.InnerInner<4>  false
//!   #1   T                        false
//!   #2   int                      false
//!   #3   T                        false
//!   #4   Outer<1>                 false
//!   #5     dynamic                true
//! ```
//!
//! Decoding checks the flag count against the skeleton before rebuilding
//! anything, so a failed decode never yields a partial type.

use dynflags_core::{ErasedType, GenericType, TypeExpr, tuple};

use crate::error::CodecError;
use crate::limits::WalkLimits;
use crate::marker::Marker;
use crate::site::SignatureSite;
use crate::trace::{NoopTracer, WalkTracer};
use crate::walker::{ShapeFold, Slot, TypeShapeWalker};

/// What `decode` does with flags that do not fit the skeleton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Malformed flags are an error.
    #[default]
    Strict,
    /// Malformed flags are ignored as a whole; the skeleton is returned
    /// unchanged. Never pads, truncates or applies a partial prefix.
    Lenient,
}

/// Encoder and decoder for dynamic transform flags.
#[derive(Clone, Debug, Default)]
pub struct DynamicFlagCodec<T: WalkTracer = NoopTracer> {
    walker: TypeShapeWalker,
    policy: DecodePolicy,
    tracer: T,
}

impl DynamicFlagCodec<NoopTracer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: WalkTracer> DynamicFlagCodec<T> {
    pub fn limits(mut self, limits: WalkLimits) -> Self {
        self.walker = self.walker.limits(limits);
        self
    }

    pub fn policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the tracer, keeping limits and policy.
    pub fn tracer<U: WalkTracer>(self, tracer: U) -> DynamicFlagCodec<U> {
        DynamicFlagCodec {
            walker: self.walker,
            policy: self.policy,
            tracer,
        }
    }

    pub fn get_limits(&self) -> WalkLimits {
        self.walker.get_limits()
    }

    pub fn get_policy(&self) -> DecodePolicy {
        self.policy
    }

    pub fn walker(&self) -> &TypeShapeWalker {
        &self.walker
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// One flag per slot of `ty`, `true` exactly at `dynamic` leaves.
    ///
    /// Always returns the full array, even when every flag is `false`.
    pub fn encode(&mut self, ty: &TypeExpr) -> Result<Vec<bool>, CodecError> {
        let mut flags = Vec::new();
        self.encode_into(ty, 0, &mut flags)?;
        Ok(flags)
    }

    /// Flags of a signature site: one `false` per prefix slot, then the
    /// type's own flags.
    pub fn encode_site(&mut self, site: &SignatureSite) -> Result<Vec<bool>, CodecError> {
        let mut flags = Vec::new();
        for (index, label) in site.prefix_labels().enumerate() {
            self.tracer.trace_prefix(index, label, false);
            flags.push(false);
        }
        self.encode_into(&site.ty, flags.len(), &mut flags)?;
        Ok(flags)
    }

    /// Marker form a metadata writer would emit for `ty`.
    pub fn marker_for(&mut self, ty: &TypeExpr) -> Result<Marker, CodecError> {
        self.encode(ty).map(Marker::from_flags)
    }

    /// Marker form a metadata writer would emit for a signature site.
    pub fn marker_for_site(&mut self, site: &SignatureSite) -> Result<Marker, CodecError> {
        self.encode_site(site).map(Marker::from_flags)
    }

    fn encode_into(
        &mut self,
        ty: &TypeExpr,
        offset: usize,
        flags: &mut Vec<bool>,
    ) -> Result<(), CodecError> {
        let walker = self.walker;
        let tracer = &mut self.tracer;
        walker.walk(ty, |slot| {
            let flag = matches!(slot.node, TypeExpr::DynamicPlaceholder);
            tracer.trace_slot(&shifted(slot, offset), flag);
            flags.push(flag);
            Ok(())
        })?;
        Ok(())
    }

    /// Rebuild the type `flags` were encoded from, given its erased skeleton.
    pub fn decode(
        &mut self,
        skeleton: &ErasedType,
        flags: &[bool],
    ) -> Result<TypeExpr, CodecError> {
        let result = self.decode_type(skeleton.as_type(), flags, 0);
        self.settle(result, skeleton.as_type())
    }

    /// Rebuild a signature site. Prefix flags must all be `false`.
    pub fn decode_site(
        &mut self,
        site: &SignatureSite<ErasedType>,
        flags: &[bool],
    ) -> Result<SignatureSite, CodecError> {
        let result = self.decode_site_flags(site, flags);
        let skeleton = site.ty.as_type();
        self.settle(result, skeleton)
            .map(|decoded| decoded.unwrap_or_else(|| site.with_ty(skeleton.clone())))
    }

    /// Apply a stored marker to an erased skeleton.
    ///
    /// `Absent` leaves the skeleton as is. `Bare` turns an `object` skeleton
    /// into `dynamic` and is a shape mismatch on anything else.
    pub fn decode_marker(
        &mut self,
        skeleton: &ErasedType,
        marker: &Marker,
    ) -> Result<TypeExpr, CodecError> {
        match marker {
            Marker::Absent => Ok(skeleton.as_type().clone()),
            Marker::Bare => {
                let result = bare_marker(skeleton.as_type());
                self.settle(result, skeleton.as_type())
            }
            Marker::Flags(flags) => self.decode(skeleton, flags),
        }
    }

    /// Apply a stored marker to a signature site.
    ///
    /// A bare marker applies to the type itself; prefix slots are not
    /// consulted.
    pub fn decode_site_marker(
        &mut self,
        site: &SignatureSite<ErasedType>,
        marker: &Marker,
    ) -> Result<SignatureSite, CodecError> {
        let skeleton = site.ty.as_type();
        match marker {
            Marker::Absent => Ok(site.with_ty(skeleton.clone())),
            Marker::Bare => {
                let result = bare_marker(skeleton)
                    .map(|ty| site.with_ty(ty))
                    .map_err(|e| e.offset_by(site.prefix_len()));
                let kept = site.with_ty(skeleton.clone());
                self.settle(result.map(Some), skeleton)
                    .map(|decoded| decoded.unwrap_or(kept))
            }
            Marker::Flags(flags) => self.decode_site(site, flags),
        }
    }

    fn decode_type(
        &mut self,
        skeleton: &TypeExpr,
        flags: &[bool],
        offset: usize,
    ) -> Result<TypeExpr, CodecError> {
        let expected = self.walker.slot_count(skeleton)?;
        if expected != flags.len() {
            return Err(CodecError::FlagCountMismatch {
                expected,
                actual: flags.len(),
            });
        }

        let walker = self.walker;
        let mut fold = DecodeFold {
            flags,
            offset,
            tracer: &mut self.tracer,
        };
        walker.fold(skeleton, &mut fold)
    }

    /// Always `Some` on success; `None` is the lenient "unchanged" value.
    fn decode_site_flags(
        &mut self,
        site: &SignatureSite<ErasedType>,
        flags: &[bool],
    ) -> Result<Option<SignatureSite>, CodecError> {
        let prefix = site.prefix_len();
        let expected = prefix + self.walker.slot_count(site.ty.as_type())?;
        if expected != flags.len() {
            return Err(CodecError::FlagCountMismatch {
                expected,
                actual: flags.len(),
            });
        }

        let (head, tail) = flags.split_at(prefix);
        for (index, (label, &flag)) in site.prefix_labels().zip(head).enumerate() {
            self.tracer.trace_prefix(index, label, flag);
            if flag {
                return Err(CodecError::ShapeMismatch {
                    slot: index,
                    found: label.to_string(),
                });
            }
        }

        let ty = self
            .decode_type(site.ty.as_type(), tail, prefix)
            .map_err(|e| e.offset_by(prefix))?;
        Ok(Some(site.with_ty(ty)))
    }

    /// Apply the decode policy to a finished decode.
    fn settle<O: Recoverable>(
        &mut self,
        result: Result<O, CodecError>,
        skeleton: &TypeExpr,
    ) -> Result<O, CodecError> {
        let error = match result {
            Ok(value) => return Ok(value),
            Err(error) if error.is_malformed_flags() => error,
            Err(error) => return Err(error),
        };

        match self.policy {
            DecodePolicy::Strict => {
                self.tracer.trace_mismatch(&error);
                Err(error)
            }
            DecodePolicy::Lenient => {
                self.tracer.trace_ignored(&error, skeleton);
                Ok(O::unchanged(skeleton))
            }
        }
    }
}

/// Decode results that have an "ignore the marker" value.
trait Recoverable {
    fn unchanged(skeleton: &TypeExpr) -> Self;
}

impl Recoverable for TypeExpr {
    fn unchanged(skeleton: &TypeExpr) -> Self {
        skeleton.clone()
    }
}

impl<S> Recoverable for Option<S> {
    fn unchanged(_skeleton: &TypeExpr) -> Self {
        None
    }
}

fn bare_marker(skeleton: &TypeExpr) -> Result<TypeExpr, CodecError> {
    match skeleton {
        TypeExpr::ExplicitObject => Ok(TypeExpr::DynamicPlaceholder),
        other => Err(CodecError::ShapeMismatch {
            slot: 0,
            found: other.to_string(),
        }),
    }
}

fn shifted(slot: Slot<'_>, offset: usize) -> Slot<'_> {
    Slot {
        index: slot.index + offset,
        ..slot
    }
}

/// Rebuilds a type from an erased skeleton and its flags.
///
/// The flag count has already been checked against the skeleton.
struct DecodeFold<'f, 't, T> {
    flags: &'f [bool],
    offset: usize,
    tracer: &'t mut T,
}

impl<T: WalkTracer> DecodeFold<'_, '_, T> {
    fn read(&mut self, slot: Slot<'_>) -> Result<bool, CodecError> {
        let flag = self
            .flags
            .get(slot.index)
            .copied()
            .ok_or(CodecError::FlagCountMismatch {
                expected: slot.index + 1,
                actual: self.flags.len(),
            })?;
        self.tracer.trace_slot(&shifted(slot, self.offset), flag);
        Ok(flag)
    }
}

impl<T: WalkTracer> ShapeFold for DecodeFold<'_, '_, T> {
    type Output = TypeExpr;

    fn leaf(&mut self, slot: Slot<'_>) -> Result<TypeExpr, CodecError> {
        let flag = self.read(slot)?;
        match slot.node {
            _ if !flag => Ok(slot.node.clone()),
            TypeExpr::ExplicitObject | TypeExpr::DynamicPlaceholder => {
                Ok(TypeExpr::DynamicPlaceholder)
            }
            other => Err(CodecError::ShapeMismatch {
                slot: slot.index,
                found: other.to_string(),
            }),
        }
    }

    fn container(&mut self, slot: Slot<'_>) -> Result<(), CodecError> {
        // Consumed and otherwise ignored.
        self.read(slot).map(|_| ())
    }

    fn array(&mut self, element: TypeExpr, rank: u32) -> TypeExpr {
        TypeExpr::Array(Box::new(element), rank)
    }

    fn pointer(&mut self, pointee: TypeExpr) -> TypeExpr {
        TypeExpr::Pointer(Box::new(pointee))
    }

    fn generic(&mut self, template: &GenericType, args: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr::Generic(template.regroup(args))
    }

    fn tuple(&mut self, carrier: TypeExpr) -> TypeExpr {
        TypeExpr::Tuple(tuple::resugar(carrier))
    }
}

/// Encode with a default codec.
pub fn encode(ty: &TypeExpr) -> Result<Vec<bool>, CodecError> {
    DynamicFlagCodec::new().encode(ty)
}

/// Decode with a default (strict) codec.
pub fn decode(skeleton: &ErasedType, flags: &[bool]) -> Result<TypeExpr, CodecError> {
    DynamicFlagCodec::new().decode(skeleton, flags)
}
