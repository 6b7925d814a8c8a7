//! Signature sites: a type plus the leading slots its declaration adds.
//!
//! A parameter or return value may be preceded by custom modifiers and a
//! by-reference kind. Each of those takes one `false` slot ahead of the
//! type's own slots, modifiers first:
//!
//! ```text
//! ref dynamic            -> [false, true]
//! [mod] ref dynamic[]    -> [false, false, false, true]
//! ```

use dynflags_core::{ErasedType, ModelError, TypeExpr};
use serde::Serialize;

/// By-reference passing mode of a signature site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    /// `in` parameters and `ref readonly` returns.
    In,
}

impl RefKind {
    pub const NAMES: [&'static str; 4] = ["none", "ref", "out", "in"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "ref" => Some(Self::Ref),
            "out" => Some(Self::Out),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ref => "ref",
            Self::Out => "out",
            Self::In => "in",
        }
    }

    pub fn is_by_ref(self) -> bool {
        self != Self::None
    }
}

/// A type at a declaration site, with the site's prefix slots.
///
/// `T` is `TypeExpr` when encoding and `ErasedType` when decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureSite<T = TypeExpr> {
    pub ty: T,
    pub ref_kind: RefKind,
    pub custom_modifiers: usize,
}

impl<T> SignatureSite<T> {
    /// Site with no modifiers, passed by value.
    pub fn new(ty: T) -> Self {
        Self {
            ty,
            ref_kind: RefKind::None,
            custom_modifiers: 0,
        }
    }

    pub fn by_ref(mut self, kind: RefKind) -> Self {
        self.ref_kind = kind;
        self
    }

    pub fn custom_modifiers(mut self, count: usize) -> Self {
        self.custom_modifiers = count;
        self
    }

    /// The same prefix around a different type.
    pub fn with_ty<U>(&self, ty: U) -> SignatureSite<U> {
        SignatureSite {
            ty,
            ref_kind: self.ref_kind,
            custom_modifiers: self.custom_modifiers,
        }
    }

    /// Number of slots preceding the type's own slots.
    pub fn prefix_len(&self) -> usize {
        self.custom_modifiers + usize::from(self.ref_kind.is_by_ref())
    }

    /// Labels of the prefix slots, in slot order.
    pub fn prefix_labels(&self) -> impl Iterator<Item = &'static str> {
        let by_ref = self.ref_kind.is_by_ref().then_some(self.ref_kind.name());
        std::iter::repeat_n("modifier", self.custom_modifiers).chain(by_ref)
    }
}

impl SignatureSite<TypeExpr> {
    /// The same site as it appears in metadata.
    pub fn erase(&self) -> SignatureSite<ErasedType> {
        self.with_ty(self.ty.erase())
    }

    /// `erase`, refusing types nested deeper than `limit` levels.
    pub fn try_erase(&self, limit: u32) -> Result<SignatureSite<ErasedType>, ModelError> {
        self.ty.try_erase(limit).map(|ty| self.with_ty(ty))
    }
}
