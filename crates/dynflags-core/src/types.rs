//! Resolved type expressions.
//!
//! # Overview
//!
//! A `TypeExpr` is an owned, immutable tree describing one resolved type at
//! one use site (field, parameter, return value, base type, ...). It still
//! distinguishes `dynamic` from `object`; the binary format does not, so
//! `erase` collapses the two and yields an `ErasedType`.
//!
//! # Design Decisions
//!
//! ## Nested generics
//!
//! `Outer<T>.Inner<U, V>` is a single constructed-type reference whose
//! argument list is the concatenation of every level's arguments. It is
//! modelled as one `GenericType` holding an ordered list of segments, one per
//! nesting level, each with the arguments written at that level. Enclosing
//! levels that are not generic simply carry no arguments.
//!
//! ## Tuples
//!
//! `Tuple` is sugar. It exists so that callers can write `(A, B)` and get it
//! back after decoding, but every traversal sees the desugared
//! `System.ValueTuple` chain (see [`crate::tuple`]).

use serde::{Deserialize, Serialize};

use crate::tuple;

/// Name of the generic carrier for nullable value types (`T?`).
pub const NULLABLE_CARRIER: &str = "System.Nullable";

/// Spellings that resolve to the explicit object type.
pub const OBJECT_NAMES: &[&str] = &["object", "Object", "System.Object"];

/// Spelling of the dynamic type.
pub const DYNAMIC_NAME: &str = "dynamic";

/// Errors from the checked constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("array rank must be at least 1")]
    ZeroRankArray,

    #[error("generic type has no name segments")]
    EmptyGenericPath,

    #[error("`{definition}` has no type arguments at any nesting level")]
    NoTypeArguments { definition: String },

    #[error("tuple needs at least 2 elements, got {len}")]
    TupleTooShort { len: usize },

    #[error("type nested deeper than {limit} levels")]
    TooDeep { limit: u32 },
}

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    /// The `dynamic` type. Erases to `object`.
    DynamicPlaceholder,
    /// The literal `object` type. Never dynamic.
    ExplicitObject,
    /// Any other non-generic, non-array, non-pointer type, including unbound
    /// type parameters.
    Leaf(String),
    /// Array with the given rank (1 for `T[]`, 2 for `T[,]`, ...).
    Array(Box<TypeExpr>, u32),
    /// Unmanaged pointer.
    Pointer(Box<TypeExpr>),
    /// Constructed generic type, possibly nested in other generic types.
    Generic(GenericType),
    /// Tuple sugar over `System.ValueTuple`.
    Tuple(Vec<TypeExpr>),
}

/// One nesting level of a constructed generic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericSegment {
    pub name: String,
    pub args: Vec<TypeExpr>,
}

impl GenericSegment {
    pub fn new(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Constructed generic type.
///
/// Segments run from the outermost enclosing type to the innermost. The last
/// segment's arguments are the type's own arguments; every earlier segment
/// contributes one level of enclosing arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericType {
    segments: Vec<GenericSegment>,
}

impl GenericType {
    /// Create a nested generic type, rejecting degenerate shapes.
    pub fn new(segments: Vec<GenericSegment>) -> Result<Self, ModelError> {
        if segments.is_empty() {
            return Err(ModelError::EmptyGenericPath);
        }
        let generic = Self { segments };
        if generic.arity() == 0 {
            return Err(ModelError::NoTypeArguments {
                definition: generic.definition(),
            });
        }
        Ok(generic)
    }

    /// Create a one-level generic type (`Name<args>`).
    ///
    /// Unchecked: `args` should not be empty. See `new` for the checked form.
    pub fn single(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self {
            segments: vec![GenericSegment::new(name, args)],
        }
    }

    /// Dotted definition name without arguments, e.g. `Outer.Inner`.
    pub fn definition(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn segments(&self) -> &[GenericSegment] {
        &self.segments
    }

    /// Argument lists of the enclosing levels, outermost first.
    pub fn enclosing_args(&self) -> impl Iterator<Item = &[TypeExpr]> {
        let enclosing = self.segments.len().saturating_sub(1);
        self.segments[..enclosing].iter().map(|s| s.args.as_slice())
    }

    /// Arguments written on the innermost level.
    pub fn own_args(&self) -> &[TypeExpr] {
        self.segments
            .last()
            .map(|s| s.args.as_slice())
            .unwrap_or_default()
    }

    /// All arguments in traversal order: outer-to-inner, left-to-right.
    pub fn flattened_args(&self) -> impl Iterator<Item = &TypeExpr> {
        self.segments.iter().flat_map(|s| s.args.iter())
    }

    /// Consume the type, yielding its flattened arguments.
    pub fn into_flattened_args(self) -> Vec<TypeExpr> {
        self.segments.into_iter().flat_map(|s| s.args).collect()
    }

    /// Flattened arity (total argument count across all levels).
    pub fn arity(&self) -> usize {
        self.segments.iter().map(|s| s.args.len()).sum()
    }

    /// Rebuild with the same per-level grouping but new flattened arguments.
    ///
    /// Returns `None` if `args` does not have exactly `arity()` elements.
    pub fn with_flattened_args(&self, args: Vec<TypeExpr>) -> Option<Self> {
        if args.len() != self.arity() {
            return None;
        }
        Some(self.regroup(args))
    }

    /// Distribute `args` over this type's levels, level by level.
    ///
    /// Each level takes as many arguments as it has now; a short iterator
    /// leaves the trailing levels short.
    pub fn regroup(&self, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        let mut args = args.into_iter();
        let segments = self
            .segments
            .iter()
            .map(|s| {
                GenericSegment::new(s.name.clone(), args.by_ref().take(s.args.len()).collect())
            })
            .collect();
        Self { segments }
    }

    /// Whether this is `System.Nullable<T>`.
    pub fn is_nullable(&self) -> bool {
        self.segments.len() == 1
            && self.segments[0].name == NULLABLE_CARRIER
            && self.segments[0].args.len() == 1
    }
}

impl TypeExpr {
    /// Named leaf type. `dynamic` and the object spellings are recognized.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == DYNAMIC_NAME {
            Self::DynamicPlaceholder
        } else if OBJECT_NAMES.contains(&name.as_str()) {
            Self::ExplicitObject
        } else {
            Self::Leaf(name)
        }
    }

    /// Single-dimensional array `T[]`.
    pub fn array(element: TypeExpr) -> Self {
        Self::Array(Box::new(element), 1)
    }

    /// Multi-dimensional array of the given rank.
    pub fn array_of_rank(element: TypeExpr, rank: u32) -> Result<Self, ModelError> {
        if rank == 0 {
            return Err(ModelError::ZeroRankArray);
        }
        Ok(Self::Array(Box::new(element), rank))
    }

    pub fn pointer(pointee: TypeExpr) -> Self {
        Self::Pointer(Box::new(pointee))
    }

    /// One-level generic type `Name<args>`. Unchecked, like
    /// `GenericType::single`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self::Generic(GenericType::single(name, args))
    }

    /// Nested generic type from `(name, args)` pairs, outermost first.
    pub fn nested<N: Into<String>>(
        levels: impl IntoIterator<Item = (N, Vec<TypeExpr>)>,
    ) -> Result<Self, ModelError> {
        let segments = levels
            .into_iter()
            .map(|(name, args)| GenericSegment::new(name, args))
            .collect();
        GenericType::new(segments).map(Self::Generic)
    }

    /// Nullable value type `T?`, i.e. `System.Nullable<T>`.
    pub fn nullable(inner: TypeExpr) -> Self {
        Self::generic(NULLABLE_CARRIER, vec![inner])
    }

    /// Tuple `(a, b, ...)`.
    pub fn tuple(elements: Vec<TypeExpr>) -> Result<Self, ModelError> {
        if elements.len() < 2 {
            return Err(ModelError::TupleTooShort {
                len: elements.len(),
            });
        }
        Ok(Self::Tuple(elements))
    }

    /// Whether `dynamic` occurs anywhere in this type.
    pub fn contains_dynamic(&self) -> bool {
        match self {
            Self::DynamicPlaceholder => true,
            Self::ExplicitObject | Self::Leaf(_) => false,
            Self::Array(element, _) | Self::Pointer(element) => element.contains_dynamic(),
            Self::Generic(generic) => generic.flattened_args().any(Self::contains_dynamic),
            Self::Tuple(elements) => elements.iter().any(Self::contains_dynamic),
        }
    }

    /// Whether this node occupies a terminal slot.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DynamicPlaceholder | Self::ExplicitObject | Self::Leaf(_)
        )
    }

    /// Whether this node erases to `object`.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Self::DynamicPlaceholder | Self::ExplicitObject)
    }

    /// Replace every `dynamic` with `object`.
    ///
    /// Recurses once per nesting level; use `try_erase` on trees of
    /// unknown depth.
    pub fn erase(&self) -> ErasedType {
        ErasedType(erase_node(self))
    }

    /// `erase`, refusing trees nested deeper than `limit` levels.
    pub fn try_erase(&self, limit: u32) -> Result<ErasedType, ModelError> {
        if exceeds_depth(self, 0, limit) {
            return Err(ModelError::TooDeep { limit });
        }
        Ok(self.erase())
    }

    /// The `System.ValueTuple` chain a tuple stands for; other nodes are
    /// returned unchanged.
    pub fn desugared(&self) -> TypeExpr {
        match self {
            Self::Tuple(elements) => tuple::desugar(elements),
            other => other.clone(),
        }
    }
}

/// Stops descending as soon as `limit` is passed.
fn exceeds_depth(node: &TypeExpr, depth: u32, limit: u32) -> bool {
    if depth > limit {
        return true;
    }
    match node {
        TypeExpr::DynamicPlaceholder | TypeExpr::ExplicitObject | TypeExpr::Leaf(_) => false,
        TypeExpr::Array(element, _) | TypeExpr::Pointer(element) => {
            exceeds_depth(element, depth + 1, limit)
        }
        TypeExpr::Generic(generic) => generic
            .flattened_args()
            .any(|arg| exceeds_depth(arg, depth + 1, limit)),
        TypeExpr::Tuple(elements) => elements
            .iter()
            .any(|element| exceeds_depth(element, depth + 1, limit)),
    }
}

fn erase_node(node: &TypeExpr) -> TypeExpr {
    match node {
        TypeExpr::DynamicPlaceholder | TypeExpr::ExplicitObject => TypeExpr::ExplicitObject,
        TypeExpr::Leaf(name) => TypeExpr::Leaf(name.clone()),
        TypeExpr::Array(element, rank) => TypeExpr::Array(Box::new(erase_node(element)), *rank),
        TypeExpr::Pointer(pointee) => TypeExpr::Pointer(Box::new(erase_node(pointee))),
        TypeExpr::Generic(generic) => {
            let segments = generic
                .segments
                .iter()
                .map(|s| {
                    GenericSegment::new(s.name.clone(), s.args.iter().map(erase_node).collect())
                })
                .collect();
            TypeExpr::Generic(GenericType { segments })
        }
        TypeExpr::Tuple(elements) => TypeExpr::Tuple(elements.iter().map(erase_node).collect()),
    }
}

/// A type as it appears in metadata: `dynamic` is indistinguishable from
/// `object`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErasedType(TypeExpr);

impl ErasedType {
    /// Erase `ty`. Equivalent to `ty.erase()`.
    pub fn new(ty: &TypeExpr) -> Self {
        ty.erase()
    }

    pub fn as_type(&self) -> &TypeExpr {
        &self.0
    }

    pub fn into_inner(self) -> TypeExpr {
        self.0
    }
}

impl From<TypeExpr> for ErasedType {
    fn from(ty: TypeExpr) -> Self {
        ty.erase()
    }
}
