//! Canonical slot traversal of type expressions.
//!
//! Every flag in a marker corresponds to exactly one slot. Slots are visited
//! in prefix order, node before children:
//!
//! - `dynamic`, `object` and named leaves: one `Leaf` slot
//! - arrays and pointers: one `Container` slot, then the element
//! - generic types: one `Container` slot for the whole (possibly nested)
//!   reference, then every argument of the flattened list, outer level
//!   first, left to right
//! - tuples: desugared to their `System.ValueTuple` chain first
//!
//! Encoding and decoding both go through [`TypeShapeWalker::fold`], so the
//! two directions cannot disagree on slot order.

use dynflags_core::{GenericType, TypeExpr, tuple};

use crate::error::CodecError;
use crate::limits::WalkLimits;

/// Whether a slot is terminal or has children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// `dynamic`, `object` or a named type. The only slots that can carry
    /// a `true` flag.
    Leaf,
    /// Array, pointer or constructed generic type.
    Container,
}

impl SlotKind {
    pub fn of(node: &TypeExpr) -> Self {
        if node.is_terminal() {
            Self::Leaf
        } else {
            Self::Container
        }
    }

    pub fn is_leaf(self) -> bool {
        self == Self::Leaf
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Container => "container",
        }
    }
}

/// One visited slot.
#[derive(Clone, Copy, Debug)]
pub struct Slot<'a> {
    /// Position in the flag array.
    pub index: usize,
    /// Nesting depth; the root is 0.
    pub depth: u32,
    pub kind: SlotKind,
    /// The node occupying the slot. For tuples this is the desugared carrier.
    pub node: &'a TypeExpr,
}

/// Bottom-up fold over the canonical slot order.
///
/// `leaf` and `container` are called in slot order; the combinators are
/// called once a node's children have been folded.
pub trait ShapeFold {
    type Output;

    fn leaf(&mut self, slot: Slot<'_>) -> Result<Self::Output, CodecError>;

    fn container(&mut self, slot: Slot<'_>) -> Result<(), CodecError>;

    fn array(&mut self, element: Self::Output, rank: u32) -> Self::Output;

    fn pointer(&mut self, pointee: Self::Output) -> Self::Output;

    /// `args` are in flattened order; `template` gives the per-level grouping.
    fn generic(&mut self, template: &GenericType, args: Vec<Self::Output>) -> Self::Output;

    /// Called with the folded carrier chain of a tuple.
    fn tuple(&mut self, carrier: Self::Output) -> Self::Output;
}

/// Adapts a slot callback into a fold with no output.
struct VisitFold<F>(F);

impl<F> ShapeFold for VisitFold<F>
where
    F: FnMut(Slot<'_>) -> Result<(), CodecError>,
{
    type Output = ();

    fn leaf(&mut self, slot: Slot<'_>) -> Result<(), CodecError> {
        (self.0)(slot)
    }

    fn container(&mut self, slot: Slot<'_>) -> Result<(), CodecError> {
        (self.0)(slot)
    }

    fn array(&mut self, _element: (), _rank: u32) {}

    fn pointer(&mut self, _pointee: ()) {}

    fn generic(&mut self, _template: &GenericType, _args: Vec<()>) {}

    fn tuple(&mut self, _carrier: ()) {}
}

/// Walks type expressions in canonical slot order.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeShapeWalker {
    limits: WalkLimits,
}

impl TypeShapeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: WalkLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn get_limits(&self) -> WalkLimits {
        self.limits
    }

    /// Visit every slot of `ty`. Returns the number of slots visited.
    pub fn walk<F>(&self, ty: &TypeExpr, visit: F) -> Result<usize, CodecError>
    where
        F: FnMut(Slot<'_>) -> Result<(), CodecError>,
    {
        let mut next = 0;
        self.fold_node(ty, 0, &mut next, &mut VisitFold(visit))?;
        Ok(next)
    }

    /// Fold `ty` bottom-up in canonical slot order.
    pub fn fold<F: ShapeFold>(
        &self,
        ty: &TypeExpr,
        folder: &mut F,
    ) -> Result<F::Output, CodecError> {
        let mut next = 0;
        self.fold_node(ty, 0, &mut next, folder)
    }

    /// Number of slots (and therefore flags) of `ty`.
    pub fn slot_count(&self, ty: &TypeExpr) -> Result<usize, CodecError> {
        self.walk(ty, |_| Ok(()))
    }

    /// Owned description of every slot, for inspection and tests.
    pub fn slots(&self, ty: &TypeExpr) -> Result<Vec<SlotInfo>, CodecError> {
        let mut slots = Vec::new();
        self.walk(ty, |slot| {
            slots.push(SlotInfo::from(slot));
            Ok(())
        })?;
        Ok(slots)
    }

    fn fold_node<F: ShapeFold>(
        &self,
        node: &TypeExpr,
        depth: u32,
        next: &mut usize,
        folder: &mut F,
    ) -> Result<F::Output, CodecError> {
        if depth > self.limits.recursion_limit {
            return Err(CodecError::RecursionLimitExceeded {
                limit: self.limits.recursion_limit,
            });
        }

        match node {
            TypeExpr::DynamicPlaceholder | TypeExpr::ExplicitObject | TypeExpr::Leaf(_) => {
                folder.leaf(take_slot(node, depth, next))
            }
            TypeExpr::Array(element, rank) => {
                folder.container(take_slot(node, depth, next))?;
                let element = self.fold_node(element, depth + 1, next, folder)?;
                Ok(folder.array(element, *rank))
            }
            TypeExpr::Pointer(pointee) => {
                folder.container(take_slot(node, depth, next))?;
                let pointee = self.fold_node(pointee, depth + 1, next, folder)?;
                Ok(folder.pointer(pointee))
            }
            TypeExpr::Generic(generic) => {
                folder.container(take_slot(node, depth, next))?;
                let mut args = Vec::with_capacity(generic.arity());
                for arg in generic.flattened_args() {
                    args.push(self.fold_node(arg, depth + 1, next, folder)?);
                }
                Ok(folder.generic(generic, args))
            }
            TypeExpr::Tuple(elements) => {
                // The carrier takes the tuple's place; it owns no slot of its own.
                let carrier = tuple::desugar(elements);
                let carrier = self.fold_node(&carrier, depth, next, folder)?;
                Ok(folder.tuple(carrier))
            }
        }
    }
}

fn take_slot<'a>(node: &'a TypeExpr, depth: u32, next: &mut usize) -> Slot<'a> {
    let slot = Slot {
        index: *next,
        depth,
        kind: SlotKind::of(node),
        node,
    };
    *next += 1;
    slot
}

/// Owned copy of a slot's position and a rendering of its node.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SlotInfo {
    pub index: usize,
    pub depth: u32,
    pub kind: SlotKind,
    pub node: String,
}

impl From<Slot<'_>> for SlotInfo {
    fn from(slot: Slot<'_>) -> Self {
        Self {
            index: slot.index,
            depth: slot.depth,
            kind: slot.kind,
            node: slot_label(slot.node),
        }
    }
}

/// Short rendering of a slot's node: containers show only their head.
pub fn slot_label(node: &TypeExpr) -> String {
    match node {
        TypeExpr::Array(_, rank) => format!("[{}]", ",".repeat((*rank as usize).saturating_sub(1))),
        TypeExpr::Pointer(_) => "*".to_string(),
        TypeExpr::Generic(generic) => format!("{}<{}>", generic.definition(), generic.arity()),
        other => other.to_string(),
    }
}
