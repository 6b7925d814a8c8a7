//! Tuple desugaring.
//!
//! A tuple `(T1, ..., Tn)` is stored as `System.ValueTuple<T1, ..., Tn>` when
//! `n <= 7`. Longer tuples use the 8-argument carrier whose last argument is
//! a continuation tuple of the remaining elements:
//! `System.ValueTuple<T1, ..., T7, System.ValueTuple<T8, ...>>`.

use crate::types::TypeExpr;

/// Generic carrier type for tuples.
pub const TUPLE_CARRIER: &str = "System.ValueTuple";

/// Elements stored directly on one carrier level.
pub const TUPLE_LEVEL_ARITY: usize = 7;

/// Carrier arity of a level that holds a continuation.
pub const TUPLE_REST_ARITY: usize = TUPLE_LEVEL_ARITY + 1;

/// Desugar tuple elements into the `System.ValueTuple` chain.
///
/// An empty element list maps to the non-generic `System.ValueTuple`.
pub fn desugar(elements: &[TypeExpr]) -> TypeExpr {
    if elements.is_empty() {
        return TypeExpr::Leaf(TUPLE_CARRIER.to_string());
    }
    if elements.len() <= TUPLE_LEVEL_ARITY {
        return TypeExpr::generic(TUPLE_CARRIER, elements.to_vec());
    }
    let (head, rest) = elements.split_at(TUPLE_LEVEL_ARITY);
    let mut args = head.to_vec();
    args.push(desugar(rest));
    TypeExpr::generic(TUPLE_CARRIER, args)
}

/// Recover tuple elements from a carrier chain produced by [`desugar`].
///
/// A carrier with the rest arity is always followed by a continuation, so
/// its last argument is flattened into the result.
pub fn resugar(carrier: TypeExpr) -> Vec<TypeExpr> {
    let mut elements = Vec::new();
    let mut level = carrier;
    loop {
        let TypeExpr::Generic(generic) = level else {
            // Non-generic carrier: the empty tuple.
            return elements;
        };
        let mut args = generic.into_flattened_args();
        if args.len() != TUPLE_REST_ARITY {
            elements.extend(args);
            return elements;
        }
        match args.pop() {
            Some(rest @ TypeExpr::Generic(_)) => {
                elements.extend(args);
                level = rest;
            }
            Some(last) => {
                elements.extend(args);
                elements.push(last);
                return elements;
            }
            None => return elements,
        }
    }
}

/// Number of carrier levels a tuple of `len` elements desugars into.
pub fn carrier_levels(len: usize) -> usize {
    if len <= TUPLE_LEVEL_ARITY {
        1
    } else {
        1 + carrier_levels(len - TUPLE_LEVEL_ARITY)
    }
}
