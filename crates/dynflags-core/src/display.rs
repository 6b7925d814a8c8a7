//! C#-like rendering of type expressions.
//!
//! Types built by the notation parser or the checked constructors render as
//! valid notation that parses back to the same tree. The unchecked
//! constructors can build shapes the notation cannot spell (a generic level
//! list with no arguments at all, a one-element tuple); those still render,
//! but not necessarily as something that parses back.

use std::fmt;

use crate::types::{DYNAMIC_NAME, ErasedType, GenericType, TypeExpr};

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::DynamicPlaceholder => f.write_str(DYNAMIC_NAME),
            TypeExpr::ExplicitObject => f.write_str("object"),
            TypeExpr::Leaf(name) => f.write_str(name),
            TypeExpr::Array(element, rank) => {
                write!(f, "{element}[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            TypeExpr::Pointer(pointee) => write!(f, "{pointee}*"),
            TypeExpr::Generic(generic) => write!(f, "{generic}"),
            TypeExpr::Tuple(elements) => {
                f.write_str("(")?;
                write_list(f, elements)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nullable() {
            return write!(f, "{}?", self.own_args()[0]);
        }
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
            if !segment.args.is_empty() {
                f.write_str("<")?;
                write_list(f, &segment.args)?;
                f.write_str(">")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ErasedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_type())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeExpr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
