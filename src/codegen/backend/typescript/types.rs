use crate::types::{TypeDescriptor, TypeExpr};

use std::fmt;

pub const REFERENCE_TYPE: &str = "ReferenceType";

/// Flattens a descriptor into a TypeScript type expression.
pub struct TsType<'a>(pub &'a TypeDescriptor);

/// A single type expression of a descriptor.
pub struct TsExpr<'a>(pub &'a TypeExpr);

impl fmt::Display for TsExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TypeExpr::Primitive(primitive) => write!(f, "{}", primitive.as_str()),
            TypeExpr::Array(ty) => write!(f, "{}[]", TsExpr(ty)),
            TypeExpr::OpenMap(kind) => write!(f, "Record<string, {}>", kind.as_str()),
            TypeExpr::OpenArray(kind) => write!(f, "{}[]", kind.as_str()),
            TypeExpr::Reference(targets) => {
                write!(f, "{REFERENCE_TYPE}<{}>", targets.names().join(" | "))
            }
            TypeExpr::SubType(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for TsType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.0.types().iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", TsExpr(ty))?;
        }
        if self.0.nullable() {
            write!(f, " | null")?;
        }
        Ok(())
    }
}

/// Whether the expression needs the runtime's reference type.
pub fn uses_reference(ty: &TypeExpr) -> bool {
    match ty {
        TypeExpr::Reference(_) => true,
        TypeExpr::Array(ty) => uses_reference(ty),
        _ => false,
    }
}
