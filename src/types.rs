/// Value type used for shapes the schema leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Unknown,
    Any,
}

impl ValueKind {
    pub fn from_any_flag(use_any: bool) -> Self {
        if use_any {
            ValueKind::Any
        } else {
            ValueKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Unknown => "unknown",
            ValueKind::Any => "any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Number,
    String,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Number => "number",
            Primitive::String => "string",
        }
    }
}

/// Managed object type names a relationship may point at. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTargets(Vec<String>);

impl ReferenceTargets {
    pub fn new(targets: Vec<String>) -> Option<Self> {
        if targets.is_empty() {
            None
        } else {
            Some(Self(targets))
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(Primitive),
    Array(Box<TypeExpr>),
    OpenMap(ValueKind),
    OpenArray(ValueKind),
    Reference(ReferenceTargets),
    SubType(String),
}

impl TypeExpr {
    pub fn array_of(self) -> Self {
        TypeExpr::Array(Box::new(self))
    }
}

/// Result of inferring the type of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    nullable: bool,
    types: Vec<TypeExpr>,
}

impl TypeDescriptor {
    pub fn single(ty: TypeExpr) -> Self {
        Self {
            nullable: false,
            types: vec![ty],
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Wraps every type expression into an array. Item nullability does not carry over, the
    /// array's own nullability is set by the caller.
    pub fn array_of(self) -> Self {
        Self {
            nullable: false,
            types: self.types.into_iter().map(TypeExpr::array_of).collect(),
        }
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn types(&self) -> &[TypeExpr] {
        &self.types
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceProperty {
    pub name: String,
    pub type_: TypeDescriptor,
    pub required: bool,
    pub title: String,
    pub description: String,
    /// Only set for managed objects.
    pub return_by_default: Option<bool>,
}

/// A type generated for an inline object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTypeDeclaration {
    pub declared_name: String,
    pub type_name: String,
    pub parent_type_name: String,
    pub properties: Vec<ResourceProperty>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_targets_are_never_empty() {
        assert!(ReferenceTargets::new(vec![]).is_none());
        let targets = ReferenceTargets::new(vec!["ManagedUser".into()]).unwrap();
        assert_eq!(targets.names(), ["ManagedUser"]);
    }

    #[test]
    fn array_drops_item_nullability() {
        let ty = TypeDescriptor::single(TypeExpr::Primitive(Primitive::String)).array_of();
        assert!(!ty.nullable());
        assert_eq!(
            ty.types(),
            [TypeExpr::Primitive(Primitive::String).array_of()]
        );

        let ty = TypeDescriptor::single(TypeExpr::OpenMap(ValueKind::Any))
            .with_nullable(true)
            .array_of();
        assert!(!ty.nullable());
        assert!(ty.with_nullable(true).nullable());
    }
}
