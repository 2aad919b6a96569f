use crate::error::{Error, Result};
use crate::name::{managed_type_name, sub_type_name};
use crate::schema::{PropertySchema, SchemaType};
use crate::types::{
    Primitive, ReferenceTargets, ResourceProperty, SubTypeDeclaration, TypeDescriptor, TypeExpr,
    ValueKind,
};

use log::{debug, trace, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    Managed,
    System,
}

/// The resource or sub-type whose properties are being walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub path: String,
    pub type_name: String,
}

impl Owner {
    pub fn new(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_name: type_name.into(),
        }
    }

    fn nested(&self, property: &str, type_name: String) -> Self {
        Self {
            path: format!("{}/{property}", self.path),
            type_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnresolvedRelationship {
        owner: String,
        property: String,
        candidates: Vec<String>,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnresolvedRelationship {
                owner,
                property,
                candidates,
            } => write!(
                f,
                "relationship [{property}] of [{owner}] has no managed object in its resource collection [{}], using an open map",
                candidates.join(", ")
            ),
        }
    }
}

/// A value produced by the walker together with everything generated on the way to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inferred<T> {
    pub value: T,
    pub sub_types: Vec<SubTypeDeclaration>,
    pub warnings: Vec<Warning>,
}

impl<T> Inferred<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            sub_types: vec![],
            warnings: vec![],
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Inferred<U> {
        Inferred {
            value: f(self.value),
            sub_types: self.sub_types,
            warnings: self.warnings,
        }
    }

    /// Appends the side collections of `other` after this one's and hands back its value.
    pub fn merge<U>(&mut self, other: Inferred<U>) -> U {
        self.sub_types.extend(other.sub_types);
        self.warnings.extend(other.warnings);
        other.value
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Walker {
    family: ResourceFamily,
    value_kind: ValueKind,
}

impl Walker {
    pub fn new(family: ResourceFamily, value_kind: ValueKind) -> Self {
        Self { family, value_kind }
    }

    /// Builds the properties of an object schema in declaration order.
    pub fn build_properties(
        &self,
        schema: &PropertySchema,
        owner: &Owner,
    ) -> Result<Inferred<Vec<ResourceProperty>>> {
        let mut inferred = Inferred::new(Vec::with_capacity(schema.properties.len()));
        for (name, prop_schema) in &schema.properties {
            let property =
                self.build_property(name, prop_schema, schema.is_required(name), owner)?;
            let property = inferred.merge(property);
            inferred.value.push(property);
        }
        Ok(inferred)
    }

    fn build_property(
        &self,
        name: &str,
        schema: &PropertySchema,
        required: bool,
        owner: &Owner,
    ) -> Result<Inferred<ResourceProperty>> {
        trace!("handling property `{name}` of `{}`, required: {required}", owner.path);
        let (title, description) = title_and_description(schema);
        let return_by_default = match self.family {
            ResourceFamily::Managed => Some(
                schema
                    .return_by_default
                    .unwrap_or(!(schema.is_relationship() || schema.is_relationship_array())),
            ),
            ResourceFamily::System => None,
        };

        Ok(self
            .infer_type(schema, name, owner)?
            .map(|type_| ResourceProperty {
                name: name.to_string(),
                type_,
                required,
                title,
                description,
                return_by_default,
            }))
    }

    pub fn infer_type(
        &self,
        schema: &PropertySchema,
        property: &str,
        owner: &Owner,
    ) -> Result<Inferred<TypeDescriptor>> {
        let (tag, nullable) = effective_type(schema, property)?;
        trace!("mapping `{property}` of `{}`, type: {tag}, nullable: {nullable}", owner.path);

        let inferred = match tag {
            "boolean" => primitive(Primitive::Boolean),
            "number" | "integer" => primitive(Primitive::Number),
            "string" => primitive(Primitive::String),
            "object" => self.infer_object(schema, property, owner)?,
            "array" => self.infer_array(schema, property, owner)?,
            "relationship" => self.infer_relationship(schema, property, owner)?,
            tag => {
                return Err(Error::UnsupportedType {
                    tag: tag.to_string(),
                    property: property.to_string(),
                })
            }
        };
        Ok(inferred.map(|ty| ty.with_nullable(nullable)))
    }

    fn infer_object(
        &self,
        schema: &PropertySchema,
        property: &str,
        owner: &Owner,
    ) -> Result<Inferred<TypeDescriptor>> {
        if schema.properties.is_empty() {
            return Ok(self.open_map());
        }

        let type_name = sub_type_name(&owner.type_name, property);
        let nested = owner.nested(property, type_name.clone());
        debug!("adding sub type `{type_name}` for `{}`", nested.path);

        let Inferred {
            value: properties,
            mut sub_types,
            warnings,
        } = self.build_properties(schema, &nested)?;
        sub_types.push(SubTypeDeclaration {
            declared_name: property.to_string(),
            type_name: type_name.clone(),
            parent_type_name: owner.type_name.clone(),
            properties,
        });

        Ok(Inferred {
            value: TypeDescriptor::single(TypeExpr::SubType(type_name)),
            sub_types,
            warnings,
        })
    }

    fn infer_array(
        &self,
        schema: &PropertySchema,
        property: &str,
        owner: &Owner,
    ) -> Result<Inferred<TypeDescriptor>> {
        match schema.items.as_deref() {
            Some(items) if items.type_.is_some() => Ok(self
                .infer_type(items, property, owner)?
                .map(TypeDescriptor::array_of)),
            _ => Ok(Inferred::new(TypeDescriptor::single(TypeExpr::OpenArray(
                self.value_kind,
            )))),
        }
    }

    fn infer_relationship(
        &self,
        schema: &PropertySchema,
        property: &str,
        owner: &Owner,
    ) -> Result<Inferred<TypeDescriptor>> {
        if self.family != ResourceFamily::Managed {
            return Err(Error::RelationshipNotAllowed {
                owner: owner.type_name.clone(),
                property: property.to_string(),
            });
        }

        let targets = schema
            .resource_collection
            .iter()
            .filter_map(|collection| collection.managed_name())
            .map(managed_type_name)
            .collect();

        match ReferenceTargets::new(targets) {
            Some(targets) => Ok(Inferred::new(TypeDescriptor::single(TypeExpr::Reference(
                targets,
            )))),
            None => {
                let warning = Warning::UnresolvedRelationship {
                    owner: owner.type_name.clone(),
                    property: property.to_string(),
                    candidates: schema
                        .resource_collection
                        .iter()
                        .map(|collection| collection.path.clone())
                        .collect(),
                };
                warn!("{warning}");
                let mut inferred = self.open_map();
                inferred.warnings.push(warning);
                Ok(inferred)
            }
        }
    }

    fn open_map(&self) -> Inferred<TypeDescriptor> {
        Inferred::new(TypeDescriptor::single(TypeExpr::OpenMap(self.value_kind)))
    }
}

fn primitive(primitive: Primitive) -> Inferred<TypeDescriptor> {
    Inferred::new(TypeDescriptor::single(TypeExpr::Primitive(primitive)))
}

/// Splits `[tag, "null"]` into the tag and the nullable flag.
fn effective_type<'a>(schema: &'a PropertySchema, property: &str) -> Result<(&'a str, bool)> {
    match &schema.type_ {
        None => Err(Error::MissingType {
            property: property.to_string(),
        }),
        Some(SchemaType::Single(tag)) => Ok((tag.as_str(), false)),
        Some(SchemaType::Union(types)) => match types.as_slice() {
            [tag, null] if null == "null" => Ok((tag.as_str(), true)),
            _ => Err(Error::UnsupportedUnion {
                types: types.clone(),
                property: property.to_string(),
            }),
        },
    }
}

fn title_and_description(schema: &PropertySchema) -> (String, String) {
    let description = schema.description.clone().unwrap_or_default();
    let title = match schema.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => description.clone(),
    };
    if title == description {
        (title, String::new())
    } else {
        (title, description)
    }
}
