use crate::codegen::walker::{Inferred, Owner, ResourceFamily, Walker, Warning};
use crate::error::Result;
use crate::name::{managed_type_name, system_type_name, system_value_name};
use crate::sources::{ConnectorSource, ManagedObjects};
use crate::types::{ResourceProperty, SubTypeDeclaration, ValueKind};

use log::{debug, trace};

pub const MANAGED_RESOURCE_PATH: &str = "managed";
pub const SYSTEM_RESOURCE_PATH: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedResource {
    pub name: String,
    pub type_name: String,
    pub properties: Vec<ResourceProperty>,
}

impl ManagedResource {
    /// `managed/user`
    pub fn resource_path(&self) -> String {
        format!("{MANAGED_RESOURCE_PATH}/{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemResource {
    pub connector: String,
    pub object_type: String,
    /// `ldap/account`
    pub full_name: String,
    pub value_name: String,
    pub type_name: String,
    pub properties: Vec<ResourceProperty>,
}

impl SystemResource {
    /// `system/ldap/account`
    pub fn resource_path(&self) -> String {
        format!("{SYSTEM_RESOURCE_PATH}/{}", self.full_name)
    }
}

/// The records of one resource family together with the sub-types and warnings they produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet<R> {
    pub resources: Vec<R>,
    pub sub_types: Vec<SubTypeDeclaration>,
    pub warnings: Vec<Warning>,
}

impl<R> ResourceSet<R> {
    fn from_inferred(inferred: Inferred<Vec<R>>) -> Self {
        let mut sub_types = inferred.sub_types;
        sub_types.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        Self {
            resources: inferred.value,
            sub_types,
            warnings: inferred.warnings,
        }
    }
}

pub fn build_managed_resources(
    managed: &ManagedObjects,
    value_kind: ValueKind,
) -> Result<ResourceSet<ManagedResource>> {
    debug!("building {} managed objects", managed.objects.len());
    let walker = Walker::new(ResourceFamily::Managed, value_kind);

    let mut objects: Vec<_> = managed.objects.iter().collect();
    trace!("sorting managed objects alphabetically by name");
    objects.sort_by(|a, b| a.name.cmp(&b.name));

    let mut inferred = Inferred::new(Vec::with_capacity(objects.len()));
    for object in objects {
        let type_name = managed_type_name(&object.name);
        trace!("processing managed object `{}` as `{type_name}`", object.name);
        let owner = Owner::new(
            format!("{MANAGED_RESOURCE_PATH}/{}", object.name),
            type_name.clone(),
        );
        let properties = walker.build_properties(&object.schema, &owner)?;
        let properties = inferred.merge(properties);
        inferred.value.push(ManagedResource {
            name: object.name.clone(),
            type_name,
            properties,
        });
    }

    Ok(ResourceSet::from_inferred(inferred))
}

pub fn build_system_resources(
    connectors: &[ConnectorSource],
    value_kind: ValueKind,
) -> Result<ResourceSet<SystemResource>> {
    debug!("building system objects of {} connectors", connectors.len());
    let walker = Walker::new(ResourceFamily::System, value_kind);

    let mut inferred = Inferred::new(vec![]);
    for connector in connectors {
        trace!(
            "processing connector `{}` from `{}`",
            connector.name,
            connector.path.display()
        );
        for (object_type, schema) in &connector.config.object_types {
            let full_name = format!("{}/{object_type}", connector.name);
            let type_name = system_type_name(&connector.name, object_type);
            trace!("processing system object `{full_name}` as `{type_name}`");
            let owner = Owner::new(
                format!("{SYSTEM_RESOURCE_PATH}/{full_name}"),
                type_name.clone(),
            );
            let properties = walker.build_properties(schema, &owner)?;
            let properties = inferred.merge(properties);
            inferred.value.push(SystemResource {
                connector: connector.name.clone(),
                object_type: object_type.clone(),
                value_name: system_value_name(&connector.name, object_type),
                full_name,
                type_name,
                properties,
            });
        }
    }

    trace!("sorting system objects alphabetically by full name");
    inferred
        .value
        .sort_by(|a: &SystemResource, b: &SystemResource| a.full_name.cmp(&b.full_name));
    Ok(ResourceSet::from_inferred(inferred))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::sources::ConnectorConfig;
    use crate::types::{Primitive, ReferenceTargets, TypeExpr};

    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn managed(json: &str) -> ManagedObjects {
        serde_json::from_str(json).unwrap()
    }

    fn connector(name: &str, json: &str) -> ConnectorSource {
        let config: ConnectorConfig = serde_json::from_str(json).unwrap();
        ConnectorSource {
            name: name.to_string(),
            path: PathBuf::from(format!("conf/provisioner.openicf-{name}.json")),
            config,
        }
    }

    #[test]
    fn user_with_manager() {
        let objects = managed(
            r#"{"objects": [{
                "name": "user",
                "schema": {
                    "type": "object",
                    "required": ["userName"],
                    "properties": {
                        "userName": {"type": "string"},
                        "manager": {"type": "relationship", "resourceCollection": [{"path": "managed/user"}]}
                    }
                }
            }]}"#,
        );
        let set = build_managed_resources(&objects, ValueKind::Unknown).unwrap();
        assert!(set.sub_types.is_empty());
        assert!(set.warnings.is_empty());

        let user = &set.resources[0];
        assert_eq!(user.name, "user");
        assert_eq!(user.type_name, "ManagedUser");
        assert_eq!(user.resource_path(), "managed/user");
        assert_eq!(user.properties.len(), 2);

        let user_name = &user.properties[0];
        assert_eq!(user_name.name, "userName");
        assert_eq!(
            user_name.type_.types(),
            [TypeExpr::Primitive(Primitive::String)]
        );
        assert!(user_name.required);
        assert_eq!(user_name.return_by_default, Some(true));

        let manager = &user.properties[1];
        assert_eq!(manager.name, "manager");
        let target = ReferenceTargets::new(vec!["ManagedUser".into()]).unwrap();
        assert_eq!(manager.type_.types(), [TypeExpr::Reference(target)]);
        assert!(!manager.required);
        assert_eq!(manager.return_by_default, Some(false));
    }

    #[test]
    fn managed_objects_are_sorted_by_name() {
        let objects = managed(
            r#"{"objects": [
                {"name": "zeta", "schema": {"properties": {}}},
                {"name": "alpha", "schema": {"properties": {}}},
                {"name": "mike", "schema": {"properties": {}}}
            ]}"#,
        );
        let set = build_managed_resources(&objects, ValueKind::Unknown).unwrap();
        let names: Vec<_> = set.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mike", "zeta"]);
    }

    #[test]
    fn sub_types_are_sorted_by_name() {
        let objects = managed(
            r#"{"objects": [
                {"name": "user", "schema": {"properties": {
                    "preferences": {"type": "object", "properties": {"marketing": {"type": "boolean"}}},
                    "address": {"type": "object", "properties": {"city": {"type": "string"}}}
                }}},
                {"name": "device", "schema": {"properties": {
                    "location": {"type": "object", "properties": {"lat": {"type": "number"}}}
                }}}
            ]}"#,
        );
        let set = build_managed_resources(&objects, ValueKind::Unknown).unwrap();
        let names: Vec<_> = set.sub_types.iter().map(|s| s.type_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "SubManagedDeviceLocation",
                "SubManagedUserAddress",
                "SubManagedUserPreferences"
            ]
        );
    }

    #[test]
    fn unsupported_type_aborts() {
        let objects = managed(
            r#"{"objects": [{"name": "user", "schema": {"properties": {"created": {"type": "date"}}}}]}"#,
        );
        let err = build_managed_resources(&objects, ValueKind::Unknown).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { tag, property } if tag == "date" && property == "created"));
    }

    #[test]
    fn system_resources() {
        let connectors = [
            connector(
                "ldap",
                r#"{"objectTypes": {
                    "group": {"properties": {"cn": {"type": "string"}}},
                    "account": {
                        "required": ["uid"],
                        "properties": {
                            "uid": {"type": "string"},
                            "memberOf": {"type": "array", "items": {"type": "string"}},
                            "extra": {"type": "object", "properties": {"flag": {"type": "boolean"}}}
                        }
                    }
                }}"#,
            ),
            connector(
                "csv",
                r#"{"objectTypes": {"person": {"properties": {"email": {"type": "string"}}}}}"#,
            ),
        ];
        let set = build_system_resources(&connectors, ValueKind::Any).unwrap();

        let names: Vec<_> = set.resources.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["csv/person", "ldap/account", "ldap/group"]);

        let account = &set.resources[1];
        assert_eq!(account.connector, "ldap");
        assert_eq!(account.object_type, "account");
        assert_eq!(account.type_name, "SystemLdapAccount");
        assert_eq!(account.value_name, "ldapAccount");
        assert_eq!(account.resource_path(), "system/ldap/account");
        assert!(account.properties[0].required);
        assert_eq!(account.properties[0].return_by_default, None);

        assert_eq!(set.sub_types.len(), 1);
        assert_eq!(set.sub_types[0].type_name, "SubSystemLdapAccountExtra");
    }

    #[test]
    fn system_relationships_abort() {
        let connectors = [connector(
            "ldap",
            r#"{"objectTypes": {"account": {"properties": {
                "manager": {"type": "relationship", "resourceCollection": [{"path": "managed/user"}]}
            }}}}"#,
        )];
        let err = build_system_resources(&connectors, ValueKind::Unknown).unwrap_err();
        assert!(matches!(
            err,
            Error::RelationshipNotAllowed { owner, property }
                if owner == "SystemLdapAccount" && property == "manager"
        ));
    }
}
