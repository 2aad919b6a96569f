use crate::codegen::resource::{ManagedResource, ResourceSet, SystemResource};
use crate::codegen::walker::Warning;
use crate::error::{Error, Result};
use crate::types::SubTypeDeclaration;

use log::trace;
use std::collections::HashMap;

/// Everything one generation run hands to a backend, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedTypes {
    pub managed: Vec<ManagedResource>,
    pub managed_sub_types: Vec<SubTypeDeclaration>,
    pub system: Vec<SystemResource>,
    pub system_sub_types: Vec<SubTypeDeclaration>,
    pub warnings: Vec<Warning>,
}

impl GeneratedTypes {
    pub fn assemble(
        managed: ResourceSet<ManagedResource>,
        system: ResourceSet<SystemResource>,
    ) -> Result<Self> {
        let mut types = Self {
            managed: managed.resources,
            managed_sub_types: managed.sub_types,
            system: system.resources,
            system_sub_types: system.sub_types,
            warnings: managed.warnings,
        };
        types.warnings.extend(system.warnings);

        trace!("sorting generated types");
        types.managed.sort_by(|a, b| a.name.cmp(&b.name));
        types
            .managed_sub_types
            .sort_by(|a, b| a.type_name.cmp(&b.type_name));
        types.system.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        types
            .system_sub_types
            .sort_by(|a, b| a.type_name.cmp(&b.type_name));

        types.check_type_names()?;
        Ok(types)
    }

    fn check_type_names(&self) -> Result<()> {
        let resources = self
            .managed
            .iter()
            .map(|r| (r.type_name.as_str(), r.resource_path()))
            .chain(
                self.system
                    .iter()
                    .map(|r| (r.type_name.as_str(), r.resource_path())),
            );
        let sub_types = self
            .managed_sub_types
            .iter()
            .chain(&self.system_sub_types)
            .map(|s| {
                (
                    s.type_name.as_str(),
                    format!("{}.{}", s.parent_type_name, s.declared_name),
                )
            });

        let mut seen: HashMap<&str, String> = HashMap::new();
        for (name, origin) in resources.chain(sub_types) {
            if let Some(first) = seen.get(name) {
                return Err(Error::DuplicateTypeName {
                    name: name.to_string(),
                    first: first.clone(),
                    second: origin,
                });
            }
            seen.insert(name, origin);
        }
        Ok(())
    }
}
