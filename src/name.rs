use crate::{Case, Casing};

pub const MANAGED_PREFIX: &str = "Managed";
pub const SYSTEM_PREFIX: &str = "System";
pub const SUB_TYPE_PREFIX: &str = "Sub";

pub fn format_type_name(name: &str) -> String {
    name.to_case(Case::UpperCamel)
}

pub fn format_var_name(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// `user` -> `ManagedUser`
pub fn managed_type_name(resource_name: &str) -> String {
    format!("{MANAGED_PREFIX}{}", format_type_name(resource_name))
}

/// `ldap`, `account` -> `SystemLdapAccount`
pub fn system_type_name(connector_name: &str, object_type: &str) -> String {
    format!(
        "{SYSTEM_PREFIX}{}{}",
        format_type_name(connector_name),
        format_type_name(object_type)
    )
}

/// `ldap`, `account` -> `ldapAccount`
pub fn system_value_name(connector_name: &str, object_type: &str) -> String {
    format!(
        "{}{}",
        format_var_name(connector_name),
        format_type_name(object_type)
    )
}

/// Name of the type generated for an inline object held by `property_name`.
///
/// Nested sub-types reuse their parent's name as the base so the prefix only appears once:
/// `ManagedUser` + `address` gives `SubManagedUserAddress`, and that + `geo` gives
/// `SubManagedUserAddressGeo`.
pub fn sub_type_name(parent_type_name: &str, property_name: &str) -> String {
    let property = format_type_name(property_name);
    if parent_type_name.starts_with(SUB_TYPE_PREFIX) {
        format!("{parent_type_name}{property}")
    } else {
        format!("{SUB_TYPE_PREFIX}{parent_type_name}{property}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn managed_names() {
        assert_eq!(managed_type_name("user"), "ManagedUser");
        assert_eq!(managed_type_name("alpha_user"), "ManagedAlphaUser");
    }

    #[test]
    fn system_names() {
        assert_eq!(system_type_name("ldap", "account"), "SystemLdapAccount");
        assert_eq!(system_value_name("ldap", "account"), "ldapAccount");
        assert_eq!(system_value_name("scripted_sql", "group"), "scriptedSqlGroup");
    }

    #[test]
    fn sub_type_names() {
        let address = sub_type_name("ManagedUser", "address");
        assert_eq!(address, "SubManagedUserAddress");
        assert_eq!(sub_type_name(&address, "geo"), "SubManagedUserAddressGeo");
        assert_eq!(
            sub_type_name("SystemLdapAccount", "manager"),
            "SubSystemLdapAccountManager"
        );
    }
}
