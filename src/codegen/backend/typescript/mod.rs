mod backend;
mod types;

pub use backend::Codegen;
pub use types::TsType;

pub const DEFAULT_RUNTIME_MODULE: &str = "idm-ts";

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn format_string_literal(value: &str) -> String {
    // a JSON string is a valid TypeScript string literal
    serde_json::Value::from(value).to_string()
}

/// Property names that are not plain identifiers are written as string literals.
pub fn format_property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format_string_literal(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn property_names() {
        assert_eq!(format_property_name("userName"), "userName");
        assert_eq!(format_property_name("_id"), "_id");
        assert_eq!(format_property_name("$ref"), "$ref");
        assert_eq!(format_property_name("given-name"), "\"given-name\"");
        assert_eq!(format_property_name("1st"), "\"1st\"");
        assert_eq!(format_property_name(""), "\"\"");
    }

    #[test]
    fn string_literals() {
        assert_eq!(format_string_literal("managed/user"), "\"managed/user\"");
        assert_eq!(format_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
