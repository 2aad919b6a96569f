use crate::codegen::backend::{
    typescript::{
        format_property_name, format_string_literal,
        types::{uses_reference, REFERENCE_TYPE},
        TsType, DEFAULT_RUNTIME_MODULE,
    },
    CodegenBackend,
};
use crate::codegen::output::GeneratedTypes;
use crate::types::{ResourceProperty, SubTypeDeclaration};

use log::{debug, trace};

pub const TAG_PROPERTY: &str = "_tag";
pub const DEFAULTS_SUFFIX: &str = "Defaults";
pub const OBJECT_FACTORY: &str = "idmObject";

pub struct Codegen {
    runtime_module: String,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_MODULE)
    }
}

impl CodegenBackend for Codegen {
    fn generate_helpers(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "// Generated by idm-ts-gen, do not edit.")?;

        let mut imports = vec![];
        if !types.managed.is_empty() || !types.system.is_empty() {
            imports.push(OBJECT_FACTORY);
        }
        if needs_reference_type(types) {
            imports.push(REFERENCE_TYPE);
        }
        if !imports.is_empty() {
            writeln!(
                writer,
                "import {{ {} }} from {};",
                imports.join(", "),
                format_string_literal(&self.runtime_module)
            )?;
        }
        writeln!(writer)
    }

    fn generate_models(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        for resource in &types.managed {
            debug!("generating managed object `{}`", resource.type_name);
            self.generate_resource(
                &resource.type_name,
                &resource.resource_path(),
                &resource.properties,
                writer,
            )?;
            self.generate_defaults(&resource.type_name, &resource.properties, writer)?;
        }
        for sub_type in &types.managed_sub_types {
            self.generate_sub_type(sub_type, writer)?;
        }
        for resource in &types.system {
            debug!("generating system object `{}`", resource.type_name);
            self.generate_resource(
                &resource.type_name,
                &resource.resource_path(),
                &resource.properties,
                writer,
            )?;
        }
        for sub_type in &types.system_sub_types {
            self.generate_sub_type(sub_type, writer)?;
        }
        Ok(())
    }

    fn generate_accessors(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "export const idm = {{")?;

        writeln!(writer, "  managed: {{")?;
        for resource in &types.managed {
            writeln!(
                writer,
                "    {}: {OBJECT_FACTORY}<{}, {}{DEFAULTS_SUFFIX}>({}),",
                format_property_name(&resource.name),
                resource.type_name,
                resource.type_name,
                format_string_literal(&resource.resource_path())
            )?;
        }
        writeln!(writer, "  }},")?;

        // system objects have no return-by-default metadata, reads return the whole object
        writeln!(writer, "  system: {{")?;
        for resource in &types.system {
            writeln!(
                writer,
                "    {}: {OBJECT_FACTORY}<{}, {}>({}),",
                format_property_name(&resource.value_name),
                resource.type_name,
                resource.type_name,
                format_string_literal(&resource.resource_path())
            )?;
        }
        writeln!(writer, "  }},")?;

        writeln!(writer, "}};")
    }
}

impl Codegen {
    pub fn new(runtime_module: impl Into<String>) -> Self {
        Self {
            runtime_module: runtime_module.into(),
        }
    }

    fn generate_resource(
        &self,
        type_name: &str,
        resource_path: &str,
        properties: &[ResourceProperty],
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "export type {type_name} = {{")?;
        writeln!(
            writer,
            "  readonly {TAG_PROPERTY}?: {};",
            format_string_literal(resource_path)
        )?;
        self.generate_properties(properties, writer)?;
        writeln!(writer, "}};\n")
    }

    fn generate_sub_type(
        &self,
        sub_type: &SubTypeDeclaration,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        debug!(
            "generating sub type `{}` of `{}`",
            sub_type.type_name, sub_type.parent_type_name
        );
        writeln!(writer, "export type {} = {{", sub_type.type_name)?;
        self.generate_properties(&sub_type.properties, writer)?;
        writeln!(writer, "}};\n")
    }

    fn generate_properties(
        &self,
        properties: &[ResourceProperty],
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        for property in properties {
            let ty = TsType(&property.type_);
            trace!("`{}` - {ty}", property.name);
            self.print_doc_comment(property, writer)?;
            let optional = if property.required { "" } else { "?" };
            writeln!(
                writer,
                "  {}{optional}: {ty};",
                format_property_name(&property.name)
            )?;
        }
        Ok(())
    }

    fn generate_defaults(
        &self,
        type_name: &str,
        properties: &[ResourceProperty],
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        let fields: Vec<_> = std::iter::once(TAG_PROPERTY)
            .chain(
                properties
                    .iter()
                    .filter(|p| p.return_by_default.unwrap_or(true))
                    .map(|p| p.name.as_str()),
            )
            .map(format_string_literal)
            .collect();
        writeln!(
            writer,
            "export type {type_name}{DEFAULTS_SUFFIX} = Pick<{type_name}, {}>;\n",
            fields.join(" | ")
        )
    }

    fn print_doc_comment(
        &self,
        property: &ResourceProperty,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        let mut lines: Vec<&str> = property.title.lines().collect();
        if !property.description.is_empty() {
            if !lines.is_empty() {
                lines.push("");
            }
            lines.extend(property.description.lines());
        }
        if lines.is_empty() {
            return Ok(());
        }

        writeln!(writer, "  /**")?;
        for line in lines {
            let line = line.trim_end().replace("*/", "*\\/");
            if line.is_empty() {
                writeln!(writer, "   *")?;
            } else {
                writeln!(writer, "   * {line}")?;
            }
        }
        writeln!(writer, "   */")
    }
}

fn needs_reference_type(types: &GeneratedTypes) -> bool {
    let resource_properties = types
        .managed
        .iter()
        .flat_map(|r| &r.properties)
        .chain(types.system.iter().flat_map(|r| &r.properties));
    let sub_type_properties = types
        .managed_sub_types
        .iter()
        .chain(&types.system_sub_types)
        .flat_map(|s| &s.properties);

    resource_properties
        .chain(sub_type_properties)
        .flat_map(|p| p.type_.types())
        .any(uses_reference)
}
