pub mod typescript;

use crate::codegen::output::GeneratedTypes;

pub trait CodegenBackend {
    /// Header and imports.
    fn generate_helpers(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()>;

    /// Managed types, managed sub-types, system types and system sub-types, in that order.
    fn generate_models(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()>;

    /// Typed CRUD accessors for every resource.
    fn generate_accessors(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()>;

    fn generate(
        &mut self,
        types: &GeneratedTypes,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        self.generate_helpers(types, writer)?;
        self.generate_models(types, writer)?;
        self.generate_accessors(types, writer)
    }
}
