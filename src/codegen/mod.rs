pub mod backend;
pub mod format;
pub mod output;
pub mod resource;
pub mod walker;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::sources::{discover_connectors, load_managed_objects};
use backend::CodegenBackend;
use format::{CommandFormatter, Formatter, Unformatted};
use output::GeneratedTypes;
use resource::{build_managed_resources, build_system_resources};

use log::{debug, trace};
use std::io::Write;
use std::path::Path;

pub struct CodeGenerator {
    config: GeneratorConfig,
    backend: Box<dyn CodegenBackend>,
    formatter: Box<dyn Formatter>,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig, backend: Box<dyn CodegenBackend>) -> Self {
        let formatter: Box<dyn Formatter> = match config
            .formatter
            .as_deref()
            .and_then(CommandFormatter::parse)
        {
            Some(formatter) => Box::new(formatter),
            None => Box::new(Unformatted),
        };
        Self {
            config,
            backend,
            formatter,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads every schema source and builds the types of both resource families.
    pub fn generate_types(&self) -> Result<GeneratedTypes> {
        let config_dir = &self.config.config_dir;
        let managed = load_managed_objects(config_dir)?;
        let connectors = discover_connectors(config_dir)?;

        let managed = build_managed_resources(&managed, self.config.managed_values)?;
        let system = build_system_resources(&connectors, self.config.connector_values)?;
        GeneratedTypes::assemble(managed, system)
    }

    pub fn render(&mut self, types: &GeneratedTypes) -> Result<String> {
        let mut out = vec![];
        self.backend
            .generate(types, &mut out)
            .map_err(Error::Render)?;
        String::from_utf8(out).map_err(|e| {
            Error::Render(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Generates, renders, formats and writes the output file. Nothing is written unless every
    /// step succeeds.
    pub fn generate(&mut self) -> Result<GeneratedTypes> {
        let types = self.generate_types()?;
        debug!(
            "generated {} managed and {} system types",
            types.managed.len(),
            types.system.len()
        );
        let source = self.render(&types)?;
        let source = self.formatter.format(source, &self.config.output)?;
        write_output(&self.config.output, &source)?;
        Ok(types)
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    trace!("writing {} bytes to `{}`", contents.len(), path.display());
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // written next to the destination and renamed over it in one step
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{write_output, CodeGenerator};
    use crate::codegen::backend::typescript::Codegen;
    use crate::codegen::format::Formatter;
    use crate::codegen::walker::Warning;
    use crate::config::GeneratorConfig;
    use crate::error::{Error, Result};

    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    const MANAGED: &str = r#"{"objects": [
        {"name": "user", "schema": {
            "required": ["userName"],
            "properties": {
                "userName": {"type": "string"},
                "manager": {"type": "relationship", "resourceCollection": [{"path": "managed/user"}]}
            }
        }}
    ]}"#;

    const LDAP: &str = r#"{"objectTypes": {
        "account": {"properties": {"uid": {"type": "string"}}}
    }}"#;

    struct Failing;

    impl Formatter for Failing {
        fn format(&self, _source: String, _path: &Path) -> Result<String> {
            Err(Error::Format {
                command: "failing".to_string(),
                message: "exited with 1".to_string(),
            })
        }
    }

    fn setup(managed: &str, connectors: &[(&str, &str)]) -> (tempfile::TempDir, GeneratorConfig) {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("conf");
        fs::create_dir(&conf).unwrap();
        fs::write(conf.join("managed.json"), managed).unwrap();
        for (name, contents) in connectors {
            fs::write(conf.join(format!("provisioner.openicf-{name}.json")), contents).unwrap();
        }
        let config = GeneratorConfig {
            config_dir: conf,
            output: dir.path().join("idm.ts"),
            ..Default::default()
        };
        (dir, config)
    }

    fn generator(config: GeneratorConfig) -> CodeGenerator {
        CodeGenerator::new(config, Box::new(Codegen::default()))
    }

    #[test]
    fn writes_types_for_both_families() {
        let (_dir, config) = setup(MANAGED, &[("ldap", LDAP)]);
        let output = config.output.clone();
        let types = generator(config).generate().unwrap();

        assert_eq!(types.managed.len(), 1);
        assert_eq!(types.system.len(), 1);
        assert!(types.warnings.is_empty());

        let source = fs::read_to_string(output).unwrap();
        assert!(source.contains("export type ManagedUser = {"));
        assert!(source.contains("  manager?: ReferenceType<ManagedUser>;"));
        assert!(source.contains("export type SystemLdapAccount = {"));
        assert!(source.contains(
            r#"ldapAccount: idmObject<SystemLdapAccount, SystemLdapAccount>("system/ldap/account"),"#
        ));
    }

    #[test]
    fn unresolved_relationship_warns() {
        let managed = r#"{"objects": [{"name": "user", "schema": {"properties": {
            "owner": {"type": "relationship", "resourceCollection": [{"path": "system/ldap/account"}]}
        }}}]}"#;
        let (_dir, config) = setup(managed, &[]);
        let output = config.output.clone();
        let types = generator(config).generate().unwrap();

        assert_eq!(
            types.warnings,
            vec![Warning::UnresolvedRelationship {
                owner: "ManagedUser".to_string(),
                property: "owner".to_string(),
                candidates: vec!["system/ldap/account".to_string()],
            }]
        );
        let source = fs::read_to_string(output).unwrap();
        assert!(source.contains("  owner?: Record<string, unknown>;"));
    }

    #[test]
    fn connector_relationship_fails_without_output() {
        let ldap = r#"{"objectTypes": {"account": {"properties": {
            "manager": {"type": "relationship", "resourceCollection": [{"path": "managed/user"}]}
        }}}}"#;
        let (_dir, config) = setup(MANAGED, &[("ldap", ldap)]);
        let output = config.output.clone();
        let err = generator(config).generate().unwrap_err();

        assert!(matches!(err, Error::RelationshipNotAllowed { .. }), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn unsupported_type_fails_without_output() {
        let managed = r#"{"objects": [{"name": "user", "schema": {"properties": {
            "photo": {"type": "binary"}
        }}}]}"#;
        let (_dir, config) = setup(managed, &[]);
        let output = config.output.clone();
        let err = generator(config).generate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "unsupported type [binary] for property [photo]"
        );
        assert!(!output.exists());
    }

    #[test]
    fn formatter_failure_keeps_previous_output() {
        let (_dir, config) = setup(MANAGED, &[]);
        let output = config.output.clone();
        fs::write(&output, "previous").unwrap();

        let err = generator(config)
            .with_formatter(Box::new(Failing))
            .generate()
            .unwrap_err();

        assert!(matches!(err, Error::Format { .. }));
        assert_eq!(fs::read_to_string(output).unwrap(), "previous");
    }

    #[test]
    fn missing_managed_objects_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            config_dir: dir.path().to_path_buf(),
            output: dir.path().join("idm.ts"),
            ..Default::default()
        };
        let err = generator(config).generate().unwrap_err();
        assert!(matches!(err, Error::Read { .. }), "{err}");
    }

    #[test]
    fn replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idm.ts");
        fs::write(&path, "old").unwrap();
        write_output(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("idm.ts");
        let err = write_output(&path, "new").unwrap_err();
        assert!(err.to_string().contains("idm.ts"));
        assert!(!path.exists());
    }
}
