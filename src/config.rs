use crate::codegen::backend::typescript::DEFAULT_RUNTIME_MODULE;
use crate::types::ValueKind;

use std::path::PathBuf;

pub const DEFAULT_CONFIG_DIR: &str = "./conf";
pub const DEFAULT_OUTPUT: &str = "src/idm.ts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding `managed.json` and the connector configurations.
    pub config_dir: PathBuf,
    pub output: PathBuf,
    pub managed_values: ValueKind,
    pub connector_values: ValueKind,
    pub runtime_module: String,
    /// Command line of an external formatter, `{file}` is replaced with the output path.
    pub formatter: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            managed_values: ValueKind::Unknown,
            connector_values: ValueKind::Unknown,
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            formatter: None,
        }
    }
}
