//! Loading of the server configuration files the generator reads.

use crate::error::{Error, Result};
use crate::schema::PropertySchema;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{de::DeserializeOwned, Deserialize};
use std::path::{Path, PathBuf};

pub const MANAGED_OBJECTS_FILE: &str = "managed.json";
pub const CONNECTOR_FILE_PREFIX: &str = "provisioner.openicf-";
pub const CONNECTOR_FILE_SUFFIX: &str = ".json";

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ManagedObjects {
    pub objects: Vec<ManagedObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagedObject {
    pub name: String,
    pub schema: PropertySchema,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConnectorConfig {
    #[serde(rename = "objectTypes")]
    pub object_types: IndexMap<String, PropertySchema>,
}

/// A connector configuration together with the name taken from its file.
#[derive(Debug, Clone)]
pub struct ConnectorSource {
    pub name: String,
    pub path: PathBuf,
    pub config: ConnectorConfig,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    trace!("reading `{}`", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_managed_objects(config_dir: &Path) -> Result<ManagedObjects> {
    let path = config_dir.join(MANAGED_OBJECTS_FILE);
    debug!("loading managed objects from `{}`", path.display());
    read_json(&path)
}

/// `conf/provisioner.openicf-ldap.json` -> `ldap`
pub fn connector_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix(CONNECTOR_FILE_PREFIX))
        .and_then(|name| name.strip_suffix(CONNECTOR_FILE_SUFFIX))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::ConnectorName {
            path: path.to_path_buf(),
        })
}

pub fn load_connector(path: &Path) -> Result<ConnectorSource> {
    let config = read_json(path)?;
    let name = connector_name(path)?;
    Ok(ConnectorSource {
        name,
        path: path.to_path_buf(),
        config,
    })
}

/// Finds and loads every `provisioner.openicf-*.json` in `config_dir`, ordered by path.
pub fn discover_connectors(config_dir: &Path) -> Result<Vec<ConnectorSource>> {
    let dir = glob::Pattern::escape(&config_dir.to_string_lossy());
    let pattern = format!("{dir}/{CONNECTOR_FILE_PREFIX}*{CONNECTOR_FILE_SUFFIX}");
    debug!("discovering connectors with `{pattern}`");

    let mut paths = vec![];
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Read {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        paths.push(path);
    }
    paths.sort();

    paths.iter().map(|path| load_connector(path)).collect()
}
