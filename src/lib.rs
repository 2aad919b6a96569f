pub mod codegen;
pub mod config;
pub mod error;
pub mod filter;
pub mod name;
pub mod schema;
pub mod sources;
pub mod types;

pub use error::{Error, Result};

pub(crate) use convert_case::{Case, Casing};
pub(crate) use serde_json::Value;
