use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load schema file [{}]", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema file [{}]", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid connector file pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("unable to determine system type name for [{}]", .path.display())]
    ConnectorName { path: PathBuf },
    #[error("missing type for property [{property}]")]
    MissingType { property: String },
    #[error("unsupported type [{tag}] for property [{property}]")]
    UnsupportedType { tag: String, property: String },
    #[error(
        "unsupported type [{}] for property [{property}], expected [<type>, \"null\"]",
        .types.join(", ")
    )]
    UnsupportedUnion { types: Vec<String>, property: String },
    #[error(
        "relationship property [{property}] is not allowed on [{owner}], only managed objects may declare relationships"
    )]
    RelationshipNotAllowed { owner: String, property: String },
    #[error("type name [{name}] is generated for both [{first}] and [{second}]")]
    DuplicateTypeName {
        name: String,
        first: String,
        second: String,
    },
    #[error("failed to render typescript types")]
    Render(#[source] std::io::Error),
    #[error("formatter [{command}] failed: {message}")]
    Format { command: String, message: String },
    #[error("failed to write typescript types to [{}]", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
