use std::io;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Could not read `{}`: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record on line {line} (field `{field}`): {reason}")]
    MalformedRecord {
        line: usize,
        field: String,
        reason: String,
    },
    #[error("Invalid mesh meta `{}`: {source}", path.display())]
    Meta {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LoadError {
    pub(crate) fn unavailable(path: &Path, source: io::Error) -> Self {
        LoadError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            line,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = ::std::result::Result<T, LoadError>;
