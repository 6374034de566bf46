use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::{LoadError, Result};

/// How forgiving the parser is with broken records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Every malformed number, short record or bad face fails the load.
    #[default]
    Strict,
    /// Unparsable or missing numbers read as `0.0`, extra face corners are
    /// dropped. Face indices are still checked.
    Lenient,
}

/// Per-mesh import settings, read from a TOML sidecar.
///
/// ```toml
/// flip_axis = [false, false, true]
/// mode = "lenient"
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjMeta {
    /// Negates the x, y or z component of every position and normal.
    pub flip_axis: [bool; 3],
    pub mode: ParseMode,
}

impl ObjMeta {
    pub fn lenient() -> Self {
        Self {
            mode: ParseMode::Lenient,
            ..Self::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| LoadError::unavailable(path, e))?;
        toml::from_str(&data).map_err(|source| LoadError::Meta {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Meta for `mesh`: `<stem>.toml` next to it, else the folder scoped
    /// `obj.toml`, else the defaults.
    pub fn resolve_for(mesh: &Path) -> Result<Self> {
        Self::resolve_or(mesh, Self::default())
    }

    /// Like [`ObjMeta::resolve_for`], but falls back to `fallback` when no
    /// meta file exists. A meta file always wins, even one that only
    /// restates the defaults.
    pub fn resolve_or(mesh: &Path, fallback: Self) -> Result<Self> {
        Ok(Self::find_for(mesh)?.unwrap_or(fallback))
    }

    /// The meta file that applies to `mesh`, if there is one.
    pub fn find_for(mesh: &Path) -> Result<Option<Self>> {
        for candidate in Self::candidates(mesh) {
            if candidate.is_file() {
                log::debug!("Using mesh meta `{}`", candidate.display());
                return Self::from_file(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    fn candidates(mesh: &Path) -> Vec<PathBuf> {
        let dir = mesh.parent().unwrap_or_else(|| Path::new(""));
        let mut candidates = Vec::with_capacity(2);
        if let Some(stem) = mesh.file_stem() {
            candidates.push(dir.join(format!("{}.toml", stem.to_string_lossy())));
        }
        candidates.push(dir.join("obj.toml"));
        candidates
    }
}
