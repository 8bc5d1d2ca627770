//! Descriptor loading for single content units.
//!
//! A unit directory holds a primary descriptor (`manifest.json`) and, for
//! templates, an optional body descriptor (`content.json`):
//!
//! ```text
//! report/
//! └── weekly-report/
//!     ├── manifest.json     # id, name, tags, order, ... (required)
//!     └── content.json      # authorNotes, content, aiGeneratedContent, pluginData
//! ```
//!
//! A directory without a manifest is not a unit: loaders return `Ok(None)`.
//! A descriptor that exists but cannot be parsed, or a manifest without an
//! `id`, is a [`LoadError`] that aborts the build.
//!
//! Loading only normalizes: defaults are applied here, while combining the
//! manifest with its body is left to [`crate::aggregate::merge_unit`].

use crate::config::LayoutConfig;
use crate::types::{ThemeColors, ThemeFonts, ThemeUnit};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed descriptor {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}: missing required field `{field}`", path.display())]
    Schema { path: PathBuf, field: &'static str },
    #[error("{}: category key {key:?} is not a plain directory name", path.display())]
    InvalidKey { path: PathBuf, key: String },
}

/// Read and parse a JSON descriptor. `Ok(None)` when no file is at `path`.
pub(crate) fn read_descriptor<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawManifest {
    id: Option<String>,
    name: String,
    description: String,
    icon: String,
    major_category: Option<String>,
    sub_category: String,
    tags: Vec<String>,
    roles: Vec<String>,
    order: i64,
    enabled_plugins: Vec<String>,
    include_content: Option<bool>,
    include_ai_content: Option<bool>,
}

/// Normalized primary descriptor of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitManifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// `None` when the manifest does not name its category.
    pub major_category: Option<String>,
    pub sub_category: String,
    pub tags: Vec<String>,
    pub roles: Vec<String>,
    pub order: i64,
    pub enabled_plugins: Vec<String>,
    /// Explicit override of the default "body is non-empty" rule.
    pub include_content: Option<bool>,
    pub include_ai_content: Option<bool>,
}

/// Body descriptor of a template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitBody {
    pub author_notes: String,
    pub content: String,
    pub ai_generated_content: String,
    pub plugin_data: Option<serde_json::Value>,
}

/// A template as found on disk, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedUnit {
    /// Name of the unit directory.
    pub dir_name: String,
    /// Name of the category directory the unit was found in.
    pub category_dir: String,
    pub manifest: UnitManifest,
    /// `None` when the unit has no body descriptor.
    pub body: Option<UnitBody>,
}

/// Load the template in `dir`, whose parent is the category directory
/// `category_dir`.
pub fn load_unit(
    dir: &Path,
    category_dir: &str,
    layout: &LayoutConfig,
) -> Result<Option<LoadedUnit>, LoadError> {
    let manifest_path = dir.join(&layout.manifest);
    let Some(raw) = read_descriptor::<RawManifest>(&manifest_path)? else {
        return Ok(None);
    };
    let id = raw.id.ok_or(LoadError::Schema {
        path: manifest_path,
        field: "id",
    })?;
    let body = read_descriptor::<UnitBody>(&dir.join(&layout.content))?;

    Ok(Some(LoadedUnit {
        dir_name: file_name(dir),
        category_dir: category_dir.to_string(),
        manifest: UnitManifest {
            id,
            name: raw.name,
            description: raw.description,
            icon: raw.icon,
            major_category: raw.major_category,
            sub_category: raw.sub_category,
            tags: raw.tags,
            roles: raw.roles,
            order: raw.order,
            enabled_plugins: raw.enabled_plugins,
            include_content: raw.include_content,
            include_ai_content: raw.include_ai_content,
        },
        body,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTheme {
    id: Option<String>,
    name: String,
    colors: ThemeColors,
    fonts: ThemeFonts,
    order: i64,
}

/// Load the theme in `dir`. `theme_root` is only used to record where in the
/// theme tree the theme was found.
pub fn load_theme(
    dir: &Path,
    theme_root: &Path,
    layout: &LayoutConfig,
) -> Result<Option<ThemeUnit>, LoadError> {
    let manifest_path = dir.join(&layout.manifest);
    let Some(raw) = read_descriptor::<RawTheme>(&manifest_path)? else {
        return Ok(None);
    };
    let id = raw.id.ok_or(LoadError::Schema {
        path: manifest_path,
        field: "id",
    })?;
    let rel_dir = match dir.strip_prefix(theme_root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => file_name(dir),
    };

    Ok(Some(ThemeUnit {
        id,
        name: raw.name,
        colors: raw.colors,
        fonts: raw.fonts,
        order: raw.order,
        rel_dir,
    }))
}

fn file_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
