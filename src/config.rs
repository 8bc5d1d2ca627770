//! Build configuration.
//!
//! The data tree layout and the output file names are configurable through an
//! optional `config.toml` in the data root. Every key is optional; the stock
//! defaults match the layout the downstream application expects:
//!
//! ```toml
//! [layout]
//! manifest = "manifest.json"          # Primary descriptor of a unit
//! content = "content.json"            # Optional body descriptor of a unit
//! index = "_meta.json"                # Root-level category index
//! reserved_prefix = "_"               # Top-level directories to skip
//! theme_category = "ppt-theme"        # Scanned recursively, no resource file
//! default_category_icon = "📋"
//!
//! [output]
//! templates_module = "doc-templates.generated.ts"
//! themes_module = "ppt-themes.generated.ts"
//! categories_module = "doc-template-categories.generated.ts"
//! resource_dir = "json"               # Per-category JSON files, under the output dir
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the optional configuration file in the data root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Explicit inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Data root holding the category index and category directories.
    pub source: PathBuf,
    /// Directory receiving the generated modules and the resource directory.
    pub output: PathBuf,
    pub build: BuildConfig,
}

impl PipelineConfig {
    /// Resolve a run against `source`, loading `config.toml` from it if present.
    pub fn load(source: &Path, output: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            build: load_config(source)?,
        })
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Where descriptors live in the data tree.
    pub layout: LayoutConfig,
    /// Names of the generated artifacts.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub manifest: String,
    pub content: String,
    pub index: String,
    pub reserved_prefix: String,
    pub theme_category: String,
    pub default_category_icon: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            manifest: "manifest.json".to_string(),
            content: "content.json".to_string(),
            index: "_meta.json".to_string(),
            reserved_prefix: "_".to_string(),
            theme_category: "ppt-theme".to_string(),
            default_category_icon: "📋".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Whether a top-level directory name starts with the reserved prefix.
    pub fn is_reserved(&self, dir_name: &str) -> bool {
        dir_name.starts_with(&self.reserved_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub templates_module: String,
    pub themes_module: String,
    pub categories_module: String,
    pub resource_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            templates_module: "doc-templates.generated.ts".to_string(),
            themes_module: "ppt-themes.generated.ts".to_string(),
            categories_module: "doc-template-categories.generated.ts".to_string(),
            resource_dir: "json".to_string(),
        }
    }
}

impl BuildConfig {
    /// Validate that every name is usable as a single path component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("layout.manifest", &self.layout.manifest),
            ("layout.content", &self.layout.content),
            ("layout.index", &self.layout.index),
            ("layout.theme_category", &self.layout.theme_category),
            ("output.templates_module", &self.output.templates_module),
            ("output.themes_module", &self.output.themes_module),
            ("output.categories_module", &self.output.categories_module),
            ("output.resource_dir", &self.output.resource_dir),
        ];
        for (key, value) in names {
            if !is_plain_component(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got {value:?}"
                )));
            }
        }
        if self.layout.reserved_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "layout.reserved_prefix must not be empty".into(),
            ));
        }
        if self.layout.is_reserved(&self.layout.theme_category) {
            return Err(ConfigError::Validation(
                "layout.theme_category must not start with layout.reserved_prefix".into(),
            ));
        }
        Ok(())
    }
}

/// True when `name` is exactly one normal path component (no separators,
/// no `.`/`..`, not empty).
pub fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

/// Load `config.toml` from the data root, falling back to stock defaults when
/// the file does not exist.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(BuildConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: BuildConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# doc-templates configuration
# ===========================
# Place this file at the root of the data directory. All settings are
# optional; values shown below are the defaults. Unknown keys are an error.

# ---------------------------------------------------------------------------
# Data tree layout
# ---------------------------------------------------------------------------
[layout]
# Primary descriptor of a template or theme. A directory without one is skipped.
manifest = "manifest.json"

# Optional body descriptor next to the manifest (authorNotes, content,
# aiGeneratedContent, pluginData).
content = "content.json"

# Root-level category index. When missing, no category module and no
# resource files are produced.
index = "_meta.json"

# Top-level directories starting with this prefix are not scanned for the
# builtin catalog.
reserved_prefix = "_"

# Category holding presentation themes. Scanned recursively and never
# written as a resource file.
theme_category = "ppt-theme"

# Icon used for categories that do not set one.
default_category_icon = "📋"

# ---------------------------------------------------------------------------
# Generated artifacts (relative to the output directory)
# ---------------------------------------------------------------------------
[output]
templates_module = "doc-templates.generated.ts"
themes_module = "ppt-themes.generated.ts"
categories_module = "doc-template-categories.generated.ts"

# One <category key>.json per indexed category.
resource_dir = "json"
"##
}
