//! Shared record types produced by loading and consumed by both emitters.
//!
//! Every record is built once per run from the data tree and never mutated
//! after aggregation. Field names serialize in camelCase to match the JSON
//! shape the consuming application reads.

use serde::Serialize;

/// Value of the `source` field on every unit this pipeline emits.
pub const BUILTIN_SOURCE: &str = "builtin";

/// One document template, with its body already merged in.
///
/// Serializes to the full-fidelity shape written to resource files; field
/// order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// From the manifest's `majorCategory`, falling back to the directory
    /// the unit was found in.
    pub major_category: String,
    pub sub_category: String,
    pub author_notes: String,
    pub content: String,
    pub tags: Vec<String>,
    pub roles: Vec<String>,
    pub order: i64,
    pub enabled_plugins: Vec<String>,
    pub include_content: bool,
    pub include_ai_content: bool,
    pub source: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ai_generated_content: String,
    /// Opaque payload from the body descriptor. `None` when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_data: Option<serde_json::Value>,
    /// Name of the directory the manifest was found in.
    #[serde(skip)]
    pub dir_name: String,
}

/// A presentation theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeUnit {
    pub id: String,
    pub name: String,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub order: i64,
    /// Path of the theme directory relative to the theme root (`.` for the
    /// root itself).
    #[serde(skip)]
    pub rel_dir: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeFonts {
    pub title: String,
    pub body: String,
}

/// An entry of the root category index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Identifier, directory name and resource file stem.
    pub key: String,
    pub name: String,
    pub icon: String,
    pub order: i64,
}
