//! Per-category JSON resource files.
//!
//! Unlike the builtin catalog, resource files carry every field of a unit,
//! body text included, for the application to load on demand:
//!
//! ```json
//! {
//!   "key": "report",
//!   "name": "Reports",
//!   "icon": "📊",
//!   "order": 0,
//!   "templates": [
//!     {
//!       "id": "weekly-report",
//!       "name": "Weekly report",
//!       ...
//!       "content": "# Weekly report\n...",
//!       "includeContent": true,
//!       "includeAiContent": false,
//!       "source": "builtin"
//!     }
//!   ]
//! }
//! ```
//!
//! `aiGeneratedContent` and `pluginData` are sparse: they appear only when
//! they carry something. The theme category never gets a resource file; that
//! filtering happens in [`crate::aggregate`].

use crate::aggregate::{Catalog, CategoryResource};
use crate::types::ContentUnit;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("cannot serialize resource file for category {key:?}: {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct ResourceDocument<'a> {
    key: &'a str,
    name: &'a str,
    icon: &'a str,
    order: i64,
    templates: &'a [ContentUnit],
}

/// A rendered resource file, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFile {
    /// Category key; the file is named `<key>.json`.
    pub key: String,
    pub contents: String,
    pub units: usize,
}

impl ResourceFile {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.key)
    }
}

/// Render one category as pretty-printed JSON (two-space indent, trailing
/// newline, non-ASCII kept verbatim).
pub fn render_resource(resource: &CategoryResource) -> Result<String, EmitError> {
    let category = &resource.category;
    let document = ResourceDocument {
        key: &category.key,
        name: &category.name,
        icon: &category.icon,
        order: category.order,
        templates: &resource.units,
    };
    let mut json = serde_json::to_string_pretty(&document).map_err(|source| EmitError::Json {
        key: category.key.clone(),
        source,
    })?;
    json.push('\n');
    Ok(json)
}

/// Render every resource file of the catalog, in index order.
pub fn render_resources(catalog: &Catalog) -> Result<Vec<ResourceFile>, EmitError> {
    catalog
        .resources
        .iter()
        .map(|resource| {
            Ok(ResourceFile {
                key: resource.category.key.clone(),
                contents: render_resource(resource)?,
                units: resource.units.len(),
            })
        })
        .collect()
}
