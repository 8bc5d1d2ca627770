//! Root-level category index (`_meta.json`).
//!
//! ```json
//! {
//!   "schemaVersion": "1.0",
//!   "categories": [
//!     { "key": "report", "name": "Reports", "icon": "📊", "order": 0 },
//!     { "key": "ppt-theme", "name": "Slide themes", "icon": "🎨", "order": 7 }
//!   ]
//! }
//! ```
//!
//! The index decides which categories get a resource file and feeds the
//! category module. Keys are not checked for uniqueness: two entries with the
//! same key write the same resource file and the later one wins.

use crate::config::{LayoutConfig, is_plain_component};
use crate::manifest::{LoadError, read_descriptor};
use crate::types::Category;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIndex {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategory {
    key: Option<String>,
    name: Option<String>,
    icon: Option<String>,
    order: i64,
}

/// Load the category index from the data root.
///
/// Returns `Ok(None)` when the index file does not exist; callers treat that
/// as "no categories" and carry on.
pub fn load_categories(
    root: &Path,
    layout: &LayoutConfig,
) -> Result<Option<Vec<Category>>, LoadError> {
    let path = root.join(&layout.index);
    let Some(raw) = read_descriptor::<RawIndex>(&path)? else {
        return Ok(None);
    };

    let mut categories = Vec::with_capacity(raw.categories.len());
    for entry in raw.categories {
        let Some(key) = entry.key else {
            return Err(LoadError::Schema { path, field: "key" });
        };
        if !is_plain_component(&key) {
            return Err(LoadError::InvalidKey { path, key });
        }
        let Some(name) = entry.name else {
            return Err(LoadError::Schema { path, field: "name" });
        };
        categories.push(Category {
            key,
            name,
            icon: entry
                .icon
                .unwrap_or_else(|| layout.default_category_icon.clone()),
            order: entry.order,
        });
    }
    Ok(Some(categories))
}
