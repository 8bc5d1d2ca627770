//! Merging, ordering and grouping of loaded units into a [`Catalog`].
//!
//! The catalog is the fully-materialized snapshot both emitters work from:
//! nothing downstream touches the filesystem again.
//!
//! ## Orderings
//!
//! Three independent orders, all stable:
//!
//! | List | Key | Final tiebreak |
//! |------|-----|----------------|
//! | builtin catalog | (`majorCategory`, `order`) | discovery order |
//! | themes | `order` | discovery order |
//! | per-category resource | `order` | unit directory name |
//!
//! Resource lists are already partitioned by category, so the category key
//! would be redundant there.
//!
//! ## Merging
//!
//! Body text always comes from the body descriptor. The manifest only wins for
//! `includeContent` / `includeAiContent`, which otherwise default to whether
//! the matching body field is non-empty.

use crate::config::LayoutConfig;
use crate::manifest::LoadedUnit;
use crate::scan::ScanResult;
use crate::types::{BUILTIN_SOURCE, Category, ContentUnit, ThemeUnit};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("duplicate id {id:?} in {category}: {first} and {second}")]
    DuplicateId {
        category: String,
        id: String,
        first: String,
        second: String,
    },
}

/// One resource file's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResource {
    pub category: Category,
    pub units: Vec<ContentUnit>,
}

/// Sorted snapshot of the whole data tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// All indexed categories in index order, theme category included.
    pub categories: Vec<Category>,
    /// Whether the category index file was found.
    pub index_found: bool,
    pub builtin: Vec<ContentUnit>,
    pub themes: Vec<ThemeUnit>,
    /// Indexed categories minus the theme category, in index order.
    pub resources: Vec<CategoryResource>,
}

/// Combine a loaded manifest with its optional body into a unit record.
pub fn merge_unit(loaded: &LoadedUnit) -> ContentUnit {
    let manifest = &loaded.manifest;
    let body = loaded.body.clone().unwrap_or_default();

    ContentUnit {
        id: manifest.id.clone(),
        name: manifest.name.clone(),
        description: manifest.description.clone(),
        icon: manifest.icon.clone(),
        major_category: manifest
            .major_category
            .clone()
            .unwrap_or_else(|| loaded.category_dir.clone()),
        sub_category: manifest.sub_category.clone(),
        tags: manifest.tags.clone(),
        roles: manifest.roles.clone(),
        order: manifest.order,
        enabled_plugins: manifest.enabled_plugins.clone(),
        include_content: manifest
            .include_content
            .unwrap_or(!body.content.is_empty()),
        include_ai_content: manifest
            .include_ai_content
            .unwrap_or(!body.ai_generated_content.is_empty()),
        plugin_data: body.plugin_data.filter(is_meaningful),
        author_notes: body.author_notes,
        content: body.content,
        ai_generated_content: body.ai_generated_content,
        source: BUILTIN_SOURCE,
        dir_name: loaded.dir_name.clone(),
    }
}

/// Whether a JSON payload carries anything: `null`, `false`, `0`, `""`, `[]`
/// and `{}` do not.
pub fn is_meaningful(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub fn sort_builtin(units: &mut [ContentUnit]) {
    units.sort_by(|a, b| {
        a.major_category
            .cmp(&b.major_category)
            .then(a.order.cmp(&b.order))
    });
}

pub fn sort_themes(themes: &mut [ThemeUnit]) {
    themes.sort_by_key(|t| t.order);
}

pub fn sort_resource(units: &mut [ContentUnit]) {
    units.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.dir_name.cmp(&b.dir_name)));
}

fn check_unique<'a>(
    category: &str,
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<(), AggregateError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (id, location) in entries {
        if let Some(first) = seen.insert(id, location) {
            return Err(AggregateError::DuplicateId {
                category: category.to_string(),
                id: id.to_string(),
                first: first.to_string(),
                second: location.to_string(),
            });
        }
    }
    Ok(())
}

/// Build the catalog from the category index and the scanned tree.
///
/// `categories` is `None` when the index file was missing.
pub fn aggregate(
    categories: Option<Vec<Category>>,
    scanned: &ScanResult,
    layout: &LayoutConfig,
) -> Result<Catalog, AggregateError> {
    for dir in &scanned.categories {
        check_unique(
            &dir.name,
            dir.units
                .iter()
                .map(|u| (u.manifest.id.as_str(), u.dir_name.as_str())),
        )?;
    }
    check_unique(
        &layout.theme_category,
        scanned
            .themes
            .iter()
            .map(|t| (t.id.as_str(), t.rel_dir.as_str())),
    )?;

    let mut builtin: Vec<ContentUnit> = scanned
        .categories
        .iter()
        .filter(|dir| !dir.reserved)
        .flat_map(|dir| dir.units.iter().map(merge_unit))
        .collect();
    sort_builtin(&mut builtin);

    let mut themes = scanned.themes.clone();
    sort_themes(&mut themes);

    let index_found = categories.is_some();
    let categories = categories.unwrap_or_default();
    let resources = categories
        .iter()
        .filter(|c| c.key != layout.theme_category)
        .map(|category| {
            let mut units: Vec<ContentUnit> = scanned
                .category(&category.key)
                .map(|dir| dir.units.iter().map(merge_unit).collect())
                .unwrap_or_default();
            sort_resource(&mut units);
            CategoryResource {
                category: category.clone(),
                units,
            }
        })
        .collect();

    Ok(Catalog {
        categories,
        index_found,
        builtin,
        themes,
        resources,
    })
}
