//! Data tree scanning.
//!
//! Walks the data root and loads every unit it finds. The expected layout:
//!
//! ```text
//! data/
//! ├── _meta.json                  # Category index (see `index`)
//! ├── config.toml                 # Build config (optional)
//! ├── report/                     # Category directory (flat scan)
//! │   ├── weekly-report/
//! │   │   ├── manifest.json
//! │   │   └── content.json
//! │   └── notes/                  # No manifest: skipped
//! ├── _drafts/                    # Reserved prefix: skipped unless indexed
//! └── ppt-theme/                  # Theme category (recursive scan)
//!     ├── classic/manifest.json
//!     └── dark/
//!         └── midnight/manifest.json
//! ```
//!
//! ## Strategies
//!
//! Templates always sit exactly two levels below the root (category/unit), so
//! category directories are scanned [`ScanStrategy::Flat`]. Themes may be
//! grouped into families at any depth, so the theme category is scanned
//! [`ScanStrategy::Recursive`].
//!
//! Entries are visited in file-name order, which makes discovery order, and
//! therefore every stable sort downstream, reproducible across runs and
//! filesystems. Hidden entries (leading `.`) are ignored. Symlinked
//! directories are not followed by either strategy.

use crate::config::LayoutConfig;
use crate::manifest::{self, LoadError, LoadedUnit};
use crate::types::ThemeUnit;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot walk theme directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// How a category directory is searched for units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// One unit per immediate subdirectory.
    Flat,
    /// One unit per directory anywhere in the subtree, the root included.
    Recursive,
}

impl ScanStrategy {
    pub fn for_category(dir_name: &str, layout: &LayoutConfig) -> Self {
        if dir_name == layout.theme_category {
            Self::Recursive
        } else {
            Self::Flat
        }
    }
}

/// Templates found in one category directory, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDir {
    pub name: String,
    /// Reserved directories are only scanned because the index lists them;
    /// they never contribute to the builtin catalog.
    pub reserved: bool,
    pub units: Vec<LoadedUnit>,
}

/// Everything loaded from the data tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Category directories in name order.
    pub categories: Vec<CategoryDir>,
    /// Themes in discovery order.
    pub themes: Vec<ThemeUnit>,
}

impl ScanResult {
    pub fn category(&self, name: &str) -> Option<&CategoryDir> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Scan the data root.
///
/// `indexed` holds the category keys from the index; reserved directories are
/// scanned only when listed there. A missing root yields an empty result.
pub fn scan(
    root: &Path,
    layout: &LayoutConfig,
    indexed: &BTreeSet<String>,
) -> Result<ScanResult, ScanError> {
    let mut result = ScanResult::default();
    if !root.is_dir() {
        tracing::debug!("data root {} does not exist", root.display());
        return Ok(result);
    }

    for dir in collect_subdirs(root)? {
        let name = dir_name(&dir);
        let reserved = layout.is_reserved(&name);
        if reserved && !indexed.contains(&name) {
            tracing::debug!("skipping reserved directory {}", dir.display());
            continue;
        }

        match ScanStrategy::for_category(&name, layout) {
            ScanStrategy::Recursive => {
                result.themes = scan_recursive(&dir, layout)?;
            }
            ScanStrategy::Flat => {
                let units = scan_flat(&dir, &name, layout)?;
                result.categories.push(CategoryDir {
                    name,
                    reserved,
                    units,
                });
            }
        }
    }

    Ok(result)
}

/// Load one template per immediate subdirectory of `dir`.
pub fn scan_flat(
    dir: &Path,
    category_dir: &str,
    layout: &LayoutConfig,
) -> Result<Vec<LoadedUnit>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut units = Vec::new();
    for unit_dir in collect_subdirs(dir)? {
        match manifest::load_unit(&unit_dir, category_dir, layout)? {
            Some(unit) => units.push(unit),
            None => tracing::debug!("no manifest in {}, skipping", unit_dir.display()),
        }
    }
    Ok(units)
}

/// Load one theme per directory in the subtree rooted at `dir`.
pub fn scan_recursive(dir: &Path, layout: &LayoutConfig) -> Result<Vec<ThemeUnit>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut themes = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(theme) = manifest::load_theme(entry.path(), dir, layout)? {
            themes.push(theme);
        }
    }
    Ok(themes)
}

/// Visible subdirectories of `path`, sorted by name. Symlinks are skipped,
/// matching the recursive walk.
fn collect_subdirs(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let read_err = |source| ScanError::ReadDir {
        path: path.to_path_buf(),
        source,
    };
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();
        if is_dir && !is_hidden(&entry.file_name().to_string_lossy()) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_fixtures, write_json, write_unit};
    use tempfile::TempDir;

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn unit_ids(dir: &CategoryDir) -> Vec<&str> {
        dir.units.iter().map(|u| u.manifest.id.as_str()).collect()
    }

    #[test]
    fn strategy_selected_per_category() {
        assert_eq!(
            ScanStrategy::for_category("ppt-theme", &layout()),
            ScanStrategy::Recursive
        );
        assert_eq!(
            ScanStrategy::for_category("report", &layout()),
            ScanStrategy::Flat
        );
    }

    #[test]
    fn scan_fixtures_finds_categories_and_themes() {
        let tmp = setup_fixtures();
        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();

        let names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["article", "report"]);
        assert_eq!(result.themes.len(), 3);
    }

    #[test]
    fn flat_scan_visits_units_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), "report", "zeta", r#"{"id": "z"}"#, None);
        write_unit(tmp.path(), "report", "alpha", r#"{"id": "a"}"#, None);

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert_eq!(unit_ids(result.category("report").unwrap()), vec!["a", "z"]);
    }

    #[test]
    fn directory_without_manifest_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), "report", "real", r#"{"id": "real"}"#, None);
        fs::create_dir_all(tmp.path().join("report/empty")).unwrap();
        fs::write(tmp.path().join("report/empty/readme.txt"), "nothing").unwrap();

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert_eq!(unit_ids(result.category("report").unwrap()), vec!["real"]);
    }

    #[test]
    fn empty_category_directory_yields_no_units() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("general")).unwrap();

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert!(result.category("general").unwrap().units.is_empty());
    }

    #[test]
    fn missing_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &layout(), &BTreeSet::new()).unwrap();
        assert_eq!(result, ScanResult::default());
    }

    #[test]
    fn top_level_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_json(&tmp.path().join("_meta.json"), r#"{"categories": []}"#);
        fs::write(tmp.path().join("README.md"), "# data").unwrap();

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert!(result.categories.is_empty());
    }

    #[test]
    fn reserved_directory_skipped_unless_indexed() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), "_drafts", "wip", r#"{"id": "wip"}"#, None);

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert!(result.category("_drafts").is_none());

        let indexed = BTreeSet::from(["_drafts".to_string()]);
        let result = scan(tmp.path(), &layout(), &indexed).unwrap();
        let drafts = result.category("_drafts").unwrap();
        assert!(drafts.reserved);
        assert_eq!(unit_ids(drafts), vec!["wip"]);
    }

    #[test]
    fn malformed_unit_in_reserved_directory_ignored_when_not_indexed() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), "_broken", "x", "{", None);

        assert!(scan(tmp.path(), &layout(), &BTreeSet::new()).is_ok());
    }

    #[test]
    fn hidden_directories_ignored() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), ".git", "objects", r#"{"id": "x"}"#, None);
        write_unit(tmp.path(), "report", ".cache", r#"{"id": "y"}"#, None);

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert!(result.category(".git").is_none());
        assert!(result.category("report").unwrap().units.is_empty());
    }

    #[test]
    fn theme_category_not_scanned_as_templates() {
        let tmp = TempDir::new().unwrap();
        write_json(&tmp.path().join("ppt-theme/blue/manifest.json"), r#"{"id": "blue"}"#);

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        assert!(result.category("ppt-theme").is_none());
        assert_eq!(result.themes[0].id, "blue");
    }

    #[test]
    fn recursive_scan_finds_themes_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        let themes = tmp.path().join("ppt-theme");
        write_json(&themes.join("manifest.json"), r#"{"id": "root"}"#);
        write_json(&themes.join("classic/manifest.json"), r#"{"id": "classic"}"#);
        write_json(&themes.join("dark/midnight/manifest.json"), r#"{"id": "midnight"}"#);
        write_json(&themes.join("dark/a/b/c/manifest.json"), r#"{"id": "deep"}"#);
        fs::create_dir_all(themes.join("dark/empty")).unwrap();

        let found = scan_recursive(&themes, &layout()).unwrap();
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "classic", "deep", "midnight"]);
    }

    #[test]
    fn recursive_scan_of_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_recursive(&tmp.path().join("ppt-theme"), &layout())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_manifest_propagates() {
        let tmp = TempDir::new().unwrap();
        write_unit(tmp.path(), "report", "broken", r#"{"id": "#, None);

        let err = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap_err();
        match err {
            ScanError::Load(LoadError::Parse { path, .. }) => {
                assert!(path.ends_with("report/broken/manifest.json"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_theme_propagates() {
        let tmp = TempDir::new().unwrap();
        write_json(&tmp.path().join("ppt-theme/a/b/manifest.json"), "[");

        assert!(matches!(
            scan(tmp.path(), &layout(), &BTreeSet::new()),
            Err(ScanError::Load(LoadError::Parse { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_skipped_by_both_strategies() {
        let tmp = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        write_unit(elsewhere.path(), "shared", "linked", r#"{"id": "linked"}"#, None);
        write_json(
            &elsewhere.path().join("themes/linked/manifest.json"),
            r#"{"id": "linked"}"#,
        );
        write_unit(tmp.path(), "report", "real", r#"{"id": "real"}"#, None);
        write_json(&tmp.path().join("ppt-theme/real/manifest.json"), r#"{"id": "real"}"#);
        std::os::unix::fs::symlink(
            elsewhere.path().join("shared/linked"),
            tmp.path().join("report/linked"),
        )
        .unwrap();
        std::os::unix::fs::symlink(
            elsewhere.path().join("themes"),
            tmp.path().join("ppt-theme/family"),
        )
        .unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("shared"), tmp.path().join("shared"))
            .unwrap();

        let result = scan(tmp.path(), &layout(), &BTreeSet::new()).unwrap();
        let names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["report"]);
        assert_eq!(unit_ids(&result.categories[0]), vec!["real"]);
        let theme_ids: Vec<&str> = result.themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(theme_ids, vec!["real"]);
    }
}
