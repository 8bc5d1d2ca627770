//! Shared test utilities: fixture setup and small writers for building data
//! trees in temp directories.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! write_unit(tmp.path(), "report", "extra", r#"{"id": "extra"}"#, None);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/data/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Writers
// =========================================================================

/// Write `contents` to `path`, creating parent directories.
pub fn write_json(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Create `root/<category>/<dir>/manifest.json` and, when given,
/// `content.json` next to it.
pub fn write_unit(root: &Path, category: &str, dir: &str, manifest: &str, content: Option<&str>) {
    let unit_dir = root.join(category).join(dir);
    write_json(&unit_dir.join("manifest.json"), manifest);
    if let Some(content) = content {
        write_json(&unit_dir.join("content.json"), content);
    }
}
