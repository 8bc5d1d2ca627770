//! Pipeline entry points: load → aggregate → render → write.
//!
//! Everything is loaded and rendered in memory before the first byte is
//! written, so a malformed descriptor anywhere in the tree leaves the output
//! directory untouched. Writes themselves are not transactional: if writing
//! one file fails, files written before it stay. Re-running is always safe
//! since output is a deterministic function of the input tree.

use crate::aggregate::{self, AggregateError, Catalog};
use crate::codegen;
use crate::config::{ConfigError, PipelineConfig};
use crate::index;
use crate::manifest::LoadError;
use crate::resources::{self, EmitError};
use crate::scan::{self, ScanError};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Templates,
    Themes,
    Categories,
    Resource,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Templates => "templates",
            Self::Themes => "themes",
            Self::Categories => "categories",
            Self::Resource => "resource templates",
        };
        f.write_str(label)
    }
}

/// One output file, rendered but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
    /// Number of records in the file.
    pub count: usize,
}

/// Non-fatal conditions collected during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The category index file is missing.
    MissingIndex(PathBuf),
    /// Nothing to put in a module, so it was not produced.
    EmptyCatalog { kind: ArtifactKind, file: PathBuf },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIndex(path) => write!(
                f,
                "category index {} not found; no categories or resource files produced",
                path.display()
            ),
            Self::EmptyCatalog { kind, file } => {
                write!(f, "no {kind} found; {} not produced", file.display())
            }
        }
    }
}

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<Warning>,
    /// Whether artifacts were written (false for `check`).
    pub written: bool,
}

impl BuildReport {
    fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.count)
            .sum()
    }

    pub fn templates(&self) -> usize {
        self.count(ArtifactKind::Templates)
    }

    pub fn themes(&self) -> usize {
        self.count(ArtifactKind::Themes)
    }

    pub fn categories(&self) -> usize {
        self.count(ArtifactKind::Categories)
    }

    /// Units across all resource files.
    pub fn resource_units(&self) -> usize {
        self.count(ArtifactKind::Resource)
    }

    pub fn resource_files(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::Resource)
            .count()
    }
}

/// Load the index, scan the tree and aggregate everything into a catalog.
pub fn load_catalog(config: &PipelineConfig) -> Result<(Catalog, Vec<Warning>), BuildError> {
    let layout = &config.build.layout;
    let mut warnings = Vec::new();

    let categories = index::load_categories(&config.source, layout)?;
    if categories.is_none() {
        warnings.push(Warning::MissingIndex(config.source.join(&layout.index)));
    }
    let indexed: BTreeSet<String> = categories
        .iter()
        .flatten()
        .map(|c| c.key.clone())
        .collect();

    let scanned = scan::scan(&config.source, layout, &indexed)?;
    let catalog = aggregate::aggregate(categories, &scanned, layout)?;
    Ok((catalog, warnings))
}

/// Render every artifact of a catalog. Empty modules are skipped with a
/// warning; resource files are produced for every indexed category.
pub fn render(
    catalog: &Catalog,
    config: &PipelineConfig,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<Artifact>, BuildError> {
    let names = &config.build.output;
    let mut artifacts = Vec::new();

    let modules = [
        (
            ArtifactKind::Themes,
            &names.themes_module,
            catalog.themes.len(),
            codegen::render_themes_module(&catalog.themes),
        ),
        (
            ArtifactKind::Categories,
            &names.categories_module,
            catalog.categories.len(),
            codegen::render_categories_module(&catalog.categories),
        ),
        (
            ArtifactKind::Templates,
            &names.templates_module,
            catalog.builtin.len(),
            codegen::render_templates_module(&catalog.builtin),
        ),
    ];
    for (kind, file, count, contents) in modules {
        let path = PathBuf::from(file);
        if count == 0 {
            // A missing index is already reported on its own.
            if kind != ArtifactKind::Categories || catalog.index_found {
                warnings.push(Warning::EmptyCatalog { kind, file: path });
            }
            continue;
        }
        artifacts.push(Artifact {
            kind,
            path,
            contents,
            count,
        });
    }

    let resource_dir = Path::new(&names.resource_dir);
    for file in resources::render_resources(catalog)? {
        artifacts.push(Artifact {
            kind: ArtifactKind::Resource,
            path: resource_dir.join(file.file_name()),
            contents: file.contents,
            count: file.units,
        });
    }

    Ok(artifacts)
}

/// Write rendered artifacts below `output`, creating directories as needed.
pub fn write_artifacts(output: &Path, artifacts: &[Artifact]) -> Result<(), BuildError> {
    for artifact in artifacts {
        let path = output.join(&artifact.path);
        let write_err = |source| BuildError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&path, &artifact.contents).map_err(write_err)?;
        tracing::debug!("wrote {} ({} {})", path.display(), artifact.count, artifact.kind);
    }
    Ok(())
}

fn prepare(config: &PipelineConfig) -> Result<BuildReport, BuildError> {
    let (catalog, mut warnings) = load_catalog(config)?;
    let artifacts = render(&catalog, config, &mut warnings)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    Ok(BuildReport {
        artifacts,
        warnings,
        written: false,
    })
}

/// Run the full pipeline and write the output.
pub fn run(config: &PipelineConfig) -> Result<BuildReport, BuildError> {
    let mut report = prepare(config)?;
    write_artifacts(&config.output, &report.artifacts)?;
    report.written = true;
    Ok(report)
}

/// Load, validate and render without writing anything.
pub fn check(config: &PipelineConfig) -> Result<BuildReport, BuildError> {
    prepare(config)
}
