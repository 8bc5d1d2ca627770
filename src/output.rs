//! CLI output formatting for build and check runs.
//!
//! Output is a per-artifact inventory: every generated file with the number
//! of records it holds, followed by any warnings.
//!
//! ```text
//! Modules
//!     3 themes → ppt-themes.generated.ts
//!     8 categories → doc-template-categories.generated.ts
//!     12 templates → doc-templates.generated.ts
//!
//! Resources
//!     4 templates → json/report.json
//!     0 templates → json/general.json
//!     Total: 4 templates in 2 files
//!
//! Warnings
//!     no themes found; ppt-themes.generated.ts not produced
//! ```
//!
//! [`format_build_report`] is pure and returns lines for testability;
//! [`print_build_report`] writes them to stdout.

use crate::pipeline::{ArtifactKind, BuildReport};

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display a relative artifact path with forward slashes on every platform.
fn display_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Format the summary of a build or check run.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    let modules: Vec<_> = report
        .artifacts
        .iter()
        .filter(|a| a.kind != ArtifactKind::Resource)
        .collect();
    if !modules.is_empty() {
        lines.push("Modules".to_string());
        for artifact in modules {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                artifact.count,
                artifact.kind,
                display_path(&artifact.path)
            ));
        }
    }

    let resources: Vec<_> = report
        .artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::Resource)
        .collect();
    if !resources.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Resources".to_string());
        for artifact in &resources {
            lines.push(format!(
                "{}{} → {}",
                indent(1),
                plural(artifact.count, "template", "templates"),
                display_path(&artifact.path)
            ));
        }
        lines.push(format!(
            "{}Total: {} in {}",
            indent(1),
            plural(report.resource_units(), "template", "templates"),
            plural(resources.len(), "file", "files")
        ));
    }

    if !report.warnings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}
