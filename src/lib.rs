//! # doc-templates
//!
//! Compiles a directory tree of document templates and presentation themes
//! into TypeScript modules and per-category JSON resource files for the
//! application that ships them. The directory tree is the source of truth;
//! this crate only validates, orders and serializes it. There is no
//! interpolation or rendering of template bodies.
//!
//! # Pipeline
//!
//! ```text
//! data/_meta.json ──► index ──┐
//!                             ├──► aggregate ──► Catalog ──┬──► codegen   ──► *.generated.ts
//! data/<category>/ ─► scan ───┘                            └──► resources ──► json/<key>.json
//! ```
//!
//! All descriptors are loaded and every artifact is rendered in memory before
//! anything is written, so a malformed descriptor aborts the run with the
//! output directory untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading (layout and output names) and the explicit [`config::PipelineConfig`] |
//! | [`manifest`] | Loads one unit's `manifest.json` and optional `content.json` |
//! | [`index`] | Loads the root category index |
//! | [`scan`] | Walks the data tree: flat for templates, recursive for themes |
//! | [`aggregate`] | Merges bodies, checks ids, applies the orderings, builds the [`aggregate::Catalog`] |
//! | [`codegen`] | Renders the TypeScript modules |
//! | [`resources`] | Renders the per-category JSON resource files |
//! | [`pipeline`] | `run` / `check` entry points and artifact writing |
//! | [`output`] | CLI summary formatting |
//! | [`types`] | Record types shared by loading and emission |

pub mod aggregate;
pub mod codegen;
pub mod config;
pub mod index;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod resources;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
