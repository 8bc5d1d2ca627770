//! TypeScript module generation.
//!
//! Each module is a pure function of the sorted catalog: a generated-file
//! header, an interface describing the record shape, and an exported constant
//! array literal.
//!
//! ```text
//! /**
//!  * Auto-generated file. Do not edit by hand.
//!  * ...
//!  */
//!
//! export interface BuiltinDocTemplate { ... }
//!
//! export const BUILT_IN_DOC_TEMPLATES: BuiltinDocTemplate[] = [
//!   { id: "weekly", name: "Weekly", ..., tags: ["a", "b"], order: 2, source: "builtin" },
//! ];
//! ```
//!
//! Strings are written as JSON string literals, which are valid TypeScript:
//! quotes, backslashes and control characters are escaped, everything else
//! (including non-ASCII text) is kept verbatim. Integers are unquoted. The
//! header carries no timestamp, so unchanged input yields identical bytes.
//!
//! The builtin catalog is intentionally light: body text and plugin data live
//! only in the resource files (see [`crate::resources`]).

use crate::types::{Category, ContentUnit, ThemeUnit};

const HEADER: &str = "/**
 * Auto-generated file. Do not edit by hand.
 * Produced by `doc-templates build` from the template data directory.
 */
";

const CATEGORY_TYPE: &str = "builtin";

/// Escape a string as a TypeScript string literal.
pub fn ts_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// A bracketed list literal of escaped strings, `[]` when empty.
pub fn ts_string_list(items: &[String]) -> String {
    let parts: Vec<String> = items.iter().map(|s| ts_string(s)).collect();
    format!("[{}]", parts.join(", "))
}

fn array_body(entries: &[String]) -> String {
    if entries.is_empty() {
        String::new()
    } else {
        format!("{}\n", entries.join("\n"))
    }
}

/// Module exporting `BUILT_IN_DOC_TEMPLATES`.
pub fn render_templates_module(units: &[ContentUnit]) -> String {
    let entries: Vec<String> = units
        .iter()
        .map(|t| {
            format!(
                "  {{ id: {}, name: {}, description: {}, icon: {}, majorCategory: {}, \
                 subCategory: {}, tags: {}, roles: {}, order: {}, source: {} }},",
                ts_string(&t.id),
                ts_string(&t.name),
                ts_string(&t.description),
                ts_string(&t.icon),
                ts_string(&t.major_category),
                ts_string(&t.sub_category),
                ts_string_list(&t.tags),
                ts_string_list(&t.roles),
                t.order,
                ts_string(t.source),
            )
        })
        .collect();

    format!(
        "{HEADER}
export interface BuiltinDocTemplate {{
  id: string;
  name: string;
  description: string;
  icon: string;
  majorCategory: string;
  subCategory: string;
  tags: string[];
  roles: string[];
  order: number;
  source: string;
}}

export const BUILT_IN_DOC_TEMPLATES: BuiltinDocTemplate[] = [
{}];
",
        array_body(&entries)
    )
}

/// Module exporting `BUILT_IN_PPT_THEMES` and, when there is at least one
/// theme, `DEFAULT_PPT_THEME` (the first theme in order).
pub fn render_themes_module(themes: &[ThemeUnit]) -> String {
    let entries: Vec<String> = themes
        .iter()
        .map(|t| {
            let c = &t.colors;
            let f = &t.fonts;
            [
                "  {".to_string(),
                format!("    id: {},", ts_string(&t.id)),
                format!("    name: {},", ts_string(&t.name)),
                format!(
                    "    colors: {{ primary: {}, secondary: {}, background: {}, text: {}, accent: {} }},",
                    ts_string(&c.primary),
                    ts_string(&c.secondary),
                    ts_string(&c.background),
                    ts_string(&c.text),
                    ts_string(&c.accent),
                ),
                format!(
                    "    fonts: {{ title: {}, body: {} }},",
                    ts_string(&f.title),
                    ts_string(&f.body)
                ),
                format!("    order: {},", t.order),
                "  },".to_string(),
            ]
            .join("\n")
        })
        .collect();

    let default_export = if themes.is_empty() {
        ""
    } else {
        "\nexport const DEFAULT_PPT_THEME: PptTheme = BUILT_IN_PPT_THEMES[0];\n"
    };

    format!(
        "{HEADER}
export interface PptTheme {{
  id: string;
  name: string;
  colors: {{
    primary: string;
    secondary: string;
    background: string;
    text: string;
    accent: string;
  }};
  fonts: {{
    title: string;
    body: string;
  }};
  order: number;
}}

export const BUILT_IN_PPT_THEMES: PptTheme[] = [
{}];
{default_export}",
        array_body(&entries)
    )
}

/// Module exporting `DEFAULT_DOC_TEMPLATE_CATEGORIES`, in index order.
pub fn render_categories_module(categories: &[Category]) -> String {
    let entries: Vec<String> = categories
        .iter()
        .map(|c| {
            format!(
                "  {{ key: {}, label: {}, icon: {}, order: {}, category_type: {} }},",
                ts_string(&c.key),
                ts_string(&c.name),
                ts_string(&c.icon),
                c.order,
                ts_string(CATEGORY_TYPE),
            )
        })
        .collect();

    format!(
        "{HEADER}
export interface DocTemplateCategory {{
  key: string;
  label: string;
  icon: string;
  order: number;
  category_type: string;
}}

export const DEFAULT_DOC_TEMPLATE_CATEGORIES: DocTemplateCategory[] = [
{}];
",
        array_body(&entries)
    )
}
