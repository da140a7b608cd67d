//! HTML rendering of the document state.
//!
//! The renderer reads the model only: indicators come from the glyph
//! registry and the `sorted` attribute from each column's [`SortState`].
//!
//! [`SortState`]: crate::sortable::SortState

use crate::config::PageConfig;
use crate::document::{CollapsibleSection, HeaderCell, ReportDocument, SortableTable, TableId};
use crate::error::Result;
use crate::glyph::{Glyph, GlyphRegistry};
use crate::sortable::SortKind;

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Renders a [`ReportDocument`] to HTML.
pub struct PageRenderer {
    config: PageConfig,
    glyphs: GlyphRegistry,
}

impl PageRenderer {
    /// Create a renderer with configuration.
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            glyphs: GlyphRegistry::default(),
        }
    }

    /// Create a renderer with default configuration.
    pub fn default_config() -> Self {
        Self::new(PageConfig::default())
    }

    /// Use a different glyph registry.
    pub fn with_glyphs(mut self, glyphs: GlyphRegistry) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Render a complete HTML page.
    pub fn render(&self, document: &ReportDocument) -> Result<String> {
        let html = self.generate_html(document);

        let output = if cfg!(debug_assertions) || !self.config.minify {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(
            bytes = output.len(),
            sections = document.sections.len(),
            tables = document.tables.len(),
            "Page rendered"
        );

        Ok(output)
    }

    /// Render a page and write it to `path`.
    pub fn write_to(&self, document: &ReportDocument, path: &Path) -> Result<()> {
        let html = self.render(document)?;
        std::fs::write(path, html)?;
        Ok(())
    }

    /// Render the page body without the surrounding document.
    pub fn render_fragment(&self, document: &ReportDocument) -> String {
        let mut placed: HashSet<&TableId> = HashSet::new();
        let mut parts = Vec::new();

        for section in &document.sections {
            parts.push(self.generate_section(document, section));
            placed.extend(section.tables.iter());
        }
        for table in &document.tables {
            if !placed.contains(&table.id) {
                parts.push(self.generate_table(table));
            }
        }

        parts.join("\n")
    }

    fn generate_html(&self, document: &ReportDocument) -> String {
        let title = document.title.as_deref().unwrap_or("Report");
        let markup = &self.config.markup;

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="rp-page {version}">
    <style>
        .{toggle_class} svg {{
            margin-left: 0.5rem;
            vertical-align: middle;
        }}
        th.{date_class}, th.{string_class} {{
            cursor: pointer;
            user-select: none;
        }}
        th svg {{
            margin-left: 0.25rem;
            vertical-align: middle;
        }}
        td.row-index {{
            font-variant-numeric: tabular-nums;
        }}
        .collapse:not(.show) {{
            display: none;
        }}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
    </header>
    <main>
        {body}
    </main>
</body>
</html>"##,
            title = html_escape(title),
            version = env!("CARGO_PKG_VERSION"),
            toggle_class = html_escape(&markup.toggle_class),
            date_class = html_escape(&markup.date_sort_class),
            string_class = html_escape(&markup.string_sort_class),
            body = self.render_fragment(document),
        )
    }

    fn generate_section(&self, document: &ReportDocument, section: &CollapsibleSection) -> String {
        let markup = &self.config.markup;
        let id = html_escape(&section.id.0);
        let expanded_attr = match section.expanded.as_deref() {
            Some(raw) => format!(r#" {}="{}""#, html_escape(&markup.expanded_attr), html_escape(raw)),
            None => String::new(),
        };
        let show = if section.is_expanded() == Some(true) {
            " show"
        } else {
            ""
        };
        let tables: String = section
            .tables
            .iter()
            .filter_map(|t| document.table(t))
            .map(|t| self.generate_table(t))
            .collect();

        format!(
            r##"<section class="report-section" id="section-{id}">
    <button class="{toggle_class}" type="button" data-toggle="collapse" data-target="#collapse-{id}" aria-controls="collapse-{id}"{expanded_attr}>{label}{indicator}</button>
    <div class="collapse{show}" id="collapse-{id}">
        {tables}
    </div>
</section>"##,
            id = id,
            toggle_class = html_escape(&markup.toggle_class),
            expanded_attr = expanded_attr,
            label = html_escape(&section.label),
            indicator = self.indicator_svg(section.indicator),
            show = show,
            tables = tables,
        )
    }

    fn generate_table(&self, table: &SortableTable) -> String {
        let headers: String = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| self.generate_header(h, table.index_column == Some(i)))
            .collect();

        let rows: String = table
            .rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        if table.index_column == Some(i) {
                            format!(r#"<td class="row-index">{}</td>"#, html_escape(&cell.text))
                        } else {
                            format!("<td>{}</td>", html_escape(&cell.text))
                        }
                    })
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect();

        format!(
            r##"<table class="table" id="table-{id}">
    <thead><tr>{headers}</tr></thead>
    <tbody>{rows}</tbody>
</table>"##,
            id = html_escape(&table.id.0),
            headers = headers,
            rows = rows,
        )
    }

    fn generate_header(&self, header: &HeaderCell, is_index: bool) -> String {
        let markup = &self.config.markup;
        let label = html_escape(&header.label);

        match &header.sort {
            Some(sort) => {
                let role = match sort.kind {
                    SortKind::Date => &markup.date_sort_class,
                    SortKind::String => &markup.string_sort_class,
                };
                format!(
                    r#"<th class="{}" {}="{}">{}{}</th>"#,
                    html_escape(role),
                    html_escape(&markup.sorted_attr),
                    sort.sorted(),
                    label,
                    self.indicator_svg(sort.indicator)
                )
            }
            None if is_index => format!(r#"<th class="row-index">{}</th>"#, label),
            None => format!("<th>{}</th>", label),
        }
    }

    fn indicator_svg(&self, glyph: Option<Glyph>) -> String {
        glyph.map(|g| self.glyphs.svg(g)).unwrap_or_default()
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sortable::SortableTableColumn;

    fn document() -> ReportDocument {
        let mut table = SortableTable::new("users")
            .with_index_column("#")
            .with_sortable_column("Name", SortKind::String)
            .with_column("Groups");
        table.push_row(["<admin>", "wheel"]);
        let mut doc = ReportDocument::new().with_title("RBAC & users");
        doc.push_section(CollapsibleSection::new("rbac", "RBAC").with_table("users"));
        doc.push_table(table);
        doc
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_empty_document() {
        let html = PageRenderer::default_config()
            .render(&ReportDocument::new())
            .unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Report</title>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = PageRenderer::default_config().render(&document()).unwrap();
        assert!(html.contains("<title>RBAC &amp; users</title>"));
        assert!(html.contains("<td>&lt;admin&gt;</td>"));
        assert!(!html.contains("<admin>"));
    }

    #[test]
    fn test_section_contains_its_table_once() {
        let fragment = PageRenderer::default_config().render_fragment(&document());
        assert_eq!(fragment.matches(r#"id="table-users""#).count(), 1);
        let section_start = fragment.find(r#"id="section-rbac""#).unwrap();
        let table_start = fragment.find(r#"id="table-users""#).unwrap();
        assert!(section_start < table_start);
    }

    #[test]
    fn test_uninitialized_headers_have_no_indicator() {
        let fragment = PageRenderer::default_config().render_fragment(&document());
        assert!(fragment.contains(r#"<th class="sort-string" sorted="false">Name</th>"#));
        assert!(!fragment.contains("<svg"));
    }

    #[test]
    fn test_initialized_header_renders_glyph() {
        let mut doc = document();
        SortableTableColumn::initialize(&mut doc.tables[0]);
        let fragment = PageRenderer::default_config().render_fragment(&doc);
        assert!(fragment.contains(r#"sorted="false">Name<svg"#));
        assert!(fragment.contains(r#"class="angle-down""#));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        PageRenderer::default_config()
            .write_to(&document(), &path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"id="collapse-rbac""#));
    }
}
