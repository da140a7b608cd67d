//! Page lifecycle and click dispatch.
//!
//! [`ReportPage::load`] runs the three behaviors once over the document;
//! afterwards [`ReportPage::dispatch`] routes each click to the component
//! that owns it. Dispatch takes `&mut self`, so one activation always runs
//! to completion before the next begins.

use crate::collapsible::{AriaExpandedDriver, CollapseDriver, CollapsibleToggle};
use crate::config::PageConfig;
use crate::document::{ColumnRef, ReportDocument, SectionId};
use crate::error::Result;
use crate::glyph::{Glyph, GlyphRegistry};
use crate::normalize::EmptyCellNormalizer;
use crate::render::PageRenderer;
use crate::sortable::{SortOutcome, SortableTableColumn};

use std::path::Path;
use tracing::{debug, info};

/// A user activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A collapsible section trigger was clicked.
    ToggleClicked(SectionId),
    /// A sortable column header was clicked.
    HeaderClicked(ColumnRef),
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A section was toggled.
    Toggled {
        /// Section id.
        section: SectionId,
        /// Expanded attribute after the toggle, if readable.
        expanded: Option<bool>,
        /// Indicator now shown, if the trigger has one.
        glyph: Option<Glyph>,
    },
    /// A table was re-sorted.
    Sorted(SortOutcome),
    /// Nothing matched the event.
    Ignored,
}

/// Counts from the page-ready initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Triggers given an indicator.
    pub triggers: usize,
    /// Blank cells filled with the placeholder.
    pub cells_filled: usize,
    /// Sortable headers wired up.
    pub sortable_columns: usize,
}

/// A report document with its interactive behaviors attached.
pub struct ReportPage<D: CollapseDriver = AriaExpandedDriver> {
    document: ReportDocument,
    config: PageConfig,
    glyphs: GlyphRegistry,
    driver: D,
    columns: Vec<ColumnRef>,
    loaded: Option<LoadSummary>,
}

impl ReportPage<AriaExpandedDriver> {
    /// Wrap a document using the default collapse driver.
    pub fn new(document: ReportDocument, config: PageConfig) -> Result<Self> {
        Self::with_driver(document, config, AriaExpandedDriver)
    }

    /// Load a document from JSON.
    pub fn from_json(json: &str, config: PageConfig) -> Result<Self> {
        let document: ReportDocument = serde_json::from_str(json)?;
        Self::new(document, config)
    }
}

impl<D: CollapseDriver> ReportPage<D> {
    /// Wrap a document with a custom collapse driver.
    pub fn with_driver(document: ReportDocument, config: PageConfig, driver: D) -> Result<Self> {
        config.validate()?;
        document.validate()?;
        Ok(Self {
            document,
            config,
            glyphs: GlyphRegistry::default(),
            driver,
            columns: Vec::new(),
            loaded: None,
        })
    }

    /// Replace the glyph registry used for rendering.
    pub fn with_glyphs(mut self, glyphs: GlyphRegistry) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// The current document state.
    pub fn document(&self) -> &ReportDocument {
        &self.document
    }

    /// Page configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Glyph registry.
    pub fn glyphs(&self) -> &GlyphRegistry {
        &self.glyphs
    }

    /// Handles of the sortable columns wired up at load.
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    /// Whether [`ReportPage::load`] has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Run page-ready initialization.
    ///
    /// The behaviors initialize once; later calls return the first summary.
    pub fn load(&mut self) -> LoadSummary {
        if let Some(summary) = self.loaded {
            debug!("Page already loaded");
            return summary;
        }

        let triggers = CollapsibleToggle::initialize(&mut self.document);
        let cells_filled = EmptyCellNormalizer::initialize(&mut self.document, &self.config.placeholder);
        self.columns = self
            .document
            .tables
            .iter_mut()
            .flat_map(SortableTableColumn::initialize)
            .collect();

        let summary = LoadSummary {
            triggers,
            cells_filled,
            sortable_columns: self.columns.len(),
        };
        info!(
            triggers = summary.triggers,
            cells_filled = summary.cells_filled,
            sortable_columns = summary.sortable_columns,
            "Page loaded"
        );
        self.loaded = Some(summary);
        summary
    }

    /// Route a click to its component.
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::ToggleClicked(id) => {
                let Some(section) = self.document.section_mut(&id) else {
                    debug!(section = %id, "Click on unknown section ignored");
                    return EventOutcome::Ignored;
                };
                self.driver.toggle(section);
                let glyph = CollapsibleToggle::on_activate(section);
                EventOutcome::Toggled {
                    expanded: section.is_expanded(),
                    section: id,
                    glyph,
                }
            }
            PageEvent::HeaderClicked(column) => {
                match SortableTableColumn::on_activate(&mut self.document, &column, &self.config) {
                    Some(outcome) => EventOutcome::Sorted(outcome),
                    None => EventOutcome::Ignored,
                }
            }
        }
    }

    /// Click a section trigger.
    pub fn click_toggle(&mut self, section: impl Into<SectionId>) -> EventOutcome {
        self.dispatch(PageEvent::ToggleClicked(section.into()))
    }

    /// Click a column header.
    pub fn click_header(&mut self, column: ColumnRef) -> EventOutcome {
        self.dispatch(PageEvent::HeaderClicked(column))
    }

    /// Render the current document state as HTML.
    pub fn render(&self) -> Result<String> {
        self.renderer().render(&self.document)
    }

    /// Render the current document state to a file.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        self.renderer().write_to(&self.document, path)
    }

    fn renderer(&self) -> PageRenderer {
        PageRenderer::new(self.config.clone()).with_glyphs(self.glyphs.clone())
    }
}
