//! Collapsible section indicators.
//!
//! The expanded attribute belongs to the collapse framework; this module only
//! mirrors it in the trigger's indicator glyph.

use crate::document::{CollapsibleSection, ReportDocument};
use crate::glyph::Glyph;

use tracing::debug;

/// Indicator glyph for an expanded state.
pub fn indicator_for_expanded(expanded: bool) -> Glyph {
    if expanded {
        Glyph::Down
    } else {
        Glyph::Right
    }
}

/// The collapse framework that owns a trigger's expanded attribute.
pub trait CollapseDriver {
    /// Toggle the section's expanded attribute in response to a click.
    fn toggle(&mut self, section: &mut CollapsibleSection);
}

/// Flips the expanded attribute between `"true"` and `"false"`.
///
/// Triggers without a readable attribute are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct AriaExpandedDriver;

impl CollapseDriver for AriaExpandedDriver {
    fn toggle(&mut self, section: &mut CollapsibleSection) {
        if let Some(expanded) = section.is_expanded() {
            section.expanded = Some((!expanded).to_string());
        }
    }
}

/// Directional indicators on collapsible section triggers.
pub struct CollapsibleToggle;

impl CollapsibleToggle {
    /// Append the collapsed indicator to every trigger.
    pub fn initialize(document: &mut ReportDocument) -> usize {
        for section in &mut document.sections {
            section.indicator = Some(indicator_for_expanded(false));
        }
        debug!(triggers = document.sections.len(), "Collapsible toggles initialized");
        document.sections.len()
    }

    /// Sync the indicator with the expanded attribute after a toggle.
    ///
    /// Returns the glyph now shown, or `None` when the trigger has no
    /// indicator or its attribute cannot be read.
    pub fn on_activate(section: &mut CollapsibleSection) -> Option<Glyph> {
        if section.indicator.is_none() {
            debug!(section = %section.id, "Trigger has no indicator");
            return None;
        }
        let Some(expanded) = section.is_expanded() else {
            debug!(
                section = %section.id,
                raw = ?section.expanded,
                "Unreadable expanded attribute"
            );
            return None;
        };

        let glyph = indicator_for_expanded(expanded);
        section.indicator = Some(glyph);
        Some(glyph)
    }
}
