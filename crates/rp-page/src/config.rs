//! Page configuration types.

use crate::error::{PageError, Result};
use serde::{Deserialize, Serialize};

/// Markup conventions the behaviors rely on.
///
/// These names are emitted by the renderer and are what the collapse
/// framework and stylesheets key off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Class carried by collapsible section triggers.
    #[serde(default = "default_toggle_class")]
    pub toggle_class: String,
    /// Attribute holding a trigger's expanded state.
    #[serde(default = "default_expanded_attr")]
    pub expanded_attr: String,
    /// Role class for date-sortable column headers.
    #[serde(default = "default_date_sort_class")]
    pub date_sort_class: String,
    /// Role class for string-sortable column headers.
    #[serde(default = "default_string_sort_class")]
    pub string_sort_class: String,
    /// Boolean attribute mirroring a column's sort state.
    #[serde(default = "default_sorted_attr")]
    pub sorted_attr: String,
}

fn default_toggle_class() -> String {
    "report-btn".to_string()
}

fn default_expanded_attr() -> String {
    "aria-expanded".to_string()
}

fn default_date_sort_class() -> String {
    "sort-date".to_string()
}

fn default_string_sort_class() -> String {
    "sort-string".to_string()
}

fn default_sorted_attr() -> String {
    "sorted".to_string()
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            toggle_class: default_toggle_class(),
            expanded_attr: default_expanded_attr(),
            date_sort_class: default_date_sort_class(),
            string_sort_class: default_string_sort_class(),
            sorted_attr: default_sorted_attr(),
        }
    }
}

/// Complete page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Text written into empty table data cells.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Markup conventions.
    #[serde(default)]
    pub markup: MarkupConfig,
    /// Reset sibling column indicators to the ready glyph on activation.
    ///
    /// Off by default: siblings only lose their sort state and keep
    /// whatever glyph they last showed.
    #[serde(default)]
    pub reset_sibling_indicators: bool,
    /// Minify rendered HTML in release builds.
    #[serde(default = "default_true")]
    pub minify: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_placeholder() -> String {
    "None".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            placeholder: default_placeholder(),
            markup: MarkupConfig::default(),
            reset_sibling_indicators: false,
            minify: true,
        }
    }
}

impl PageConfig {
    /// Create a new page configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-cell placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the markup conventions.
    pub fn with_markup(mut self, markup: MarkupConfig) -> Self {
        self.markup = markup;
        self
    }

    /// Reset sibling indicators when a column is activated.
    pub fn with_reset_sibling_indicators(mut self, enabled: bool) -> Self {
        self.reset_sibling_indicators = enabled;
        self
    }

    /// Enable or disable minification of rendered output.
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Check the configuration for values the behaviors cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.trim().is_empty() {
            return Err(PageError::InvalidConfig(
                "placeholder must contain non-whitespace text".to_string(),
            ));
        }

        let names = [
            ("markup.toggle_class", &self.markup.toggle_class),
            ("markup.expanded_attr", &self.markup.expanded_attr),
            ("markup.date_sort_class", &self.markup.date_sort_class),
            ("markup.string_sort_class", &self.markup.string_sort_class),
            ("markup.sorted_attr", &self.markup.sorted_attr),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(PageError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
