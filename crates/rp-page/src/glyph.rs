//! Directional indicator glyphs.
//!
//! Three fixed vector icons signal collapsed (right), expanded or
//! ascending-ready (down), and descending-applied (up) states. Components
//! receive a [`GlyphRegistry`] instead of sharing icon templates.

use serde::{Deserialize, Serialize};

/// A directional indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// Right-pointing angle.
    Right,
    /// Down-pointing angle.
    Down,
    /// Up-pointing angle.
    Up,
}

impl Glyph {
    /// CSS class carried by the rendered icon.
    pub fn css_class(&self) -> &'static str {
        match self {
            Glyph::Right => "angle-right",
            Glyph::Down => "angle-down",
            Glyph::Up => "angle-up",
        }
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Static SVG drawable for a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAsset {
    /// Rendered width in CSS pixels.
    pub width: u32,
    /// Rendered height in CSS pixels.
    pub height: u32,
    /// SVG viewBox.
    pub view_box: &'static str,
    /// Path data.
    pub path: &'static str,
}

const ANGLE_RIGHT: GlyphAsset = GlyphAsset {
    width: 8,
    height: 16,
    view_box: "0 0 256 512",
    path: "M224.3 273l-136 136c-9.4 9.4-24.6 9.4-33.9 0l-22.6-22.6c-9.4-9.4-9.4-24.6 0-33.9l96.4-96.4-96.4-96.4c-9.4-9.4-9.4-24.6 0-33.9L54.3 103c9.4-9.4 24.6-9.4 33.9 0l136 136c9.5 9.4 9.5 24.6.1 34z",
};

const ANGLE_DOWN: GlyphAsset = GlyphAsset {
    width: 10,
    height: 16,
    view_box: "0 0 320 512",
    path: "M143 352.3L7 216.3c-9.4-9.4-9.4-24.6 0-33.9l22.6-22.6c9.4-9.4 24.6-9.4 33.9 0l96.4 96.4 96.4-96.4c9.4-9.4 24.6-9.4 33.9 0l22.6 22.6c9.4 9.4 9.4 24.6 0 33.9l-136 136c-9.2 9.4-24.4 9.4-33.8 0z",
};

const ANGLE_UP: GlyphAsset = GlyphAsset {
    width: 10,
    height: 16,
    view_box: "0 0 320 512",
    path: "M177 159.7l136 136c9.4 9.4 9.4 24.6 0 33.9l-22.6 22.6c-9.4 9.4-24.6 9.4-33.9 0L160 255.9l-96.4 96.4c-9.4 9.4-24.6 9.4-33.9 0L7 329.7c-9.4-9.4-9.4-24.6 0-33.9l136-136c9.4-9.5 24.6-9.5 34-.1z",
};

/// Read-only mapping from [`Glyph`] to its drawable.
#[derive(Debug, Clone)]
pub struct GlyphRegistry {
    right: GlyphAsset,
    down: GlyphAsset,
    up: GlyphAsset,
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self {
            right: ANGLE_RIGHT,
            down: ANGLE_DOWN,
            up: ANGLE_UP,
        }
    }
}

impl GlyphRegistry {
    /// Registry with the stock angle icons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the drawable for a glyph.
    pub fn asset(&self, glyph: Glyph) -> &GlyphAsset {
        match glyph {
            Glyph::Right => &self.right,
            Glyph::Down => &self.down,
            Glyph::Up => &self.up,
        }
    }

    /// Inline SVG markup for a glyph.
    pub fn svg(&self, glyph: Glyph) -> String {
        let asset = self.asset(glyph);
        format!(
            r#"<svg width="{}" height="{}" class="{}" viewBox="{}"><path fill="currentColor" d="{}"></path></svg>"#,
            asset.width,
            asset.height,
            glyph.css_class(),
            asset.view_box,
            asset.path
        )
    }
}
