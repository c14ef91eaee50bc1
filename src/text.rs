//! Text layout.
//!
//! Glyphs are laid out left to right from a local origin at `(0, 0)` into a
//! single [`Path`]. The canvas then places that path as one block with a
//! [`DrawTransform`](crate::transform::DrawTransform), so rotation turns the
//! whole run about its local origin and never about the anchor point.

use crate::font::{Glyph, GlyphProvider};
use crate::path::{Path, PathBuilder, Point};

/// Pen position and the previously placed glyph, for kerning.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphCursor {
    pub pen: Point,
    prev: Option<u16>,
}

impl GlyphCursor {
    pub fn new(origin: Point) -> Self {
        Self {
            pen: origin,
            prev: None,
        }
    }

    /// Apply the kerning delta against the previous glyph and return the
    /// position at which `glyph` is drawn.
    pub fn place(&mut self, provider: &GlyphProvider<'_>, glyph: &Glyph, kerning: bool) -> Point {
        if kerning {
            if let Some(prev) = self.prev {
                self.pen.x += provider.kerning(prev, glyph.id);
            }
        }
        self.pen
    }

    /// Move past `glyph`.
    pub fn advance(&mut self, glyph: &Glyph) {
        self.pen.x += glyph.advance_x;
        self.pen.y += glyph.advance_y;
        self.prev = Some(glyph.id);
    }
}

/// The laid-out outlines of one string.
#[derive(Debug, Clone, Default)]
pub struct TextRun {
    /// Unflattened glyph outlines in the local frame.
    pub path: Path,
    /// Pen position after the last glyph.
    pub pen: Point,
    /// Number of glyphs the font could map.
    pub glyphs: usize,
}

/// Result of [`TextLayout::measure`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    /// Sum of horizontal advances, without kerning.
    pub width: f64,
    /// Tallest single glyph bounding box, not the box of the whole string.
    pub height: f64,
}

/// What a text draw call did. Draw calls never fail, so this is the only
/// way to observe a skipped call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOutcome {
    Rendered { glyphs: usize },
    /// Nothing to draw: empty string, non-positive size, or a font without glyphs.
    Empty,
    /// The font file could not be loaded; nothing was drawn.
    FontUnavailable,
}

/// Layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub kerning: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self { kerning: true }
    }
}

impl TextLayout {
    pub fn new(kerning: bool) -> Self {
        Self { kerning }
    }

    /// Lay `text` out from the local origin. Characters the font does not
    /// map are drawn and advanced as `.notdef`.
    pub fn layout(&self, provider: &GlyphProvider<'_>, text: &str) -> TextRun {
        let mut cursor = GlyphCursor::default();
        let mut builder = PathBuilder::new();
        let mut glyphs = 0;
        for ch in text.chars() {
            let Some(glyph) = provider.glyph(ch) else {
                continue;
            };
            let at = cursor.place(provider, &glyph, self.kerning);
            log::trace!("glyph {:?} (id {}) at ({:.2}, {:.2})", ch, glyph.id, at.x, at.y);
            builder.append_offset(&glyph.outline, at.x, at.y);
            cursor.advance(&glyph);
            glyphs += 1;
        }
        TextRun {
            path: builder.build(),
            pen: cursor.pen,
            glyphs,
        }
    }

    /// Width and height of `text` at rotation 0.
    pub fn measure(provider: &GlyphProvider<'_>, text: &str) -> TextExtent {
        text.chars()
            .filter_map(|ch| provider.glyph(ch))
            .fold(TextExtent::default(), |ext, glyph| TextExtent {
                width: ext.width + glyph.advance_x,
                height: ext.height.max(glyph.height()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{default_font_path, FontFace};

    fn face() -> FontFace {
        FontFace::load(default_font_path()).unwrap()
    }

    #[test]
    fn test_measure_hi() {
        let face = face();
        let p = face.provider(20.0).unwrap();
        let h = p.glyph('H').unwrap();
        let i = p.glyph('i').unwrap();
        let ext = TextLayout::measure(&p, "Hi");
        assert!(ext.width > 0.0);
        assert!((ext.width - (h.advance_x + i.advance_x)).abs() < 1e-9);
        assert!((ext.height - h.height().max(i.height())).abs() < 1e-9);
        assert!(ext.height < 20.0);
    }

    #[test]
    fn test_measure_empty() {
        let face = face();
        let p = face.provider(20.0).unwrap();
        assert_eq!(TextLayout::measure(&p, ""), TextExtent::default());
    }

    #[test]
    fn test_pen_without_kerning_is_sum_of_advances() {
        let face = face();
        let p = face.provider(18.0).unwrap();
        let run = TextLayout::new(false).layout(&p, "AVAV");
        let expected: f64 = "AVAV".chars().map(|c| p.glyph(c).unwrap().advance_x).sum();
        assert_eq!(run.glyphs, 4);
        assert!((run.pen.x - expected).abs() < 1e-9);
        assert_eq!(run.pen.y, 0.0);
    }

    #[test]
    fn test_pen_with_kerning_adds_pair_deltas() {
        let face = face();
        let p = face.provider(18.0).unwrap();
        let text = "AVAV";
        let glyphs: Vec<Glyph> = text.chars().map(|c| p.glyph(c).unwrap()).collect();
        let advances: f64 = glyphs.iter().map(|g| g.advance_x).sum();
        let kerns: f64 = glyphs.windows(2).map(|w| p.kerning(w[0].id, w[1].id)).sum();
        let run = TextLayout::new(true).layout(&p, text);
        assert!((run.pen.x - (advances + kerns)).abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let face = face();
        let p = face.provider(12.0).unwrap();
        let a = TextLayout::default().layout(&p, "Plot 42");
        let b = TextLayout::default().layout(&p, "Plot 42");
        assert_eq!(a.path, b.path);
        assert_eq!(a.pen, b.pen);
    }

    #[test]
    fn test_second_glyph_is_offset_by_first_advance() {
        let face = face();
        let p = face.provider(20.0).unwrap();
        let h = p.glyph('H').unwrap();
        let run = TextLayout::new(false).layout(&p, "HH");
        let (x1, _, x2, _) = run.path.bounds().unwrap();
        let (hx1, _, hx2, _) = h.bounds.unwrap();
        assert!((x1 - hx1).abs() < 1.0);
        assert!((x2 - (h.advance_x + hx2)).abs() < 1.0);
    }

    #[test]
    fn test_cursor_kerning_needs_previous_glyph() {
        let face = face();
        let p = face.provider(20.0).unwrap();
        let a = p.glyph('A').unwrap();
        let mut cursor = GlyphCursor::new(Point::new(5.0, 7.0));
        assert_eq!(cursor.place(&p, &a, true), Point::new(5.0, 7.0));
        cursor.advance(&a);
        assert!((cursor.pen.x - (5.0 + a.advance_x)).abs() < 1e-9);
    }
}
