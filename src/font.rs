//! TrueType glyph source backed by `ttf-parser`.
//!
//! [`FontFace`] owns the font file bytes. A [`GlyphProvider`] borrows them,
//! fixes the pixel size and hands out scaled outlines, advances and kerning
//! in the canvas' y-up coordinate system (no y flip is applied).

use std::path::{Path as FsPath, PathBuf};

use agg_rust::basics::{
    VertexD, PATH_CMD_CURVE3, PATH_CMD_CURVE4, PATH_CMD_END_POLY, PATH_CMD_LINE_TO,
    PATH_CMD_MOVE_TO, PATH_FLAGS_CLOSE,
};

use crate::error::FontError;

/// The font bundled with the crate, used when no other path is configured.
pub fn default_font_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf"))
}

/// A parsed-once, owned font file.
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Vec<u8>,
    index: u32,
    path: PathBuf,
}

impl FontFace {
    /// Read and validate a font file.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, 0, path)
    }

    /// Validate in-memory font data. `path` is only used for diagnostics.
    pub fn from_bytes(
        data: Vec<u8>,
        index: u32,
        path: impl Into<PathBuf>,
    ) -> Result<Self, FontError> {
        let path = path.into();
        ttf_parser::Face::parse(&data, index).map_err(|e| FontError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { data, index, path })
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Glyph source scaled so that one em equals `size` pixels.
    pub fn provider(&self, size: f64) -> Result<GlyphProvider<'_>, FontError> {
        let face = ttf_parser::Face::parse(&self.data, self.index).map_err(|e| {
            FontError::Parse {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;
        let scale = size / face.units_per_em() as f64;
        Ok(GlyphProvider { face, scale })
    }
}

/// A glyph's scaled outline and metrics, origin at the pen position.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub id: u16,
    /// Empty for glyphs without contours (space, tab).
    pub outline: Vec<VertexD>,
    /// `(x_min, y_min, x_max, y_max)` when the glyph has an outline.
    pub bounds: Option<(f64, f64, f64, f64)>,
    pub advance_x: f64,
    pub advance_y: f64,
}

impl Glyph {
    /// Vertical extent of the outline, zero for blank glyphs.
    pub fn height(&self) -> f64 {
        self.bounds.map_or(0.0, |(_, y1, _, y2)| y2 - y1)
    }
}

/// Scaled glyph lookup for one font at one pixel size.
pub struct GlyphProvider<'a> {
    face: ttf_parser::Face<'a>,
    scale: f64,
}

/// Glyph drawn for characters the font does not map.
const NOTDEF: ttf_parser::GlyphId = ttf_parser::GlyphId(0);

impl GlyphProvider<'_> {
    /// Outline and metrics for `ch`. Unmapped characters get the font's
    /// `.notdef` glyph; `None` only when the font holds no glyphs at all.
    pub fn glyph(&self, ch: char) -> Option<Glyph> {
        let id = match self.face.glyph_index(ch) {
            Some(id) => id,
            None if self.face.number_of_glyphs() > 0 => {
                log::trace!("no glyph for {:?}, using .notdef", ch);
                NOTDEF
            }
            None => return None,
        };
        let advance_x = self
            .face
            .glyph_hor_advance(id)
            .map_or(0.0, |a| a as f64 * self.scale);

        let mut sink = OutlineSink::new(self.scale);
        let bounds = self.face.outline_glyph(id, &mut sink).map(|r| {
            (
                r.x_min as f64 * self.scale,
                r.y_min as f64 * self.scale,
                r.x_max as f64 * self.scale,
                r.y_max as f64 * self.scale,
            )
        });

        Some(Glyph {
            id: id.0,
            outline: sink.vertices,
            bounds,
            advance_x,
            advance_y: 0.0,
        })
    }

    /// Horizontal kerning between two glyph ids, 0 when the font has none.
    pub fn kerning(&self, left: u16, right: u16) -> f64 {
        let (left, right) = (ttf_parser::GlyphId(left), ttf_parser::GlyphId(right));
        self.face
            .tables()
            .kern
            .and_then(|kern| {
                kern.subtables
                    .into_iter()
                    .filter(|st| st.horizontal && !st.has_cross_stream)
                    .find_map(|st| st.glyphs_kerning(left, right))
            })
            .map_or(0.0, |v| v as f64 * self.scale)
    }
}

// ============================================================================
// OutlineSink
// ============================================================================

/// Collects `ttf-parser` outline callbacks as rasterizer vertices.
struct OutlineSink {
    vertices: Vec<VertexD>,
    scale: f64,
}

impl OutlineSink {
    fn new(scale: f64) -> Self {
        Self {
            vertices: Vec::with_capacity(64),
            scale,
        }
    }

    #[inline]
    fn push(&mut self, x: f32, y: f32, cmd: u32) {
        self.vertices.push(VertexD::new(
            x as f64 * self.scale,
            y as f64 * self.scale,
            cmd,
        ));
    }
}

impl ttf_parser::OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push(x, y, PATH_CMD_MOVE_TO);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y, PATH_CMD_LINE_TO);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push(x1, y1, PATH_CMD_CURVE3);
        self.push(x, y, PATH_CMD_CURVE3);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push(x1, y1, PATH_CMD_CURVE4);
        self.push(x2, y2, PATH_CMD_CURVE4);
        self.push(x, y, PATH_CMD_CURVE4);
    }

    fn close(&mut self) {
        self.vertices
            .push(VertexD::new(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    fn bundled() -> FontFace {
        FontFace::load(default_font_path()).unwrap()
    }

    #[test]
    fn test_sink_scales_coordinates() {
        let mut sink = OutlineSink::new(0.5);
        sink.move_to(10.0, 20.0);
        sink.quad_to(30.0, 40.0, 50.0, 60.0);
        sink.close();
        let v = &sink.vertices;
        assert_eq!(v.len(), 4);
        assert_eq!((v[0].x, v[0].y, v[0].cmd), (5.0, 10.0, PATH_CMD_MOVE_TO));
        assert_eq!(v[2].cmd, PATH_CMD_CURVE3);
        assert_eq!(v[3].cmd, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FontFace::load("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = FontFace::from_bytes(vec![0u8; 16], 0, "junk.ttf").unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
        assert!(err.to_string().contains("junk.ttf"));
    }

    #[test]
    fn test_glyph_scales_with_size() {
        let face = bundled();
        let small = face.provider(10.0).unwrap().glyph('H').unwrap();
        let large = face.provider(20.0).unwrap().glyph('H').unwrap();
        assert!(small.advance_x > 0.0);
        assert!((large.advance_x - 2.0 * small.advance_x).abs() < 1e-9);
        assert!((large.height() - 2.0 * small.height()).abs() < 1e-9);
    }

    #[test]
    fn test_glyph_is_y_up() {
        let glyph = bundled().provider(32.0).unwrap().glyph('T').unwrap();
        let (_, y1, _, y2) = glyph.bounds.unwrap();
        // Cap height sits above the baseline.
        assert!(y1 >= -0.5 && y2 > 15.0);
        assert!(!glyph.outline.is_empty());
    }

    #[test]
    fn test_space_has_advance_but_no_outline() {
        let glyph = bundled().provider(16.0).unwrap().glyph(' ').unwrap();
        assert!(glyph.outline.is_empty());
        assert_eq!(glyph.bounds, None);
        assert_eq!(glyph.height(), 0.0);
        assert!(glyph.advance_x > 0.0);
    }

    #[test]
    fn test_unmapped_char_falls_back_to_notdef() {
        let glyph = bundled().provider(16.0).unwrap().glyph('\u{10FFFD}').unwrap();
        assert_eq!(glyph.id, 0);
        assert!(glyph.advance_x > 0.0);
        assert!(!glyph.outline.is_empty());
    }

    #[test]
    fn test_kerning_is_finite() {
        let face = bundled();
        let p = face.provider(24.0).unwrap();
        let a = p.glyph('A').unwrap().id;
        let v = p.glyph('V').unwrap().id;
        assert!(p.kerning(a, v).is_finite());
        assert!(p.kerning(a, v) <= 0.0);
    }
}
