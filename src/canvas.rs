//! The plotting canvas.
//!
//! A [`Canvas`] exclusively owns one RGB24 pixel buffer. Every draw call
//! builds a path, places it with a per-call [`DrawTransform`], optionally
//! strokes it, and composites it into the buffer. Draw calls never fail:
//! degenerate input is skipped and logged at debug level.

use std::path::{Path as FsPath, PathBuf};

use crate::color::Color;
use crate::error::{Error, ExportError, Result};
use crate::export::{self, PngBuffer};
use crate::font::{default_font_path, FontFace};
use crate::hatch::{self, HatchPattern};
use crate::path::{Path, PathBuilder, Point};
use crate::raster::{Surface, BYTES_PER_PIXEL};
use crate::stage::{self, ContourStage, CurveStage, PathStage};
use crate::stroke::StrokeStyle;
use crate::text::{TextExtent, TextLayout, TextOutcome};
use crate::transform::{self, DrawTransform};

/// Glyph emboldening per unit of stroke width, as a fraction of the font size.
const EMBOLDEN_FACTOR: f64 = 0.05;

/// Construction parameters for a [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Sub-plot size for the origin shift; the canvas size when `None`.
    pub sub_size: Option<(f64, f64)>,
    /// Font file; the bundled font when `None`.
    pub font_path: Option<PathBuf>,
    pub kerning: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 660,
            sub_size: None,
            font_path: None,
            kerning: true,
        }
    }
}

impl CanvasConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_sub_size(mut self, sub_width: f64, sub_height: f64) -> Self {
        self.sub_size = Some((sub_width, sub_height));
        self
    }

    /// An empty path selects the bundled font.
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.font_path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        self
    }

    pub fn with_kerning(mut self, kerning: bool) -> Self {
        self.kerning = kerning;
        self
    }
}

/// An immediate-mode plotting surface with a white, y-up RGB24 buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    sub_width: f64,
    sub_height: f64,
    font_path: PathBuf,
    kerning: bool,
    buffer: Vec<u8>,
}

/// Allocate a white buffer, reporting failure instead of aborting.
fn allocate(width: u32, height: u32) -> Result<Vec<u8>> {
    let invalid = Error::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    let stride = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .filter(|s| i32::try_from(*s).is_ok())
        .ok_or(Error::InvalidDimensions { width, height })?;
    let bytes = stride.checked_mul(height as usize).ok_or(invalid)?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes)
        .map_err(|_| Error::Allocation { bytes })?;
    buffer.resize(bytes, 255);
    Ok(buffer)
}

impl Canvas {
    /// A `width` x `height` canvas with default settings.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_config(CanvasConfig::default().with_size(width, height))
    }

    pub fn with_config(config: CanvasConfig) -> Result<Self> {
        let buffer = allocate(config.width, config.height)?;
        let (sub_width, sub_height) = config
            .sub_size
            .unwrap_or((config.width as f64, config.height as f64));
        let font_path = config.font_path.unwrap_or_else(default_font_path);
        log::debug!(
            "created {}x{} canvas (sub-plot {}x{}, font {})",
            config.width,
            config.height,
            sub_width,
            sub_height,
            font_path.display()
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            sub_width,
            sub_height,
            font_path,
            kerning: config.kerning,
            buffer,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn font_path(&self) -> &FsPath {
        &self.font_path
    }

    /// Stored bytes, top row first (canvas row `height - 1` first).
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    /// Pixel at canvas coordinates (y up), `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = (self.height - 1 - y) as usize;
        let i = (row * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.buffer[i], self.buffer[i + 1], self.buffer[i + 2]])
    }

    /// The sub-plot origin offset applied by calls that request it.
    pub fn origin_shift(&self) -> Point {
        transform::origin_shift(self.sub_width, self.sub_height)
    }

    /// Reallocate at a new size and clear to white. The sub-plot size is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.buffer = allocate(width, height)?;
        self.width = width;
        self.height = height;
        log::debug!("resized canvas to {}x{}", width, height);
        Ok(())
    }

    /// Repaint every pixel.
    pub fn clear(&mut self, color: Color) {
        self.surface().clear(color);
    }

    // -- Internals --

    fn surface(&mut self) -> Surface<'_> {
        Surface::new(&mut self.buffer, self.width, self.height)
    }

    fn placement(&self, origin_shift: bool) -> DrawTransform {
        DrawTransform::identity().shifted(origin_shift.then(|| self.origin_shift()))
    }

    fn place(&self, path: &Path, origin_shift: bool) -> Path {
        self.placement(origin_shift).stage().apply(path)
    }

    fn fill_path(&mut self, path: &Path, color: Color, origin_shift: bool) {
        let placed = self.place(path, origin_shift);
        self.surface().fill(&placed, color);
    }

    fn stroke_path(&mut self, path: &Path, style: StrokeStyle, color: Color, origin_shift: bool) {
        let transform = self.placement(origin_shift).stage();
        let centre_line = stage::run(path, &[&transform, &CurveStage::default()]);
        let outline = style.outline(&centre_line);
        self.surface().fill(&outline, color);
    }

    // -- Shapes --

    /// Outline a quadrilateral with a butt-capped stroke.
    pub fn draw_rect(&mut self, points: &[Point; 4], thickness: f64, color: Color, origin_shift: bool) {
        if thickness <= 0.0 {
            log::debug!("draw_rect: skipping non-positive thickness {}", thickness);
            return;
        }
        let path = PathBuilder::rect(points);
        self.stroke_path(&path, StrokeStyle::new(thickness, false), color, origin_shift);
    }

    /// Fill a quadrilateral with a solid colour or a hatch over that colour.
    pub fn fill_rect(
        &mut self,
        points: &[Point; 4],
        color: Color,
        pattern: HatchPattern,
        origin_shift: bool,
    ) {
        let path = PathBuilder::rect(points);
        if pattern.is_solid() {
            self.fill_path(&path, color, origin_shift);
            return;
        }
        let tile = hatch::generate(color, pattern);
        log::debug!("fill_rect: {} hatch", pattern.name());
        let placed = self.place(&path, origin_shift);
        self.surface().fill_pattern(&placed, &tile);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color, origin_shift: bool) {
        if radius <= 0.0 {
            log::debug!("fill_circle: skipping non-positive radius {}", radius);
            return;
        }
        self.fill_path(&PathBuilder::circle(center, radius), color, origin_shift);
    }

    pub fn fill_triangle(&mut self, points: &[Point; 3], color: Color, origin_shift: bool) {
        self.fill_path(&PathBuilder::triangle(points), color, origin_shift);
    }

    /// Fill a closed polygon; the closing edge is implicit.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color, origin_shift: bool) {
        if points.len() < 2 {
            log::debug!("fill_polygon: skipping {} point polygon", points.len());
            return;
        }
        self.fill_path(&PathBuilder::polygon(points), color, origin_shift);
    }

    /// Stroke a segment. Dashed strokes use dash = gap = `thickness + 1`.
    pub fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        thickness: f64,
        color: Color,
        dashed: bool,
        origin_shift: bool,
    ) {
        self.draw_polyline(&[from, to], thickness, color, dashed, origin_shift);
    }

    /// Stroke an open polyline.
    pub fn draw_polyline(
        &mut self,
        points: &[Point],
        thickness: f64,
        color: Color,
        dashed: bool,
        origin_shift: bool,
    ) {
        if points.len() < 2 || thickness <= 0.0 {
            log::debug!(
                "draw_polyline: skipping {} points at thickness {}",
                points.len(),
                thickness
            );
            return;
        }
        let path = PathBuilder::polyline(points);
        self.stroke_path(&path, StrokeStyle::new(thickness, dashed), color, origin_shift);
    }

    // -- Text --

    /// Draw `text` with its baseline origin at `at`.
    ///
    /// The run is rotated by `angle` degrees about its own origin, then
    /// moved to `at`. A positive `stroke_width` emboldens the glyphs. A font
    /// that cannot be loaded makes this a no-op reported as
    /// [`TextOutcome::FontUnavailable`].
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        size: f64,
        color: Color,
        stroke_width: f64,
        angle: f64,
        origin_shift: bool,
    ) -> TextOutcome {
        if text.is_empty() || size <= 0.0 {
            log::debug!("draw_text: nothing to draw at size {}", size);
            return TextOutcome::Empty;
        }
        let face = match FontFace::load(&self.font_path) {
            Ok(face) => face,
            Err(e) => {
                log::warn!("draw_text: {}; text skipped", e);
                return TextOutcome::FontUnavailable;
            }
        };
        let provider = match face.provider(size) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("draw_text: {}; text skipped", e);
                return TextOutcome::FontUnavailable;
            }
        };

        let run = TextLayout::new(self.kerning).layout(&provider, text);
        if run.glyphs == 0 {
            log::debug!("draw_text: no glyphs mapped for {:?}", text);
            return TextOutcome::Empty;
        }

        let curve = CurveStage::default();
        let contour = ContourStage {
            width: -(stroke_width * size * EMBOLDEN_FACTOR),
        };
        let placement = DrawTransform::translation(at.x, at.y)
            .rotated(angle)
            .shifted(origin_shift.then(|| self.origin_shift()))
            .stage();
        let mut stages: Vec<&dyn PathStage> = vec![&curve];
        if stroke_width > 0.0 {
            stages.push(&contour);
        }
        stages.push(&placement);
        let outlines = stage::run(&run.path, &stages);

        self.surface().fill(&outlines, color);
        TextOutcome::Rendered { glyphs: run.glyphs }
    }

    /// Width (sum of advances) and height (tallest glyph) of `text` at
    /// rotation 0. Zero when the font is unavailable.
    pub fn measure_text(&self, text: &str, size: f64) -> TextExtent {
        if size <= 0.0 {
            return TextExtent::default();
        }
        let face = match FontFace::load(&self.font_path) {
            Ok(face) => face,
            Err(e) => {
                log::warn!("measure_text: {}", e);
                return TextExtent::default();
            }
        };
        match face.provider(size) {
            Ok(provider) => TextLayout::measure(&provider, text),
            Err(e) => {
                log::warn!("measure_text: {}", e);
                TextExtent::default()
            }
        }
    }

    // -- Export --

    /// Encode the buffer as PNG. The result is owned by the caller.
    pub fn encode_png(&self) -> std::result::Result<PngBuffer, ExportError> {
        export::encode_png(&self.buffer, self.width, self.height)
    }

    /// Write `<path>.png`.
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> std::result::Result<PathBuf, ExportError> {
        export::save_png(&self.buffer, self.width, self.height, path)
    }

    /// Write `<path>.bmp`.
    pub fn save_bmp(&self, path: impl AsRef<FsPath>) -> std::result::Result<PathBuf, ExportError> {
        export::save_bmp(&self.buffer, self.width, self.height, path)
    }
}

// ============================================================================
// Tests
// ============================================================================
