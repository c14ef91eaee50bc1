//! Scanline compositing onto an RGB24 byte buffer.
//!
//! [`Surface`] borrows a caller-owned buffer for the duration of one draw
//! call and fills paths into it, either with a solid colour or with a
//! repeating [`HatchTile`]. The renderer clips to the buffer, so paths may
//! extend past any edge.

use std::marker::PhantomData;

use agg_rust::color::Rgba8;
use agg_rust::pixfmt_rgb::PixfmtRgb24;
use agg_rust::rasterizer_scanline_aa::RasterizerScanlineAa;
use agg_rust::renderer_base::RendererBase;
use agg_rust::renderer_scanline::{render_scanlines_aa, render_scanlines_aa_solid, SpanGenerator};
use agg_rust::rendering_buffer::RowAccessor;
use agg_rust::scanline_u::ScanlineU8;
use agg_rust::span_allocator::SpanAllocator;

use crate::color::Color;
use crate::hatch::HatchTile;
use crate::path::Path;

/// Bytes per pixel in every buffer this crate renders into.
pub const BYTES_PER_PIXEL: usize = 3;

/// A renderable view over an RGB24 byte buffer.
pub struct Surface<'a> {
    rbuf: RowAccessor,
    _buf: PhantomData<&'a mut [u8]>,
}

impl<'a> Surface<'a> {
    /// Attach with y growing upward: row `y` lives at memory row `height - 1 - y`.
    ///
    /// Panics if `buf` is shorter than `width * height * 3`.
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        Self::attach(buf, width, height, true)
    }

    /// Attach with y growing downward (memory order).
    pub fn top_down(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        Self::attach(buf, width, height, false)
    }

    fn attach(buf: &'a mut [u8], width: u32, height: u32, flip_y: bool) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        assert!(
            buf.len() >= stride * height as usize,
            "buffer of {} bytes is too small for {}x{} RGB",
            buf.len(),
            width,
            height
        );
        let stride = if flip_y { -(stride as i32) } else { stride as i32 };
        let mut rbuf = RowAccessor::new();
        // SAFETY: `buf` holds at least `height * |stride|` bytes (checked above)
        // and stays mutably borrowed for `'a`, which outlives `rbuf`.
        unsafe { rbuf.attach(buf.as_mut_ptr(), width, height, stride) };
        Self {
            rbuf,
            _buf: PhantomData,
        }
    }

    pub fn width(&self) -> u32 {
        self.rbuf.width()
    }

    pub fn height(&self) -> u32 {
        self.rbuf.height()
    }

    /// Overwrite every pixel with `color`, ignoring alpha.
    pub fn clear(&mut self, color: Color) {
        let mut pf = PixfmtRgb24::new(&mut self.rbuf);
        pf.clear(&color.to_rgba8());
    }

    /// Anti-aliased non-zero fill of `path`, alpha-blended with `color`.
    pub fn fill(&mut self, path: &Path, color: Color) {
        if !path.has_geometry() {
            return;
        }
        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut path.reader(), 0);
        let mut sl = ScanlineU8::new();
        let pf = PixfmtRgb24::new(&mut self.rbuf);
        let mut rb = RendererBase::new(pf);
        render_scanlines_aa_solid(&mut ras, &mut sl, &mut rb, &color.to_rgba8());
    }

    /// Fill `path` by sampling `tile` at `(x mod size, y mod size)`.
    pub fn fill_pattern(&mut self, path: &Path, tile: &HatchTile) {
        if !path.has_geometry() {
            return;
        }
        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut path.reader(), 0);
        let mut sl = ScanlineU8::new();
        let pf = PixfmtRgb24::new(&mut self.rbuf);
        let mut rb = RendererBase::new(pf);
        let mut alloc = SpanAllocator::<Rgba8>::new();
        let mut span_gen = TileSpan { tile };
        render_scanlines_aa(&mut ras, &mut sl, &mut rb, &mut alloc, &mut span_gen);
    }
}

/// Span generator that repeats an opaque tile across the plane.
struct TileSpan<'t> {
    tile: &'t HatchTile,
}

impl SpanGenerator for TileSpan<'_> {
    type Color = Rgba8;

    fn prepare(&mut self) {}

    fn generate(&mut self, span: &mut [Rgba8], x: i32, y: i32, len: u32) {
        for (i, out) in span.iter_mut().take(len as usize).enumerate() {
            let [r, g, b] = self.tile.pixel_wrapped(x + i as i32, y);
            *out = Rgba8::new(r as u32, g as u32, b as u32, 255);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{PathBuilder, Point};

    fn white(w: u32, h: u32) -> Vec<u8> {
        vec![255u8; (w * h) as usize * BYTES_PER_PIXEL]
    }

    fn at(buf: &[u8], w: u32, mem_row: u32, x: u32) -> [u8; 3] {
        let i = ((mem_row * w + x) as usize) * BYTES_PER_PIXEL;
        [buf[i], buf[i + 1], buf[i + 2]]
    }

    fn square(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
        PathBuilder::polygon(&[
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ])
    }

    #[test]
    fn test_fill_is_y_up() {
        let mut buf = white(10, 10);
        Surface::new(&mut buf, 10, 10).fill(&square(0.0, 0.0, 10.0, 2.0), Color::RED);
        // Canvas rows 0..2 are the last two memory rows.
        assert_eq!(at(&buf, 10, 9, 5), [255, 0, 0]);
        assert_eq!(at(&buf, 10, 8, 5), [255, 0, 0]);
        assert_eq!(at(&buf, 10, 0, 5), [255, 255, 255]);
    }

    #[test]
    fn test_top_down_fill() {
        let mut buf = white(10, 10);
        Surface::top_down(&mut buf, 10, 10).fill(&square(0.0, 0.0, 10.0, 2.0), Color::BLUE);
        assert_eq!(at(&buf, 10, 0, 3), [0, 0, 255]);
        assert_eq!(at(&buf, 10, 9, 3), [255, 255, 255]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut buf = white(4, 4);
        Surface::new(&mut buf, 4, 4).fill(&square(0.0, 0.0, 4.0, 4.0), Color::BLACK.with_alpha(0.5));
        let [r, g, b] = at(&buf, 4, 2, 2);
        assert!((120..=135).contains(&r), "r = {r}");
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut buf = white(8, 8);
        let mut surface = Surface::new(&mut buf, 8, 8);
        surface.fill(&square(-100.0, -100.0, 200.0, 200.0), Color::GREEN);
        surface.fill(&square(50.0, 50.0, 60.0, 60.0), Color::RED);
        assert!(buf.chunks(3).all(|p| p == [0, 255, 0]));
    }

    #[test]
    fn test_empty_path_leaves_buffer() {
        let mut buf = white(4, 4);
        Surface::new(&mut buf, 4, 4).fill(&Path::new(), Color::BLACK);
        assert!(buf.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_clear() {
        let mut buf = white(3, 2);
        Surface::new(&mut buf, 3, 2).clear(Color::rgb(0.0, 0.5, 1.0));
        assert!(buf.chunks(3).all(|p| p == [0, 128, 255]));
    }
}
