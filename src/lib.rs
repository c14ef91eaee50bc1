//! # aggplot
//!
//! Immediate-mode 2D plotting canvas rendered with Anti-Grain Geometry.
//!
//! A [`Canvas`] owns an RGB24 pixel buffer (white on creation, y axis
//! pointing up) and draws straight into it:
//!
//! - Solid and hatched rectangles, circles, triangles and polygons
//! - Plain and dashed lines and polylines
//! - TrueType text with kerning, rotation and emboldening
//! - PNG and BMP export, to disk or to an owned in-memory buffer
//!
//! ## Architecture
//!
//! Each draw call runs a short pipeline:
//!
//! 1. **Path**: coordinates become an open or closed [`Path`]
//! 2. **Transform**: a per-call [`DrawTransform`] (rotate, translate, origin shift)
//! 3. **Stroke**: optional dashing, then outline generation ([`StrokeStyle`])
//! 4. **Composite**: anti-aliased fill with a colour or a repeating [`HatchTile`]
//!
//! Text replaces steps 1 and 3 with glyph layout ([`TextLayout`]).
//!
//! ```no_run
//! use aggplot::{Canvas, Color, HatchPattern, Point};
//!
//! let mut canvas = Canvas::new(200, 100)?;
//! let corners = [
//!     Point::new(10.0, 10.0),
//!     Point::new(90.0, 10.0),
//!     Point::new(90.0, 60.0),
//!     Point::new(10.0, 60.0),
//! ];
//! canvas.fill_rect(&corners, Color::BLUE, HatchPattern::Cross, false);
//! canvas.draw_text("hello", Point::new(100.0, 20.0), 14.0, Color::BLACK, 0.0, 0.0, false);
//! canvas.save_png("plot")?;
//! # Ok::<(), aggplot::Error>(())
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod export;
pub mod font;
pub mod hatch;
pub mod path;
pub mod raster;
pub mod stage;
pub mod stroke;
pub mod text;
pub mod transform;

pub use canvas::{Canvas, CanvasConfig};
pub use color::Color;
pub use error::{Error, ExportError, FontError, Result};
pub use export::{decode_png, DecodedImage, PngBuffer};
pub use font::{FontFace, Glyph, GlyphProvider};
pub use hatch::{HatchPattern, HatchTile};
pub use path::{Path, PathBuilder, Point};
pub use stage::PathStage;
pub use stroke::{LineCap, StrokeStyle};
pub use text::{GlyphCursor, TextExtent, TextLayout, TextOutcome, TextRun};
pub use transform::DrawTransform;
