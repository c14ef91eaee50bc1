//! Hatch fill patterns.
//!
//! A hatch is a 10x10 RGB tile: the fill colour (premultiplied by its
//! alpha) as background with a thin black overlay. Pattern fills repeat the
//! tile over the whole canvas, so adjacent hatched shapes line up.

use crate::color::Color;
use crate::error::Error;
use crate::path::{Path, PathBuilder, Point};
use crate::raster::{Surface, BYTES_PER_PIXEL};
use crate::stroke::StrokeStyle;

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 10;

const OVERLAY_WIDTH: f64 = 1.0;
const OVERLAY_COLOR: Color = Color::BLACK;

/// Hatch style selected by a small integer id at the drawing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HatchPattern {
    /// Plain solid fill.
    #[default]
    None,
    ForwardSlash,
    BackwardSlash,
    HollowCircle,
    FilledCircle,
    Vertical,
    Horizontal,
    Cross,
    DiagonalCross,
}

impl HatchPattern {
    pub const ALL: [HatchPattern; 9] = [
        HatchPattern::None,
        HatchPattern::ForwardSlash,
        HatchPattern::BackwardSlash,
        HatchPattern::HollowCircle,
        HatchPattern::FilledCircle,
        HatchPattern::Vertical,
        HatchPattern::Horizontal,
        HatchPattern::Cross,
        HatchPattern::DiagonalCross,
    ];

    /// Numeric id, 0 for `None` through 8 for `DiagonalCross`.
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            HatchPattern::None => "none",
            HatchPattern::ForwardSlash => "forward-slash",
            HatchPattern::BackwardSlash => "backward-slash",
            HatchPattern::HollowCircle => "hollow-circle",
            HatchPattern::FilledCircle => "filled-circle",
            HatchPattern::Vertical => "vertical",
            HatchPattern::Horizontal => "horizontal",
            HatchPattern::Cross => "cross",
            HatchPattern::DiagonalCross => "diagonal-cross",
        }
    }

    pub fn is_solid(self) -> bool {
        self == HatchPattern::None
    }
}

impl TryFrom<i32> for HatchPattern {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|i| HatchPattern::ALL.get(i).copied())
            .ok_or(Error::UnknownHatchPattern(id))
    }
}

// ============================================================================
// Tile
// ============================================================================

/// An owned `TILE_SIZE` x `TILE_SIZE` RGB24 tile, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HatchTile {
    data: Vec<u8>,
}

impl HatchTile {
    /// Background of `color` with its alpha folded into the channels.
    fn filled(color: Color) -> Self {
        let px = color.to_rgb8_premultiplied();
        let count = (TILE_SIZE * TILE_SIZE) as usize;
        let mut data = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self { data }
    }

    /// Pixel at tile coordinates `x, y` in `0..TILE_SIZE`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * TILE_SIZE + x) as usize) * BYTES_PER_PIXEL;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Pixel for an arbitrary plane coordinate, wrapping in both axes.
    pub fn pixel_wrapped(&self, x: i32, y: i32) -> [u8; 3] {
        let size = TILE_SIZE as i32;
        self.pixel(x.rem_euclid(size) as u32, y.rem_euclid(size) as u32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// What gets drawn over the tile background.
enum Overlay {
    Stroke(Path),
    Fill(Path),
}

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
    PathBuilder::line(Point::new(x1, y1), Point::new(x2, y2))
}

fn centre_circle() -> Path {
    let c = TILE_SIZE as f64 / 2.0;
    PathBuilder::circle(Point::new(c, c), 3.0)
}

fn forward_slash() -> Vec<Overlay> {
    let s = TILE_SIZE as f64;
    vec![Overlay::Stroke(segment(0.0, 0.0, s, s))]
}

fn backward_slash() -> Vec<Overlay> {
    let s = TILE_SIZE as f64;
    vec![Overlay::Stroke(segment(0.0, s, s, 0.0))]
}

fn vertical() -> Vec<Overlay> {
    let s = TILE_SIZE as f64;
    vec![Overlay::Stroke(segment(s / 2.0, 0.0, s / 2.0, s))]
}

fn horizontal() -> Vec<Overlay> {
    let s = TILE_SIZE as f64;
    vec![Overlay::Stroke(segment(0.0, s / 2.0, s, s / 2.0))]
}

fn overlays(pattern: HatchPattern) -> Vec<Overlay> {
    match pattern {
        HatchPattern::None => Vec::new(),
        HatchPattern::ForwardSlash => forward_slash(),
        HatchPattern::BackwardSlash => backward_slash(),
        HatchPattern::HollowCircle => vec![Overlay::Stroke(centre_circle())],
        HatchPattern::FilledCircle => vec![Overlay::Fill(centre_circle())],
        HatchPattern::Vertical => vertical(),
        HatchPattern::Horizontal => horizontal(),
        HatchPattern::Cross => vertical().into_iter().chain(horizontal()).collect(),
        HatchPattern::DiagonalCross => forward_slash()
            .into_iter()
            .chain(backward_slash())
            .collect(),
    }
}

/// Render the tile for `pattern` over a `color` background.
///
/// Deterministic: the same inputs always give byte-identical tiles.
pub fn generate(color: Color, pattern: HatchPattern) -> HatchTile {
    let mut tile = HatchTile::filled(color);
    let stroke = StrokeStyle::new(OVERLAY_WIDTH, false);
    {
        let mut surface = Surface::top_down(&mut tile.data, TILE_SIZE, TILE_SIZE);
        for overlay in overlays(pattern) {
            match overlay {
                Overlay::Stroke(path) => surface.fill(&stroke.outline(&path), OVERLAY_COLOR),
                Overlay::Fill(path) => surface.fill(&path, OVERLAY_COLOR),
            }
        }
    }
    log::trace!("generated {} hatch tile", pattern.name());
    tile
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: [u8; 3] = [0, 0, 255];

    fn is_dark(px: [u8; 3]) -> bool {
        px[0] < 64 && px[1] < 64 && px[2] < 64
    }

    #[test]
    fn test_ids_round_trip() {
        for (i, p) in HatchPattern::ALL.iter().enumerate() {
            assert_eq!(p.id(), i as i32);
            assert_eq!(HatchPattern::try_from(i as i32).unwrap(), *p);
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert!(matches!(
            HatchPattern::try_from(9),
            Err(Error::UnknownHatchPattern(9))
        ));
        assert!(HatchPattern::try_from(-1).is_err());
    }

    #[test]
    fn test_tile_size() {
        let tile = generate(Color::BLUE, HatchPattern::Cross);
        assert_eq!(tile.as_bytes().len(), 300);
    }

    #[test]
    fn test_generation_is_deterministic() {
        for p in HatchPattern::ALL {
            assert_eq!(generate(Color::GREEN, p), generate(Color::GREEN, p));
        }
    }

    #[test]
    fn test_none_is_solid_background() {
        let tile = generate(Color::BLUE, HatchPattern::None);
        assert!(tile.as_bytes().chunks(3).all(|p| p == BLUE));
    }

    #[test]
    fn test_forward_slash_runs_along_diagonal() {
        let tile = generate(Color::BLUE, HatchPattern::ForwardSlash);
        assert!(is_dark(tile.pixel(5, 5)));
        assert!(is_dark(tile.pixel(2, 2)));
        assert_eq!(tile.pixel(5, 8), BLUE);
        assert_eq!(tile.pixel(8, 1), BLUE);
    }

    #[test]
    fn test_backward_slash_is_mirrored() {
        let tile = generate(Color::BLUE, HatchPattern::BackwardSlash);
        assert!(is_dark(tile.pixel(4, 5)));
        assert!(is_dark(tile.pixel(7, 2)));
        assert_eq!(tile.pixel(5, 5 + 3), BLUE);
    }

    #[test]
    fn test_circle_tiles() {
        let hollow = generate(Color::WHITE, HatchPattern::HollowCircle);
        let filled = generate(Color::WHITE, HatchPattern::FilledCircle);
        // Centre is empty only for the hollow circle.
        assert_eq!(hollow.pixel(5, 5), [255, 255, 255]);
        assert!(is_dark(filled.pixel(5, 5)));
        assert_eq!(filled.pixel(0, 0), [255, 255, 255]);
    }

    #[test]
    fn test_cross_has_both_centre_lines() {
        let tile = generate(Color::WHITE, HatchPattern::Cross);
        assert_ne!(tile.pixel(5, 1), [255, 255, 255]);
        assert_ne!(tile.pixel(1, 5), [255, 255, 255]);
        assert_eq!(tile.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn test_translucent_background_is_premultiplied() {
        let tile = generate(Color::rgba(0.0, 0.0, 1.0, 0.5), HatchPattern::Vertical);
        assert_eq!(tile.pixel(1, 1), [0, 0, 128]);
        assert_ne!(tile.pixel(5, 1), [0, 0, 128]);
    }

    #[test]
    fn test_pixel_wrapped() {
        let tile = generate(Color::BLUE, HatchPattern::ForwardSlash);
        assert_eq!(tile.pixel_wrapped(15, 18), tile.pixel(5, 8));
        assert_eq!(tile.pixel_wrapped(-5, -2), tile.pixel(5, 8));
    }
}
