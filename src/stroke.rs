//! Stroke pipeline: optional dashing, then outline generation.
//!
//! Dashing always happens on the centre-line before stroking. Stroking first
//! and dashing the resulting outline produces broken, hollow dashes.

use crate::path::Path;
use crate::stage::{DashStage, PathStage, StrokeStage};

/// End-of-segment cap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// How a centre-line path becomes a filled outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub dashed: bool,
    pub cap: LineCap,
}

impl StrokeStyle {
    /// Plain strokes use butt caps; dashed strokes use round caps.
    pub fn new(width: f64, dashed: bool) -> Self {
        Self {
            width,
            dashed,
            cap: if dashed { LineCap::Round } else { LineCap::Butt },
        }
    }

    pub fn with_cap(self, cap: LineCap) -> Self {
        Self { cap, ..self }
    }

    /// Dash and gap length for this width (identical by construction).
    pub fn dash_length(&self) -> f64 {
        DashStage::for_width(self.width).dash
    }

    /// Build the outline to composite. Degenerate widths yield an empty path.
    pub fn outline(&self, centre_line: &Path) -> Path {
        if self.width <= 0.0 || !centre_line.has_geometry() {
            return Path::new();
        }
        let stroke = StrokeStage {
            width: self.width,
            cap: self.cap,
        };
        if self.dashed {
            let dashed = DashStage::for_width(self.width).apply(centre_line);
            stroke.apply(&dashed)
        } else {
            stroke.apply(centre_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{PathBuilder, Point};
    use agg_rust::basics::is_move_to;

    fn horizontal(len: f64) -> Path {
        PathBuilder::line(Point::new(0.0, 0.0), Point::new(len, 0.0))
    }

    #[test]
    fn test_default_caps() {
        assert_eq!(StrokeStyle::new(1.0, false).cap, LineCap::Butt);
        assert_eq!(StrokeStyle::new(1.0, true).cap, LineCap::Round);
        assert_eq!(
            StrokeStyle::new(1.0, true).with_cap(LineCap::Butt).cap,
            LineCap::Butt
        );
    }

    #[test]
    fn test_dash_length_is_width_plus_one() {
        assert_eq!(StrokeStyle::new(2.0, true).dash_length(), 3.0);
        assert_eq!(StrokeStyle::new(0.5, true).dash_length(), 1.5);
    }

    #[test]
    fn test_dashed_outline_has_one_polygon_per_dash() {
        // 22 units, dash = gap = 3: dashes start at 0, 6, 12, 18.
        let style = StrokeStyle::new(2.0, true).with_cap(LineCap::Butt);
        let outline = style.outline(&horizontal(22.0));
        let polys = outline.vertices().iter().filter(|v| is_move_to(v.cmd)).count();
        assert_eq!(polys, 4);
    }

    #[test]
    fn test_solid_outline_is_single_polygon() {
        let outline = StrokeStyle::new(2.0, false).outline(&horizontal(24.0));
        let polys = outline.vertices().iter().filter(|v| is_move_to(v.cmd)).count();
        assert_eq!(polys, 1);
    }

    #[test]
    fn test_degenerate_inputs_are_empty() {
        assert!(StrokeStyle::new(0.0, false).outline(&horizontal(5.0)).is_empty());
        assert!(StrokeStyle::new(2.0, true).outline(&Path::new()).is_empty());
    }
}
