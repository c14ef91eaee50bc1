//! Path-to-path pipeline stages.
//!
//! Each draw call chains a few of these explicitly (transform, then dash,
//! then stroke; or curve, contour, transform for text). Every stage drains
//! one rasterizer converter into a fresh [`Path`], so stages compose in any
//! order without nesting converter types.

use agg_rust::conv_contour::ConvContour;
use agg_rust::conv_curve::ConvCurve;
use agg_rust::conv_dash::ConvDash;
use agg_rust::conv_stroke::ConvStroke;
use agg_rust::conv_transform::ConvTransform;
use agg_rust::math_stroke::LineCap as AggLineCap;
use agg_rust::trans_affine::TransAffine;

use crate::path::Path;
use crate::stroke::LineCap;

/// A single `Path -> Path` transformation.
pub trait PathStage {
    fn apply(&self, path: &Path) -> Path;
}

/// Run `path` through `stages` in order.
pub fn run(path: &Path, stages: &[&dyn PathStage]) -> Path {
    stages
        .iter()
        .fold(path.clone(), |acc, stage| stage.apply(&acc))
}

/// Applies an affine matrix to every coordinate.
#[derive(Debug, Clone, Copy)]
pub struct TransformStage {
    pub matrix: TransAffine,
}

impl PathStage for TransformStage {
    fn apply(&self, path: &Path) -> Path {
        let mut conv = ConvTransform::new(path.reader(), self.matrix);
        Path::from_source(&mut conv)
    }
}

/// Flattens quadratic/cubic segments into line segments.
#[derive(Debug, Clone, Copy)]
pub struct CurveStage {
    pub approximation_scale: f64,
}

impl Default for CurveStage {
    fn default() -> Self {
        Self {
            approximation_scale: 2.0,
        }
    }
}

impl PathStage for CurveStage {
    fn apply(&self, path: &Path) -> Path {
        let mut conv = ConvCurve::new(path.reader());
        conv.set_approximation_scale(self.approximation_scale);
        Path::from_source(&mut conv)
    }
}

/// Splits a centre-line into alternating dash / gap runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStage {
    pub dash: f64,
    pub gap: f64,
}

impl DashStage {
    /// The plot dash for a stroke of `width`: dash and gap are both `width + 1`.
    pub fn for_width(width: f64) -> Self {
        Self {
            dash: width + 1.0,
            gap: width + 1.0,
        }
    }
}

impl PathStage for DashStage {
    fn apply(&self, path: &Path) -> Path {
        let mut conv = ConvDash::new(path.reader());
        conv.add_dash(self.dash, self.gap);
        Path::from_source(&mut conv)
    }
}

/// Turns a centre-line into a closed outline of the given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStage {
    pub width: f64,
    pub cap: LineCap,
}

impl PathStage for StrokeStage {
    fn apply(&self, path: &Path) -> Path {
        let mut conv = ConvStroke::new(path.reader());
        conv.set_width(self.width);
        conv.set_line_cap(match self.cap {
            LineCap::Butt => AggLineCap::Butt,
            LineCap::Round => AggLineCap::Round,
        });
        Path::from_source(&mut conv)
    }
}

/// Offsets closed outlines; used to embolden glyphs.
///
/// Orientation is taken as authored, so the sign of `width` decides whether
/// TrueType outlines grow or shrink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourStage {
    pub width: f64,
}

impl PathStage for ContourStage {
    fn apply(&self, path: &Path) -> Path {
        let mut conv = ConvContour::new(path.reader());
        conv.set_auto_detect_orientation(false);
        conv.set_width(self.width);
        Path::from_source(&mut conv)
    }
}

// ============================================================================
// Tests
// ============================================================================
