//! Per-call affine placement.
//!
//! The matrix is always composed as rotate, then translate, then the
//! optional sub-plot origin shift. Nothing here outlives a draw call.

use agg_rust::basics::deg2rad;
use agg_rust::trans_affine::TransAffine;

use crate::path::Point;
use crate::stage::TransformStage;

/// Fraction of the sub-plot size used as the plotting-area origin offset.
pub const ORIGIN_SHIFT_FRACTION: f64 = 0.1;

/// The sub-plot origin offset: `(0.1 * sub_width, 0.1 * sub_height)`.
pub fn origin_shift(sub_width: f64, sub_height: f64) -> Point {
    Point::new(
        sub_width * ORIGIN_SHIFT_FRACTION,
        sub_height * ORIGIN_SHIFT_FRACTION,
    )
}

/// Rotation, translation and optional origin shift for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawTransform {
    /// Degrees, counter-clockwise in the y-up canvas.
    pub rotation: f64,
    pub translation: Point,
    pub origin_shift: Option<Point>,
}

impl DrawTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            translation: Point::new(x, y),
            ..Self::default()
        }
    }

    pub fn rotated(self, degrees: f64) -> Self {
        Self {
            rotation: degrees,
            ..self
        }
    }

    pub fn shifted(self, shift: Option<Point>) -> Self {
        Self {
            origin_shift: shift,
            ..self
        }
    }

    /// Compose the affine matrix.
    pub fn matrix(&self) -> TransAffine {
        let mut mtx = TransAffine::new();
        if self.rotation != 0.0 {
            mtx.multiply(&TransAffine::new_rotation(deg2rad(self.rotation)));
        }
        mtx.multiply(&TransAffine::new_translation(
            self.translation.x,
            self.translation.y,
        ));
        if let Some(shift) = self.origin_shift {
            mtx.multiply(&TransAffine::new_translation(shift.x, shift.y));
        }
        mtx
    }

    pub fn stage(&self) -> TransformStage {
        TransformStage {
            matrix: self.matrix(),
        }
    }

    /// Map a single point.
    pub fn apply(&self, p: Point) -> Point {
        let (mut x, mut y) = (p.x, p.y);
        self.matrix().transform(&mut x, &mut y);
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_origin_shift_is_tenth_of_sub_plot() {
        assert_eq!(origin_shift(1000.0, 660.0), Point::new(100.0, 66.0));
        assert_eq!(origin_shift(0.0, 0.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_identity() {
        assert!(close(
            DrawTransform::identity().apply(Point::new(3.0, 4.0)),
            Point::new(3.0, 4.0)
        ));
    }

    #[test]
    fn test_rotation_happens_before_translation() {
        // Rotating (10, 0) by 90 degrees about the local origin gives (0, 10);
        // the translation then moves it, so the anchor is not the pivot.
        let t = DrawTransform::translation(100.0, 50.0).rotated(90.0);
        assert!(close(t.apply(Point::new(10.0, 0.0)), Point::new(100.0, 60.0)));
        assert!(close(t.apply(Point::new(0.0, 0.0)), Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_origin_shift_applies_last() {
        let shift = origin_shift(200.0, 100.0);
        let t = DrawTransform::translation(1.0, 2.0)
            .rotated(180.0)
            .shifted(Some(shift));
        assert!(close(t.apply(Point::new(5.0, 0.0)), Point::new(16.0, 12.0)));
    }

    #[test]
    fn test_shift_equals_translation() {
        let shift = origin_shift(300.0, 120.0);
        let a = DrawTransform::identity().shifted(Some(shift));
        let b = DrawTransform::translation(shift.x, shift.y);
        assert!(a.matrix().is_equal(&b.matrix(), 1e-12));
    }
}
