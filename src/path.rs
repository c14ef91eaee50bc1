//! Geometry paths.
//!
//! A [`Path`] is an immutable list of vertices in the rasterizer's command
//! encoding (`move_to`, `line_to`, curve control points, `end_poly` flags).
//! [`PathBuilder`] turns the coordinate arrays handed to the canvas into
//! open polylines or closed polygons.

use agg_rust::basics::{
    is_stop, is_vertex, VertexD, VertexSource, PATH_CMD_CURVE3, PATH_CMD_END_POLY,
    PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use agg_rust::ellipse::Ellipse;

/// Vertex count used to approximate circles, for both shapes and hatch tiles.
pub const CIRCLE_STEPS: u32 = 100;

/// A point in canvas coordinates (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Path
// ============================================================================

/// An ordered vertex sequence, possibly holding several sub-paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    vertices: Vec<VertexD>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain a vertex source into a new path.
    pub fn from_source(vs: &mut dyn VertexSource) -> Self {
        let mut vertices = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            vertices.push(VertexD::new(x, y, cmd));
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[VertexD] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the path holds at least one drawable coordinate.
    pub fn has_geometry(&self) -> bool {
        self.vertices.iter().any(|v| is_vertex(v.cmd))
    }

    /// Replay this path as a vertex source.
    pub fn reader(&self) -> PathReader<'_> {
        PathReader {
            vertices: &self.vertices,
            idx: 0,
        }
    }

    /// Bounding box `(x1, y1, x2, y2)` over all coordinates, `None` if empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.vertices
            .iter()
            .filter(|v| is_vertex(v.cmd))
            .fold(None, |acc, v| match acc {
                None => Some((v.x, v.y, v.x, v.y)),
                Some((x1, y1, x2, y2)) => {
                    Some((x1.min(v.x), y1.min(v.y), x2.max(v.x), y2.max(v.y)))
                }
            })
    }
}

/// Borrowing vertex source over a [`Path`].
pub struct PathReader<'a> {
    vertices: &'a [VertexD],
    idx: usize,
}

impl VertexSource for PathReader<'_> {
    fn rewind(&mut self, _path_id: u32) {
        self.idx = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(self.idx) {
            Some(v) => {
                self.idx += 1;
                *x = v.x;
                *y = v.y;
                v.cmd
            }
            None => PATH_CMD_STOP,
        }
    }
}

// ============================================================================
// PathBuilder
// ============================================================================

/// Incremental path construction.
#[derive(Debug, Default)]
pub struct PathBuilder {
    vertices: Vec<VertexD>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.vertices.push(VertexD::new(p.x, p.y, PATH_CMD_MOVE_TO));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.vertices.push(VertexD::new(p.x, p.y, PATH_CMD_LINE_TO));
        self
    }

    /// Quadratic Bezier segment ending at `to`.
    pub fn curve3(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.vertices
            .push(VertexD::new(ctrl.x, ctrl.y, PATH_CMD_CURVE3));
        self.vertices.push(VertexD::new(to.x, to.y, PATH_CMD_CURVE3));
        self
    }

    /// Close the current sub-path. A no-op right after another close.
    pub fn close_polygon(&mut self) -> &mut Self {
        if self.vertices.last().is_some_and(|v| is_vertex(v.cmd)) {
            self.vertices
                .push(VertexD::new(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        }
        self
    }

    /// Append raw vertices, offsetting coordinates (not end/close commands).
    pub fn append_offset(&mut self, vertices: &[VertexD], dx: f64, dy: f64) -> &mut Self {
        self.vertices.extend(vertices.iter().map(|v| {
            if is_vertex(v.cmd) {
                VertexD::new(v.x + dx, v.y + dy, v.cmd)
            } else {
                *v
            }
        }));
        self
    }

    pub fn build(&mut self) -> Path {
        Path {
            vertices: std::mem::take(&mut self.vertices),
        }
    }

    // -- One-shot shapes --

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Path {
        let mut b = PathBuilder::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            b.move_to(*first);
            for p in iter {
                b.line_to(*p);
            }
        }
        b.build()
    }

    /// Closed polygon through `points`; the closing edge is implicit.
    pub fn polygon(points: &[Point]) -> Path {
        let mut b = PathBuilder::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            b.move_to(*first);
            for p in iter {
                b.line_to(*p);
            }
            b.close_polygon();
        }
        b.build()
    }

    /// Closed quadrilateral; corners need not be axis-aligned.
    pub fn rect(corners: &[Point; 4]) -> Path {
        Self::polygon(corners)
    }

    pub fn triangle(corners: &[Point; 3]) -> Path {
        Self::polygon(corners)
    }

    /// Two-point open segment.
    pub fn line(from: Point, to: Point) -> Path {
        Self::polyline(&[from, to])
    }

    /// Closed circle approximated with [`CIRCLE_STEPS`] vertices.
    pub fn circle(center: Point, radius: f64) -> Path {
        let mut e = Ellipse::new(center.x, center.y, radius, radius, CIRCLE_STEPS, false);
        Path::from_source(&mut e)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agg_rust::basics::{is_close, is_end_poly, is_move_to};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_polygon_is_closed() {
        let path = PathBuilder::polygon(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        let v = path.vertices();
        assert_eq!(v.len(), 4);
        assert!(is_move_to(v[0].cmd));
        assert!(is_end_poly(v[3].cmd));
        assert!(is_close(v[3].cmd));
    }

    #[test]
    fn test_polyline_is_open() {
        let path = PathBuilder::polyline(&pts(&[(0.0, 0.0), (5.0, 5.0), (9.0, 1.0)]));
        assert_eq!(path.len(), 3);
        assert!(path.vertices().iter().all(|v| is_vertex(v.cmd)));
    }

    #[test]
    fn test_empty_input_builds_empty_path() {
        assert!(PathBuilder::polygon(&[]).is_empty());
        assert!(!PathBuilder::polyline(&[]).has_geometry());
    }

    #[test]
    fn test_double_close_is_ignored() {
        let mut b = PathBuilder::new();
        b.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(1.0, 0.0))
            .close_polygon()
            .close_polygon();
        assert_eq!(b.build().len(), 3);
    }

    #[test]
    fn test_circle_bounds() {
        let path = PathBuilder::circle(Point::new(50.0, 40.0), 10.0);
        let (x1, y1, x2, y2) = path.bounds().unwrap();
        assert!((x1 - 40.0).abs() < 1e-9);
        assert!((x2 - 60.0).abs() < 1e-9);
        assert!((y1 - 30.0).abs() < 0.1);
        assert!((y2 - 50.0).abs() < 0.1);
        assert_eq!(path.vertices().iter().filter(|v| is_vertex(v.cmd)).count(), 100);
    }

    #[test]
    fn test_append_offset_skips_close_commands() {
        let square = PathBuilder::polygon(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        let mut b = PathBuilder::new();
        b.append_offset(square.vertices(), 10.0, 20.0);
        let moved = b.build();
        assert_eq!(moved.vertices()[0].x, 10.0);
        assert_eq!(moved.vertices()[2].y, 21.0);
        assert_eq!(moved.vertices()[3].x, 0.0);
    }

    #[test]
    fn test_reader_replays_and_rewinds() {
        let path = PathBuilder::line(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let mut r = path.reader();
        let (mut x, mut y) = (0.0, 0.0);
        assert!(is_move_to(r.vertex(&mut x, &mut y)));
        assert_eq!((x, y), (1.0, 2.0));
        r.vertex(&mut x, &mut y);
        assert!(is_stop(r.vertex(&mut x, &mut y)));
        r.rewind(0);
        assert!(is_move_to(r.vertex(&mut x, &mut y)));
        assert_eq!(Path::from_source(&mut path.reader()), path);
    }
}
