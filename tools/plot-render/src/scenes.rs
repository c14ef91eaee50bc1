// Copyright 2025. Named canvas scenes exercising every drawing operation.
//
// Geometry is laid out relative to the requested size so each scene renders
// at any resolution.

use aggplot::{Canvas, CanvasConfig, Color, HatchPattern, Point};

/// Render a named scene. Returns `None` if the name is not recognized.
pub fn render_scene(name: &str, width: u32, height: u32) -> Option<aggplot::Result<Canvas>> {
    let draw: fn(&mut Canvas) = match name {
        "shapes" => shapes,
        "hatches" => hatches,
        "dashes" => dashes,
        "text" => text,
        "subplot" => subplot,
        _ => return None,
    };
    let config = CanvasConfig::default()
        .with_size(width, height)
        .with_sub_size(width as f64 / 2.0, height as f64 / 2.0);
    Some(Canvas::with_config(config).map(|mut canvas| {
        draw(&mut canvas);
        canvas
    }))
}

/// List all available scene names.
pub fn available_scenes() -> &'static [&'static str] {
    &["shapes", "hatches", "dashes", "text", "subplot"]
}

fn size(canvas: &Canvas) -> (f64, f64) {
    (canvas.width() as f64, canvas.height() as f64)
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> [Point; 4] {
    [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ]
}

fn shapes(canvas: &mut Canvas) {
    let (w, h) = size(canvas);
    canvas.fill_rect(
        &rect(0.05 * w, 0.1 * h, 0.3 * w, 0.5 * h),
        Color::RED,
        HatchPattern::None,
        false,
    );
    canvas.draw_rect(&rect(0.05 * w, 0.1 * h, 0.3 * w, 0.5 * h), 2.0, Color::BLACK, false);
    canvas.fill_circle(Point::new(0.5 * w, 0.3 * h), 0.15 * h, Color::GREEN, false);
    canvas.fill_triangle(
        &[
            Point::new(0.7 * w, 0.1 * h),
            Point::new(0.95 * w, 0.1 * h),
            Point::new(0.825 * w, 0.5 * h),
        ],
        Color::BLUE,
        false,
    );
    canvas.fill_polygon(
        &[
            Point::new(0.1 * w, 0.6 * h),
            Point::new(0.4 * w, 0.65 * h),
            Point::new(0.35 * w, 0.9 * h),
            Point::new(0.2 * w, 0.95 * h),
            Point::new(0.05 * w, 0.8 * h),
        ],
        Color::rgba(1.0, 0.6, 0.0, 0.8),
        false,
    );
    canvas.draw_polyline(
        &[
            Point::new(0.5 * w, 0.6 * h),
            Point::new(0.65 * w, 0.9 * h),
            Point::new(0.8 * w, 0.65 * h),
            Point::new(0.95 * w, 0.85 * h),
        ],
        3.0,
        Color::rgb(0.3, 0.0, 0.5),
        false,
        false,
    );
}

fn hatches(canvas: &mut Canvas) {
    let (w, h) = size(canvas);
    let cell_w = w / 3.0;
    let cell_h = h / 3.0;
    for (i, pattern) in HatchPattern::ALL.iter().enumerate() {
        let x = (i % 3) as f64 * cell_w;
        let y = (i / 3) as f64 * cell_h;
        let corners = rect(x + 5.0, y + 5.0, x + cell_w - 5.0, y + cell_h - 5.0);
        canvas.fill_rect(&corners, Color::rgb(0.4, 0.7, 1.0), *pattern, false);
        canvas.draw_rect(&corners, 1.0, Color::BLACK, false);
    }
}

fn dashes(canvas: &mut Canvas) {
    let (w, h) = size(canvas);
    for (i, thickness) in [1.0, 2.0, 4.0, 8.0].iter().enumerate() {
        let y = (i as f64 + 1.0) * h / 6.0;
        canvas.draw_line(
            Point::new(0.05 * w, y),
            Point::new(0.95 * w, y),
            *thickness,
            Color::BLACK,
            true,
            false,
        );
    }
    let zigzag: Vec<Point> = (0..=10)
        .map(|i| {
            let x = 0.05 * w + i as f64 * 0.09 * w;
            let y = if i % 2 == 0 { 0.8 * h } else { 0.95 * h };
            Point::new(x, y)
        })
        .collect();
    canvas.draw_polyline(&zigzag, 2.0, Color::RED, true, false);
}

fn text(canvas: &mut Canvas) {
    let (w, h) = size(canvas);
    let size = (h / 12.0).max(8.0);
    canvas.draw_text(
        "Anti-Grain plot",
        Point::new(0.05 * w, 0.8 * h),
        size,
        Color::BLACK,
        0.0,
        0.0,
        false,
    );
    canvas.draw_text(
        "Bold AVAWA",
        Point::new(0.05 * w, 0.6 * h),
        size,
        Color::BLUE,
        1.0,
        0.0,
        false,
    );
    canvas.draw_text(
        "rotated 90",
        Point::new(0.9 * w, 0.1 * h),
        size,
        Color::RED,
        0.0,
        90.0,
        false,
    );
    canvas.draw_text(
        "30 degrees",
        Point::new(0.3 * w, 0.15 * h),
        size,
        Color::rgb(0.0, 0.5, 0.0),
        0.0,
        30.0,
        false,
    );
    let extent = canvas.measure_text("Anti-Grain plot", size);
    canvas.draw_rect(
        &rect(
            0.05 * w,
            0.8 * h,
            0.05 * w + extent.width,
            0.8 * h + extent.height,
        ),
        1.0,
        Color::rgb(0.6, 0.6, 0.6),
        false,
    );
}

fn subplot(canvas: &mut Canvas) {
    let (w, h) = size(canvas);
    let shift = canvas.origin_shift();
    // Axes of the shifted plotting area.
    canvas.draw_polyline(
        &[
            Point::new(0.0, 0.5 * h),
            Point::new(0.0, 0.0),
            Point::new(0.7 * w, 0.0),
        ],
        1.5,
        Color::BLACK,
        false,
        true,
    );
    for i in 0..6 {
        let x = i as f64 * 0.1 * w + 0.02 * w;
        let top = (0.1 + 0.07 * i as f64) * h;
        canvas.fill_rect(
            &rect(x, 0.0, x + 0.06 * w, top),
            Color::rgb(0.2, 0.4, 0.8),
            HatchPattern::ALL[i % HatchPattern::ALL.len()],
            true,
        );
    }
    canvas.draw_line(
        Point::new(0.0, 0.25 * h),
        Point::new(0.7 * w, 0.25 * h),
        1.0,
        Color::RED,
        true,
        true,
    );
    canvas.draw_text(
        "sub-plot",
        Point::new(shift.x, 0.9 * h),
        (h / 15.0).max(8.0),
        Color::BLACK,
        0.0,
        0.0,
        false,
    );
}
