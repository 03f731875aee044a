//! Pixel-level drawing of board shapes.
//!
//! Coverage is computed per pixel center against the shape geometry.
//! Export is not a hot path, so the simple scan over each shape's
//! bounding box wins over anything cleverer.

use easel_core::shapes::{point_to_segment_dist, Color, Line, Oval, Polygon, Rectangle};
use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect};

fn pixel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Iterate the pixels whose centers fall inside `rect` (already in
/// image coordinates), clipped to the image.
fn scan(image: &RgbaImage, rect: Rect) -> impl Iterator<Item = (u32, u32, Point)> {
    let x0 = rect.x0.floor().max(0.0) as u32;
    let y0 = rect.y0.floor().max(0.0) as u32;
    let x1 = (rect.x1.ceil() as i64).clamp(0, image.width() as i64) as u32;
    let y1 = (rect.y1.ceil() as i64).clamp(0, image.height() as i64) as u32;
    (y0..y1).flat_map(move |y| {
        (x0..x1).map(move |x| (x, y, Point::new(x as f64 + 0.5, y as f64 + 0.5)))
    })
}

/// Draw a polyline with its stroke width.
pub fn draw_polyline(image: &mut RgbaImage, line: &Line, origin: Point) {
    let color = pixel(line.style.stroke);
    let half = (line.style.stroke_width / 2.0).max(0.5);
    let offset = |p: Point| Point::new(p.x - origin.x, p.y - origin.y);
    if line.points.len() == 1 {
        stamp_disc(image, offset(line.points[0]), half, color);
        return;
    }
    for seg in line.points.windows(2) {
        let (a, b) = (offset(seg[0]), offset(seg[1]));
        let bbox = Rect::from_points(a, b).inflate(half, half);
        for (x, y, center) in scan(image, bbox) {
            if point_to_segment_dist(center, a, b) <= half {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn stamp_disc(image: &mut RgbaImage, center: Point, radius: f64, color: Rgba<u8>) {
    let bbox = Rect::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    );
    for (x, y, p) in scan(image, bbox) {
        if p.distance(center) <= radius {
            image.put_pixel(x, y, color);
        }
    }
}

/// Draw a rectangle: interior fill, then the outline ring.
pub fn draw_rectangle(image: &mut RgbaImage, rect: &Rectangle, origin: Point) {
    let r = rect.as_rect() - origin.to_vec2();
    let half = rect.style.stroke_width / 2.0;
    if let Some(fill) = rect.style.fill {
        let color = pixel(fill);
        for (x, y, p) in scan(image, r) {
            if r.contains(p) {
                image.put_pixel(x, y, color);
            }
        }
    }
    let outline = pixel(rect.style.stroke);
    let outer = r.inflate(half, half);
    let inner = r.inflate(-half, -half);
    for (x, y, p) in scan(image, outer) {
        if outer.contains(p) && !inner.contains(p) {
            image.put_pixel(x, y, outline);
        }
    }
}

/// Draw an oval: interior fill, then the outline ring between the
/// outer and inner ellipses.
pub fn draw_oval(image: &mut RgbaImage, oval: &Oval, origin: Point) {
    let center = Point::new(oval.center.x - origin.x, oval.center.y - origin.y);
    let (rx, ry) = (oval.radius_x, oval.radius_y);
    let half = oval.style.stroke_width / 2.0;
    let outer = Rect::new(
        center.x - rx - half,
        center.y - ry - half,
        center.x + rx + half,
        center.y + ry + half,
    );
    let inside = |p: Point, rx: f64, ry: f64| {
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let dx = (p.x - center.x) / rx;
        let dy = (p.y - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    };
    if let Some(fill) = oval.style.fill {
        let color = pixel(fill);
        for (x, y, p) in scan(image, outer) {
            if inside(p, rx, ry) {
                image.put_pixel(x, y, color);
            }
        }
    }
    let outline = pixel(oval.style.stroke);
    for (x, y, p) in scan(image, outer) {
        if inside(p, rx + half, ry + half) && !inside(p, (rx - half).max(0.0), (ry - half).max(0.0))
        {
            image.put_pixel(x, y, outline);
        }
    }
}

/// Even-odd point-in-polygon test.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Draw a filled polygon.
pub fn draw_polygon(image: &mut RgbaImage, polygon: &Polygon, origin: Point) {
    let points: Vec<Point> = polygon
        .points
        .iter()
        .map(|p| Point::new(p.x - origin.x, p.y - origin.y))
        .collect();
    let Some(fill) = polygon.style.fill else {
        return draw_outline(image, &points, polygon.style.stroke, polygon.style.stroke_width);
    };
    let color = pixel(fill);
    let bbox = points
        .iter()
        .fold(Rect::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN), |r, p| {
            Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y))
        });
    for (x, y, p) in scan(image, bbox) {
        if polygon_contains(&points, p) {
            image.put_pixel(x, y, color);
        }
    }
}

fn draw_outline(image: &mut RgbaImage, points: &[Point], stroke: Color, width: f64) {
    if points.len() < 2 {
        return;
    }
    let color = pixel(stroke);
    let half = (width / 2.0).max(0.5);
    let n = points.len();
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let bbox = Rect::from_points(a, b).inflate(half, half);
        for (x, y, center) in scan(image, bbox) {
            if point_to_segment_dist(center, a, b) <= half {
                image.put_pixel(x, y, color);
            }
        }
    }
}
