//! Raster export of Easel boards.
//!
//! Renders a board's object store into an image sized to its content
//! and writes it to disk, with the format chosen by file extension.

mod raster;
mod text;

pub use text::FontDir;

use easel_core::shapes::Shape;
use easel_core::store::ObjectStore;
use image::{Rgba, RgbaImage};
use kurbo::Rect;
use std::path::Path;
use thiserror::Error;

/// Coordinates beyond this magnitude are clamped when sizing the image.
pub const MAX_COORDINATE: f64 = 5000.0;

/// Region exported for an empty board.
pub const EMPTY_BOARD_REGION: Rect = Rect::new(-100.0, -100.0, 100.0, 100.0);

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid font data in {path}")]
    InvalidFont { path: std::path::PathBuf },
    #[error("fallback font missing: {path}")]
    MissingFallbackFont { path: std::path::PathBuf },
}

/// The board region an export covers: the union of all shape bounds
/// clamped to the coordinate limit, or a fixed region for an empty
/// board.
pub fn export_region(store: &ObjectStore) -> Rect {
    let Some(bounds) = store.content_bounds() else {
        return EMPTY_BOARD_REGION;
    };
    Rect::new(
        bounds.x0.max(-MAX_COORDINATE),
        bounds.y0.max(-MAX_COORDINATE),
        bounds.x1.min(MAX_COORDINATE),
        bounds.y1.min(MAX_COORDINATE),
    )
}

/// Render the store into an RGBA image over a white background,
/// bottom to top so stacking matches the board.
pub fn render_board(store: &ObjectStore, fonts: &FontDir) -> Result<RgbaImage, ExportError> {
    let region = export_region(store);
    let width = (region.width() as u32).max(1);
    let height = (region.height() as u32).max(1);
    let mut image = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let origin = region.origin();
    for shape in store.iter_ordered() {
        match shape {
            Shape::Line(line) => raster::draw_polyline(&mut image, line, origin),
            Shape::Rectangle(rect) => raster::draw_rectangle(&mut image, rect, origin),
            Shape::Oval(oval) => raster::draw_oval(&mut image, oval, origin),
            Shape::Polygon(polygon) => raster::draw_polygon(&mut image, polygon, origin),
            Shape::Text(t) => text::draw_text(&mut image, t, origin, fonts)?,
        }
    }
    Ok(image)
}

/// Export the store to an image file. JPEG output drops the alpha
/// channel; any other extension is written as encoded by the `image`
/// crate, defaulting to PNG semantics.
pub fn export_board(store: &ObjectStore, path: &Path, fonts: &FontDir) -> Result<(), ExportError> {
    let image = render_board(store, fonts)?;
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        image::DynamicImage::ImageRgba8(image).to_rgb8().save(path)?;
    } else {
        image.save(path)?;
    }
    log::info!("exported board to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::shapes::{Color, Line, Rectangle};
    use kurbo::Point;

    fn fonts() -> FontDir {
        FontDir::new("fonts")
    }

    #[test]
    fn test_empty_board_uses_fixed_region() {
        let store = ObjectStore::new();
        let region = export_region(&store);
        assert_eq!(region, EMPTY_BOARD_REGION);
        let image = render_board(&store, &fonts()).unwrap();
        assert_eq!((image.width(), image.height()), (200, 200));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_region_clamped_to_limit() {
        let mut store = ObjectStore::new();
        store.insert(Shape::Line(Line::new(
            Point::new(-9000.0, 0.0),
            Point::new(9000.0, 10.0),
        )));
        let region = export_region(&store);
        assert_eq!((region.x0, region.x1), (-MAX_COORDINATE, MAX_COORDINATE));
    }

    #[test]
    fn test_filled_rectangle_renders() {
        let mut store = ObjectStore::new();
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0);
        rect.style.fill = Some(Color::rgb(255, 0, 0));
        rect.style.stroke = Color::rgb(255, 0, 0);
        store.insert(Shape::Rectangle(rect));

        let image = render_board(&store, &fonts()).unwrap();
        assert_eq!(image.get_pixel(25, 25), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_line_stroke_covers_center() {
        let mut store = ObjectStore::new();
        let mut line = Line::new(Point::new(0.0, 10.0), Point::new(40.0, 10.0));
        line.style.stroke_width = 6.0;
        store.insert(Shape::Line(line));

        let image = render_board(&store, &fonts()).unwrap();
        let region = export_region(&store);
        let px = (20.0 - region.x0) as u32;
        let py = (10.0 - region.y0) as u32;
        assert_eq!(image.get_pixel(px, py), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        let mut store = ObjectStore::new();
        store.insert(Shape::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(20.0, 20.0),
        )));
        export_board(&store, &path, &fonts()).unwrap();
        assert!(path.exists());
    }
}
