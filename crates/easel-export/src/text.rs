//! Text rendering for board export.
//!
//! Fonts are plain TTF files in a directory, looked up by family name.
//! A family without a matching file falls back to Arial, so exports
//! never fail over a missing decorative font.

use crate::ExportError;
use ab_glyph::{Font, FontArc, ScaleFont};
use easel_core::shapes::Text;
use image::{Rgba, RgbaImage};
use kurbo::Point;
use std::path::{Path, PathBuf};

const LINE_HEIGHT_RATIO: f32 = 1.2;

/// A directory of TTF font files, one per family, named `<family>.ttf`.
#[derive(Debug, Clone)]
pub struct FontDir {
    dir: PathBuf,
}

impl FontDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Load the font for `family`, falling back to Arial when the
    /// family has no file. A missing fallback is an error; so is a
    /// file that is not valid font data.
    pub fn load(&self, family: &str) -> Result<FontArc, ExportError> {
        let named = self.dir.join(format!("{family}.ttf"));
        if named.is_file() {
            return read_font(&named);
        }
        let fallback = self.dir.join("Arial.ttf");
        let data = std::fs::read(&fallback)
            .map_err(|_| ExportError::MissingFallbackFont { path: fallback.clone() })?;
        log::debug!("font {family} not found, using fallback");
        FontArc::try_from_vec(data).map_err(|_| ExportError::InvalidFont { path: fallback })
    }
}

fn read_font(path: &Path) -> Result<FontArc, ExportError> {
    let data = std::fs::read(path)?;
    FontArc::try_from_vec(data).map_err(|_| ExportError::InvalidFont {
        path: path.to_path_buf(),
    })
}

/// Draw a text run centered on its anchor. Glyph coverage is blended
/// against the pixels already in the image.
pub fn draw_text(
    image: &mut RgbaImage,
    text: &Text,
    origin: Point,
    fonts: &FontDir,
) -> Result<(), ExportError> {
    let font = fonts.load(&text.font.name)?;
    let size = text.font.size as f32;
    let scaled = font.as_scaled(size);

    let lines: Vec<&str> = text.content.lines().collect();
    let line_height = size * LINE_HEIGHT_RATIO;
    let block_height = line_height * lines.len().max(1) as f32;

    let anchor_x = (text.anchor.x - origin.x) as f32;
    let anchor_y = (text.anchor.y - origin.y) as f32;
    let mut line_top = anchor_y - block_height / 2.0;

    let color = text.style.stroke;
    for line in lines {
        let width = line_width(&scaled, line);
        let start_x = anchor_x - width / 2.0;
        let baseline = line_top + scaled.ascent();
        draw_line(image, &font, size, line, start_x, baseline, color);
        line_top += line_height;
    }
    Ok(())
}

fn line_width<'a>(scaled: &impl ScaleFont<&'a FontArc>, line: &str) -> f32 {
    let mut width = 0.0;
    let mut prev = None;
    for ch in line.chars() {
        let gid = scaled.font().glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, gid);
        }
        width += scaled.h_advance(gid);
        prev = Some(gid);
    }
    width
}

fn draw_line(
    image: &mut RgbaImage,
    font: &FontArc,
    size: f32,
    line: &str,
    start_x: f32,
    baseline: f32,
    color: easel_core::shapes::Color,
) {
    let scaled = font.as_scaled(size);
    let mut caret = start_x;
    let mut prev = None;
    for ch in line.chars() {
        let gid = font.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, gid);
        }
        let glyph = gid.with_scale_and_position(size, ab_glyph::point(caret, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i64 + px as i64;
                let y = bounds.min.y as i64 + py as i64;
                if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
                    return;
                }
                let dst = image.get_pixel_mut(x as u32, y as u32);
                *dst = blend(*dst, color, coverage);
            });
        }
        caret += scaled.h_advance(gid);
        prev = Some(gid);
    }
}

fn blend(dst: Rgba<u8>, color: easel_core::shapes::Color, coverage: f32) -> Rgba<u8> {
    let cov = coverage.clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (d as f32 * (1.0 - cov) + s as f32 * cov).round() as u8;
    Rgba([
        mix(dst[0], color.r),
        mix(dst[1], color.g),
        mix(dst[2], color.b),
        dst[3].max((cov * color.a as f32) as u8),
    ])
}
