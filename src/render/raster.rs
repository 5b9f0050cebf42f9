//! Bitmap surface backed by a grayscale image.
//!
//! Text is drawn with the bundled TrueType face (see [`super::ttf_font`]),
//! anti-aliased onto the gray bitmap. Characters the face lacks fall back to
//! the Spleen bitmap fonts scaled with nearest-neighbor sampling, and
//! characters neither font covers are drawn as boxes.
//!
//! A run never grows wider than `char_advance` times its length, which is
//! the width the wrapping math in the renderer budgets for.

use image::{GrayImage, ImageEncoder, Luma};
use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};
use std::collections::HashMap;

use super::surface::{Color, Surface, TextStyle};
use super::ttf_font::{self, TtfGlyph};
use crate::error::LabelError;

/// Source bitmap font, picked by target height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BaseFont {
    Spleen6x12,
    Spleen12x24,
}

impl BaseFont {
    fn for_height(px: f32) -> Self {
        if px <= 18.0 {
            Self::Spleen6x12
        } else {
            Self::Spleen12x24
        }
    }

    fn dimensions(self) -> (usize, usize) {
        match self {
            Self::Spleen6x12 => (6, 12),
            Self::Spleen12x24 => (12, 24),
        }
    }
}

/// Cache key for a glyph at one size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GlyphKey {
    ch: char,
    bold: bool,
    px_bits: u32,
    width_bits: u32,
}

/// A glyph ready to paint.
#[derive(Debug, Clone)]
enum CachedGlyph {
    Outline(TtfGlyph),
    /// Spleen bitmap at native size (1 = ink).
    Bitmap(BaseFont, Vec<u8>),
}

impl CachedGlyph {
    fn load(key: GlyphKey, font_px: f32, width_factor: f32) -> Self {
        match ttf_font::rasterize(key.ch, key.bold, font_px, width_factor) {
            Some(glyph) => Self::Outline(glyph),
            None => {
                let font = BaseFont::for_height(font_px);
                Self::Bitmap(font, generate_glyph(font, key.ch))
            }
        }
    }

    fn advance(&self, font_px: f32, width_factor: f32) -> f32 {
        match self {
            Self::Outline(glyph) => glyph.advance,
            Self::Bitmap(..) => char_advance(font_px) * width_factor,
        }
    }
}

/// Preview surface that paints real pixels.
pub struct RasterSurface {
    image: GrayImage,
    glyph_cache: HashMap<GlyphKey, CachedGlyph>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width.max(1), height.max(1), Luma([255])),
            glyph_cache: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Ink level at a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Count of pixels darker than mid-gray.
    pub fn dark_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] < 128).count()
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, LabelError> {
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::L8,
            )
            .map_err(|e: image::ImageError| LabelError::Image(e.to_string()))?;
        Ok(png_bytes)
    }

    fn glyph(&mut self, ch: char, style: &TextStyle, width_factor: f32) -> &CachedGlyph {
        cached_glyph(&mut self.glyph_cache, ch, style, width_factor)
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, style: &TextStyle, width_factor: f32) {
        let Self { image, glyph_cache } = self;
        match cached_glyph(glyph_cache, ch, style, width_factor) {
            CachedGlyph::Outline(glyph) => {
                let x0 = x.round() as i64 + glyph.left as i64;
                let y0 = y.round() as i64 + glyph.top as i64;
                for gy in 0..glyph.height {
                    for gx in 0..glyph.width {
                        let coverage = glyph.coverage[gy * glyph.width + gx];
                        if coverage > 0.0 {
                            blend(image, x0 + gx as i64, y0 + gy as i64, coverage, style.color);
                        }
                    }
                }
            }
            CachedGlyph::Bitmap(font, bitmap) => {
                draw_bitmap(image, *font, bitmap, x, y, style.font_px, style.color);
                if style.bold {
                    draw_bitmap(image, *font, bitmap, x + 1.0, y, style.font_px, style.color);
                }
            }
        }
    }
}

fn cached_glyph<'c>(
    cache: &'c mut HashMap<GlyphKey, CachedGlyph>,
    ch: char,
    style: &TextStyle,
    width_factor: f32,
) -> &'c CachedGlyph {
    let key = GlyphKey {
        ch,
        bold: style.bold,
        px_bits: style.font_px.to_bits(),
        width_bits: width_factor.to_bits(),
    };
    cache
        .entry(key)
        .or_insert_with(|| CachedGlyph::load(key, style.font_px, width_factor))
}

fn put(image: &mut GrayImage, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, Luma([color.0]));
    }
}

/// Darken a pixel toward `color` by `coverage`; never lightens.
fn blend(image: &mut GrayImage, x: i64, y: i64, coverage: f32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let Some(pixel) = image.get_pixel_mut_checked(x, y) else {
        return;
    };
    let paper = 255.0 - coverage.clamp(0.0, 1.0) * (255.0 - color.0 as f32);
    let value = paper.round() as u8;
    if value < pixel.0[0] {
        pixel.0[0] = value;
    }
}

fn draw_bitmap(
    image: &mut GrayImage,
    font: BaseFont,
    bitmap: &[u8],
    x: f32,
    y: f32,
    font_px: f32,
    color: Color,
) {
    let (src_w, src_h) = font.dimensions();
    let scale = font_px / src_h as f32;
    let dst_w = ((src_w as f32) * scale).round().max(1.0) as usize;
    let dst_h = font_px.round().max(1.0) as usize;

    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            if bitmap.get(sy * src_w + sx).copied().unwrap_or(0) != 0 {
                put(image, x as i64 + dx as i64, y as i64 + dy as i64, color);
            }
        }
    }
}

/// Advance width of one character at `font_px`.
pub fn char_advance(font_px: f32) -> f32 {
    let (w, h) = BaseFont::for_height(font_px).dimensions();
    (w as f32 * font_px / h as f32).round().max(1.0)
}

impl Surface for RasterSurface {
    fn clear(&mut self, width: u32, height: u32) {
        self.image = GrayImage::from_pixel(width.max(1), height.max(1), Luma([255]));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let x0 = x.round() as i64;
        let y0 = y.round() as i64;
        let x1 = (x + width).round() as i64;
        let y1 = (y + height).round() as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                put(&mut self.image, px, py, color);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let chars: Vec<char> = text.chars().collect();
        let natural: f32 = chars
            .iter()
            .map(|&ch| self.glyph(ch, style, 1.0).advance(style.font_px, 1.0))
            .sum();

        // condense runs wider than the cell budget
        let budget = char_advance(style.font_px) * chars.len() as f32;
        let width_factor = if natural > budget && natural > 0.0 {
            budget / natural
        } else {
            1.0
        };

        let advances: Vec<f32> = chars
            .iter()
            .map(|&ch| {
                self.glyph(ch, style, width_factor)
                    .advance(style.font_px, width_factor)
            })
            .collect();
        let run_width: f32 = advances.iter().sum();
        let start_x = if style.centered { x - run_width / 2.0 } else { x };

        let mut pen = start_x;
        for (&ch, &advance) in chars.iter().zip(&advances) {
            if ch != ' ' {
                self.draw_glyph(ch, pen, y, style, width_factor);
            }
            pen += advance;
        }
    }
}

/// Rasterize one Spleen glyph at its native size (1 = ink).
fn generate_glyph(font: BaseFont, ch: char) -> Vec<u8> {
    let (w, h) = font.dimensions();
    let mut glyph = vec![0u8; w * h];

    let data = match font {
        BaseFont::Spleen6x12 => FONT_6X12,
        BaseFont::Spleen12x24 => FONT_12X24,
    };
    let Some(mut spleen) = PSF2Font::new(data).into_iter().next() else {
        draw_box(&mut glyph, w, h);
        return glyph;
    };

    let utf8 = ch.to_string();
    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(rows) => {
            for (row_y, row) in rows.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < h && col_x < w && on {
                        glyph[row_y * w + col_x] = 1;
                    }
                }
            }
        }
        None => draw_box(&mut glyph, w, h),
    }
    glyph
}

/// Box outline for characters missing from the font.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    let inset_x = width / 6;
    let inset_y = height / 6;
    let (x0, x1) = (inset_x, width - 1 - inset_x);
    let (y0, y1) = (inset_y, height - 1 - inset_y);
    for x in x0..=x1 {
        glyph[y0 * width + x] = 1;
        glyph[y1 * width + x] = 1;
    }
    for y in y0..=y1 {
        glyph[y * width + x0] = 1;
        glyph[y * width + x1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(font_px: f32) -> TextStyle {
        TextStyle {
            font_px,
            bold: false,
            centered: false,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_clear_is_white() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(0.0, 0.0, 4.0, 4.0, Color::BLACK);
        surface.clear(8, 6);
        assert_eq!((surface.width(), surface.height()), (8, 6));
        assert_eq!(surface.dark_pixels(), 0);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = RasterSurface::new(10, 10);
        surface.fill_rect(-5.0, 8.0, 20.0, 20.0, Color::BLACK);
        // rows 8 and 9 fully painted
        assert_eq!(surface.dark_pixels(), 20);
        assert_eq!(surface.pixel(0, 9), Some(0));
        assert_eq!(surface.pixel(0, 7), Some(255));
    }

    #[test]
    fn test_text_leaves_ink() {
        let mut surface = RasterSurface::new(200, 40);
        surface.fill_text("ABC", 2.0, 2.0, &style(24.0));
        assert!(surface.dark_pixels() > 0);
    }

    #[test]
    fn test_glyphs_have_ink() {
        let glyph = generate_glyph(BaseFont::Spleen6x12, 'A');
        assert!(glyph.iter().any(|&p| p == 1));

        let mut boxed = vec![0u8; 12 * 24];
        draw_box(&mut boxed, 12, 24);
        // corners of the inset outline
        assert_eq!(boxed[4 * 12 + 2], 1);
        assert_eq!(boxed[19 * 12 + 9], 1);
        // interior stays empty
        assert_eq!(boxed[12 * 12 + 6], 0);
    }

    /// Ink rows in the middle column of the inked bounding box.
    fn middle_column_ink(surface: &RasterSurface) -> (usize, usize) {
        let dark: Vec<(u32, u32)> = (0..surface.height())
            .flat_map(|y| (0..surface.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|p| p < 160))
            .collect();
        let min_x = dark.iter().map(|p| p.0).min().unwrap();
        let max_x = dark.iter().map(|p| p.0).max().unwrap();
        let min_y = dark.iter().map(|p| p.1).min().unwrap();
        let max_y = dark.iter().map(|p| p.1).max().unwrap();
        let mid = (min_x + max_x) / 2;
        let inked = |x: u32, y: u32| surface.pixel(x, y).is_some_and(|p| p < 160);
        let rows = (min_y..=max_y)
            .filter(|&y| (mid.saturating_sub(1)..=mid + 1).any(|x| inked(x, y)))
            .count();
        (rows, (max_y - min_y + 1) as usize)
    }

    #[test]
    fn test_cyrillic_is_not_missing_glyph_box() {
        // a box outline only inks the top and bottom of its middle column,
        // the stem of Ф runs through it
        let mut surface = RasterSurface::new(40, 40);
        surface.fill_text("Ф", 4.0, 4.0, &style(28.0));
        let (rows, height) = middle_column_ink(&surface);
        assert!(rows * 2 > height, "{} of {} rows inked", rows, height);

        let mut boxed = RasterSurface::new(40, 40);
        boxed.fill_text("\u{10FFFD}", 4.0, 4.0, &style(28.0));
        let (rows, height) = middle_column_ink(&boxed);
        assert!(rows * 2 < height, "box inked {} of {} rows", rows, height);
    }

    #[test]
    fn test_cyrillic_words_use_outline_glyphs() {
        let mut surface = RasterSurface::new(400, 40);
        surface.fill_text("Футболка ИНН № «ёЁ»", 2.0, 2.0, &style(24.0));
        for ch in "ФутболкаИН№«ёЁ»".chars() {
            assert!(
                matches!(surface.glyph(ch, &style(24.0), 1.0), CachedGlyph::Outline(_)),
                "{:?} fell back to a bitmap",
                ch
            );
        }
        assert!(surface.dark_pixels() > 0);
    }

    #[test]
    fn test_run_stays_within_cell_budget() {
        let mut surface = RasterSurface::new(600, 40);
        let text = "ШШШШШШШШШШ";
        surface.fill_text(text, 0.0, 0.0, &style(24.0));
        let budget = (char_advance(24.0) * text.chars().count() as f32).ceil() as u32;
        let rightmost = (0..600)
            .filter(|&x| (0..40).any(|y| surface.pixel(x, y).is_some_and(|p| p < 160)))
            .max()
            .unwrap();
        assert!(rightmost <= budget + 2, "ink reaches {} of {}", rightmost, budget);
    }

    #[test]
    fn test_centered_text_is_symmetric() {
        let mut surface = RasterSurface::new(200, 20);
        let mut centered = style(12.0);
        centered.centered = true;
        surface.fill_text("IIII", 100.0, 0.0, &centered);

        let ink: Vec<u32> = (0..200)
            .filter(|&x| (0..20).any(|y| surface.pixel(x, y).is_some_and(|p| p < 200)))
            .collect();
        let (min, max) = (ink[0], ink[ink.len() - 1]);
        assert!(min >= 70 && max <= 130, "ink spans {}..{}", min, max);
    }

    #[test]
    fn test_png_signature() {
        let surface = RasterSurface::new(16, 16);
        let png = surface.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
