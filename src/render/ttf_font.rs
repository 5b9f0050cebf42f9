//! TrueType glyphs for the raster preview (DejaVu Sans Condensed).
//!
//! Covers Latin, Cyrillic and the label punctuation (`№`, `«»`, `ё`).
//! Glyphs come back as anti-aliased coverage; characters the face has no
//! outline for return `None` and the caller falls back to Spleen bitmaps.
//!
//! Set `KLEYKOD_FONT_TTF` to a `.ttf` path to preview with another face.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use std::sync::OnceLock;
use tracing::warn;

/// Environment variable naming a replacement TTF file.
pub const FONT_OVERRIDE_ENV: &str = "KLEYKOD_FONT_TTF";

static REGULAR: OnceLock<Option<FontArc>> = OnceLock::new();
static BOLD: OnceLock<Option<FontArc>> = OnceLock::new();

fn load(bundled: &'static [u8], face: &str) -> Option<FontArc> {
    if let Some(path) = std::env::var_os(FONT_OVERRIDE_ENV) {
        match std::fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| FontArc::try_from_vec(bytes).map_err(|e| e.to_string()))
        {
            Ok(font) => return Some(font),
            Err(e) => warn!(path = ?path, error = %e, "font override unusable, using bundled face"),
        }
    }
    match FontArc::try_from_slice(bundled) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(face, error = %e, "bundled font failed to load, using bitmap glyphs");
            None
        }
    }
}

fn regular() -> Option<&'static FontArc> {
    REGULAR
        .get_or_init(|| load(include_bytes!("fonts/DejaVuSansCondensed.ttf"), "regular"))
        .as_ref()
}

fn bold() -> Option<&'static FontArc> {
    BOLD.get_or_init(|| load(include_bytes!("fonts/DejaVuSansCondensed-Bold.ttf"), "bold"))
        .as_ref()
}

fn face(bold_face: bool) -> Option<&'static FontArc> {
    if bold_face { bold() } else { regular() }
}

/// One rasterized glyph, placed relative to the top-left of its line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TtfGlyph {
    /// Offset of the coverage buffer from the pen position.
    pub left: i32,
    /// Offset of the coverage buffer from the top of the line box.
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Intensity values: 0.0 = paper, 1.0 = full ink.
    pub coverage: Vec<f32>,
    /// Pen advance in pixels.
    pub advance: f32,
}

impl TtfGlyph {
    pub fn has_ink(&self) -> bool {
        self.coverage.iter().any(|&c| c > 0.5)
    }
}

/// Rasterize `ch` so that the line box is `pixel_height` tall.
///
/// `width_factor` condenses the glyph horizontally (1.0 = natural width).
/// Returns `None` when the face maps `ch` to `.notdef`. Blank glyphs such
/// as the space come back with an empty coverage buffer.
pub fn rasterize(
    ch: char,
    bold_face: bool,
    pixel_height: f32,
    width_factor: f32,
) -> Option<TtfGlyph> {
    let font = face(bold_face)?;
    let id = font.glyph_id(ch);
    if id.0 == 0 {
        return None;
    }

    let scale = PxScale {
        x: pixel_height * width_factor,
        y: pixel_height,
    };
    let scaled = font.as_scaled(scale);
    let advance = scaled.h_advance(id);
    let baseline_y = scaled.ascent();
    let glyph = id.with_scale_and_position(scale, ab_glyph::point(0.0, baseline_y));

    let Some(outlined) = font.outline_glyph(glyph) else {
        return Some(TtfGlyph {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            coverage: Vec::new(),
            advance,
        });
    };

    let bounds = outlined.px_bounds();
    let width = bounds.width().ceil().max(0.0) as usize;
    let height = bounds.height().ceil().max(0.0) as usize;
    let mut coverage = vec![0.0f32; width * height];
    outlined.draw(|x, y, c| {
        let (x, y) = (x as usize, y as usize);
        if x < width && y < height {
            let idx = y * width + x;
            coverage[idx] = (coverage[idx] + c).min(1.0);
        }
    });

    Some(TtfGlyph {
        left: bounds.min.x as i32,
        top: bounds.min.y as i32,
        width,
        height,
        coverage,
        advance,
    })
}
