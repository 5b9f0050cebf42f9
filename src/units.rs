//! # Unit Conversion
//!
//! Millimeter/point to pixel conversion and the bottom-origin to top-origin
//! Y flip used by the preview renderer.
//!
//! ## Calculations
//!
//! ```text
//! dots_per_mm = DPI / 25.4
//! dots_per_pt = DPI / 72
//!
//! At 203 DPI:
//!   dots_per_mm ≈ 7.99
//!   58mm label width ≈ 463.5 px
//! ```
//!
//! The backend PDF generator uses the same constants. Any change here makes
//! the preview drift from the printed label.

use crate::layout::LabelSize;

/// Reference resolution of the thermal printers labels are printed on.
pub const DPI: f64 = 203.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Pixels per millimeter at [`DPI`].
#[inline]
pub fn px_per_mm() -> f64 {
    DPI / MM_PER_INCH
}

/// Convert millimeters to pixels.
///
/// ```
/// use kleykod_label::units::mm_to_px;
///
/// assert!((mm_to_px(25.4) - 203.0).abs() < 1e-9);
/// ```
#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm * px_per_mm()
}

/// Convert pixels back to millimeters.
#[inline]
pub fn px_to_mm(px: f64) -> f64 {
    px / px_per_mm()
}

/// Convert a font size in points to pixels.
#[inline]
pub fn pt_to_px(pt: f64) -> f64 {
    pt * DPI / PT_PER_INCH
}

/// Convert a font size in points to millimeters.
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Flip a Y coordinate measured from the bottom edge into one measured from
/// the top edge (or back again; the operation is its own inverse).
#[inline]
pub fn invert_y(y: f64, label_height_mm: f64) -> f64 {
    label_height_mm - y
}

/// Pixel dimensions of a label surface, rounded to whole pixels.
pub fn label_px(size: LabelSize) -> (u32, u32) {
    let (w, h) = size.dimensions_mm();
    (mm_to_px(w).round() as u32, mm_to_px(h).round() as u32)
}
