//! Placeholder symbols for the preview.
//!
//! The preview never encodes real codes: a DataMatrix is shown as a fixed
//! checkerboard with the L-shaped finder and clock track, and a 1D barcode as
//! a fixed sequence of bar widths. Both stretch to the configured zone.

use super::surface::{Color, Surface};

/// Modules per side of the DataMatrix placeholder.
pub const DATAMATRIX_MODULES: usize = 16;

/// Alternating bar/space widths (in modules), starting with a bar.
pub const BAR_PATTERN: [u8; 48] = [
    1, 1, 1, 1, 2, 1, 1, 3, 3, 1, 1, 2, 1, 2, 2, 1, 1, 1, 3, 2, 2, 1, 1, 1, //
    1, 3, 2, 1, 1, 2, 3, 1, 1, 1, 2, 2, 2, 1, 1, 3, 1, 2, 1, 1, 1, 1, 1, 1,
];

/// Whether the placeholder module at (`col`, `row`) is dark. Row 0 is the top.
pub fn datamatrix_module(col: usize, row: usize) -> bool {
    let last = DATAMATRIX_MODULES - 1;
    if col == 0 || row == last {
        // solid finder: left column and bottom row
        true
    } else if row == 0 || col == last {
        // clock track: alternating top row and right column
        (col + row) % 2 == 0
    } else {
        (col + row) % 2 == 1
    }
}

/// Paint the DataMatrix placeholder into a `size`-pixel square at (`x`, `y`).
pub fn draw_datamatrix(surface: &mut dyn Surface, x: f32, y: f32, size: f32) {
    let module = size / DATAMATRIX_MODULES as f32;
    for row in 0..DATAMATRIX_MODULES {
        for col in 0..DATAMATRIX_MODULES {
            if datamatrix_module(col, row) {
                surface.fill_rect(
                    x + col as f32 * module,
                    y + row as f32 * module,
                    module,
                    module,
                    Color::BLACK,
                );
            }
        }
    }
}

/// Total width of [`BAR_PATTERN`] in modules.
pub fn bar_pattern_modules() -> u32 {
    BAR_PATTERN.iter().map(|&w| w as u32).sum()
}

/// Paint the barcode placeholder into the given pixel rectangle.
pub fn draw_barcode(surface: &mut dyn Surface, x: f32, y: f32, width: f32, height: f32) {
    let module = width / bar_pattern_modules() as f32;
    let mut cursor = x;
    for (i, &w) in BAR_PATTERN.iter().enumerate() {
        let bar_width = w as f32 * module;
        if i % 2 == 0 {
            surface.fill_rect(cursor, y, bar_width, height, Color::BLACK);
        }
        cursor += bar_width;
    }
}
