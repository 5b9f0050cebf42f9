//! Geometry data. Millimeters from the bottom-left corner, font sizes in
//! points. Must stay numerically identical to the backend PDF generator.

use super::zones::{
    BasicZones, BoxZone, ExtendedZones, LayoutConfig, ProfessionalZones, SquareZone, Step,
    TextBlockZone, TextZone,
};
use super::{LabelLayout, LabelSize};

// ============================================================================
// BASIC
// ============================================================================

const BASIC_58X30: BasicZones = BasicZones {
    datamatrix: SquareZone::new(1.5, 9.5, 19.0),
    barcode: BoxZone::new(1.5, 2.5, 55.0, 6.0),
    barcode_text: TextZone::new(29.0, 0.6, 4.0).centered(),
    inn: TextZone::new(22.0, 26.5, 4.5).bold().max_width(24.0),
    serial: TextZone::new(48.0, 26.5, 4.5).max_width(8.5),
    text_block: TextBlockZone {
        x: 22.0,
        y: 23.5,
        line_height: 2.6,
        font_size: 5.0,
        max_width: 34.5,
        step: Step::Down,
    },
};

const BASIC_58X40: BasicZones = BasicZones {
    datamatrix: SquareZone::new(1.5, 12.5, 24.0),
    barcode: BoxZone::new(1.5, 3.0, 55.0, 8.0),
    barcode_text: TextZone::new(29.0, 0.8, 5.0).centered(),
    inn: TextZone::new(27.0, 37.0, 5.5).bold().max_width(22.0),
    serial: TextZone::new(50.0, 37.0, 5.0).max_width(6.5),
    text_block: TextBlockZone {
        x: 27.0,
        y: 33.5,
        line_height: 2.8,
        font_size: 5.5,
        max_width: 29.5,
        step: Step::Down,
    },
};

const BASIC_58X60: BasicZones = BasicZones {
    datamatrix: SquareZone::new(2.0, 32.0, 24.0),
    barcode: BoxZone::new(2.0, 5.0, 54.0, 10.0),
    barcode_text: TextZone::new(29.0, 1.5, 6.0).centered(),
    inn: TextZone::new(28.0, 56.5, 6.0).bold().max_width(21.0),
    serial: TextZone::new(50.0, 56.5, 5.5).max_width(6.5),
    text_block: TextBlockZone {
        x: 28.0,
        y: 53.0,
        line_height: 3.0,
        font_size: 6.0,
        max_width: 28.5,
        step: Step::Down,
    },
};

// ============================================================================
// PROFESSIONAL
// ============================================================================

const PROFESSIONAL_58X40: ProfessionalZones = ProfessionalZones {
    datamatrix: SquareZone::new(1.5, 14.0, 22.0),
    barcode: BoxZone::new(1.5, 3.5, 55.0, 8.0),
    barcode_text: TextZone::new(29.0, 1.0, 5.0).centered(),
    serial: TextZone::new(24.5, 37.0, 5.0).max_width(20.0),
    eac: TextZone::new(53.0, 34.5, 8.0).centered().bold(),
    text_block: TextBlockZone {
        x: 24.5,
        y: 32.5,
        line_height: 2.6,
        font_size: 5.0,
        max_width: 24.0,
        step: Step::Down,
    },
};

// ============================================================================
// EXTENDED
// ============================================================================

const EXTENDED_58X40: ExtendedZones = ExtendedZones {
    datamatrix: SquareZone::new(2.0, 21.5, 15.0),
    barcode: BoxZone::new(19.0, 25.5, 37.0, 10.0),
    barcode_text: TextZone::new(37.5, 22.5, 5.0).centered(),
    inn: TextZone::new(29.0, 37.3, 5.5).centered().bold(),
    serial: TextZone::new(2.0, 37.3, 5.0).max_width(12.0),
    custom_block: TextBlockZone {
        x: 2.0,
        y: 1.5,
        line_height: 2.3,
        font_size: 4.5,
        max_width: 54.0,
        step: Step::Up,
    },
};

pub(super) static GEOMETRY: [(LabelLayout, LabelSize, LayoutConfig); 5] = [
    (
        LabelLayout::Basic,
        LabelSize::S58x30,
        LayoutConfig::Basic(BASIC_58X30),
    ),
    (
        LabelLayout::Basic,
        LabelSize::S58x40,
        LayoutConfig::Basic(BASIC_58X40),
    ),
    (
        LabelLayout::Basic,
        LabelSize::S58x60,
        LayoutConfig::Basic(BASIC_58X60),
    ),
    (
        LabelLayout::Professional,
        LabelSize::S58x40,
        LayoutConfig::Professional(PROFESSIONAL_58X40),
    ),
    (
        LabelLayout::Extended,
        LabelSize::S58x40,
        LayoutConfig::Extended(EXTENDED_58X40),
    ),
];
