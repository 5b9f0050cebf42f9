//! # Golden Tests
//!
//! Geometry and preview output that must not drift.
//!
//! - **Layout tables** (`.json`): zone maps of every (template, size) pair
//!   compared value-by-value against the backend's copy of the geometry.
//! - **Previews** (`.png`): the code placeholders of a basic 58x40 label are
//!   compared pixel-for-pixel against a stored preview. Rendering the same
//!   label twice yields identical PNG bytes, and every supported combination
//!   paints into a bitmap of the right size.
//!
//! ## Regenerating Previews
//!
//! ```bash
//! cargo test --test golden_tests generate_golden_previews -- --ignored --nocapture
//! ```

use kleykod_label::item::{CustomLine, DisplayFlags, ItemData};
use kleykod_label::layout::{LabelLayout, LabelSize, get_layout_config};
use kleykod_label::render::{RasterSurface, render_label};
use kleykod_label::units::label_px;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

/// Backend geometry per (template, size).
const GEOMETRY_GOLDENS: [(LabelLayout, LabelSize, &str); 5] = [
    (
        LabelLayout::Basic,
        LabelSize::S58x30,
        include_str!("golden/basic_58x30.json"),
    ),
    (
        LabelLayout::Basic,
        LabelSize::S58x40,
        include_str!("golden/basic_58x40.json"),
    ),
    (
        LabelLayout::Basic,
        LabelSize::S58x60,
        include_str!("golden/basic_58x60.json"),
    ),
    (
        LabelLayout::Professional,
        LabelSize::S58x40,
        include_str!("golden/professional_58x40.json"),
    ),
    (
        LabelLayout::Extended,
        LabelSize::S58x40,
        include_str!("golden/extended_58x40.json"),
    ),
];

/// Basic 58x40 label with no item data: DataMatrix and barcode only.
const BASIC_58X40_CODES_PNG: &[u8] = include_bytes!("golden/basic_58x40_codes.png");

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn zone_map_json(template: LabelLayout, size: LabelSize) -> Value {
    let config = get_layout_config(template, size).expect("geometry defined");
    serde_json::to_value(config.zone_map()).expect("zone map serializes")
}

fn full_item() -> ItemData {
    ItemData {
        barcode: "4600000000035".into(),
        article: "ART-2024-77".into(),
        size: "XL".into(),
        color: "графит".into(),
        name: "Толстовка с капюшоном утеплённая".into(),
        country: "Россия".into(),
        composition: "хлопок 80%, полиэстер 20%".into(),
        brand: "Северный ветер".into(),
        manufacturer: "ООО «Текстиль»".into(),
        production_date: "03.2025".into(),
        importer: "ООО «Импорт»".into(),
        certificate: "ЕАЭС N RU Д-RU.РА01.В.12345/25".into(),
        address: "г. Иваново, ул. Ткацкая, 1".into(),
        inn: "3702000000".into(),
    }
}

fn render_codes_only(template: LabelLayout, size: LabelSize) -> RasterSurface {
    let (width, height) = label_px(size);
    let mut surface = RasterSurface::new(width, height);
    render_label(
        &mut surface,
        template,
        size,
        &ItemData::default(),
        &DisplayFlags::default(),
        None,
        &[],
    );
    surface
}

/// Write binary data to a golden file
fn write_golden(name: &str, ext: &str, data: &[u8]) {
    let path = format!("{}/{}.{}", GOLDEN_DIR, name, ext);
    fs::write(&path, data).unwrap_or_else(|e| panic!("Failed to write {}: {}", path, e));
    println!("Wrote {} ({} bytes)", path, data.len());
}

fn render_png(template: LabelLayout, size: LabelSize) -> Vec<u8> {
    let (width, height) = label_px(size);
    let mut surface = RasterSurface::new(width, height);
    render_label(
        &mut surface,
        template,
        size,
        &full_item(),
        &DisplayFlags::all(),
        Some(42),
        &[CustomLine::new("Сезон", "зима")],
    );
    surface.to_png().expect("PNG encoding failed")
}

// ============================================================================
// LAYOUT TABLES
// ============================================================================

#[test]
fn golden_geometry_tables() {
    for (template, size, json) in GEOMETRY_GOLDENS {
        let expected: Value = serde_json::from_str(json)
            .unwrap_or_else(|e| panic!("Invalid golden JSON for {} {}: {}", template, size, e));
        assert_eq!(zone_map_json(template, size), expected, "{} {}", template, size);
    }
}

#[test]
fn golden_geometry_covers_every_defined_pair() {
    for template in LabelLayout::ALL {
        for size in LabelSize::ALL {
            let has_golden = GEOMETRY_GOLDENS
                .iter()
                .any(|(t, s, _)| *t == template && *s == size);
            assert_eq!(
                get_layout_config(template, size).is_some(),
                has_golden,
                "{} {}",
                template,
                size
            );
        }
    }
}

#[test]
fn golden_every_layout_has_code_zones() {
    for template in LabelLayout::ALL {
        for size in LabelSize::ALL {
            let Some(config) = get_layout_config(template, size) else {
                continue;
            };
            let map = config.zone_map();
            assert!(map.contains_key("barcode"), "{} {} lacks barcode", template, size);
            assert!(map.contains_key("datamatrix"), "{} {} lacks datamatrix", template, size);
        }
    }
}

#[test]
fn golden_professional_and_extended_only_58x40() {
    for template in [LabelLayout::Professional, LabelLayout::Extended] {
        for size in LabelSize::ALL {
            assert_eq!(
                get_layout_config(template, size).is_some(),
                size == LabelSize::S58x40,
                "{} {}",
                template,
                size
            );
        }
    }
}

// ============================================================================
// PREVIEWS
// ============================================================================

#[test]
fn golden_basic_58x40_codes_preview() {
    let golden = image::load_from_memory(BASIC_58X40_CODES_PNG)
        .expect("Invalid golden PNG")
        .to_luma8();
    let surface = render_codes_only(LabelLayout::Basic, LabelSize::S58x40);
    let actual = surface.image();

    assert_eq!(
        (actual.width(), actual.height()),
        (golden.width(), golden.height())
    );
    if actual.as_raw() != golden.as_raw() {
        let first_diff = actual
            .as_raw()
            .iter()
            .zip(golden.as_raw())
            .position(|(a, b)| a != b)
            .unwrap_or(0);
        let width = golden.width() as usize;
        panic!(
            "Preview differs from {}/basic_58x40_codes.png:\n\
             - First difference at pixel ({}, {})\n\
             Regenerate with the ignored generate_golden_previews test if intentional.",
            GOLDEN_DIR,
            first_diff % width,
            first_diff / width
        );
    }
}

#[test]
fn golden_preview_is_deterministic() {
    for template in LabelLayout::ALL {
        for size in LabelSize::ALL {
            let first = render_png(template, size);
            let second = render_png(template, size);
            assert!(first == second, "{} {} preview differs between runs", template, size);
        }
    }
}

#[test]
fn golden_preview_dimensions() {
    for size in LabelSize::ALL {
        let (width, height) = label_px(size);
        let mut surface = RasterSurface::new(1, 1);
        render_label(
            &mut surface,
            LabelLayout::Basic,
            size,
            &full_item(),
            &DisplayFlags::default(),
            None,
            &[],
        );
        assert_eq!((surface.width(), surface.height()), (width, height));
        assert!(surface.dark_pixels() > 0);
    }
}

#[test]
fn golden_preview_png_signature() {
    let png = render_png(LabelLayout::Extended, LabelSize::S58x40);
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

// ============================================================================
// GOLDEN FILE GENERATOR
// ============================================================================

/// Write the stored preview plus full-label previews for visual inspection.
/// Run with: cargo test --test golden_tests generate_golden_previews -- --ignored --nocapture
#[test]
#[ignore]
fn generate_golden_previews() {
    let codes = render_codes_only(LabelLayout::Basic, LabelSize::S58x40);
    write_golden(
        "basic_58x40_codes",
        "png",
        &codes.to_png().expect("PNG encoding failed"),
    );

    for (template, size, _) in GEOMETRY_GOLDENS {
        let name = format!("preview_{}_{}", template, size);
        write_golden(&name, "png", &render_png(template, size));
    }
}
