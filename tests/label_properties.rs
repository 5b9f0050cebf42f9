//! Properties of the layout tables, field limits, unit conversion and the
//! renderer that hold for every template and size.

use kleykod_label::fields::{
    self, FieldId, FieldSelection, SelectionError, check_field_length, counts_toward_cap,
    get_field_config, get_field_limit, get_supported_fields, is_field_supported,
};
use kleykod_label::item::{DisplayFlags, ItemData};
use kleykod_label::layout::{LabelLayout, LabelSize, get_layout_config};
use kleykod_label::render::{DrawCommand, RecordingSurface, render_label, unsupported_message};
use kleykod_label::units::{invert_y, mm_to_px};
use pretty_assertions::assert_eq;

fn combinations() -> impl Iterator<Item = (LabelLayout, LabelSize)> {
    LabelLayout::ALL
        .into_iter()
        .flat_map(|t| LabelSize::ALL.into_iter().map(move |s| (t, s)))
}

#[test]
fn test_cap_covers_default_selectable_set() {
    for (template, size) in combinations() {
        let selectable = get_supported_fields(template, size)
            .into_iter()
            .filter(|&f| counts_toward_cap(f, template))
            .count();
        assert!(
            get_field_limit(template, size) >= selectable,
            "{} {}: cap {} < {} selectable",
            template,
            size,
            get_field_limit(template, size),
            selectable
        );
    }
}

#[test]
fn test_every_supported_field_can_be_selected_together() {
    for (template, size) in combinations() {
        let mut selection = FieldSelection::new(template, size);
        for field in get_supported_fields(template, size) {
            selection.activate(field).unwrap();
        }
        assert!(selection.counted() <= selection.cap());
    }
}

#[test]
fn test_check_field_length_is_idempotent() {
    let long = "ж".repeat(300);
    for (template, size) in combinations() {
        for field in FieldId::ALL {
            for value in [None, Some(""), Some("Кружка"), Some(long.as_str())] {
                let first = check_field_length(field, value, template, size);
                let second = check_field_length(field, value, template, size);
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn test_unsupported_fields_never_over_limit() {
    let long = "x".repeat(1000);
    for (template, size) in combinations() {
        for field in FieldId::ALL {
            if !is_field_supported(field, template, size) {
                let check = check_field_length(field, Some(long.as_str()), template, size);
                assert!(!check.is_over_limit, "{} {} {}", template, size, field);
            }
        }
    }
}

#[test]
fn test_basic_name_limit_boundary() {
    let (template, size) = (LabelLayout::Basic, LabelSize::S58x40);

    let at_limit = "н".repeat(56);
    let check = check_field_length(FieldId::Name, Some(at_limit.as_str()), template, size);
    assert!(!check.is_over_limit);
    assert_eq!(check.warning, None);

    let over = "н".repeat(57);
    let check = check_field_length(FieldId::Name, Some(over.as_str()), template, size);
    assert!(check.is_over_limit);
    assert_eq!(
        check.warning.as_deref(),
        Some("Название длиннее 56 символов не поместится в 2 строки")
    );
}

#[test]
fn test_professional_composition_unsupported_at_any_size() {
    for size in LabelSize::ALL {
        assert!(!is_field_supported(FieldId::Composition, LabelLayout::Professional, size));
    }
}

#[test]
fn test_invert_y_round_trip() {
    for h in [30.0, 40.0, 60.0, 41.3, 0.0] {
        for y in [0.0, 0.8, 12.5, 33.5, 37.0, 59.9, -2.0] {
            assert!((invert_y(invert_y(y, h), h) - y).abs() < 1e-9, "y={} h={}", y, h);
        }
    }
}

#[test]
fn test_mm_to_px_is_linear() {
    let samples = [0.0, 0.5, 1.5, 2.8, 12.5, 29.5, 58.0];
    for a in samples {
        for b in samples {
            assert!((mm_to_px(a + b) - (mm_to_px(a) + mm_to_px(b))).abs() < 1e-9);
        }
    }
}

#[test]
fn test_unsupported_geometry_paints_only_diagnostic() {
    let (template, size) = (LabelLayout::Professional, LabelSize::S58x30);
    assert!(get_layout_config(template, size).is_none());

    let item = ItemData {
        barcode: "4600000000035".into(),
        name: "Куртка".into(),
        article: "JK-1".into(),
        ..Default::default()
    };
    let mut surface = RecordingSurface::new();
    let summary = render_label(
        &mut surface,
        template,
        size,
        &item,
        &DisplayFlags::all(),
        Some(7),
        &[],
    );

    assert!(summary.fallback);
    assert!(summary.drawn.is_empty());
    assert_eq!(surface.rect_count(), 0);
    assert_eq!(surface.texts(), vec![unsupported_message(template, size).as_str()]);
    assert!(matches!(surface.commands[0], DrawCommand::Clear { .. }));
}

#[test]
fn test_field_drawn_only_with_flag_and_value() {
    let (template, size) = (LabelLayout::Basic, LabelSize::S58x40);
    let item = ItemData {
        name: "Кружка".into(),
        article: String::new(),
        brand: "Гжель".into(),
        ..Default::default()
    };
    let mut flags = DisplayFlags::default();
    flags.set(FieldId::Brand, false);

    let summary = render_label(
        &mut RecordingSurface::new(),
        template,
        size,
        &item,
        &flags,
        None,
        &[],
    );
    assert_eq!(summary.drawn, vec![FieldId::Name]);
}

/// Every item field filled with enough words to wrap past any line limit.
fn overflowing_item() -> ItemData {
    let long = "очень длинное значение поля которое не влезет ни в одну строку этикетки";
    ItemData {
        barcode: "4600000000011".into(),
        article: long.into(),
        size: long.into(),
        color: long.into(),
        name: long.into(),
        country: long.into(),
        composition: long.into(),
        brand: long.into(),
        manufacturer: long.into(),
        production_date: long.into(),
        importer: long.into(),
        certificate: long.into(),
        address: long.into(),
        inn: "771234567890".into(),
    }
}

#[test]
fn test_basic_text_block_never_reaches_barcode() {
    let item = overflowing_item();
    for size in LabelSize::ALL {
        let config = get_layout_config(LabelLayout::Basic, size).unwrap();
        let barcode = config.barcode();
        let barcode_top = mm_to_px(invert_y(barcode.y + barcode.height, size.height_mm())) as f32;

        let mut surface = RecordingSurface::new();
        let summary = render_label(
            &mut surface,
            LabelLayout::Basic,
            size,
            &item,
            &DisplayFlags::all(),
            Some(1),
            &[],
        );

        for command in &surface.commands {
            if let DrawCommand::Text { text, y, style, .. } = command {
                if text == &item.barcode {
                    continue;
                }
                assert!(
                    y + style.font_px <= barcode_top + 0.01,
                    "{}: {:?} bottom {} below barcode top {}",
                    size,
                    text,
                    y + style.font_px,
                    barcode_top
                );
            }
        }

        assert!(summary.drawn.contains(&FieldId::Name), "{}", size);
        assert!(!summary.overflowed.is_empty(), "{} fits every field", size);

        // every supported block field is either drawn or reported
        let fields = get_field_config(LabelLayout::Basic, size);
        for field in FieldId::ALL {
            if fields.get(field).supported {
                assert!(
                    summary.drawn.contains(&field) || summary.overflowed.contains(&field),
                    "{} {} neither drawn nor overflowed",
                    size,
                    field
                );
            }
        }
        for field in &summary.overflowed {
            assert!(!summary.drawn.contains(field));
        }
    }
}

#[test]
fn test_switching_template_drops_unsupported_selection() {
    let mut selection = FieldSelection::new(LabelLayout::Basic, LabelSize::S58x40);
    selection.activate(FieldId::Name).unwrap();
    selection.activate(FieldId::Composition).unwrap();

    let dropped = selection.switch(LabelLayout::Professional, LabelSize::S58x40);
    assert_eq!(dropped, vec![FieldId::Composition]);
    assert!(selection.is_active(FieldId::Name));

    let err = selection.activate(FieldId::Composition).unwrap_err();
    assert!(matches!(err, SelectionError::Unsupported { .. }));
}

#[test]
fn test_field_ids_round_trip_through_names() {
    for field in FieldId::ALL {
        assert_eq!(FieldId::parse(field.as_str()), Some(field));
    }
    assert_eq!(fields::FIELD_COUNT, FieldId::ALL.len());
}
