//! Field limit data per (template, size).
//!
//! `max_chars` / `max_lines` are empirical: measured against the backend's
//! font at each zone width. They are advisory, not typographic guarantees.

use super::{FieldConfig, FieldLimitConfig};
use crate::layout::{LabelLayout, LabelSize};

/// Approximate characters per text-block line, per (template, size).
pub(super) static CHARS_PER_LINE: [(LabelLayout, LabelSize, usize); 5] = [
    (LabelLayout::Basic, LabelSize::S58x30, 24),
    (LabelLayout::Basic, LabelSize::S58x40, 28),
    (LabelLayout::Basic, LabelSize::S58x60, 30),
    (LabelLayout::Professional, LabelSize::S58x40, 24),
    (LabelLayout::Extended, LabelSize::S58x40, 40),
];

/// Maximum simultaneously active fields in the shared text block.
pub(super) static FIELD_CAPS: [(LabelLayout, LabelSize, usize); 5] = [
    (LabelLayout::Basic, LabelSize::S58x30, 5),
    (LabelLayout::Basic, LabelSize::S58x40, 8),
    (LabelLayout::Basic, LabelSize::S58x60, 11),
    (LabelLayout::Professional, LabelSize::S58x40, 8),
    (LabelLayout::Extended, LabelSize::S58x40, 9),
];

const fn fits(max_chars: usize, max_lines: usize) -> FieldLimitConfig {
    FieldLimitConfig {
        supported: true,
        max_chars,
        max_lines,
        hint: None,
    }
}

const fn fits_with_hint(max_chars: usize, max_lines: usize, hint: &'static str) -> FieldLimitConfig {
    FieldLimitConfig {
        supported: true,
        max_chars,
        max_lines,
        hint: Some(hint),
    }
}

const fn unsupported(hint: &'static str) -> FieldLimitConfig {
    FieldLimitConfig {
        supported: false,
        max_chars: 0,
        max_lines: 0,
        hint: Some(hint),
    }
}

const CUSTOM_EXTENDED_ONLY: &str = "Дополнительные строки доступны только в расширенном шаблоне";

// Entry order follows FieldId::ALL:
// name, article, size_color, brand, composition, country, manufacturer,
// production_date, importer, certificate, address, inn, custom_1..3

const BASIC_58X30: FieldConfig = FieldConfig([
    fits_with_hint(48, 2, "Название длиннее 48 символов не поместится в 2 строки"),
    fits(18, 1),
    fits(20, 1),
    fits(18, 1),
    unsupported("Состав не помещается на этикетке 58x30, выберите 58x40 или 58x60"),
    fits(18, 1),
    unsupported("Изготовитель не помещается на этикетке 58x30, выберите 58x40 или 58x60"),
    unsupported("Дата изготовления не помещается на этикетке 58x30"),
    unsupported("Импортёр выводится только на этикетке 58x60"),
    unsupported("Сертификат выводится только на этикетке 58x60"),
    unsupported("Адрес выводится только на этикетке 58x60"),
    fits_with_hint(12, 1, "ИНН содержит 10 или 12 цифр"),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
]);

const BASIC_58X40: FieldConfig = FieldConfig([
    fits_with_hint(56, 2, "Название длиннее 56 символов не поместится в 2 строки"),
    fits(22, 1),
    fits(24, 1),
    fits(22, 1),
    fits_with_hint(46, 2, "Состав длиннее 46 символов будет обрезан"),
    fits(20, 1),
    fits_with_hint(44, 2, "Изготовитель длиннее 44 символов будет обрезан"),
    fits(10, 1),
    unsupported("Импортёр выводится только на этикетке 58x60"),
    unsupported("Сертификат выводится только на этикетке 58x60"),
    unsupported("Адрес выводится только на этикетке 58x60"),
    fits_with_hint(12, 1, "ИНН содержит 10 или 12 цифр"),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
]);

const BASIC_58X60: FieldConfig = FieldConfig([
    fits_with_hint(90, 3, "Название длиннее 90 символов не поместится в 3 строки"),
    fits(24, 1),
    fits(26, 1),
    fits(24, 1),
    fits_with_hint(75, 3, "Состав длиннее 75 символов будет обрезан"),
    fits(22, 1),
    fits_with_hint(52, 2, "Изготовитель длиннее 52 символов будет обрезан"),
    fits(10, 1),
    fits_with_hint(52, 2, "Импортёр длиннее 52 символов будет обрезан"),
    fits(30, 1),
    fits_with_hint(80, 3, "Адрес длиннее 80 символов будет обрезан"),
    fits_with_hint(12, 1, "ИНН содержит 10 или 12 цифр"),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
]);

const PROFESSIONAL_58X40: FieldConfig = FieldConfig([
    fits_with_hint(48, 2, "Название длиннее 48 символов не поместится в 2 строки"),
    fits(18, 1),
    fits(20, 1),
    fits(18, 1),
    unsupported("Состав не выводится в профессиональном шаблоне"),
    fits(18, 1),
    unsupported("Изготовитель не выводится в профессиональном шаблоне, укажите импортёра"),
    unsupported("Дата изготовления не выводится в профессиональном шаблоне"),
    fits_with_hint(40, 2, "Импортёр длиннее 40 символов будет обрезан"),
    fits(24, 1),
    unsupported("Адрес не выводится в профессиональном шаблоне"),
    fits_with_hint(12, 1, "ИНН содержит 10 или 12 цифр"),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
    unsupported(CUSTOM_EXTENDED_ONLY),
]);

const EXTENDED_58X40: FieldConfig = FieldConfig([
    fits_with_hint(34, 1, "Название длиннее 34 символов будет обрезано"),
    fits(32, 1),
    fits(30, 1),
    unsupported("Бренд не выводится в расширенном шаблоне, добавьте его дополнительной строкой"),
    fits(30, 1),
    unsupported("Страна не выводится в расширенном шаблоне, добавьте её дополнительной строкой"),
    fits(26, 1),
    fits(10, 1),
    unsupported("Импортёр не выводится в расширенном шаблоне, добавьте его дополнительной строкой"),
    unsupported("Сертификат не выводится в расширенном шаблоне, добавьте его дополнительной строкой"),
    unsupported("Адрес не выводится в расширенном шаблоне, добавьте его дополнительной строкой"),
    fits_with_hint(12, 1, "ИНН содержит 10 или 12 цифр"),
    fits(40, 1),
    fits(40, 1),
    fits(40, 1),
]);

pub(super) static FIELD_CONFIGS: [(LabelLayout, LabelSize, FieldConfig); 5] = [
    (LabelLayout::Basic, LabelSize::S58x30, BASIC_58X30),
    (LabelLayout::Basic, LabelSize::S58x40, BASIC_58X40),
    (LabelLayout::Basic, LabelSize::S58x60, BASIC_58X60),
    (LabelLayout::Professional, LabelSize::S58x40, PROFESSIONAL_58X40),
    (LabelLayout::Extended, LabelSize::S58x40, EXTENDED_58X40),
];
