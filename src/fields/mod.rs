//! # Field Configuration
//!
//! Which data fields each (template, size) can print, and how much text each
//! field holds before it wraps past its line budget.
//!
//! ## Lookup fallback
//!
//! Every template must always produce some preview, so a lookup for a size
//! the template has no table for uses the template's 58x40 table instead of
//! failing:
//!
//! ```
//! use kleykod_label::fields::{FieldId, is_field_supported};
//! use kleykod_label::layout::{LabelLayout, LabelSize};
//!
//! // professional only has a 58x40 table; 58x60 falls back to it
//! assert!(!is_field_supported(FieldId::Composition, LabelLayout::Professional, LabelSize::S58x60));
//! assert!(is_field_supported(FieldId::Importer, LabelLayout::Professional, LabelSize::S58x60));
//! ```
//!
//! ## Field cap
//!
//! [`get_field_limit`] bounds how many fields may be active in the shared
//! text block at once. INN does not count for basic and extended, where it
//! prints in its own header zone.

pub mod selection;
mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::layout::{LabelLayout, LabelSize};

pub use selection::{FieldSelection, SelectionError};

/// Number of [`FieldId`] variants.
pub const FIELD_COUNT: usize = 15;

/// A label data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Article,
    /// Size and color share one toggle and one limit.
    SizeColor,
    Brand,
    Composition,
    Country,
    Manufacturer,
    ProductionDate,
    Importer,
    Certificate,
    Address,
    Inn,
    #[serde(rename = "custom_1")]
    Custom1,
    #[serde(rename = "custom_2")]
    Custom2,
    #[serde(rename = "custom_3")]
    Custom3,
}

impl FieldId {
    pub const ALL: [FieldId; FIELD_COUNT] = [
        Self::Name,
        Self::Article,
        Self::SizeColor,
        Self::Brand,
        Self::Composition,
        Self::Country,
        Self::Manufacturer,
        Self::ProductionDate,
        Self::Importer,
        Self::Certificate,
        Self::Address,
        Self::Inn,
        Self::Custom1,
        Self::Custom2,
        Self::Custom3,
    ];

    /// Position in [`FieldId::ALL`] and in every field table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Article => "article",
            Self::SizeColor => "size_color",
            Self::Brand => "brand",
            Self::Composition => "composition",
            Self::Country => "country",
            Self::Manufacturer => "manufacturer",
            Self::ProductionDate => "production_date",
            Self::Importer => "importer",
            Self::Certificate => "certificate",
            Self::Address => "address",
            Self::Inn => "inn",
            Self::Custom1 => "custom_1",
            Self::Custom2 => "custom_2",
            Self::Custom3 => "custom_3",
        }
    }

    /// Index into the user's custom lines, for `Custom1..=Custom3`.
    pub fn custom_index(self) -> Option<usize> {
        match self {
            Self::Custom1 => Some(0),
            Self::Custom2 => Some(1),
            Self::Custom3 => Some(2),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s.trim())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits for one field in one (template, size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldLimitConfig {
    pub supported: bool,
    /// Approximate maximum characters before the text overflows `max_lines`.
    pub max_chars: usize,
    pub max_lines: usize,
    /// Shown when the field is unsupported or over its limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// Limits for every field of one (template, size), indexed by [`FieldId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig([FieldLimitConfig; FIELD_COUNT]);

impl FieldConfig {
    pub fn get(&self, field: FieldId) -> &FieldLimitConfig {
        &self.0[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldLimitConfig)> {
        FieldId::ALL.into_iter().zip(self.0.iter())
    }
}

/// Result of [`check_field_length`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLengthCheck {
    pub is_over_limit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FieldLengthCheck {
    fn ok() -> Self {
        Self {
            is_over_limit: false,
            warning: None,
        }
    }
}

fn lookup<T>(
    table: &'static [(LabelLayout, LabelSize, T)],
    template: LabelLayout,
    size: LabelSize,
) -> Option<&'static T> {
    table
        .iter()
        .find(|(t, s, _)| *t == template && *s == size)
        .or_else(|| {
            let fallback = template.fallback_size();
            table.iter().find(|(t, s, _)| *t == template && *s == fallback)
        })
        .map(|(_, _, v)| v)
}

/// Field limits for a (template, size), falling back to the template's 58x40
/// table for sizes it does not define.
pub fn get_field_config(template: LabelLayout, size: LabelSize) -> &'static FieldConfig {
    match lookup(&tables::FIELD_CONFIGS, template, size) {
        Some(config) => config,
        // Every template has a 58x40 table.
        None => &tables::FIELD_CONFIGS[1].2,
    }
}

pub fn is_field_supported(field: FieldId, template: LabelLayout, size: LabelSize) -> bool {
    get_field_config(template, size).get(field).supported
}

/// Advisory length check for a field value.
///
/// Unsupported fields and blank values are never over the limit: the
/// unsupported state is already reported by the disabled field itself.
/// The count covers the value as typed, surrounding spaces included.
pub fn check_field_length(
    field: FieldId,
    value: Option<&str>,
    template: LabelLayout,
    size: LabelSize,
) -> FieldLengthCheck {
    let config = get_field_config(template, size).get(field);
    if !config.supported {
        return FieldLengthCheck::ok();
    }

    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return FieldLengthCheck::ok(),
    };

    let length = value.chars().count();
    if length <= config.max_chars {
        return FieldLengthCheck::ok();
    }

    let warning = match config.hint {
        Some(hint) => hint.to_string(),
        None => format!(
            "Слишком длинный текст: {} символов при допустимых {}",
            length, config.max_chars
        ),
    };

    FieldLengthCheck {
        is_over_limit: true,
        warning: Some(warning),
    }
}

/// Fields that can be selected for this (template, size), in table order.
pub fn get_supported_fields(template: LabelLayout, size: LabelSize) -> Vec<FieldId> {
    get_field_config(template, size)
        .iter()
        .filter(|(_, c)| c.supported)
        .map(|(f, _)| f)
        .collect()
}

/// Fields shown greyed out for this (template, size), with their hints.
pub fn get_unsupported_fields(
    template: LabelLayout,
    size: LabelSize,
) -> Vec<(FieldId, &'static FieldLimitConfig)> {
    get_field_config(template, size)
        .iter()
        .filter(|(_, c)| !c.supported)
        .collect()
}

/// Maximum number of fields active at once in the shared text block.
pub fn get_field_limit(template: LabelLayout, size: LabelSize) -> usize {
    lookup(&tables::FIELD_CAPS, template, size)
        .copied()
        .unwrap_or(0)
}

/// Approximate characters that fit on one text-block line.
pub fn chars_per_line(template: LabelLayout, size: LabelSize) -> usize {
    lookup(&tables::CHARS_PER_LINE, template, size)
        .copied()
        .unwrap_or(28)
}

/// Whether an active `field` occupies one of the capped text-block slots.
pub fn counts_toward_cap(field: FieldId, template: LabelLayout) -> bool {
    !(field == FieldId::Inn && matches!(template, LabelLayout::Basic | LabelLayout::Extended))
}
