//! # Item Data
//!
//! Values printed on a label and the user's per-field display toggles. Both
//! come from outside the layout core (file parsing, organization and product
//! forms) and are plain data here.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::fields::FieldId;

/// Values for one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemData {
    pub barcode: String,
    pub article: String,
    pub size: String,
    pub color: String,
    pub name: String,
    pub country: String,
    pub composition: String,
    pub brand: String,
    pub manufacturer: String,
    pub production_date: String,
    pub importer: String,
    pub certificate: String,
    pub address: String,
    pub inn: String,
}

impl ItemData {
    /// Trimmed value of a field, `None` when empty.
    ///
    /// Size and color are joined into one value, see
    /// [`size_color_values`](Self::size_color_values) for the printed form.
    /// Custom lines are not part of the item and always return `None`.
    pub fn value(&self, field: FieldId) -> Option<Cow<'_, str>> {
        let raw = match field {
            FieldId::Name => &self.name,
            FieldId::Article => &self.article,
            FieldId::SizeColor => {
                return join_size_color(&self.size, &self.color).map(Cow::Owned);
            }
            FieldId::Brand => &self.brand,
            FieldId::Composition => &self.composition,
            FieldId::Country => &self.country,
            FieldId::Manufacturer => &self.manufacturer,
            FieldId::ProductionDate => &self.production_date,
            FieldId::Importer => &self.importer,
            FieldId::Certificate => &self.certificate,
            FieldId::Address => &self.address,
            FieldId::Inn => &self.inn,
            FieldId::Custom1 | FieldId::Custom2 | FieldId::Custom3 => return None,
        };
        non_empty(raw).map(Cow::Borrowed)
    }
}

impl ItemData {
    /// `"Размер: M"` and `"Цвет: чёрный"` as separate printed values,
    /// skipping the part that is empty.
    pub fn size_color_values(&self) -> Vec<String> {
        size_color_values(&self.size, &self.color)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn size_color_values(size: &str, color: &str) -> Vec<String> {
    let size = non_empty(size).map(|s| format!("Размер: {}", s));
    let color = non_empty(color).map(|c| format!("Цвет: {}", c));
    size.into_iter().chain(color).collect()
}

/// `"Размер: M, Цвет: чёрный"`, or just the part that is present.
pub fn join_size_color(size: &str, color: &str) -> Option<String> {
    let values = size_color_values(size, color);
    (!values.is_empty()).then(|| values.join(", "))
}

/// User-supplied `label: value` line for the extended template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomLine {
    pub label: String,
    pub value: String,
}

impl CustomLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Rendered text, `None` when the value is empty.
    pub fn text(&self) -> Option<String> {
        let value = non_empty(&self.value)?;
        Some(match non_empty(&self.label) {
            Some(label) => format!("{}: {}", label, value),
            None => value.to_string(),
        })
    }
}

/// Per-field display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFlags {
    pub show_name: bool,
    pub show_article: bool,
    pub show_size_color: bool,
    pub show_brand: bool,
    pub show_composition: bool,
    pub show_country: bool,
    pub show_manufacturer: bool,
    pub show_production_date: bool,
    pub show_importer: bool,
    pub show_certificate: bool,
    pub show_address: bool,
    pub show_inn: bool,
    pub show_custom: [bool; 3],
    pub show_serial: bool,
    pub show_eac: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_name: true,
            show_article: true,
            show_size_color: true,
            show_brand: true,
            show_composition: false,
            show_country: false,
            show_manufacturer: false,
            show_production_date: false,
            show_importer: false,
            show_certificate: false,
            show_address: false,
            show_inn: true,
            show_custom: [true; 3],
            show_serial: false,
            show_eac: false,
        }
    }
}

impl DisplayFlags {
    /// Every field toggle on.
    pub fn all() -> Self {
        Self {
            show_name: true,
            show_article: true,
            show_size_color: true,
            show_brand: true,
            show_composition: true,
            show_country: true,
            show_manufacturer: true,
            show_production_date: true,
            show_importer: true,
            show_certificate: true,
            show_address: true,
            show_inn: true,
            show_custom: [true; 3],
            show_serial: true,
            show_eac: true,
        }
    }

    pub fn is_enabled(&self, field: FieldId) -> bool {
        match field {
            FieldId::Name => self.show_name,
            FieldId::Article => self.show_article,
            FieldId::SizeColor => self.show_size_color,
            FieldId::Brand => self.show_brand,
            FieldId::Composition => self.show_composition,
            FieldId::Country => self.show_country,
            FieldId::Manufacturer => self.show_manufacturer,
            FieldId::ProductionDate => self.show_production_date,
            FieldId::Importer => self.show_importer,
            FieldId::Certificate => self.show_certificate,
            FieldId::Address => self.show_address,
            FieldId::Inn => self.show_inn,
            FieldId::Custom1 => self.show_custom[0],
            FieldId::Custom2 => self.show_custom[1],
            FieldId::Custom3 => self.show_custom[2],
        }
    }

    pub fn set(&mut self, field: FieldId, enabled: bool) {
        let slot = match field {
            FieldId::Name => &mut self.show_name,
            FieldId::Article => &mut self.show_article,
            FieldId::SizeColor => &mut self.show_size_color,
            FieldId::Brand => &mut self.show_brand,
            FieldId::Composition => &mut self.show_composition,
            FieldId::Country => &mut self.show_country,
            FieldId::Manufacturer => &mut self.show_manufacturer,
            FieldId::ProductionDate => &mut self.show_production_date,
            FieldId::Importer => &mut self.show_importer,
            FieldId::Certificate => &mut self.show_certificate,
            FieldId::Address => &mut self.show_address,
            FieldId::Inn => &mut self.show_inn,
            FieldId::Custom1 => &mut self.show_custom[0],
            FieldId::Custom2 => &mut self.show_custom[1],
            FieldId::Custom3 => &mut self.show_custom[2],
        };
        *slot = enabled;
    }
}
