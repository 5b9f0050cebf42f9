//! Typed placement zones.
//!
//! Each template gets its own zone struct so a renderer can only reach the
//! zones its template actually defines. [`ZoneConfig`] is the flat,
//! serializable view used for dumping and comparing tables.

use serde::Serialize;
use std::collections::BTreeMap;

use super::LabelLayout;

/// Square zone (DataMatrix). Origin is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareZone {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Rectangular zone (1D barcode). Origin is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Single line of text. `y` is the baseline; `x` is the left edge, or the
/// center when `centered` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextZone {
    pub x: f64,
    pub y: f64,
    /// Font size in points.
    pub font_size: f64,
    pub max_width: Option<f64>,
    pub centered: bool,
    pub bold: bool,
}

/// Direction a text block cursor moves after each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Towards the bottom edge (y decreases).
    Down,
    /// Towards the top edge (y increases).
    Up,
}

/// Multi-line text block. `y` is the baseline of the first line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlockZone {
    pub x: f64,
    pub y: f64,
    pub line_height: f64,
    /// Font size in points.
    pub font_size: f64,
    pub max_width: f64,
    pub step: Step,
}

impl SquareZone {
    pub const fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    pub fn to_zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            size: Some(self.size),
            ..ZoneConfig::at(self.x, self.y)
        }
    }
}

impl BoxZone {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            width: Some(self.width),
            height: Some(self.height),
            ..ZoneConfig::at(self.x, self.y)
        }
    }
}

impl TextZone {
    pub const fn new(x: f64, y: f64, font_size: f64) -> Self {
        Self {
            x,
            y,
            font_size,
            max_width: None,
            centered: false,
            bold: false,
        }
    }

    pub const fn max_width(mut self, mm: f64) -> Self {
        self.max_width = Some(mm);
        self
    }

    pub const fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn to_zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            font_size: Some(self.font_size),
            max_width: self.max_width,
            centered: self.centered,
            bold: self.bold,
            ..ZoneConfig::at(self.x, self.y)
        }
    }
}

impl TextBlockZone {
    /// Baseline of the `index`-th line.
    pub fn line_y(&self, index: usize) -> f64 {
        let offset = self.line_height * index as f64;
        match self.step {
            Step::Down => self.y - offset,
            Step::Up => self.y + offset,
        }
    }

    pub fn to_zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            font_size: Some(self.font_size),
            max_width: Some(self.max_width),
            line_height: Some(self.line_height),
            step: Some(self.step),
            ..ZoneConfig::at(self.x, self.y)
        }
    }
}

/// Zones of the basic template: DataMatrix, barcode, INN header, text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicZones {
    pub datamatrix: SquareZone,
    pub barcode: BoxZone,
    pub barcode_text: TextZone,
    pub inn: TextZone,
    pub serial: TextZone,
    pub text_block: TextBlockZone,
}

/// Zones of the professional template. INN lives in the text block here,
/// and an EAC conformity mark sits in the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfessionalZones {
    pub datamatrix: SquareZone,
    pub barcode: BoxZone,
    pub barcode_text: TextZone,
    pub serial: TextZone,
    pub eac: TextZone,
    pub text_block: TextBlockZone,
}

/// Zones of the extended template: codes on top, a label:value block below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedZones {
    pub datamatrix: SquareZone,
    pub barcode: BoxZone,
    pub barcode_text: TextZone,
    pub inn: TextZone,
    pub serial: TextZone,
    pub custom_block: TextBlockZone,
}

/// Geometry of one (template, size) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutConfig {
    Basic(BasicZones),
    Professional(ProfessionalZones),
    Extended(ExtendedZones),
}

impl LayoutConfig {
    pub fn template(&self) -> LabelLayout {
        match self {
            Self::Basic(_) => LabelLayout::Basic,
            Self::Professional(_) => LabelLayout::Professional,
            Self::Extended(_) => LabelLayout::Extended,
        }
    }

    pub fn datamatrix(&self) -> &SquareZone {
        match self {
            Self::Basic(z) => &z.datamatrix,
            Self::Professional(z) => &z.datamatrix,
            Self::Extended(z) => &z.datamatrix,
        }
    }

    pub fn barcode(&self) -> &BoxZone {
        match self {
            Self::Basic(z) => &z.barcode,
            Self::Professional(z) => &z.barcode,
            Self::Extended(z) => &z.barcode,
        }
    }

    /// Flat named view of every zone, keyed by zone name.
    pub fn zone_map(&self) -> BTreeMap<&'static str, ZoneConfig> {
        let mut map = BTreeMap::new();
        map.insert("datamatrix", self.datamatrix().to_zone_config());
        map.insert("barcode", self.barcode().to_zone_config());
        match self {
            Self::Basic(z) => {
                map.insert("barcode_text", z.barcode_text.to_zone_config());
                map.insert("inn", z.inn.to_zone_config());
                map.insert("serial", z.serial.to_zone_config());
                map.insert("text_block", z.text_block.to_zone_config());
            }
            Self::Professional(z) => {
                map.insert("barcode_text", z.barcode_text.to_zone_config());
                map.insert("serial", z.serial.to_zone_config());
                map.insert("eac", z.eac.to_zone_config());
                map.insert("text_block", z.text_block.to_zone_config());
            }
            Self::Extended(z) => {
                map.insert("barcode_text", z.barcode_text.to_zone_config());
                map.insert("inn", z.inn.to_zone_config());
                map.insert("serial", z.serial.to_zone_config());
                map.insert("custom_block", z.custom_block.to_zone_config());
            }
        }
        map
    }
}

/// Flat description of a zone, as exchanged with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneConfig {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    pub centered: bool,
    pub bold: bool,
}

impl ZoneConfig {
    fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: None,
            width: None,
            height: None,
            font_size: None,
            max_width: None,
            line_height: None,
            step: None,
            centered: false,
            bold: false,
        }
    }
}
