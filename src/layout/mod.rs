//! # Label Layout
//!
//! Templates, physical sizes and the per-(template, size) geometry table.
//!
//! ## Coordinate convention
//!
//! All zone coordinates are millimeters measured from the **bottom-left**
//! corner of the label, matching the PDF generator on the backend. The
//! preview renderer flips them with [`crate::units::invert_y`].
//!
//! ```text
//!   y ▲
//!  40 ┌──────────────────────────────┐
//!     │ ┌──────┐  ИНН 7700000000      │
//!     │ │  DM  │  Name of the product │
//!     │ └──────┘  Арт.: 12345         │
//!     │ ║│║║│║│║║│║│║│║║│║║│║│║║│║║   │
//!   0 └──────────────────────────────┘─▶ x
//!     0                              58
//! ```
//!
//! ## Supported combinations
//!
//! | Template | 58x30 | 58x40 | 58x60 |
//! |----------|-------|-------|-------|
//! | basic | yes | yes | yes |
//! | professional | no | yes | no |
//! | extended | no | yes | no |

mod tables;
pub mod zones;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LabelError;

pub use zones::{
    BasicZones, BoxZone, ExtendedZones, LayoutConfig, ProfessionalZones, SquareZone, Step,
    TextBlockZone, TextZone, ZoneConfig,
};

/// Field arrangement chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLayout {
    Basic,
    Professional,
    Extended,
}

impl LabelLayout {
    pub const ALL: [LabelLayout; 3] = [Self::Basic, Self::Professional, Self::Extended];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Extended => "extended",
        }
    }

    /// Size used when a lookup is made for a size the template has no
    /// configuration for.
    pub fn fallback_size(&self) -> LabelSize {
        LabelSize::S58x40
    }
}

impl fmt::Display for LabelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelLayout {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "professional" => Ok(Self::Professional),
            "extended" => Ok(Self::Extended),
            other => Err(LabelError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Physical label size (width x height in millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabelSize {
    #[serde(rename = "58x30")]
    S58x30,
    #[serde(rename = "58x40")]
    S58x40,
    #[serde(rename = "58x60")]
    S58x60,
}

impl LabelSize {
    pub const ALL: [LabelSize; 3] = [Self::S58x30, Self::S58x40, Self::S58x60];

    /// `(width, height)` in millimeters.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::S58x30 => (58.0, 30.0),
            Self::S58x40 => (58.0, 40.0),
            Self::S58x60 => (58.0, 60.0),
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.dimensions_mm().0
    }

    pub fn height_mm(&self) -> f64 {
        self.dimensions_mm().1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S58x30 => "58x30",
            Self::S58x40 => "58x40",
            Self::S58x60 => "58x60",
        }
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelSize {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['×', '*'], "x").as_str() {
            "58x30" => Ok(Self::S58x30),
            "58x40" => Ok(Self::S58x40),
            "58x60" => Ok(Self::S58x60),
            other => Err(LabelError::UnknownSize(other.to_string())),
        }
    }
}

/// Look up the geometry for a (template, size) pair.
///
/// Returns `None` when the template has no geometry for that size. Callers
/// must show an explicit "unsupported" state instead of rendering blank.
pub fn get_layout_config(template: LabelLayout, size: LabelSize) -> Option<&'static LayoutConfig> {
    tables::GEOMETRY
        .iter()
        .find(|(t, s, _)| *t == template && *s == size)
        .map(|(_, _, config)| config)
}

/// Sizes that have geometry for the given template, in table order.
pub fn supported_sizes(template: LabelLayout) -> Vec<LabelSize> {
    tables::GEOMETRY
        .iter()
        .filter(|(t, _, _)| *t == template)
        .map(|(_, s, _)| *s)
        .collect()
}
