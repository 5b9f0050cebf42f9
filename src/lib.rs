//! # KleyKod Label - Label Layout Engine
//!
//! Layout core for 58mm marketplace labels that combine a 1D barcode with a
//! regulatory DataMatrix code. It provides:
//!
//! - **Geometry tables**: zone placement per template and size, in mm from
//!   the bottom-left corner
//! - **Field configuration**: supported fields, character limits and caps
//! - **Preview rendering**: a label painted onto any drawing surface, with
//!   placeholder codes
//! - **Product search**: fuzzy matching plus a lazily loaded semantic tier
//!
//! ## Quick Start
//!
//! ```
//! use kleykod_label::{
//!     fields::{self, FieldId},
//!     item::{DisplayFlags, ItemData},
//!     layout::{LabelLayout, LabelSize},
//!     render::{RasterSurface, render_label},
//!     units::label_px,
//! };
//!
//! let (template, size) = (LabelLayout::Basic, LabelSize::S58x40);
//!
//! let item = ItemData {
//!     barcode: "4600000000035".into(),
//!     name: "Футболка хлопковая".into(),
//!     article: "TS-001".into(),
//!     ..Default::default()
//! };
//!
//! // Advisory length check
//! let check = fields::check_field_length(FieldId::Name, Some(item.name.as_str()), template, size);
//! assert!(!check.is_over_limit);
//!
//! // Paint a preview and encode it
//! let (width, height) = label_px(size);
//! let mut surface = RasterSurface::new(width, height);
//! let summary = render_label(&mut surface, template, size, &item, &DisplayFlags::default(), Some(1), &[]);
//! assert!(summary.drawn.contains(&FieldId::Name));
//! let png = surface.to_png()?;
//! assert!(!png.is_empty());
//!
//! # Ok::<(), kleykod_label::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`units`] | mm / pt / px conversion at 203 DPI |
//! | [`layout`] | Templates, sizes and zone geometry |
//! | [`fields`] | Field support, length limits and caps |
//! | [`item`] | Item values and display toggles |
//! | [`render`] | Label preview renderer and surfaces |
//! | [`search`] | Fuzzy and semantic product search |
//! | [`config`] | Search tunables |
//! | [`error`] | Error types |
//!
//! ## Cross-system invariant
//!
//! Geometry and limit tables must stay numerically identical to the
//! backend that produces the printed PDF. Nothing here enforces that; the
//! JSON from [`layout::LayoutConfig::zone_map`] exists for comparing them.

pub mod config;
pub mod error;
pub mod fields;
pub mod item;
pub mod layout;
pub mod render;
pub mod search;
pub mod units;

// Re-exports for convenience
pub use error::LabelError;
pub use layout::{LabelLayout, LabelSize, get_layout_config};
pub use render::render_label;
