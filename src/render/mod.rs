//! # Label Preview Renderer
//!
//! Paints an on-screen preview of a label onto a [`Surface`]. The printed
//! label is produced by the backend from the same geometry and field tables;
//! this renderer mirrors it closely enough to judge layout and overflow.
//!
//! ## Pipeline
//!
//! ```text
//! (template, size) ──► get_layout_config ──► LayoutConfig::{Basic, Professional, Extended}
//!                              │ None                      │
//!                              ▼                           ▼
//!                    diagnostic text only        TemplateRenderer::render
//!                                                          │
//!                              mm (bottom-left) ──► invert_y ──► mm_to_px
//!                                                          │
//!                                                          ▼
//!                                                 draw_text / placeholders
//! ```
//!
//! A field is drawn only when its display flag is on, its value is
//! non-empty and the (template, size) supports it. Text blocks print inside
//! a vertical band that keeps them off the codes; entries past its end are
//! listed in [`RenderSummary::overflowed`].
//!
//! ## Example
//!
//! ```
//! use kleykod_label::item::{DisplayFlags, ItemData};
//! use kleykod_label::layout::{LabelLayout, LabelSize};
//! use kleykod_label::render::{RecordingSurface, render_label};
//!
//! let item = ItemData {
//!     name: "Кружка керамическая".into(),
//!     barcode: "2000000000017".into(),
//!     ..Default::default()
//! };
//! let mut surface = RecordingSurface::new();
//! let summary = render_label(
//!     &mut surface,
//!     LabelLayout::Basic,
//!     LabelSize::S58x40,
//!     &item,
//!     &DisplayFlags::default(),
//!     None,
//!     &[],
//! );
//! assert!(!summary.fallback);
//! assert!(surface.texts().contains(&"Кружка керамическая"));
//! ```

mod basic;
mod extended;
pub mod placeholder;
mod professional;
pub mod raster;
pub mod surface;
pub mod text;
pub mod ttf_font;

use serde::Serialize;
use tracing::{debug, warn};

use crate::fields::{FieldConfig, FieldId, chars_per_line, get_field_config};
use crate::item::{CustomLine, DisplayFlags, ItemData};
use crate::layout::{
    BoxZone, LabelLayout, LabelSize, LayoutConfig, SquareZone, TextBlockZone, TextZone,
    get_layout_config,
};
use crate::units::{invert_y, label_px, mm_to_px, pt_to_mm, pt_to_px};

pub use raster::RasterSurface;
pub use surface::{Color, DrawCommand, RecordingSurface, Surface, TextStyle};

/// What a render pass drew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Geometry was missing and only the diagnostic message was painted.
    pub fallback: bool,
    /// Fields drawn, in drawing order.
    pub drawn: Vec<FieldId>,
    /// Fields whose text was cut to fit.
    pub truncated: Vec<FieldId>,
    /// Fields left out because the text block ran out of room.
    pub overflowed: Vec<FieldId>,
}

/// Inputs shared by every template renderer.
pub(crate) struct RenderInput<'a> {
    pub item: &'a ItemData,
    pub flags: &'a DisplayFlags,
    pub serial_number: Option<u32>,
    pub custom_lines: &'a [CustomLine],
    pub fields: &'static FieldConfig,
    pub chars_per_line: usize,
}

impl RenderInput<'_> {
    /// Value to print for `field`, `None` when it must not be drawn.
    pub fn printable(&self, field: FieldId) -> Option<String> {
        if !self.flags.is_enabled(field) || !self.fields.get(field).supported {
            return None;
        }
        match field.custom_index() {
            Some(i) => self.custom_lines.get(i).and_then(CustomLine::text),
            None => self.item.value(field).map(|v| v.into_owned()),
        }
    }

    /// Values to print for `field`, each starting its own line. Size/color
    /// prints its two parts under the one toggle.
    pub fn printable_values(&self, field: FieldId) -> Vec<String> {
        match field {
            FieldId::SizeColor => match self.printable(field) {
                Some(_) => self.item.size_color_values(),
                None => Vec::new(),
            },
            _ => self.printable(field).into_iter().collect(),
        }
    }

    pub fn serial_text(&self) -> Option<String> {
        match (self.flags.show_serial, self.serial_number) {
            (true, Some(n)) => Some(format!("№ {}", n)),
            _ => None,
        }
    }
}

/// Per-template render strategy.
pub(crate) trait TemplateRenderer {
    fn render(&self, canvas: &mut LabelCanvas<'_>, input: &RenderInput<'_>);
}

/// Vertical room a text block may print in, in mm from the bottom edge.
///
/// A line fits when its whole glyph box, from the baseline up one font
/// height, lies between `floor` and `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Band {
    pub floor: f64,
    pub ceiling: f64,
}

impl Band {
    const SLACK_MM: f64 = 1e-6;

    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn holds(&self, block: &TextBlockZone, line: usize) -> bool {
        let baseline = block.line_y(line);
        baseline >= self.floor - Self::SLACK_MM
            && baseline + pt_to_mm(block.font_size) <= self.ceiling + Self::SLACK_MM
    }
}

/// Shared line cursor of one text block.
pub(crate) struct BlockCursor<'z> {
    block: &'z TextBlockZone,
    band: Band,
    line: usize,
    full: bool,
}

impl<'z> BlockCursor<'z> {
    pub fn new(block: &'z TextBlockZone, band: Band) -> Self {
        Self {
            block,
            band,
            line: 0,
            full: false,
        }
    }
}

/// Surface plus the label's physical height, with mm-based drawing helpers.
pub(crate) struct LabelCanvas<'s> {
    surface: &'s mut dyn Surface,
    height_mm: f64,
    summary: RenderSummary,
}

impl<'s> LabelCanvas<'s> {
    fn new(surface: &'s mut dyn Surface, size: LabelSize) -> Self {
        Self {
            surface,
            height_mm: size.height_mm(),
            summary: RenderSummary::default(),
        }
    }

    /// Draw one line of text whose baseline sits at `baseline_mm`.
    pub fn text_at(
        &mut self,
        text: &str,
        x_mm: f64,
        baseline_mm: f64,
        font_pt: f64,
        centered: bool,
        bold: bool,
    ) {
        let top_mm = invert_y(baseline_mm + pt_to_mm(font_pt), self.height_mm);
        let style = TextStyle {
            font_px: pt_to_px(font_pt) as f32,
            bold,
            centered,
            color: Color::BLACK,
        };
        draw_text(
            self.surface,
            text,
            mm_to_px(x_mm) as f32,
            mm_to_px(top_mm) as f32,
            &style,
        );
    }

    /// Draw text into a single-line zone, cut to the zone's width.
    pub fn text(&mut self, text: &str, zone: &TextZone) {
        let text = match zone.max_width {
            Some(width) => {
                let max_chars = max_chars_for_width(width, zone.font_size);
                text::truncate_line(text, max_chars).0
            }
            None => text.to_string(),
        };
        self.text_at(&text, zone.x, zone.y, zone.font_size, zone.centered, zone.bold);
    }

    pub fn datamatrix(&mut self, zone: &SquareZone) {
        let top = invert_y(zone.y + zone.size, self.height_mm);
        placeholder::draw_datamatrix(
            self.surface,
            mm_to_px(zone.x) as f32,
            mm_to_px(top) as f32,
            mm_to_px(zone.size) as f32,
        );
    }

    pub fn barcode(&mut self, zone: &BoxZone) {
        let top = invert_y(zone.y + zone.height, self.height_mm);
        placeholder::draw_barcode(
            self.surface,
            mm_to_px(zone.x) as f32,
            mm_to_px(top) as f32,
            mm_to_px(zone.width) as f32,
            mm_to_px(zone.height) as f32,
        );
    }

    pub fn mark_drawn(&mut self, field: FieldId, truncated: bool) {
        self.summary.drawn.push(field);
        if truncated {
            self.summary.truncated.push(field);
        }
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    /// Draw one block entry at the cursor, or report it as overflowed.
    ///
    /// An entry is all or nothing. Once one entry does not fit, every later
    /// entry overflows too so the block keeps its order.
    pub fn place(
        &mut self,
        cursor: &mut BlockCursor<'_>,
        field: FieldId,
        lines: &[String],
        truncated: bool,
        bold: bool,
    ) {
        if lines.is_empty() {
            return;
        }
        let last = cursor.line + lines.len() - 1;
        if cursor.full || !cursor.band.holds(cursor.block, last) {
            cursor.full = true;
            self.summary.overflowed.push(field);
            return;
        }
        let block = cursor.block;
        for text in lines {
            self.text_at(text, block.x, block.line_y(cursor.line), block.font_size, false, bold);
            cursor.line += 1;
        }
        self.mark_drawn(field, truncated);
    }

    /// Word-wrapped fields stacked in a text block, one cursor for all.
    pub fn text_block(
        &mut self,
        block: &TextBlockZone,
        band: Band,
        order: &[FieldId],
        input: &RenderInput<'_>,
    ) {
        let mut cursor = BlockCursor::new(block, band);
        for &field in order {
            let limit = input.fields.get(field);
            let mut lines = Vec::new();
            let mut truncated = false;
            for value in input.printable_values(field) {
                let fitted = text::wrap_text(
                    &text::field_line(field, &value),
                    input.chars_per_line,
                    limit.max_lines,
                );
                truncated |= fitted.truncated;
                lines.extend(fitted.lines);
            }
            self.place(&mut cursor, field, &lines, truncated, field == FieldId::Name);
        }
    }
}

/// Character budget for a zone of `width_mm` at `font_pt`, assuming an
/// average glyph is about half as wide as the font is tall.
fn max_chars_for_width(width_mm: f64, font_pt: f64) -> usize {
    let char_mm = pt_to_mm(font_pt) * 0.5;
    if char_mm <= 0.0 {
        return usize::MAX;
    }
    (width_mm / char_mm).floor().max(1.0) as usize
}

/// The one text primitive every template draws through.
///
/// Position is in pixels with the origin at the top-left; `y` is the top of
/// the glyph box. Blank text draws nothing.
pub fn draw_text(surface: &mut dyn Surface, text: &str, x: f32, y: f32, style: &TextStyle) {
    if text.trim().is_empty() {
        return;
    }
    surface.fill_text(text, x, y, style);
}

/// Message painted instead of a label when a (template, size) has no geometry.
pub fn unsupported_message(template: LabelLayout, size: LabelSize) -> String {
    format!("Шаблон «{}» не поддерживает размер {}", template, size)
}

/// Clear `surface` and paint a preview of one label.
///
/// When the (template, size) pair has no geometry, only a diagnostic message
/// is painted and the summary reports `fallback`.
pub fn render_label(
    surface: &mut dyn Surface,
    template: LabelLayout,
    size: LabelSize,
    item: &ItemData,
    flags: &DisplayFlags,
    serial_number: Option<u32>,
    custom_lines: &[CustomLine],
) -> RenderSummary {
    let (width_px, height_px) = label_px(size);
    surface.clear(width_px, height_px);

    let Some(layout) = get_layout_config(template, size) else {
        warn!(%template, %size, "no geometry for template/size, painting diagnostic");
        let style = TextStyle {
            font_px: pt_to_px(6.0) as f32,
            bold: false,
            centered: true,
            color: Color::GRAY,
        };
        draw_text(
            surface,
            &unsupported_message(template, size),
            width_px as f32 / 2.0,
            height_px as f32 / 2.0 - style.font_px / 2.0,
            &style,
        );
        return RenderSummary {
            fallback: true,
            ..Default::default()
        };
    };

    let input = RenderInput {
        item,
        flags,
        serial_number,
        custom_lines,
        fields: get_field_config(template, size),
        chars_per_line: chars_per_line(template, size),
    };

    let renderer: &dyn TemplateRenderer = match layout {
        LayoutConfig::Basic(zones) => zones,
        LayoutConfig::Professional(zones) => zones,
        LayoutConfig::Extended(zones) => zones,
    };

    let mut canvas = LabelCanvas::new(surface, size);
    renderer.render(&mut canvas, &input);

    debug!(
        %template,
        %size,
        drawn = canvas.summary.drawn.len(),
        truncated = canvas.summary.truncated.len(),
        overflowed = canvas.summary.overflowed.len(),
        "label rendered"
    );
    canvas.summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_item() -> ItemData {
        ItemData {
            barcode: "2000000000017".into(),
            article: "TS-001".into(),
            size: "M".into(),
            color: "белый".into(),
            name: "Футболка".into(),
            brand: "Nord".into(),
            composition: "хлопок 100%".into(),
            inn: "7701234567".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_surface_sized_to_label() {
        let mut surface = RecordingSurface::new();
        render_label(
            &mut surface,
            LabelLayout::Basic,
            LabelSize::S58x60,
            &sample_item(),
            &DisplayFlags::default(),
            None,
            &[],
        );
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 464,
                height: 480
            }
        );
    }

    #[test]
    fn test_fallback_paints_only_message() {
        let mut surface = RecordingSurface::new();
        let summary = render_label(
            &mut surface,
            LabelLayout::Extended,
            LabelSize::S58x60,
            &sample_item(),
            &DisplayFlags::all(),
            Some(3),
            &[],
        );
        assert!(summary.fallback);
        assert_eq!(surface.commands.len(), 2);
        assert_eq!(
            surface.texts(),
            vec![unsupported_message(LabelLayout::Extended, LabelSize::S58x60).as_str()]
        );
    }

    #[test]
    fn test_flag_off_hides_field() {
        let mut flags = DisplayFlags::default();
        flags.show_article = false;
        let mut surface = RecordingSurface::new();
        let summary = render_label(
            &mut surface,
            LabelLayout::Basic,
            LabelSize::S58x40,
            &sample_item(),
            &flags,
            None,
            &[],
        );
        assert!(!summary.drawn.contains(&FieldId::Article));
        assert!(!surface.texts().iter().any(|t| t.contains("TS-001")));
    }

    #[test]
    fn test_empty_value_hides_field() {
        let item = ItemData {
            brand: String::new(),
            ..sample_item()
        };
        let summary = render_label(
            &mut RecordingSurface::new(),
            LabelLayout::Basic,
            LabelSize::S58x40,
            &item,
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert!(!summary.drawn.contains(&FieldId::Brand));
    }

    #[test]
    fn test_unsupported_field_not_drawn_even_when_flagged() {
        // composition is unsupported on basic 58x30
        let summary = render_label(
            &mut RecordingSurface::new(),
            LabelLayout::Basic,
            LabelSize::S58x30,
            &sample_item(),
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert!(!summary.drawn.contains(&FieldId::Composition));
        assert!(summary.drawn.contains(&FieldId::Name));
    }

    #[test]
    fn test_text_top_origin() {
        // A 5pt line with its baseline 10mm above the bottom of a 40mm label
        // has its top at 40 - 10 - 5pt
        let mut surface = RecordingSurface::new();
        surface.clear(464, 320);
        let mut canvas = LabelCanvas::new(&mut surface, LabelSize::S58x40);
        canvas.text_at("x", 3.0, 10.0, 5.0, false, false);

        let expected_top = mm_to_px(40.0 - 10.0 - pt_to_mm(5.0)) as f32;
        match &surface.commands[1] {
            DrawCommand::Text { x, y, style, .. } => {
                assert!((x - mm_to_px(3.0) as f32).abs() < 1e-3);
                assert!((y - expected_top).abs() < 1e-3);
                assert!((style.font_px - pt_to_px(5.0) as f32).abs() < 1e-3);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_draw_text_skips_blank() {
        let mut surface = RecordingSurface::new();
        let style = TextStyle {
            font_px: 10.0,
            bold: false,
            centered: false,
            color: Color::BLACK,
        };
        draw_text(&mut surface, "  ", 0.0, 0.0, &style);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let render = || {
            let mut surface = RecordingSurface::new();
            render_label(
                &mut surface,
                LabelLayout::Professional,
                LabelSize::S58x40,
                &sample_item(),
                &DisplayFlags::all(),
                Some(12),
                &[],
            );
            surface.commands
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_max_chars_for_width() {
        // 5pt ≈ 1.76mm tall, ≈ 0.88mm per char
        assert_eq!(max_chars_for_width(22.0, 5.0), 24);
    }
}
