//! Drawing surfaces.
//!
//! All coordinates are pixels with the origin at the top-left corner.

use serde::Serialize;

/// Grayscale ink level (0 = black, 255 = white).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0);
    pub const GRAY: Color = Color(128);
    pub const WHITE: Color = Color(255);
}

/// How a text run is placed and styled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Glyph height in pixels.
    pub font_px: f32,
    pub bold: bool,
    /// When set, `x` is the horizontal center of the run instead of its left edge.
    pub centered: bool,
    pub color: Color,
}

/// Something a label can be painted on.
pub trait Surface {
    /// Resize to `width` x `height` and fill with white.
    fn clear(&mut self, width: u32, height: u32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Draw `text` with its top edge at `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: u32,
        height: u32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Surface that keeps a display list instead of pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: u32, height: u32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }
}
