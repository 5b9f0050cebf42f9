//! Extended template: codes across the top, and a block of `label: value`
//! lines below that starts at the block's Y and climbs one line per entry.
//!
//! System lines and the user's custom lines share one cursor, in a fixed
//! order. Entries that are not drawn do not take a line. The block stops
//! below the DataMatrix and the barcode digits; entries past that point are
//! reported as overflowed.

use super::{Band, BlockCursor, LabelCanvas, RenderInput, TemplateRenderer, text};
use crate::fields::FieldId;
use crate::layout::ExtendedZones;

const BLOCK_ORDER: [FieldId; 9] = [
    FieldId::Name,
    FieldId::Composition,
    FieldId::Article,
    FieldId::SizeColor,
    FieldId::Manufacturer,
    FieldId::ProductionDate,
    FieldId::Custom1,
    FieldId::Custom2,
    FieldId::Custom3,
];

fn block_line(field: FieldId, value: &str) -> String {
    match field {
        FieldId::Name => format!("Наименование: {}", value),
        FieldId::Custom1 | FieldId::Custom2 | FieldId::Custom3 => value.to_string(),
        _ => text::field_line(field, value),
    }
}

impl TemplateRenderer for ExtendedZones {
    fn render(&self, canvas: &mut LabelCanvas<'_>, input: &RenderInput<'_>) {
        canvas.datamatrix(&self.datamatrix);
        canvas.barcode(&self.barcode);

        let barcode = input.item.barcode.trim();
        if !barcode.is_empty() {
            canvas.text(barcode, &self.barcode_text);
        }

        if let Some(inn) = input.printable(FieldId::Inn) {
            canvas.text(&format!("ИНН: {}", inn), &self.inn);
            canvas.mark_drawn(FieldId::Inn, false);
        }

        if let Some(serial) = input.serial_text() {
            canvas.text(&serial, &self.serial);
        }

        let block = &self.custom_block;
        let ceiling = self
            .datamatrix
            .y
            .min(self.barcode.y)
            .min(self.barcode_text.y);
        let mut cursor = BlockCursor::new(block, Band::new(0.0, ceiling));
        for field in BLOCK_ORDER {
            let mut lines = Vec::new();
            let mut truncated = false;
            for value in input.printable_values(field) {
                let (line, cut) =
                    text::truncate_line(&block_line(field, &value), input.chars_per_line);
                truncated |= cut;
                lines.push(line);
            }
            canvas.place(&mut cursor, field, &lines, truncated, false);
        }
    }
}
