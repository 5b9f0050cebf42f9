//! Basic template: DataMatrix on the left, text block on the right, barcode
//! along the bottom, INN and serial number in the header line.

use super::{Band, LabelCanvas, RenderInput, TemplateRenderer};
use crate::fields::FieldId;
use crate::layout::BasicZones;

/// Text block order. INN is not here: it prints in the header.
const TEXT_ORDER: [FieldId; 11] = [
    FieldId::Name,
    FieldId::Article,
    FieldId::SizeColor,
    FieldId::Brand,
    FieldId::Composition,
    FieldId::Country,
    FieldId::Manufacturer,
    FieldId::ProductionDate,
    FieldId::Importer,
    FieldId::Certificate,
    FieldId::Address,
];

impl TemplateRenderer for BasicZones {
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

        let band = Band::new(self.barcode.y + self.barcode.height, canvas.height_mm());
        canvas.text_block(&self.text_block, band, &TEXT_ORDER, input);
    }
}
