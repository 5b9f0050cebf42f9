//! Professional template: INN shares the text block with the other fields;
//! the EAC mark goes in the top-right corner when a certificate is present.

use super::{Band, LabelCanvas, RenderInput, TemplateRenderer};
use crate::fields::FieldId;
use crate::layout::ProfessionalZones;

const TEXT_ORDER: [FieldId; 8] = [
    FieldId::Name,
    FieldId::Article,
    FieldId::SizeColor,
    FieldId::Brand,
    FieldId::Country,
    FieldId::Importer,
    FieldId::Certificate,
    FieldId::Inn,
];

impl TemplateRenderer for ProfessionalZones {
    fn render(&self, canvas: &mut LabelCanvas<'_>, input: &RenderInput<'_>) {
        canvas.datamatrix(&self.datamatrix);
        canvas.barcode(&self.barcode);

        let barcode = input.item.barcode.trim();
        if !barcode.is_empty() {
            canvas.text(barcode, &self.barcode_text);
        }

        if let Some(serial) = input.serial_text() {
            canvas.text(&serial, &self.serial);
        }

        if input.flags.show_eac && !input.item.certificate.trim().is_empty() {
            canvas.text("EAC", &self.eac);
        }

        let band = Band::new(self.barcode.y + self.barcode.height, canvas.height_mm());
        canvas.text_block(&self.text_block, band, &TEXT_ORDER, input);
    }
}

#[cfg(test)]
mod tests {
    use crate::fields::FieldId;
    use crate::item::{DisplayFlags, ItemData};
    use crate::layout::{LabelLayout, LabelSize};
    use crate::render::{RecordingSurface, render_label};
    use pretty_assertions::assert_eq;

    fn item() -> ItemData {
        ItemData {
            barcode: "4600000000028".into(),
            name: "Платье летнее".into(),
            composition: "вискоза 100%".into(),
            importer: "ООО «Импорт»".into(),
            certificate: "ЕАЭС RU Д-RU.РА01.В.12345/24".into(),
            inn: "7701234567".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_inn_in_text_block_last() {
        let summary = render_label(
            &mut RecordingSurface::new(),
            LabelLayout::Professional,
            LabelSize::S58x40,
            &item(),
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert_eq!(summary.drawn.last(), Some(&FieldId::Inn));
        assert!(!summary.drawn.contains(&FieldId::Composition));
    }

    #[test]
    fn test_eac_mark_needs_certificate() {
        let mut surface = RecordingSurface::new();
        render_label(
            &mut surface,
            LabelLayout::Professional,
            LabelSize::S58x40,
            &item(),
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert!(surface.texts().contains(&"EAC"));

        let no_cert = ItemData {
            certificate: String::new(),
            ..item()
        };
        render_label(
            &mut surface,
            LabelLayout::Professional,
            LabelSize::S58x40,
            &no_cert,
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert!(!surface.texts().contains(&"EAC"));
    }

    #[test]
    fn test_composition_never_leaks() {
        let mut surface = RecordingSurface::new();
        render_label(
            &mut surface,
            LabelLayout::Professional,
            LabelSize::S58x40,
            &item(),
            &DisplayFlags::all(),
            None,
            &[],
        );
        assert!(!surface.texts().iter().any(|t| t.contains("вискоза")));
    }
}
