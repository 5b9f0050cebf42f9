//! Text fitting by character count.
//!
//! The preview has no access to the backend's font metrics, so text is
//! fitted with the same chars-per-line estimates the field limits use.

use crate::fields::FieldId;

pub const ELLIPSIS: char = '…';

/// Result of fitting text into a line budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fitted {
    pub lines: Vec<String>,
    /// Some text did not fit and was cut.
    pub truncated: bool,
}

/// Cut `text` to at most `max_chars` characters, ending in an ellipsis when
/// anything was removed.
pub fn truncate_line(text: &str, max_chars: usize) -> (String, bool) {
    let count = text.chars().count();
    if count <= max_chars {
        return (text.to_string(), false);
    }
    if max_chars == 0 {
        return (String::new(), true);
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    (cut, true)
}

/// Word-wrap `text` into at most `max_lines` lines of `chars_per_line`.
///
/// Words longer than a line are split. When the text needs more lines than
/// allowed, the last kept line ends in an ellipsis.
pub fn wrap_text(text: &str, chars_per_line: usize, max_lines: usize) -> Fitted {
    let chars_per_line = chars_per_line.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // split words that cannot fit on any line
        while word.len() > chars_per_line {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(chars_per_line);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > chars_per_line {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }

    if lines.len() <= max_lines {
        return Fitted {
            lines,
            truncated: false,
        };
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let mut cut: String = last.chars().take(chars_per_line.saturating_sub(1)).collect();
        cut.truncate(cut.trim_end().len());
        cut.push(ELLIPSIS);
        *last = cut;
    }
    Fitted {
        lines,
        truncated: true,
    }
}

/// Caption printed before a field's value, if any.
pub fn field_caption(field: FieldId) -> Option<&'static str> {
    match field {
        FieldId::Name | FieldId::SizeColor => None,
        FieldId::Article => Some("Арт."),
        FieldId::Brand => Some("Бренд"),
        FieldId::Composition => Some("Состав"),
        FieldId::Country => Some("Страна"),
        FieldId::Manufacturer => Some("Изготовитель"),
        FieldId::ProductionDate => Some("Дата изг."),
        FieldId::Importer => Some("Импортёр"),
        FieldId::Certificate => Some("Сертификат"),
        FieldId::Address => Some("Адрес"),
        FieldId::Inn => Some("ИНН"),
        FieldId::Custom1 | FieldId::Custom2 | FieldId::Custom3 => None,
    }
}

/// `"Caption: value"` line for a field, or the bare value.
pub fn field_line(field: FieldId, value: &str) -> String {
    match field_caption(field) {
        Some(caption) => format!("{}: {}", caption, value),
        None => value.to_string(),
    }
}
