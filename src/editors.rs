//! Cell editors.
//!
//! An editor is a declarative description of an input bound to one field of a
//! row. Surfaces build the actual control; the engine uses the editor to turn
//! the raw text the control reports back into a [`CellValue`] that is written
//! into the row in place.

use crate::types::{CellValue, TextAlign};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which control edits the cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorKind {
    Checkbox,
    Text(TextEditor),
    TextArea(TextEditor),
    Password(TextEditor),
    Select(SelectEditor),
    Date(DateEditor),
}

/// Options shared by the free-text editors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextEditor {
    pub placeholder: String,
    pub disabled: bool,
    pub text_align: TextAlign,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectEditor {
    pub options: Vec<SelectOption>,
    /// Shown (and selected) while the field is empty.
    pub placeholder: Option<String>,
}

/// Date input. Users see `display_format`; the row stores `storage_format`.
///
/// Formats use `YYYY`, `YY`, `MM`, `DD` tokens; other characters are literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateEditor {
    pub display_format: String,
    pub storage_format: String,
}

impl Default for DateEditor {
    fn default() -> Self {
        Self {
            display_format: "DD/MM/YYYY".to_string(),
            storage_format: "YYYY-MM-DD".to_string(),
        }
    }
}

impl DateEditor {
    /// Reformat a stored value for display. Unparsable values display empty.
    pub fn to_display(&self, stored: &CellValue) -> String {
        if stored.is_blank() {
            return String::new();
        }
        let text = stored.display();
        match NaiveDate::parse_from_str(&text, &chrono_format(&self.storage_format)) {
            Ok(date) => date.format(&chrono_format(&self.display_format)).to_string(),
            Err(e) => {
                log::warn!("invalid date in row: {text:?} ({e})");
                String::new()
            }
        }
    }

    /// Parse user input in display format (storage format also accepted)
    /// and produce the stored text.
    pub fn to_storage(&self, input: &str) -> Option<String> {
        let input = input.trim();
        let display = chrono_format(&self.display_format);
        let storage = chrono_format(&self.storage_format);
        NaiveDate::parse_from_str(input, &display)
            .or_else(|_| NaiveDate::parse_from_str(input, &storage))
            .ok()
            .map(|date| date.format(&storage).to_string())
    }
}

/// Translate `YYYY-MM-DD` style tokens to a chrono format string.
fn chrono_format(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("YYYY") {
            out.push_str("%Y");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("YY") {
            out.push_str("%y");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("MM") {
            out.push_str("%m");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("DD") {
            out.push_str("%d");
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                if c == '%' {
                    out.push_str("%%");
                } else {
                    out.push(c);
                }
            }
            rest = chars.as_str();
        }
    }
    out
}

impl EditorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Text(_) => "text",
            Self::TextArea(_) => "textarea",
            Self::Password(_) => "password",
            Self::Select(_) => "select",
            Self::Date(_) => "date",
        }
    }

    /// Initial text the control shows for the stored value.
    pub fn display_value(&self, value: &CellValue) -> String {
        match self {
            Self::Checkbox => value.is_truthy().to_string(),
            Self::Date(date) => date.to_display(value),
            Self::Text(_) | Self::TextArea(_) | Self::Password(_) | Self::Select(_) => {
                value.display()
            }
        }
    }

    /// Convert what the control reported into the value stored in the row.
    ///
    /// Returns `None` when the input cannot be represented (non-blank text
    /// that is not a date); the row is then left untouched. A cleared date
    /// stores the empty string.
    pub fn parse_input(&self, raw: &str) -> Option<CellValue> {
        match self {
            Self::Checkbox => Some(CellValue::Bool(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "checked"
            ))),
            Self::Date(_) if raw.trim().is_empty() => Some(CellValue::from("")),
            Self::Date(date) => date.to_storage(raw).map(CellValue::Text),
            Self::Text(_) | Self::TextArea(_) | Self::Password(_) | Self::Select(_) => {
                Some(CellValue::from(raw))
            }
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Text(t) | Self::TextArea(t) | Self::Password(t) => t.disabled,
            Self::Checkbox | Self::Select(_) | Self::Date(_) => false,
        }
    }
}

impl SelectEditor {
    /// The option matching the stored value, compared by display text so a
    /// numeric `1` selects the option `"1"`.
    pub fn selected(&self, value: &CellValue) -> Option<&SelectOption> {
        if value.is_blank() {
            return None;
        }
        let text = value.display();
        self.options.iter().find(|opt| opt.value == text)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_chrono_format_tokens() {
        assert_eq!(chrono_format("DD/MM/YYYY"), "%d/%m/%Y");
        assert_eq!(chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(chrono_format("YY%"), "%y%%");
    }

    #[test]
    fn test_date_round_trip_between_formats() {
        let editor = DateEditor::default();
        assert_eq!(editor.to_display(&"2024-03-05".into()), "05/03/2024");
        assert_eq!(editor.to_storage("05/03/2024").as_deref(), Some("2024-03-05"));
        assert_eq!(editor.to_storage("2024-03-05").as_deref(), Some("2024-03-05"));
        assert_eq!(editor.to_storage("31/02/2024"), None);
    }

    #[test]
    fn test_invalid_stored_date_displays_empty() {
        let editor = DateEditor::default();
        assert_eq!(editor.to_display(&"not a date".into()), "");
        assert_eq!(editor.to_display(&CellValue::Null), "");
    }

    #[test]
    fn test_select_matches_loosely() {
        let editor = SelectEditor {
            options: vec![SelectOption::new("1", "One"), SelectOption::new("2", "Two")],
            placeholder: Some("Pick".into()),
        };
        assert_eq!(editor.selected(&CellValue::from(1)).map(|o| o.label.as_str()), Some("One"));
        assert!(editor.selected(&CellValue::from("")).is_none());
    }
}
