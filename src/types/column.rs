use super::{CellValue, Row};
use crate::editors::EditorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Horizontal alignment of header and body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Column width used in fixed-layout mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Px(f64),
    Css(String),
}

impl ColumnWidth {
    /// CSS length for this width (`120` becomes `120px`).
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Css(css) => css.clone(),
        }
    }
}

/// An icon button placed in a cell. Clicking it raises an action event
/// instead of a row click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub action: String,
    pub icon_class: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl ActionButton {
    pub fn new(action: impl Into<String>, icon_class: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            icon_class: icon_class.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What a body cell displays.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Nothing. Renderers that have nothing to show return this.
    Empty,
    /// Plain text, never interpreted as markup.
    Text(String),
    /// Caller-trusted markup, inserted as-is by markup-capable surfaces.
    Markup(String),
    /// An editor bound to the cell's field.
    Editor(EditorKind),
    /// Click-owning action buttons.
    Actions(Vec<ActionButton>),
    /// A pre-built DOM node supplied by a JavaScript renderer.
    #[cfg(target_arch = "wasm32")]
    Node(web_sys::Node),
}

impl CellContent {
    /// Whether clicks inside the cell are consumed by the cell itself.
    pub fn owns_click(&self) -> bool {
        matches!(self, Self::Editor(_) | Self::Actions(_))
    }

    /// Best-effort plain-text view, used by text surfaces.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) | Self::Markup(text) => text.clone(),
            Self::Editor(editor) => format!("[{}]", editor.name()),
            Self::Actions(actions) => actions
                .iter()
                .map(|a| format!("<{}>", a.action))
                .collect::<Vec<_>>()
                .join(" "),
            #[cfg(target_arch = "wasm32")]
            Self::Node(node) => node.text_content().unwrap_or_default(),
        }
    }
}

/// Cell strategy for a column.
///
/// `render` produces the displayed content; `col_span` optionally overrides
/// the column's fixed span for a particular row. Spans are clamped by the
/// layout (minimum 1, never past the last column), so implementations may
/// return anything.
pub trait CellRenderer {
    fn render(&self, value: &CellValue, row: &Row) -> CellContent;

    fn col_span(&self, _value: &CellValue, _row: &Row, _row_index: usize) -> Option<i64> {
        None
    }

    /// Whether `render` supplies the cell content. Span-only strategies
    /// return false so a column editor or plain text is used instead.
    fn renders_content(&self) -> bool {
        true
    }
}

/// Renderer built from a closure, for callers that only need `render`.
pub struct FnRenderer<F>(pub F);

impl<F> CellRenderer for FnRenderer<F>
where
    F: Fn(&CellValue, &Row) -> CellContent,
{
    fn render(&self, value: &CellValue, row: &Row) -> CellContent {
        (self.0)(value, row)
    }
}

/// Span-only strategy: content renders as plain text, span comes from the closure.
pub struct SpanFn<F>(pub F);

impl<F> CellRenderer for SpanFn<F>
where
    F: Fn(&CellValue, &Row, usize) -> i64,
{
    fn render(&self, value: &CellValue, _row: &Row) -> CellContent {
        CellContent::Text(value.display())
    }

    fn col_span(&self, value: &CellValue, row: &Row, row_index: usize) -> Option<i64> {
        Some((self.0)(value, row, row_index))
    }

    fn renders_content(&self) -> bool {
        false
    }
}

/// One grid column, or a group of columns sharing a header.
///
/// A column with non-empty `children` is a group; groups nest one level only,
/// grandchildren are ignored when flattening.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub header_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_tooltip: Option<String>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ColumnDef>,
    #[serde(skip)]
    pub renderer: Option<Rc<dyn CellRenderer>>,
}

impl ColumnDef {
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            ..Self::default()
        }
    }

    /// A group column over `children`.
    pub fn group(header_name: impl Into<String>, children: Vec<ColumnDef>) -> Self {
        Self {
            header_name: header_name.into(),
            children,
            ..Self::default()
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn span(mut self, span: i64) -> Self {
        self.col_span = Some(span);
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.header_tooltip = Some(text.into());
        self
    }

    pub fn editor(mut self, editor: EditorKind) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.renderer = Some(Rc::new(renderer));
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of leaf columns this definition occupies.
    pub fn leaf_count(&self) -> usize {
        if self.is_group() {
            self.children.len()
        } else {
            1
        }
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("text_align", &self.text_align)
            .field("width", &self.width)
            .field("col_span", &self.col_span)
            .field("editor", &self.editor)
            .field("children", &self.children)
            .field("renderer", &self.renderer.as_ref().map(|_| "<renderer>"))
            .finish()
    }
}

/// Leaf-level columns in display order: a group contributes its children,
/// a leaf contributes itself.
pub fn flatten_columns(defs: &[ColumnDef]) -> Vec<ColumnDef> {
    let mut flat = Vec::with_capacity(defs.iter().map(ColumnDef::leaf_count).sum());
    for def in defs {
        if def.is_group() {
            flat.extend(def.children.iter().cloned());
        } else {
            flat.push(def.clone());
        }
    }
    flat
}

/// Extra presentation for a body row, returned by the row-style callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStyle {
    /// Space-separated class tokens.
    Classes(String),
    /// Inline style properties.
    Inline(Vec<(String, String)>),
}

/// Which end of the row sequence an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[serde(alias = "begin")]
    Start,
    #[default]
    End,
}

impl Edge {
    /// Parse the caller-facing position names (`begin`/`start`/`end`).
    pub fn parse(position: &str) -> Option<Self> {
        match position {
            "begin" | "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}
