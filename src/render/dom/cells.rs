//! Header and body cell elements, editors included.

use super::{create, js_error, set_style};
use crate::editors::{EditorKind, SelectEditor, TextEditor};
use crate::error::{GridError, Result};
use crate::layout::{BodyCell, HeaderCell};
use crate::types::{ActionButton, CellContent};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// Attribute marking cells that consume their own clicks.
pub(crate) const OWNS_CLICK: &str = "data-owns-click";

pub(super) fn build_header_cell(document: &Document, cell: &HeaderCell) -> Result<Element> {
    let th = create(document, "th", "gv-header")?;
    if cell.col_span > 1 {
        th.set_attribute("colspan", &cell.col_span.to_string())
            .map_err(js_error)?;
    }
    if cell.row_span > 1 {
        th.set_attribute("rowspan", &cell.row_span.to_string())
            .map_err(js_error)?;
    }
    if let Some(th) = th.dyn_ref::<HtmlElement>() {
        set_style(th, "text-align", cell.align.as_str());
    }

    match &cell.tooltip {
        Some(tooltip) => {
            let text = create(document, "span", "gv-header-text")?;
            text.set_text_content(Some(&cell.text));
            let marker = create(document, "span", "gv-header-tooltip")?;
            marker.set_attribute("title", tooltip).map_err(js_error)?;
            marker.set_text_content(Some("?"));
            th.append_child(&text).map_err(js_error)?;
            th.append_child(&marker).map_err(js_error)?;
        }
        None => th.set_text_content(Some(&cell.text)),
    }
    Ok(th)
}

pub(super) fn build_cell(document: &Document, cell: &BodyCell) -> Result<Element> {
    let td = create(document, "td", "gv-cell")?;
    if cell.col_span > 1 {
        td.set_attribute("colspan", &cell.col_span.to_string())
            .map_err(js_error)?;
    }
    if let Some(td) = td.dyn_ref::<HtmlElement>() {
        set_style(td, "text-align", cell.align.as_str());
    }
    if cell.content.owns_click() {
        td.set_attribute(OWNS_CLICK, "").map_err(js_error)?;
    }

    match &cell.content {
        CellContent::Empty => {}
        CellContent::Text(text) => td.set_text_content(Some(text)),
        CellContent::Markup(markup) => td.set_inner_html(markup),
        CellContent::Node(node) => {
            td.append_child(node).map_err(js_error)?;
        }
        CellContent::Actions(actions) => {
            for action in actions {
                let button = build_action(document, action)?;
                td.append_child(&button).map_err(js_error)?;
            }
        }
        CellContent::Editor(editor) => {
            let value = editor.display_value(&cell.value);
            let control = build_editor(document, editor, &cell.field, &value)?;
            td.append_child(&control).map_err(js_error)?;
        }
    }
    Ok(td)
}

fn build_action(document: &Document, action: &ActionButton) -> Result<Element> {
    let icon = create(document, "i", &format!("gv-action {}", action.icon_class))?;
    icon.set_attribute("data-action", &action.action)
        .map_err(js_error)?;
    if let Some(title) = &action.title {
        icon.set_attribute("title", title).map_err(js_error)?;
    }
    Ok(icon)
}

fn build_editor(document: &Document, editor: &EditorKind, field: &str, value: &str) -> Result<Element> {
    let control = match editor {
        EditorKind::Checkbox => {
            let input = input(document, "checkbox", "gv-checkbox")?;
            input.set_checked(value == "true");
            input.into()
        }
        EditorKind::Text(options) => {
            let input = input(document, "text", "gv-input")?;
            apply_text_options(&input, options);
            input.set_value(value);
            input.into()
        }
        EditorKind::Password(options) => return build_password(document, options, field, value),
        EditorKind::TextArea(options) => {
            let area = create(document, "textarea", "gv-textarea")?
                .dyn_into::<HtmlTextAreaElement>()
                .map_err(|_| GridError::Render("<textarea> has the wrong type".into()))?;
            area.set_placeholder(&options.placeholder);
            area.set_disabled(options.disabled);
            if !options.class_name.is_empty() {
                let _ = area.class_list().add_1(&options.class_name);
            }
            set_style(&area, "text-align", options.text_align.as_str());
            area.set_value(value);
            area.into()
        }
        EditorKind::Select(options) => build_select(document, options, value)?,
        EditorKind::Date(date) => {
            let input = input(document, "text", "gv-date")?;
            input.set_placeholder(&date.display_format);
            input.set_value(value);
            input.into()
        }
    };
    control.set_attribute("data-field", field).map_err(js_error)?;
    Ok(control)
}

fn input(document: &Document, kind: &str, class: &str) -> Result<HtmlInputElement> {
    let input = create(document, "input", class)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| GridError::Render("<input> has the wrong type".into()))?;
    input.set_type(kind);
    Ok(input)
}

fn apply_text_options(input: &HtmlInputElement, options: &TextEditor) {
    input.set_placeholder(&options.placeholder);
    input.set_disabled(options.disabled);
    if !options.class_name.is_empty() {
        let _ = input.class_list().add_1(&options.class_name);
    }
    set_style(input, "text-align", options.text_align.as_str());
}

/// Password input with a reveal toggle. The toggle is handled by the
/// delegated click listener.
fn build_password(document: &Document, options: &TextEditor, field: &str, value: &str) -> Result<Element> {
    let wrapper = create(document, "div", "gv-password")?;
    let input = input(document, "password", "gv-input")?;
    apply_text_options(&input, options);
    input.set_value(value);
    input.set_attribute("data-field", field).map_err(js_error)?;

    let toggle = create(document, "span", "gv-reveal")?;
    let icon = create(document, "i", "gv-eye-slash")?;
    toggle.append_child(&icon).map_err(js_error)?;

    wrapper.append_child(&input).map_err(js_error)?;
    wrapper.append_child(&toggle).map_err(js_error)?;
    Ok(wrapper)
}

fn build_select(document: &Document, editor: &SelectEditor, value: &str) -> Result<Element> {
    let select = create(document, "select", "gv-select")?;
    if let Some(placeholder) = &editor.placeholder {
        let option = create(document, "option", "")?;
        option.set_attribute("value", "").map_err(js_error)?;
        option.set_text_content(Some(placeholder));
        option.set_attribute("disabled", "").map_err(js_error)?;
        option.set_attribute("hidden", "").map_err(js_error)?;
        if value.is_empty() {
            option.set_attribute("selected", "").map_err(js_error)?;
        }
        select.append_child(&option).map_err(js_error)?;
    }
    for choice in &editor.options {
        let option = create(document, "option", "")?;
        option.set_attribute("value", &choice.value).map_err(js_error)?;
        option.set_text_content(Some(&choice.label));
        if choice.value == value {
            option.set_attribute("selected", "").map_err(js_error)?;
        }
        select.append_child(&option).map_err(js_error)?;
    }
    Ok(select)
}
