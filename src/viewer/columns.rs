//! JavaScript column definitions and caller-supplied cell functions.
//!
//! Column objects are read property by property: `renderCell` and a
//! function-valued `colSpan` cannot go through serde, so they are wrapped in a
//! [`JsCellRenderer`].

use crate::editors::EditorKind;
use crate::error::{GridError, Result};
use crate::types::{CellContent, CellRenderer, CellValue, ColumnDef, ColumnWidth, Row, TextAlign};
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Read `name`, treating `undefined` and `null` as absent.
pub(crate) fn prop(obj: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Plain-object view of a row.
pub(crate) fn row_to_js(row: &Row) -> JsValue {
    row.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

pub(crate) fn value_to_js(value: &CellValue) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn index_to_js(index: usize) -> JsValue {
    JsValue::from_f64(index as f64)
}

#[allow(clippy::cast_possible_truncation)]
fn span_from_f64(span: f64) -> i64 {
    if span.is_finite() {
        span.trunc() as i64
    } else {
        1
    }
}

/// `renderCell` / `colSpan` functions from a JavaScript column definition.
pub(crate) struct JsCellRenderer {
    render: Option<Function>,
    col_span: Option<Function>,
}

impl CellRenderer for JsCellRenderer {
    fn render(&self, value: &CellValue, row: &Row) -> CellContent {
        let Some(render) = &self.render else {
            return CellContent::Text(value.display());
        };
        match render.call2(&JsValue::NULL, &value_to_js(value), &row_to_js(row)) {
            Ok(result) => content_from_js(result),
            Err(e) => {
                log::error!("renderCell threw: {e:?}");
                CellContent::Empty
            }
        }
    }

    fn col_span(&self, value: &CellValue, row: &Row, row_index: usize) -> Option<i64> {
        let col_span = self.col_span.as_ref()?;
        match col_span.call3(
            &JsValue::NULL,
            &value_to_js(value),
            &row_to_js(row),
            &index_to_js(row_index),
        ) {
            Ok(span) => span.as_f64().map(span_from_f64),
            Err(e) => {
                log::warn!("colSpan threw: {e:?}");
                None
            }
        }
    }

    fn renders_content(&self) -> bool {
        self.render.is_some()
    }
}

/// Strings are markup, nodes are attached as-is, `null`/`undefined` is empty.
fn content_from_js(result: JsValue) -> CellContent {
    if result.is_null() || result.is_undefined() {
        return CellContent::Empty;
    }
    if let Some(markup) = result.as_string() {
        return CellContent::Markup(markup);
    }
    if let Some(number) = result.as_f64() {
        return CellContent::Text(CellValue::Number(number).display());
    }
    match result.dyn_into::<web_sys::Node>() {
        Ok(node) => CellContent::Node(node),
        Err(other) => {
            log::warn!("renderCell returned an unattachable value: {other:?}");
            CellContent::Empty
        }
    }
}

pub(crate) fn columns_from_js(columns: &JsValue) -> Result<Vec<ColumnDef>> {
    let columns = columns
        .dyn_ref::<Array>()
        .ok_or_else(|| GridError::Config("columns must be an array".into()))?;
    columns.iter().map(|column| column_from_js(&column)).collect()
}

fn column_from_js(column: &JsValue) -> Result<ColumnDef> {
    if !column.is_object() {
        return Err(GridError::Config(format!("column is not an object: {column:?}")));
    }
    let string = |name: &str| prop(column, name).and_then(|v| v.as_string());

    let mut def = ColumnDef::new(
        string("field").unwrap_or_default(),
        string("headerName").unwrap_or_default(),
    );
    if let Some(tooltip) = string("headerTooltip") {
        def = def.tooltip(tooltip);
    }
    if let Some(align) = prop(column, "textAlign") {
        match serde_wasm_bindgen::from_value::<TextAlign>(align) {
            Ok(align) => def = def.align(align),
            Err(e) => log::warn!("column {:?}: {e}", def.field),
        }
    }
    if let Some(width) = prop(column, "width") {
        if let Some(px) = width.as_f64() {
            def = def.width(ColumnWidth::Px(px));
        } else if let Some(css) = width.as_string() {
            def = def.width(ColumnWidth::Css(css));
        }
    }
    if let Some(editor) = prop(column, "editor") {
        def = def.editor(serde_wasm_bindgen::from_value::<EditorKind>(editor)?);
    }

    let mut span_fn = None;
    if let Some(span) = prop(column, "colSpan") {
        if let Some(span) = span.as_f64() {
            def = def.span(span_from_f64(span));
        } else {
            span_fn = span.dyn_into::<Function>().ok();
        }
    }
    let render = prop(column, "renderCell").and_then(|f| f.dyn_into::<Function>().ok());
    if render.is_some() || span_fn.is_some() {
        def = def.renderer(JsCellRenderer {
            render,
            col_span: span_fn,
        });
    }

    if let Some(children) = prop(column, "children") {
        def.children = columns_from_js(&children)?;
    }
    Ok(def)
}
