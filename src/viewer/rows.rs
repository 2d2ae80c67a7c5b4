//! Caller row objects bound to the grid's row handles.
//!
//! JavaScript hands the grid plain objects. Each one is read into a
//! [`RowHandle`] once and kept next to it, so callbacks receive the caller's
//! own object, deletion by object is by identity, and editor writes land in
//! that object. Caller-side writes are read back by [`JsRows::pull`].

use super::columns::{row_to_js, value_to_js};
use crate::error::{GridError, Result};
use crate::types::{CellValue, Row, RowHandle};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Default)]
pub(crate) struct JsRows {
    bound: Vec<(RowHandle, Object)>,
}

fn read_row(object: &Object) -> Result<Row> {
    Ok(serde_wasm_bindgen::from_value(JsValue::from(object))?)
}

impl JsRows {
    /// Bind every object of a JavaScript array.
    pub fn bind_all(&mut self, rows: &JsValue) -> Result<Vec<RowHandle>> {
        let rows = rows
            .dyn_ref::<Array>()
            .ok_or_else(|| GridError::Config("rows must be an array".into()))?;
        rows.iter().map(|row| self.bind(row)).collect()
    }

    /// Handle for `row`, reusing the binding when the object is already known.
    pub fn bind(&mut self, row: JsValue) -> Result<RowHandle> {
        if !row.is_object() {
            return Err(GridError::Config(format!("row is not an object: {row:?}")));
        }
        let object: Object = row.unchecked_into();
        let fields = read_row(&object)?;
        if let Some(handle) = self.handle_of(&object) {
            handle.update(|row| *row = fields);
            return Ok(handle);
        }
        let handle = RowHandle::new(fields);
        self.bound.push((handle.clone(), object));
        Ok(handle)
    }

    /// The handle bound to exactly this object.
    pub fn handle_of(&self, object: &JsValue) -> Option<RowHandle> {
        self.bound
            .iter()
            .find(|(_, bound)| Object::is(bound, object))
            .map(|(handle, _)| handle.clone())
    }

    /// The caller object behind `handle`. Rows the grid created itself get
    /// an object on first use.
    pub fn object_of(&mut self, handle: &RowHandle) -> Object {
        if let Some((_, object)) = self.bound.iter().find(|(bound, _)| bound.ptr_eq(handle)) {
            return object.clone();
        }
        let object = row_to_js(&handle.borrow())
            .dyn_into::<Object>()
            .unwrap_or_else(|_| Object::new());
        self.bound.push((handle.clone(), object.clone()));
        object
    }

    pub fn objects_of(&mut self, handles: &[RowHandle]) -> Array {
        handles
            .iter()
            .map(|handle| JsValue::from(self.object_of(handle)))
            .collect()
    }

    /// Mirror an editor write into the caller object.
    pub fn write_field(&mut self, handle: &RowHandle, field: &str, value: &CellValue) {
        let object = self.object_of(handle);
        if let Err(e) = Reflect::set(&object, &JsValue::from_str(field), &value_to_js(value)) {
            log::warn!("could not write {field:?} back to the row: {e:?}");
        }
    }

    /// Re-read caller objects into their handles.
    pub fn pull(&self) {
        for (handle, object) in &self.bound {
            match read_row(object) {
                Ok(fields) => handle.update(|row| *row = fields),
                Err(e) => log::warn!("row object no longer readable: {e}"),
            }
        }
    }

    /// Re-read one caller object, returning its handle.
    pub fn pull_one(&self, object: &JsValue) -> Option<RowHandle> {
        let handle = self.handle_of(object)?;
        let object: &Object = object.unchecked_ref();
        match read_row(object) {
            Ok(fields) => handle.update(|row| *row = fields),
            Err(e) => log::warn!("row object no longer readable: {e}"),
        }
        Some(handle)
    }

    /// Forget objects whose rows left the grid.
    pub fn retain(&mut self, live: &[RowHandle]) {
        self.bound
            .retain(|(handle, _)| live.iter().any(|row| row.ptr_eq(handle)));
    }
}
