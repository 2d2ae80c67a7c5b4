//! `GridView` - the JavaScript entry point.
//!
//! Wraps a [`Grid`] painting into a [`DomSurface`]. The grid lives in an
//! `Rc<RefCell<_>>` shared with the surface's DOM listeners. Every handler
//! applies the interaction while holding the borrow, takes a snapshot of the
//! listeners, releases the borrow and only then calls back into JavaScript,
//! so callbacks are free to call `GridView` methods again.
//!
//! Rows cross the boundary as the caller's own objects (see [`rows`]).
//! Options arguments take either an options object (`{position}`,
//! `{reset}`) or the bare value.

mod columns;
mod rows;

use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::GridOptions;
use crate::error::GridError;
use crate::grid::{Grid, GridEvent, HostEvent, PaginationState};
use crate::render::{DomSurface, HostSink};
use crate::types::{CellValue, Edge, Row, RowHandle, RowStyle, RowTarget};

use columns::{columns_from_js, index_to_js, prop, row_to_js, value_to_js};
use rows::JsRows;

type SharedGrid = Rc<RefCell<Grid<DomSurface>>>;
type SharedRows = Rc<RefCell<JsRows>>;

/// Apply a host event and deliver the resulting events.
fn dispatch(state: &Weak<RefCell<Grid<DomSurface>>>, rows: &SharedRows, event: HostEvent) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let (events, listeners) = {
        let Ok(mut grid) = state.try_borrow_mut() else {
            log::warn!("grid busy, dropped {event:?}");
            return;
        };
        let events = grid.handle(event);
        (events, grid.listeners())
    }; // borrow dropped here - listeners may call back into the grid
    for event in &events {
        if let GridEvent::CellEdited { row, field, value, .. } = event {
            match rows.try_borrow_mut() {
                Ok(mut rows) => rows.write_field(row, field, value),
                Err(_) => log::warn!("rows busy, edit of {field:?} not mirrored"),
            }
        }
    }
    listeners.emit_all(&events);
}

/// `value` itself when it is a string/bool, else `value[name]`.
fn option_or_bare(value: &JsValue, name: &str) -> Option<JsValue> {
    if value.is_object() {
        prop(value, name)
    } else if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.clone())
    }
}

fn parse_edge(options: &JsValue) -> Edge {
    let Some(position) = option_or_bare(options, "position") else {
        return Edge::End;
    };
    match position.as_string() {
        Some(position) => Edge::parse(&position).unwrap_or_else(|| {
            log::warn!("unknown position {position:?}, using \"end\"");
            Edge::End
        }),
        None => {
            log::warn!("position must be a string, got {position:?}");
            Edge::End
        }
    }
}

fn parse_reset(options: &JsValue) -> bool {
    match option_or_bare(options, "reset") {
        None => true,
        Some(reset) => reset.as_bool().unwrap_or_else(|| {
            log::warn!("reset must be a boolean, got {reset:?}");
            true
        }),
    }
}

/// Caller object for `row`, or a detached copy while the registry is busy.
fn object_for(rows: &SharedRows, row: &RowHandle) -> JsValue {
    match rows.try_borrow_mut() {
        Ok(mut rows) => rows.object_of(row).into(),
        Err(_) => row_to_js(&row.borrow()),
    }
}

fn call_logged(what: &str, result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        log::error!("{what} callback threw: {e:?}");
    }
}

/// The data grid exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    state: SharedGrid,
    rows: SharedRows,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid inside `container`.
    ///
    /// Fails when no container is supplied or `options` is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Option<HtmlElement>, options: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        crate::logging::init();

        let container = container.ok_or(GridError::MissingSurface)?;
        let options = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value::<GridOptions>(options)
                .map_err(GridError::from)?
                .validate()?
        };

        let mut surface = DomSurface::new(&container)?;
        let rows: SharedRows = Rc::default();
        let state: SharedGrid = Rc::new_cyclic(|weak| {
            let weak = Weak::clone(weak);
            let sink_rows = Rc::clone(&rows);
            let sink: HostSink = Rc::new(move |event| dispatch(&weak, &sink_rows, event));
            if let Err(e) = surface.set_host_sink(sink) {
                log::error!("failed to attach grid listeners: {e}");
            }
            RefCell::new(Grid::with_options(surface, options))
        });
        Ok(GridView { state, rows })
    }

    fn grid(&self) -> Result<RefMut<'_, Grid<DomSurface>>, JsValue> {
        self.state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("grid is busy (called from a render callback?)"))
    }

    #[wasm_bindgen(js_name = "setColumns")]
    pub fn set_columns(&self, columns: JsValue) -> Result<(), JsValue> {
        let defs = columns_from_js(&columns)?;
        self.grid()?.set_columns(defs);
        Ok(())
    }

    fn js_rows(&self) -> Result<RefMut<'_, JsRows>, JsValue> {
        self.rows
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("grid rows are busy"))
    }

    #[wasm_bindgen(js_name = "setRows")]
    pub fn set_rows(&self, rows: JsValue) -> Result<(), JsValue> {
        let mut grid = self.grid()?;
        let mut js_rows = self.js_rows()?;
        let handles = js_rows.bind_all(&rows)?;
        grid.set_rows(handles);
        js_rows.retain(grid.rows());
        Ok(())
    }

    /// Add rows at `{position}` (`"begin"`/`"start"` or `"end"`, default end).
    #[wasm_bindgen(js_name = "addRows")]
    pub fn add_rows(&self, rows: JsValue, options: JsValue) -> Result<(), JsValue> {
        let mut grid = self.grid()?;
        let handles = self.js_rows()?.bind_all(&rows)?;
        grid.add_rows(handles, parse_edge(&options));
        Ok(())
    }

    /// Delete the first row matching `target`: an object by identity, a
    /// scalar against `keyField`. Returns the removed row.
    ///
    /// Objects the grid never received are matched field by field.
    #[wasm_bindgen(js_name = "deleteRow")]
    pub fn delete_row(&self, target: JsValue, key_field: Option<String>) -> Result<JsValue, JsValue> {
        let mut grid = self.grid()?;
        let mut js_rows = self.js_rows()?;
        let target = if target.is_object() {
            match js_rows.handle_of(&target) {
                Some(handle) => RowTarget::Handle(handle),
                None => {
                    let row: Row =
                        serde_wasm_bindgen::from_value(target).map_err(GridError::from)?;
                    RowTarget::Matching(row)
                }
            }
        } else {
            let key: CellValue =
                serde_wasm_bindgen::from_value(target).map_err(GridError::from)?;
            RowTarget::Key(key)
        };
        let key_field = key_field.unwrap_or_else(|| grid.options().key_field.clone());
        let Some(removed) = grid.delete_row(target, &key_field) else {
            return Ok(JsValue::UNDEFINED);
        };
        let object = js_rows.object_of(&removed);
        js_rows.retain(grid.rows());
        Ok(object.into())
    }

    /// Show or clear the busy indicator. `{reset}` (default true) discards
    /// rows.
    #[wasm_bindgen(js_name = "setLoading")]
    pub fn set_loading(&self, loading: bool, options: JsValue) -> Result<(), JsValue> {
        let mut grid = self.grid()?;
        grid.set_loading(loading, parse_reset(&options));
        self.js_rows()?.retain(grid.rows());
        Ok(())
    }

    #[wasm_bindgen(js_name = "setError")]
    pub fn set_error(&self, message: Option<String>) -> Result<(), JsValue> {
        self.grid()?.set_error(message.unwrap_or_default());
        Ok(())
    }

    /// `{pageNo, pageRow, totalRecord, totalPage}`
    #[wasm_bindgen(js_name = "setPagination")]
    pub fn set_pagination(&self, state: JsValue) -> Result<(), JsValue> {
        let state: PaginationState =
            serde_wasm_bindgen::from_value(state).map_err(GridError::from)?;
        self.grid()?.set_pagination(state);
        Ok(())
    }

    #[wasm_bindgen(js_name = "enableInfiniteScroll")]
    pub fn enable_infinite_scroll(
        &self,
        enabled: bool,
        load_more: Option<Function>,
    ) -> Result<(), JsValue> {
        let load_more = load_more.map(|callback| {
            Rc::new(move || call_logged("loadMore", callback.call0(&JsValue::NULL)))
                as crate::grid::LoadMore
        });
        self.grid()?.set_infinite_scroll(enabled, load_more);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRequiredColumns")]
    pub fn set_required_columns(&self, fields: Vec<String>) -> Result<(), JsValue> {
        self.grid()?.set_required_columns(fields);
        Ok(())
    }

    #[wasm_bindgen(js_name = "isRowValid")]
    pub fn is_row_valid(&self, row: JsValue) -> Result<bool, JsValue> {
        let grid = self.grid()?;
        if let Some(handle) = self.js_rows()?.pull_one(&row) {
            return Ok(grid.is_row_valid(&handle.borrow()));
        }
        let row: Row = serde_wasm_bindgen::from_value(row).map_err(GridError::from)?;
        Ok(grid.is_row_valid(&row))
    }

    #[wasm_bindgen(js_name = "getAllValidRows")]
    pub fn get_all_valid_rows(&self) -> Result<JsValue, JsValue> {
        let grid = self.grid()?;
        let mut js_rows = self.js_rows()?;
        js_rows.pull();
        Ok(js_rows.objects_of(&grid.valid_rows()).into())
    }

    /// The caller's row objects in display order.
    #[wasm_bindgen(js_name = "getRows")]
    pub fn get_rows(&self) -> Result<JsValue, JsValue> {
        let grid = self.grid()?;
        Ok(self.js_rows()?.objects_of(grid.rows()).into())
    }

    /// Whether every row satisfies the required columns.
    #[wasm_bindgen(js_name = "validateAll")]
    pub fn validate_all(&self) -> Result<bool, JsValue> {
        let grid = self.grid()?;
        self.js_rows()?.pull();
        Ok(grid.validate_all())
    }

    /// Report a caller-side edit of `row` so auto-add-row can react.
    /// Returns whether a blank row was added.
    #[wasm_bindgen(js_name = "notifyRowEdited")]
    pub fn notify_row_edited(&self, row: JsValue) -> Result<bool, JsValue> {
        let mut grid = self.grid()?;
        let Some(handle) = self.js_rows()?.pull_one(&row) else {
            log::warn!("notifyRowEdited: row is not in the grid");
            return Ok(false);
        };
        Ok(grid.notify_row_edited(&handle))
    }

    #[wasm_bindgen(js_name = "setAutoAddRow")]
    pub fn set_auto_add_row(&self, enabled: bool, options: JsValue) -> Result<(), JsValue> {
        self.grid()?.set_auto_add_row(enabled, parse_edge(&options));
        Ok(())
    }

    #[wasm_bindgen(js_name = "setAutoWidth")]
    pub fn set_auto_width(&self, auto_width: bool) -> Result<(), JsValue> {
        self.grid()?.set_auto_width(auto_width);
        Ok(())
    }

    /// `callback(row, index)`
    #[wasm_bindgen(js_name = "setOnRowClick")]
    pub fn set_on_row_click(&self, callback: Function) -> Result<(), JsValue> {
        let rows = Rc::clone(&self.rows);
        self.grid()?.on_row_click(move |row, index| {
            let row = object_for(&rows, row);
            call_logged("rowClick", callback.call2(&JsValue::NULL, &row, &index_to_js(index)));
        });
        Ok(())
    }

    /// `callback(pageNo, pageRow)`
    #[wasm_bindgen(js_name = "setOnPageChange")]
    pub fn set_on_page_change(&self, callback: Function) -> Result<(), JsValue> {
        self.grid()?.on_page_change(move |request| {
            call_logged(
                "pageChange",
                callback.call2(
                    &JsValue::NULL,
                    &JsValue::from(request.page_no),
                    &JsValue::from(request.page_row),
                ),
            );
        });
        Ok(())
    }

    /// `callback(action, row, index)`
    #[wasm_bindgen(js_name = "setOnAction")]
    pub fn set_on_action(&self, callback: Function) -> Result<(), JsValue> {
        let rows = Rc::clone(&self.rows);
        self.grid()?.on_action(move |action, row, index| {
            let row = object_for(&rows, row);
            call_logged(
                "action",
                callback.call3(
                    &JsValue::NULL,
                    &JsValue::from_str(action),
                    &row,
                    &index_to_js(index),
                ),
            );
        });
        Ok(())
    }

    /// `callback(row, field, value, index)`
    #[wasm_bindgen(js_name = "setOnCellEdit")]
    pub fn set_on_cell_edit(&self, callback: Function) -> Result<(), JsValue> {
        let rows = Rc::clone(&self.rows);
        self.grid()?.on_cell_edit(move |row, index, field, value| {
            let args = Array::of4(
                &object_for(&rows, row),
                &JsValue::from_str(field),
                &value_to_js(value),
                &index_to_js(index),
            );
            call_logged("cellEdit", callback.apply(&JsValue::NULL, &args));
        });
        Ok(())
    }

    /// `callback(row, index)` returning a class string, a style object or
    /// nothing. Applies to rows painted from now on. `row` is a copy taken
    /// while painting.
    #[wasm_bindgen(js_name = "setRowStyle")]
    pub fn set_row_style(&self, callback: Function) -> Result<(), JsValue> {
        self.grid()?.set_row_style(move |row, index| {
            let result = match callback.call2(&JsValue::NULL, &row_to_js(row), &index_to_js(index)) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("rowStyle callback threw: {e:?}");
                    return None;
                }
            };
            if let Some(classes) = result.as_string() {
                return Some(RowStyle::Classes(classes));
            }
            if result.is_object() {
                return serde_wasm_bindgen::from_value::<BTreeMap<String, String>>(result)
                    .map(|map| RowStyle::Inline(map.into_iter().collect()))
                    .map_err(|e| log::warn!("rowStyle returned an unusable object: {e}"))
                    .ok();
            }
            None
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = "rowCount")]
    pub fn row_count(&self) -> Result<usize, JsValue> {
        Ok(self.grid()?.row_count())
    }

    /// Repaint everything, picking up caller-side edits to row objects.
    pub fn render(&self) -> Result<(), JsValue> {
        let mut grid = self.grid()?;
        self.js_rows()?.pull();
        grid.render();
        Ok(())
    }

    /// Detach every listener and remove the grid's DOM.
    pub fn destroy(&self) -> Result<(), JsValue> {
        let mut grid = self.grid()?;
        grid.disable_infinite_scroll();
        grid.surface_mut().destroy();
        self.js_rows()?.retain(&[]);
        Ok(())
    }

    /// Debug view of the current state.
    #[wasm_bindgen(js_name = "debugState")]
    pub fn debug_state(&self) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DebugState {
            rows: usize,
            columns: usize,
            load_state: String,
            overlay: String,
            infinite_scroll: bool,
            pagination: Option<PaginationState>,
        }
        let grid = self.grid()?;
        let state = DebugState {
            rows: grid.row_count(),
            columns: grid.flat_columns().len(),
            load_state: format!("{:?}", grid.load_state()),
            overlay: format!("{:?}", grid.overlay()),
            infinite_scroll: grid.is_infinite_scroll(),
            pagination: grid.pagination().copied(),
        };
        serde_wasm_bindgen::to_value(&state).map_err(JsValue::from)
    }
}
