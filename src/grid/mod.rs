//! The grid engine.
//!
//! [`Grid`] owns column definitions, row handles, the load/overlay state and
//! the paging state. Every mutation updates state first and then paints the
//! affected region through its [`Surface`]:
//! - columns: header, body and overlay (spans depend on the column count)
//! - rows: body and overlay, or only the inserted/removed rows
//! - load state: overlay (and body when rows are discarded)
//! - paging: the controls bar and the scroll observer

mod events;
mod overlay;
mod paging;
mod validation;

pub use events::{
    ActionListener, CellEditListener, GridEvent, HostEvent, Listeners, PageChangeListener,
    RowClickListener,
};
pub use overlay::{LoadState, Overlay};
pub use paging::{LoadMore, PageRequest, PagingBar, PagingMode, PaginationState, ScrollMetrics};
pub use validation::{AutoAddRow, RequiredColumns};

use crate::config::GridOptions;
use crate::error::Result;
use crate::layout::{layout_row, BodyRow, HeaderLayout, RowStyler, TableSizing};
use crate::render::Surface;
use crate::types::{flatten_columns, CellValue, ColumnDef, Edge, Row, RowHandle, RowStyle, RowTarget};
use std::rc::Rc;

/// Everything the grid would paint for its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub sizing: TableSizing,
    pub header: HeaderLayout,
    pub body: Vec<BodyRow>,
    pub overlay: Overlay,
    /// `None` while hidden (no pagination set, or infinite scroll active).
    pub paging: Option<PagingBar>,
}

/// A data grid bound to one host surface.
pub struct Grid<S: Surface> {
    surface: S,
    options: GridOptions,
    column_defs: Vec<ColumnDef>,
    flat_columns: Vec<ColumnDef>,
    rows: Vec<RowHandle>,
    required: RequiredColumns,
    auto_add: AutoAddRow,
    auto_width: bool,
    load_state: LoadState,
    /// Overlay currently painted.
    overlay: Overlay,
    pagination: Option<PaginationState>,
    paging_mode: PagingMode,
    row_styler: Option<Rc<RowStyler>>,
    listeners: Listeners,
}

impl<S: Surface> Grid<S> {
    /// Create an empty grid and paint it.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, GridOptions::default())
    }

    pub fn with_options(surface: S, options: GridOptions) -> Self {
        let auto_width = options.auto_width;
        let mut grid = Self {
            surface,
            options,
            column_defs: Vec::new(),
            flat_columns: Vec::new(),
            rows: Vec::new(),
            required: RequiredColumns::default(),
            auto_add: AutoAddRow::default(),
            auto_width,
            load_state: LoadState::Idle,
            overlay: Overlay::None,
            pagination: None,
            paging_mode: PagingMode::Paged,
            row_styler: None,
            listeners: Listeners::default(),
        };
        grid.render();
        grid
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// Replace the column definitions. Rows are kept and repainted.
    pub fn set_columns(&mut self, defs: Vec<ColumnDef>) {
        self.flat_columns = flatten_columns(&defs);
        self.column_defs = defs;
        log::debug!(
            "columns set: {} defs, {} leaf columns",
            self.column_defs.len(),
            self.flat_columns.len()
        );
        self.paint_header();
        self.repaint_body();
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.column_defs
    }

    /// Leaf columns in display order.
    pub fn flat_columns(&self) -> &[ColumnDef] {
        &self.flat_columns
    }

    /// Switch between content-sized and fixed-width columns.
    pub fn set_auto_width(&mut self, auto_width: bool) {
        if self.auto_width != auto_width {
            self.auto_width = auto_width;
            self.paint_header();
        }
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// Replace every row. Clears any busy or error overlay.
    pub fn set_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator,
        I::Item: Into<RowHandle>,
    {
        self.rows = rows.into_iter().map(Into::into).collect();
        self.load_state = LoadState::Idle;
        log::debug!("rows set: {}", self.rows.len());
        self.repaint_body();
    }

    pub fn rows(&self) -> &[RowHandle] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowHandle> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the row behind `handle`, if the grid still holds it.
    pub fn index_of(&self, handle: &RowHandle) -> Option<usize> {
        self.rows.iter().position(|row| row.ptr_eq(handle))
    }

    /// Add rows at one edge, painting only the new rows.
    ///
    /// Without existing rows this behaves like [`Grid::set_rows`].
    pub fn add_rows<I>(&mut self, new_rows: I, edge: Edge)
    where
        I: IntoIterator,
        I::Item: Into<RowHandle>,
    {
        let new_rows: Vec<RowHandle> = new_rows.into_iter().map(Into::into).collect();
        if new_rows.is_empty() {
            return;
        }
        if self.rows.is_empty() {
            self.set_rows(new_rows);
            return;
        }

        let count = new_rows.len();
        let first_index = match edge {
            Edge::Start => {
                self.rows.splice(0..0, new_rows);
                0
            }
            Edge::End => {
                let first = self.rows.len();
                self.rows.extend(new_rows);
                first
            }
        };
        log::debug!("added {count} rows at {edge:?}, now {}", self.rows.len());

        let painted = self.layout_range(first_index, count);
        self.paint("insert rows", |s| s.insert_rows(edge, &painted));
        self.refresh_overlay();
    }

    /// Remove the first row matching `target`. Returns the removed row.
    ///
    /// Keys are compared against `key_field`; handles by identity. No match
    /// is a no-op.
    pub fn delete_row(&mut self, target: impl Into<RowTarget>, key_field: &str) -> Option<RowHandle> {
        let target = target.into();
        let index = self
            .rows
            .iter()
            .position(|row| target.matches(row, key_field))?;
        let removed = self.rows.remove(index);
        log::debug!("deleted row {index}, {} left", self.rows.len());
        self.paint("remove row", |s| s.remove_row(index));
        self.refresh_overlay();
        Some(removed)
    }

    /// [`Grid::delete_row`] with the configured default key field.
    pub fn delete_row_by_key(&mut self, key: impl Into<CellValue>) -> Option<RowHandle> {
        let key_field = self.options.key_field.clone();
        self.delete_row(RowTarget::Key(key.into()), &key_field)
    }

    /// Set the row-style callback used for rows painted from now on.
    pub fn set_row_style<F>(&mut self, style: F)
    where
        F: Fn(&Row, usize) -> Option<RowStyle> + 'static,
    {
        self.row_styler = Some(Rc::new(style));
    }

    // ------------------------------------------------------------------
    // Loading / error
    // ------------------------------------------------------------------

    /// Enter or leave the loading state.
    ///
    /// With `reset`, rows are discarded before the busy row is shown;
    /// otherwise the busy row appears below the current rows. Leaving the
    /// loading state keeps rows as they are; calling it while idle does
    /// nothing.
    pub fn set_loading(&mut self, loading: bool, reset: bool) {
        if !loading {
            if self.load_state == LoadState::Idle {
                return;
            }
            self.load_state = LoadState::Idle;
            log::debug!("loading cleared");
            self.refresh_overlay();
            return;
        }

        if reset && !self.rows.is_empty() {
            self.rows.clear();
            self.paint("clear body", |s| s.paint_body(&[]));
        }
        self.load_state = LoadState::Loading { keep_rows: !reset };
        log::debug!("loading (reset: {reset})");
        self.refresh_overlay();
    }

    /// Discard rows and show an error banner. Replaces any earlier banner.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let mut message = message.into();
        if message.is_empty() {
            message.clone_from(&self.options.error_text);
        }
        if !self.rows.is_empty() {
            self.rows.clear();
            self.paint("clear body", |s| s.paint_body(&[]));
        }
        log::debug!("error state: {message}");
        self.load_state = LoadState::Error(message);
        self.refresh_overlay();
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    /// Overlay currently shown.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    /// Store the paging position and repaint the controls (if visible).
    pub fn set_pagination(&mut self, state: PaginationState) {
        self.pagination = Some(state);
        self.paint_paging();
    }

    pub fn pagination(&self) -> Option<&PaginationState> {
        self.pagination.as_ref()
    }

    /// Switch between the pagination bar and infinite scroll.
    ///
    /// Enabling hides the bar and attaches the scroll observer; disabling
    /// detaches it and shows the bar again when pagination is set.
    pub fn set_infinite_scroll(&mut self, enabled: bool, load_more: Option<LoadMore>) {
        if enabled {
            // Re-enabling replaces the observer rather than stacking one.
            self.surface.detach_scroll_observer();
            self.paging_mode = PagingMode::InfiniteScroll { load_more };
            self.paint("attach scroll observer", |s| s.attach_scroll_observer());
            log::debug!("infinite scroll enabled");
        } else {
            if self.paging_mode.is_infinite() {
                self.surface.detach_scroll_observer();
                log::debug!("infinite scroll disabled");
            }
            self.paging_mode = PagingMode::Paged;
        }
        self.paint_paging();
    }

    /// Enable infinite scroll with a load-more callback.
    pub fn enable_infinite_scroll<F>(&mut self, load_more: F)
    where
        F: Fn() + 'static,
    {
        self.set_infinite_scroll(true, Some(Rc::new(load_more)));
    }

    pub fn disable_infinite_scroll(&mut self) {
        self.set_infinite_scroll(false, None);
    }

    pub fn is_infinite_scroll(&self) -> bool {
        self.paging_mode.is_infinite()
    }

    /// The paging controls as they should currently appear.
    pub fn paging_bar(&self) -> Option<PagingBar> {
        if self.paging_mode.is_infinite() {
            return None;
        }
        self.pagination
            .as_ref()
            .map(|state| PagingBar::new(state, &self.options))
    }

    // ------------------------------------------------------------------
    // Validation / auto-add-row
    // ------------------------------------------------------------------

    pub fn set_required_columns<I, T>(&mut self, fields: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.required = RequiredColumns::new(fields);
    }

    pub fn required_columns(&self) -> &RequiredColumns {
        &self.required
    }

    pub fn is_row_valid(&self, row: &Row) -> bool {
        self.required.is_satisfied_by(row)
    }

    /// Rows satisfying the required columns, in order.
    pub fn valid_rows(&self) -> Vec<RowHandle> {
        self.rows
            .iter()
            .filter(|row| self.required.is_satisfied_by(&row.borrow()))
            .cloned()
            .collect()
    }

    /// Whether every row is valid.
    pub fn validate_all(&self) -> bool {
        self.rows
            .iter()
            .all(|row| self.required.is_satisfied_by(&row.borrow()))
    }

    pub fn set_auto_add_row(&mut self, enabled: bool, edge: Edge) {
        self.auto_add = AutoAddRow::new(enabled, edge);
    }

    pub fn auto_add_row(&self) -> AutoAddRow {
        self.auto_add
    }

    /// Write `value` into `field` of the row at `index` and run the
    /// auto-add-row check.
    pub fn edit_cell(&mut self, index: usize, field: &str, value: CellValue) -> Vec<GridEvent> {
        let Some(row) = self.rows.get(index).cloned() else {
            log::warn!("edit of missing row {index} ignored");
            return Vec::new();
        };
        row.set(field, value.clone());
        self.extend_if_needed(&row);
        // Prepending shifts the edited row.
        let index = self.index_of(&row).unwrap_or(index);
        vec![GridEvent::CellEdited {
            row,
            index,
            field: field.to_string(),
            value,
        }]
    }

    /// Tell the grid a row was edited outside of [`Grid::edit_cell`].
    ///
    /// The check reads the row through the grid's own handle; a row the grid
    /// no longer holds is ignored. Returns whether a blank row was added.
    pub fn notify_row_edited(&mut self, row: &RowHandle) -> bool {
        if self.index_of(row).is_none() {
            log::warn!("edit notification for a row no longer in the grid");
            return false;
        }
        self.extend_if_needed(row)
    }

    fn extend_if_needed(&mut self, edited: &RowHandle) -> bool {
        if !self
            .auto_add
            .should_extend(edited, &self.rows, &self.required)
        {
            return false;
        }
        let blank = Row::blank(
            self.flat_columns
                .iter()
                .map(|col| col.field.as_str())
                .filter(|field| !field.is_empty()),
        );
        log::debug!("auto-add-row: appending blank row at {:?}", self.auto_add.edge);
        self.add_rows([blank], self.auto_add.edge);
        true
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn on_row_click<F>(&mut self, listener: F)
    where
        F: Fn(&RowHandle, usize) + 'static,
    {
        self.listeners.row_click = Some(Rc::new(listener));
    }

    pub fn on_page_change<F>(&mut self, listener: F)
    where
        F: Fn(PageRequest) + 'static,
    {
        self.listeners.page_change = Some(Rc::new(listener));
    }

    pub fn on_action<F>(&mut self, listener: F)
    where
        F: Fn(&str, &RowHandle, usize) + 'static,
    {
        self.listeners.action = Some(Rc::new(listener));
    }

    pub fn on_cell_edit<F>(&mut self, listener: F)
    where
        F: Fn(&RowHandle, usize, &str, &CellValue) + 'static,
    {
        self.listeners.cell_edit = Some(Rc::new(listener));
    }

    /// Snapshot of the registered listeners, load-more callback included.
    pub fn listeners(&self) -> Listeners {
        let mut listeners = self.listeners.clone();
        listeners.load_more = self.paging_mode.load_more();
        listeners
    }

    /// Apply a host interaction and return the events it raises.
    pub fn handle(&mut self, event: HostEvent) -> Vec<GridEvent> {
        match event {
            HostEvent::RowClick { index } => self
                .rows
                .get(index)
                .map(|row| GridEvent::RowClicked {
                    row: row.clone(),
                    index,
                })
                .into_iter()
                .collect(),
            HostEvent::ActionClick { index, action } => self
                .rows
                .get(index)
                .map(|row| GridEvent::ActionClicked {
                    action,
                    row: row.clone(),
                    index,
                })
                .into_iter()
                .collect(),
            HostEvent::CellInput { index, field, raw } => {
                let editor = self
                    .flat_columns
                    .iter()
                    .find(|col| col.field == field)
                    .and_then(|col| col.editor.as_ref());
                let value = match editor {
                    Some(editor) => editor.parse_input(&raw),
                    None => Some(CellValue::Text(raw.clone())),
                };
                match value {
                    Some(value) => self.edit_cell(index, &field, value),
                    None => {
                        log::warn!("unparsable input {raw:?} for field {field:?} ignored");
                        Vec::new()
                    }
                }
            }
            HostEvent::PageSizeSelected(page_row) => self
                .active_pagination()
                .map(|state| GridEvent::PageChangeRequested(state.with_page_size(page_row)))
                .into_iter()
                .collect(),
            HostEvent::PreviousPage => self
                .active_pagination()
                .and_then(PaginationState::previous)
                .map(GridEvent::PageChangeRequested)
                .into_iter()
                .collect(),
            HostEvent::NextPage => self
                .active_pagination()
                .and_then(PaginationState::next)
                .map(GridEvent::PageChangeRequested)
                .into_iter()
                .collect(),
            HostEvent::Scroll(metrics) => {
                if self.paging_mode.is_infinite()
                    && !self.load_state.is_loading()
                    && metrics.near_bottom(self.options.scroll_threshold)
                {
                    log::trace!("scroll near bottom, requesting more rows");
                    vec![GridEvent::LoadMore]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// [`Grid::handle`] and deliver the events to the registered listeners.
    ///
    /// Only for hosts that own the grid directly; shared hosts should drop
    /// their borrow before emitting.
    pub fn handle_and_emit(&mut self, event: HostEvent) -> Vec<GridEvent> {
        let events = self.handle(event);
        self.listeners().emit_all(&events);
        events
    }

    /// Pagination while its controls are the active paging affordance.
    fn active_pagination(&self) -> Option<PaginationState> {
        if self.paging_mode.is_infinite() {
            return None;
        }
        self.pagination
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    /// Derive everything the grid shows from its current state.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan {
            sizing: self.sizing(),
            header: HeaderLayout::from_columns(&self.column_defs),
            body: self.layout_range(0, self.rows.len()),
            overlay: self.derived_overlay(),
            paging: self.paging_bar(),
        }
    }

    /// Repaint header, body, overlay and paging controls.
    pub fn render(&mut self) {
        let plan = self.render_plan();
        log::trace!("full render: {} rows", plan.body.len());
        self.paint("paint header", |s| s.paint_header(&plan.header, &plan.sizing));
        self.paint("paint body", |s| s.paint_body(&plan.body));
        self.paint("paint overlay", |s| s.paint_overlay(&plan.overlay));
        self.overlay = plan.overlay;
        self.paint("paint paging", |s| s.paint_paging(plan.paging.as_ref()));
    }

    fn sizing(&self) -> TableSizing {
        TableSizing::for_columns(self.auto_width, &self.flat_columns)
    }

    fn layout_range(&self, first: usize, count: usize) -> Vec<BodyRow> {
        let styler = self.row_styler.as_deref();
        self.rows
            .iter()
            .enumerate()
            .skip(first)
            .take(count)
            .map(|(index, row)| layout_row(&self.flat_columns, &row.borrow(), index, styler))
            .collect()
    }

    fn derived_overlay(&self) -> Overlay {
        Overlay::derive(
            &self.load_state,
            self.rows.len(),
            self.flat_columns.len(),
            &self.options,
        )
    }

    fn paint_header(&mut self) {
        let header = HeaderLayout::from_columns(&self.column_defs);
        let sizing = self.sizing();
        self.paint("paint header", |s| s.paint_header(&header, &sizing));
    }

    fn repaint_body(&mut self) {
        let body = self.layout_range(0, self.rows.len());
        self.paint("paint body", |s| s.paint_body(&body));
        // Overlay spans follow the column count, so always repaint it here.
        let overlay = self.derived_overlay();
        self.paint("paint overlay", |s| s.paint_overlay(&overlay));
        self.overlay = overlay;
    }

    fn refresh_overlay(&mut self) {
        let overlay = self.derived_overlay();
        if overlay != self.overlay {
            log::trace!("overlay {:?} -> {:?}", self.overlay, overlay);
            self.paint("paint overlay", |s| s.paint_overlay(&overlay));
            self.overlay = overlay;
        }
    }

    fn paint_paging(&mut self) {
        let bar = self.paging_bar();
        self.paint("paint paging", |s| s.paint_paging(bar.as_ref()));
    }

    /// Run a surface operation; failures are logged and state is kept.
    fn paint(&mut self, what: &str, op: impl FnOnce(&mut S) -> Result<()>) {
        if let Err(e) = op(&mut self.surface) {
            log::error!("{what} failed: {e}");
        }
    }
}

impl<S: Surface> Drop for Grid<S> {
    fn drop(&mut self) {
        self.surface.detach_scroll_observer();
    }
}
