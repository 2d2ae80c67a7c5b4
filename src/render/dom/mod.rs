//! DOM table surface.
//!
//! Builds this structure inside the host container:
//!
//! ```text
//! div.gv-grid
//!   div.gv-error          error banner (hidden unless an error is shown)
//!   div.gv-scroll         scrollable region observed by infinite scroll
//!     table.gv-table
//!       colgroup          fixed column widths (fixed layout only)
//!       thead
//!       tbody             tr.gv-row data rows, then at most one tr.gv-overlay
//!   div.gv-paging         paging controls (hidden while inactive)
//! ```
//!
//! Clicks and changes are handled by two delegated listeners on the root and
//! translated into [`HostEvent`]s for the [`HostSink`]. Row positions are
//! computed when the event fires, so rows inserted or removed later never
//! report stale indices.

mod cells;
mod events;

use crate::error::{GridError, Result};
use crate::grid::{HostEvent, Overlay, PagingBar};
use crate::layout::{BodyRow, HeaderLayout, TableSizing};
use crate::render::Surface;
use crate::types::{Edge, RowStyle};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

/// Receiver of translated host events.
pub type HostSink = Rc<dyn Fn(HostEvent)>;

pub(crate) const ROW_CLASS: &str = "gv-row";

pub(crate) fn js_error(e: JsValue) -> GridError {
    GridError::Render(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let element = document.create_element(tag).map_err(js_error)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    create(document, tag, class)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GridError::Render(format!("<{tag}> is not an HtmlElement")))
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// DOM-backed [`Surface`].
pub struct DomSurface {
    document: Document,
    root: HtmlElement,
    banner: HtmlElement,
    scroll_region: HtmlElement,
    table: HtmlElement,
    colgroup: Element,
    thead: Element,
    tbody: Element,
    overlay_row: Option<Element>,
    paging: HtmlElement,
    sink: Option<HostSink>,
    click_closure: Option<Closure<dyn FnMut(Event)>>,
    change_closure: Option<Closure<dyn FnMut(Event)>>,
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
}

impl DomSurface {
    /// Build the grid skeleton inside `container`.
    pub fn new(container: &HtmlElement) -> Result<Self> {
        let document = container
            .owner_document()
            .or_else(|| web_sys::window().and_then(|w| w.document()))
            .ok_or(GridError::MissingSurface)?;

        let root = create_html(&document, "div", "gv-grid")?;
        let banner = create_html(&document, "div", "gv-error")?;
        set_style(&banner, "display", "none");
        let scroll_region = create_html(&document, "div", "gv-scroll")?;
        set_style(&scroll_region, "overflow", "auto");
        let table = create_html(&document, "table", "gv-table")?;
        let colgroup = create(&document, "colgroup", "")?;
        let thead = create(&document, "thead", "")?;
        let tbody = create(&document, "tbody", "")?;
        let paging = create_html(&document, "div", "gv-paging")?;
        set_style(&paging, "display", "none");

        table.append_child(&colgroup).map_err(js_error)?;
        table.append_child(&thead).map_err(js_error)?;
        table.append_child(&tbody).map_err(js_error)?;
        scroll_region.append_child(&table).map_err(js_error)?;
        root.append_child(&banner).map_err(js_error)?;
        root.append_child(&scroll_region).map_err(js_error)?;
        root.append_child(&paging).map_err(js_error)?;
        container.append_child(&root).map_err(js_error)?;

        Ok(Self {
            document,
            root,
            banner,
            scroll_region,
            table,
            colgroup,
            thead,
            tbody,
            overlay_row: None,
            paging,
            sink: None,
            click_closure: None,
            change_closure: None,
            scroll_closure: None,
        })
    }

    /// Route user interaction to `sink`, replacing any earlier sink.
    pub fn set_host_sink(&mut self, sink: HostSink) -> Result<()> {
        self.detach_interaction();

        let click_sink = Rc::clone(&sink);
        let tbody = self.tbody.clone();
        let click = Closure::wrap(Box::new(move |event: Event| {
            if let Some(host_event) = events::click_event(&tbody, &event) {
                click_sink(host_event);
            }
        }) as Box<dyn FnMut(Event)>);
        self.root
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.click_closure = Some(click);

        let change_sink = Rc::clone(&sink);
        let tbody = self.tbody.clone();
        let change = Closure::wrap(Box::new(move |event: Event| {
            if let Some(host_event) = events::change_event(&tbody, &event) {
                change_sink(host_event);
            }
        }) as Box<dyn FnMut(Event)>);
        self.root
            .add_event_listener_with_callback("change", change.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.change_closure = Some(change);

        self.sink = Some(sink);
        Ok(())
    }

    /// Remove every listener and the grid's DOM.
    pub fn destroy(&mut self) {
        self.detach_scroll_observer();
        self.detach_interaction();
        self.sink = None;
        self.root.remove();
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    fn detach_interaction(&mut self) {
        if let Some(closure) = self.click_closure.take() {
            let _ = self
                .root
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        if let Some(closure) = self.change_closure.take() {
            let _ = self
                .root
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }
    }

    fn build_row(&self, row: &BodyRow) -> Result<Element> {
        let tr = create(&self.document, "tr", ROW_CLASS)?;
        if let Some(style) = &row.style {
            apply_row_style(&tr, style);
        }
        for cell in &row.cells {
            let td = cells::build_cell(&self.document, cell)?;
            tr.append_child(&td).map_err(js_error)?;
        }
        Ok(tr)
    }

    fn data_rows(&self) -> Vec<Element> {
        events::data_rows(&self.tbody)
    }

    fn build_overlay_row(&self, overlay: &Overlay) -> Result<Option<Element>> {
        let (class, span) = match overlay {
            Overlay::Empty { span, .. } => ("gv-overlay gv-empty", *span),
            Overlay::Busy { span, .. } => ("gv-overlay gv-busy", *span),
            Overlay::None | Overlay::Error { .. } => return Ok(None),
        };
        let tr = create(&self.document, "tr", class)?;
        let td = create(&self.document, "td", "")?;
        td.set_attribute("colspan", &span.to_string())
            .map_err(js_error)?;
        match overlay {
            Overlay::Empty { text, .. } => td.set_text_content(Some(text)),
            Overlay::Busy { lines, .. } => {
                for _ in 0..*lines {
                    let line = create(&self.document, "div", "gv-skeleton")?;
                    td.append_child(&line).map_err(js_error)?;
                }
            }
            Overlay::None | Overlay::Error { .. } => {}
        }
        tr.append_child(&td).map_err(js_error)?;
        Ok(Some(tr))
    }

    fn paint_sizing(&self, sizing: &TableSizing) -> Result<()> {
        self.colgroup.set_inner_html("");
        match sizing {
            TableSizing::Auto => {
                set_style(&self.table, "table-layout", "auto");
                set_style(&self.table, "width", "max-content");
                set_style(&self.table, "min-width", "100%");
            }
            TableSizing::Fixed(widths) => {
                set_style(&self.table, "table-layout", "fixed");
                set_style(&self.table, "width", "100%");
                for width in widths {
                    let col = create_html(&self.document, "col", "")?;
                    if let Some(width) = width {
                        set_style(&col, "width", width);
                    }
                    self.colgroup.append_child(&col).map_err(js_error)?;
                }
            }
        }
        Ok(())
    }

    fn build_paging(&self, bar: &PagingBar) -> Result<()> {
        self.paging.set_inner_html("");

        let label = create(&self.document, "span", "gv-page-size-label")?;
        label.set_text_content(Some(&bar.label));
        self.paging.append_child(&label).map_err(js_error)?;

        let select = create(&self.document, "select", "gv-page-size")?;
        select.set_attribute("data-page-size", "").map_err(js_error)?;
        for size in &bar.page_sizes {
            let option = create(&self.document, "option", "")?;
            let text = size.to_string();
            option.set_attribute("value", &text).map_err(js_error)?;
            option.set_text_content(Some(&text));
            if *size == bar.page_row {
                option.set_attribute("selected", "").map_err(js_error)?;
            }
            select.append_child(&option).map_err(js_error)?;
        }
        self.paging.append_child(&select).map_err(js_error)?;

        let indicator = create(&self.document, "span", "gv-page-indicator")?;
        indicator.set_text_content(Some(&bar.indicator()));
        self.paging.append_child(&indicator).map_err(js_error)?;

        for (direction, text, enabled) in [
            ("prev", "\u{2039}", bar.previous_enabled),
            ("next", "\u{203a}", bar.next_enabled),
        ] {
            let button = create(&self.document, "button", "gv-page-button")?;
            button.set_attribute("type", "button").map_err(js_error)?;
            button.set_attribute("data-page", direction).map_err(js_error)?;
            button.set_text_content(Some(text));
            if !enabled {
                button.set_attribute("disabled", "").map_err(js_error)?;
            }
            self.paging.append_child(&button).map_err(js_error)?;
        }
        Ok(())
    }
}

fn apply_row_style(tr: &Element, style: &RowStyle) {
    match style {
        RowStyle::Classes(classes) => {
            for class in classes.split_whitespace() {
                let _ = tr.class_list().add_1(class);
            }
        }
        RowStyle::Inline(properties) => {
            if let Some(tr) = tr.dyn_ref::<HtmlElement>() {
                for (property, value) in properties {
                    set_style(tr, property, value);
                }
            }
        }
    }
}

impl Surface for DomSurface {
    fn paint_header(&mut self, header: &HeaderLayout, sizing: &TableSizing) -> Result<()> {
        self.paint_sizing(sizing)?;
        self.thead.set_inner_html("");
        for header_row in &header.rows {
            let tr = create(&self.document, "tr", "")?;
            for cell in header_row {
                let th = cells::build_header_cell(&self.document, cell)?;
                tr.append_child(&th).map_err(js_error)?;
            }
            self.thead.append_child(&tr).map_err(js_error)?;
        }
        Ok(())
    }

    fn paint_body(&mut self, rows: &[BodyRow]) -> Result<()> {
        for tr in self.data_rows() {
            tr.remove();
        }
        let anchor: Option<&web_sys::Node> = self.overlay_row.as_ref().map(AsRef::as_ref);
        for row in rows {
            let tr = self.build_row(row)?;
            self.tbody.insert_before(&tr, anchor).map_err(js_error)?;
        }
        Ok(())
    }

    fn insert_rows(&mut self, edge: Edge, rows: &[BodyRow]) -> Result<()> {
        let anchor: Option<web_sys::Node> = match edge {
            Edge::Start => self.tbody.first_child(),
            Edge::End => self.overlay_row.clone().map(Into::into),
        };
        for row in rows {
            let tr = self.build_row(row)?;
            self.tbody
                .insert_before(&tr, anchor.as_ref())
                .map_err(js_error)?;
        }
        Ok(())
    }

    fn remove_row(&mut self, index: usize) -> Result<()> {
        let row = self
            .data_rows()
            .into_iter()
            .nth(index)
            .ok_or_else(|| GridError::Render(format!("no rendered row at {index}")))?;
        row.remove();
        Ok(())
    }

    fn paint_overlay(&mut self, overlay: &Overlay) -> Result<()> {
        if let Some(previous) = self.overlay_row.take() {
            previous.remove();
        }
        match overlay {
            Overlay::Error { message } => {
                self.banner.set_text_content(Some(message));
                set_style(&self.banner, "display", "block");
            }
            Overlay::None | Overlay::Empty { .. } | Overlay::Busy { .. } => {
                self.banner.set_text_content(None);
                set_style(&self.banner, "display", "none");
            }
        }
        if let Some(tr) = self.build_overlay_row(overlay)? {
            self.tbody.append_child(&tr).map_err(js_error)?;
            self.overlay_row = Some(tr);
        }
        Ok(())
    }

    fn paint_paging(&mut self, bar: Option<&PagingBar>) -> Result<()> {
        match bar {
            Some(bar) => {
                self.build_paging(bar)?;
                set_style(&self.paging, "display", "flex");
            }
            None => set_style(&self.paging, "display", "none"),
        }
        Ok(())
    }

    fn attach_scroll_observer(&mut self) -> Result<()> {
        self.detach_scroll_observer();
        let Some(sink) = self.sink.as_ref().map(Rc::clone) else {
            log::warn!("scroll observer requested without a host sink");
            return Ok(());
        };
        let region = self.scroll_region.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            sink(HostEvent::Scroll(events::scroll_metrics(&region)));
        }) as Box<dyn FnMut(Event)>);
        self.scroll_region
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.scroll_closure = Some(closure);
        Ok(())
    }

    fn detach_scroll_observer(&mut self) {
        if let Some(closure) = self.scroll_closure.take() {
            let _ = self
                .scroll_region
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.detach_scroll_observer();
        self.detach_interaction();
    }
}
