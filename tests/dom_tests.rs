//! DOM surface tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::grid::{Grid, HostEvent, PaginationState};
use gridview::render::DomSurface;
use gridview::types::{ColumnDef, Edge, Row};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn dom_grid() -> (Grid<DomSurface>, Rc<RefCell<Vec<HostEvent>>>) {
    let surface = DomSurface::new(&container()).unwrap();
    let mut grid = Grid::new(surface);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = Rc::clone(&seen);
    grid.surface_mut()
        .set_host_sink(Rc::new(move |event| sink_seen.borrow_mut().push(event)))
        .unwrap();
    grid.set_columns(vec![ColumnDef::new("id", "ID"), ColumnDef::new("name", "Name")]);
    (grid, seen)
}

fn select_all(grid: &Grid<DomSurface>, selector: &str) -> Vec<Element> {
    let list = grid.surface().root().query_selector_all(selector).unwrap();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

#[wasm_bindgen_test]
fn test_rows_and_placeholder_painted() {
    let (mut grid, _) = dom_grid();
    assert_eq!(select_all(&grid, "tr.gv-empty").len(), 1);

    grid.set_rows([
        Row::new().with("id", 1).with("name", "Ann"),
        Row::new().with("id", 2).with("name", "Bo"),
    ]);
    let rows = select_all(&grid, "tbody tr.gv-row");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].text_content().unwrap(), "2Bo");
    assert!(select_all(&grid, "tr.gv-overlay").is_empty());
}

#[wasm_bindgen_test]
fn test_error_banner_replaces_rows() {
    let (mut grid, _) = dom_grid();
    grid.set_rows([Row::new().with("id", 1)]);
    grid.set_error("offline");

    let banner = select_all(&grid, ".gv-error").remove(0);
    assert_eq!(banner.text_content().unwrap(), "offline");
    assert!(select_all(&grid, "tr.gv-row").is_empty());
}

#[wasm_bindgen_test]
fn test_click_index_tracks_prepended_rows() {
    let (mut grid, seen) = dom_grid();
    grid.set_rows([Row::new().with("id", 1)]);
    grid.add_rows([Row::new().with("id", 0)], Edge::Start);

    let rows = select_all(&grid, "tr.gv-row");
    click(&rows[1].first_element_child().unwrap());
    assert_eq!(*seen.borrow(), [HostEvent::RowClick { index: 1 }]);
}

#[wasm_bindgen_test]
fn test_paging_buttons_report_navigation() {
    let (mut grid, seen) = dom_grid();
    grid.set_pagination(PaginationState::new(2, 10, 50, 0));

    let indicator = select_all(&grid, ".gv-page-indicator").remove(0);
    assert_eq!(indicator.text_content().unwrap(), "Page 2 of 5");

    click(&select_all(&grid, "[data-page=next]")[0]);
    click(&select_all(&grid, "[data-page=prev]")[0]);
    assert_eq!(
        *seen.borrow(),
        [HostEvent::NextPage, HostEvent::PreviousPage]
    );
}

#[wasm_bindgen_test]
fn test_infinite_scroll_hides_paging_bar() {
    let (mut grid, _) = dom_grid();
    grid.set_pagination(PaginationState::new(1, 10, 50, 0));
    grid.enable_infinite_scroll(|| {});

    let paging = select_all(&grid, ".gv-paging").remove(0);
    let style = paging.get_attribute("style").unwrap_or_default();
    assert!(style.contains("display: none"), "{style}");

    grid.disable_infinite_scroll();
    let style = paging.get_attribute("style").unwrap_or_default();
    assert!(style.contains("display: flex"), "{style}");
}
