//! Translation of DOM events into [`HostEvent`]s.

use super::cells::OWNS_CLICK;
use super::ROW_CLASS;
use crate::grid::{HostEvent, ScrollMetrics};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

/// Data rows of `tbody`, overlay rows excluded.
pub(super) fn data_rows(tbody: &Element) -> Vec<Element> {
    let children = tbody.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|row| row.class_list().contains(ROW_CLASS))
        .collect()
}

/// Position of the data row containing `target`, at the time of the event.
fn row_index(tbody: &Element, target: &Element) -> Option<usize> {
    let row = target.closest(&format!("tr.{ROW_CLASS}")).ok().flatten()?;
    data_rows(tbody).iter().position(|candidate| candidate == &row)
}

fn event_target(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

pub(super) fn click_event(tbody: &Element, event: &Event) -> Option<HostEvent> {
    let target = event_target(event)?;

    if let Some(toggle) = closest(&target, ".gv-reveal") {
        toggle_password(&toggle);
        return None;
    }
    if let Some(button) = closest(&target, "[data-page]") {
        return match button.get_attribute("data-page").as_deref() {
            Some("prev") => Some(HostEvent::PreviousPage),
            Some("next") => Some(HostEvent::NextPage),
            _ => None,
        };
    }

    let index = row_index(tbody, &target)?;
    if let Some(action) = closest(&target, "[data-action]") {
        let action = action.get_attribute("data-action")?;
        return Some(HostEvent::ActionClick { index, action });
    }
    if closest(&target, &format!("[{OWNS_CLICK}]")).is_some() {
        return None;
    }
    Some(HostEvent::RowClick { index })
}

pub(super) fn change_event(tbody: &Element, event: &Event) -> Option<HostEvent> {
    let target = event_target(event)?;

    if target.has_attribute("data-page-size") {
        let select = target.dyn_ref::<HtmlSelectElement>()?;
        return match select.value().parse::<u32>() {
            Ok(size) => Some(HostEvent::PageSizeSelected(size)),
            Err(_) => {
                log::warn!("page size {:?} is not a number", select.value());
                None
            }
        };
    }

    let field = target.get_attribute("data-field")?;
    let index = row_index(tbody, &target)?;
    let raw = control_value(&target)?;
    Some(HostEvent::CellInput { index, field, raw })
}

fn control_value(control: &Element) -> Option<String> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            return Some(input.checked().to_string());
        }
        return Some(input.value());
    }
    if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    control.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

fn toggle_password(toggle: &Element) {
    let Some(input) = toggle
        .parent_element()
        .and_then(|wrapper| wrapper.query_selector("input").ok().flatten())
        .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    if input.disabled() {
        return;
    }
    let revealed = input.type_() == "password";
    input.set_type(if revealed { "text" } else { "password" });
    if let Some(icon) = toggle.first_element_child() {
        let classes = icon.class_list();
        let _ = classes.toggle("gv-eye");
        let _ = classes.toggle("gv-eye-slash");
    }
}

pub(super) fn scroll_metrics(region: &HtmlElement) -> ScrollMetrics {
    ScrollMetrics::new(
        f64::from(region.scroll_top()),
        f64::from(region.scroll_height()),
        f64::from(region.client_height()),
    )
}
