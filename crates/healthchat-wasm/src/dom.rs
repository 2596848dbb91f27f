use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// Get element by ID
pub fn get_element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element not found: {}", id)))
}

/// Get HTML element by ID
pub fn get_html_element_by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    get_element_by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("Element is not HtmlElement: {}", id)))
}

/// Get input element by ID
pub fn get_input_by_id(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    get_element_by_id(document, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("Element is not HtmlInputElement: {}", id)))
}

/// Get textarea element by ID
pub fn get_textarea_by_id(document: &Document, id: &str) -> Result<HtmlTextAreaElement, JsValue> {
    get_element_by_id(document, id)?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| JsValue::from_str(&format!("Element is not HtmlTextAreaElement: {}", id)))
}

pub fn get_button_by_id(document: &Document, id: &str) -> Result<HtmlButtonElement, JsValue> {
    get_element_by_id(document, id)?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| JsValue::from_str(&format!("Element is not HtmlButtonElement: {}", id)))
}

/// Create element with class
pub fn create_element_with_class(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Add an event listener that lives as long as the page
pub fn add_listener<F>(target: &Element, event: &str, callback: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Keep the closure alive
    Ok(())
}

pub fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = element.style().set_property("display", display);
}

/// Clear element content
pub fn clear_element(element: &Element) {
    element.set_inner_html("");
}

/// Scroll element to bottom
pub fn scroll_to_bottom(element: &Element) {
    if let Ok(html_element) = element.clone().dyn_into::<HtmlElement>() {
        html_element.set_scroll_top(html_element.scroll_height());
    }
}
