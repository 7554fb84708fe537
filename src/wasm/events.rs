use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::js_error;
use crate::input::InputState;

pub fn viewport(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    (width.unwrap_or(0.0), height.unwrap_or(0.0))
}

/// Publishes resize, pointer and scroll events into `input`.
///
/// The canvas backing store follows the viewport; the animator notices the
/// new size on its next frame.
pub fn bind_window(
    window: &Window,
    canvas: &HtmlCanvasElement,
    input: Rc<RefCell<InputState>>,
) -> anyhow::Result<()> {
    let on_resize = {
        let window = window.clone();
        let canvas = canvas.clone();
        let input = input.clone();
        Closure::wrap(Box::new(move || {
            let (w, h) = viewport(&window);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            input.borrow_mut().resized(w, h);
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_resize.forget();

    let on_pointer = {
        let input = input.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            input
                .borrow_mut()
                .pointer_moved(e.client_x() as f64, e.client_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window
        .add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_pointer.forget();

    let on_scroll = {
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            if let Ok(y) = window.scroll_y() {
                input.borrow_mut().scrolled(y);
            }
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_scroll.forget();

    Ok(())
}
