use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent, TouchEvent,
};

use super::{js_error, set_style};
use crate::config::GalleryConfig;
use crate::gallery::{GalleryController, GalleryImage, GalleryView, Key};

type Shared = Rc<RefCell<GalleryController<DomGalleryView>>>;

/// Lightbox overlay elements from the host page.
pub struct DomGalleryView {
    body: Option<HtmlElement>,
    overlay: HtmlElement,
    image: HtmlImageElement,
    caption: HtmlElement,
}

/// Pins the caption to the bottom edge of the image as currently laid out.
fn anchor_caption(image: &HtmlImageElement, caption: &HtmlElement) {
    let top = image.offset_top() + image.offset_height();
    set_style(caption, "top", &format!("{top}px"));
}

impl GalleryView for DomGalleryView {
    fn show(&mut self) {
        set_style(&self.overlay, "display", "flex");
        if let Some(body) = &self.body {
            set_style(body, "overflow", "hidden");
        }
    }

    fn hide(&mut self) {
        set_style(&self.overlay, "display", "none");
        if let Some(body) = &self.body {
            set_style(body, "overflow", "");
        }
    }

    fn display(&mut self, image: &GalleryImage) {
        self.image.set_src(&image.src);
        self.image.set_alt(&image.label);
        self.caption.set_text_content(Some(image.label.as_str()));
        // Anything not yet decoded is anchored by the `load` listener instead.
        if self.image.complete() && self.image.natural_height() > 0 {
            self.place_caption();
        }
    }

    fn place_caption(&mut self) {
        anchor_caption(&self.image, &self.caption);
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("#{id} not found"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("#{id} has an unexpected element type"))
}

fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn thumbnails(document: &Document, selector: &str) -> anyhow::Result<Vec<(Element, GalleryImage)>> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    let mut found = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(src) = el.get_attribute("data-full").or_else(|| el.get_attribute("src")) else {
            log::warn!("thumbnail {i} has no image source; skipped");
            continue;
        };
        let label = el.get_attribute("alt").unwrap_or_default();
        found.push((el, GalleryImage::new(src, label)));
    }
    Ok(found)
}

/// Wires the lightbox into the page. Returns the number of images found.
pub fn bind(document: &Document, config: &GalleryConfig) -> anyhow::Result<usize> {
    let overlay: HtmlElement = element_by_id(document, &config.overlay_id)?;
    let image: HtmlImageElement = element_by_id(document, &config.image_id)?;
    let caption: HtmlElement = element_by_id(document, &config.caption_id)?;
    let close: HtmlElement = element_by_id(document, &config.close_id)?;

    let thumbs = thumbnails(document, &config.thumbnail_selector)?;
    let count = thumbs.len();
    let (elements, images): (Vec<_>, Vec<_>) = thumbs.into_iter().unzip();

    let view = DomGalleryView {
        body: document.body(),
        overlay: overlay.clone(),
        image: image.clone(),
        caption: caption.clone(),
    };
    let controller: Shared = Rc::new(RefCell::new(GalleryController::new(
        images,
        config.swipe_threshold,
        view,
    )));

    for (index, el) in elements.iter().enumerate() {
        let controller = controller.clone();
        listen(el, "click", move |_: MouseEvent| controller.borrow_mut().open(index))?;
    }

    {
        let image_for_rect = image.clone();
        let controller = controller.clone();
        listen(&image, "click", move |e: MouseEvent| {
            e.stop_propagation();
            let rect = image_for_rect.get_bounding_client_rect();
            controller
                .borrow_mut()
                .on_image_click(e.client_x() as f64, rect.left(), rect.width());
        })?;
    }

    {
        let (image_for_load, caption) = (image.clone(), caption.clone());
        listen(&image, "load", move |_: Event| anchor_caption(&image_for_load, &caption))?;
    }

    {
        let controller = controller.clone();
        listen(&close, "click", move |e: MouseEvent| {
            e.stop_propagation();
            controller.borrow_mut().close();
        })?;
    }

    {
        let controller = controller.clone();
        let backdrop = overlay.clone();
        listen(&overlay, "click", move |e: MouseEvent| {
            let on_backdrop = e
                .target()
                .map_or(false, |t| js_sys::Object::is(t.as_ref(), backdrop.as_ref()));
            if on_backdrop {
                controller.borrow_mut().close();
            }
        })?;
    }

    {
        let controller = controller.clone();
        listen(document, "keydown", move |e: KeyboardEvent| {
            if let Some(key) = Key::from_name(&e.key()) {
                controller.borrow_mut().on_key(key);
            }
        })?;
    }

    {
        let controller = controller.clone();
        listen(&overlay, "touchstart", move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                controller.borrow_mut().on_touch_start(touch.client_x() as f64);
            }
        })?;
    }

    {
        let controller = controller.clone();
        listen(&overlay, "touchend", move |e: TouchEvent| {
            if let Some(touch) = e.changed_touches().get(0) {
                controller.borrow_mut().on_touch_end(touch.client_x() as f64);
            }
        })?;
    }

    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    listen(&window, "resize", move |_: Event| controller.borrow_mut().on_resize())?;

    Ok(count)
}
