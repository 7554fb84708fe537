use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use super::{js_error, set_style};
use crate::config::RevealConfig;

fn each_element(document: &Document, selector: &str, mut f: impl FnMut(Element)) -> anyhow::Result<()> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(el);
        }
    }
    Ok(())
}

/// Element an in-page `href` points at, if any.
fn resolve_anchor(document: &Document, href: &str) -> Option<Element> {
    document.query_selector(href).ok().flatten()
}

/// Intercepts in-page anchor clicks and scrolls the target into view smoothly.
pub fn bind_smooth_scroll(document: &Document) -> anyhow::Result<usize> {
    let mut bound = 0;
    let mut result = Ok(());
    each_element(document, r##"a[href^="#"]"##, |anchor| {
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            // A bare "#" is not a valid selector; unknown targets stay put.
            let Some(target) = resolve_anchor(&document, &href) else {
                return;
            };
            #[allow(deprecated)]
            let options = ScrollIntoViewOptions::new()
                .behavior(ScrollBehavior::Smooth)
                .block(ScrollLogicalPosition::Start)
                .clone();
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }) as Box<dyn FnMut(MouseEvent)>);
        if let Err(e) = anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            result = Err(js_error(e));
        }
        on_click.forget();
        bound += 1;
    })?;
    log::debug!("smooth scroll bound to {bound} anchors");
    result.map(|()| bound)
}

/// Hides every matching section and fades it in on first intersection.
pub fn bind_section_reveal(document: &Document, config: &RevealConfig) -> anyhow::Result<()> {
    let on_intersect = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(section) = entry.target().dyn_into::<HtmlElement>() {
                set_style(&section, "opacity", "1");
                set_style(&section, "transform", "translateY(0)");
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    #[allow(deprecated)]
    let options = IntersectionObserverInit::new()
        .threshold(&JsValue::from_f64(config.threshold))
        .root_margin(&config.root_margin)
        .clone();
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
        .map_err(js_error)?;
    on_intersect.forget();

    let offset = format!("translateY({}px)", config.offset);
    each_element(document, &config.selector, |el| {
        if let Some(section) = el.dyn_ref::<HtmlElement>() {
            set_style(section, "opacity", "0");
            set_style(section, "transform", &offset);
            set_style(section, "transition", &config.transition);
        }
        observer.observe(&el);
    })
}

/// Keeps `--vh` equal to one percent of the real viewport height.
pub fn bind_viewport_height(window: &Window, document: &Document) -> anyhow::Result<()> {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };

    let update = {
        let window = window.clone();
        move || {
            let (_, height) = super::events::viewport(&window);
            set_style(&root, "--vh", &format!("{}px", height * 0.01));
        }
    };
    update();

    let on_resize = Closure::wrap(Box::new(update) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_resize.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::{Event, EventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn click(target: &Element) -> Event {
        #[allow(deprecated)]
        let init = EventInit::new().cancelable(true).clone();
        let event = Event::new_with_event_init_dict("click", &init).unwrap();
        target.dispatch_event(&event).unwrap();
        event
    }

    #[wasm_bindgen_test]
    fn unresolved_anchor_still_suppresses_the_jump() {
        let document = web_sys::window().unwrap().document().unwrap();
        let anchor = document.create_element("a").unwrap();
        anchor.set_attribute("href", "#no-such-section").unwrap();
        document.body().unwrap().append_child(&anchor).unwrap();

        assert!(bind_smooth_scroll(&document).unwrap() >= 1);
        assert!(click(&anchor).default_prevented());
    }
}
