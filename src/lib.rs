//! Decorative behaviour for a static landing page: a canvas backdrop (particle
//! mesh or scroll-driven wireframe cube), a lightbox gallery, smooth anchor
//! scrolling and fade-in of page sections.
//!
//! Everything outside `wasm` is plain Rust and runs under `cargo test` on the
//! host; the browser bindings only compile for `wasm32`.

pub mod animation;
pub mod config;
pub mod gallery;
pub mod input;
pub mod math;
pub mod particles;
pub mod surface;
pub mod wireframe;

pub use animation::{build_variant, AnimationVariant, Animator};
pub use config::{SiteConfig, Variant};
pub use gallery::{GalleryController, GalleryImage, GalleryState, GalleryView, Key};
pub use input::InputState;
pub use surface::{DrawOp, RecordingSurface, Surface};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::anyhow;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::SiteConfig;
    use crate::input::InputState;
    use crate::{build_variant, Animator};

    pub mod canvas;
    mod events;
    mod gallery;
    mod page;
    pub mod render;

    const CONFIG_ELEMENT_ID: &str = "page-fx-config";

    thread_local! {
        // Keeps the running loop reachable so it can be stopped on teardown.
        static FRAME_LOOP: RefCell<Option<render::FrameLoop>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        boot().map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Cancels the backdrop animation. Returns whether a running loop was
    /// stopped, so repeated calls report `false`.
    #[wasm_bindgen(js_name = "stopBackdrop")]
    pub fn stop_backdrop() -> bool {
        FRAME_LOOP.with(|slot| {
            let Some(frame_loop) = slot.borrow_mut().take() else {
                return false;
            };
            let was_running = frame_loop.is_running();
            frame_loop.stop();
            was_running
        })
    }

    fn boot() -> anyhow::Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window.document().ok_or_else(|| anyhow!("no document"))?;
        let config = load_config(&document);

        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| anyhow!("canvas #{} not found", config.canvas_id))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| anyhow!("#{} is not a canvas", config.canvas_id))?;
        let surface = canvas::CanvasSurface::from_canvas(&canvas)?;

        let (width, height) = events::viewport(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let input = Rc::new(RefCell::new(InputState::with_viewport(width, height)));
        events::bind_window(&window, &canvas, input.clone())?;

        let variant = build_variant(&config, width, height, StdRng::from_entropy());
        let animator = Animator::new(variant, width, height);
        let frame_loop = render::FrameLoop::start(animator, surface, input)?;
        FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));

        match gallery::bind(&document, &config.gallery) {
            Ok(count) => log::info!("gallery ready with {count} images"),
            Err(e) => log::warn!("gallery disabled: {e:#}"),
        }
        page::bind_smooth_scroll(&document)?;
        page::bind_section_reveal(&document, &config.reveal)?;
        page::bind_viewport_height(&window, &document)?;

        log::info!("page effects started");
        Ok(())
    }

    /// `JsValue` is not an `Error`, so carry its debug rendering instead.
    fn js_error(value: JsValue) -> anyhow::Error {
        anyhow!("{value:?}")
    }

    fn set_style(el: &web_sys::HtmlElement, property: &str, value: &str) {
        if let Err(e) = el.style().set_property(property, value) {
            log::warn!("could not set {property}: {e:?}");
        }
    }

    fn load_config(document: &web_sys::Document) -> SiteConfig {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return SiteConfig::default();
        };
        SiteConfig::from_json(&text).unwrap_or_else(|e| {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            SiteConfig::default()
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use wasm::render::FrameLoop;
