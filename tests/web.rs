#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use page_fx::config::{SiteConfig, Variant, WireframeConfig};
use page_fx::wireframe::WireframeProjector;
use page_fx::{build_variant, AnimationVariant, Animator, CanvasSurface, FrameLoop, InputState, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;

fn canvas(width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn run_frames(variant: Variant) -> CanvasSurface {
    let config = SiteConfig {
        variant,
        ..SiteConfig::default()
    };
    let (w, h) = (f64::from(WIDTH), f64::from(HEIGHT));
    let mut surface = CanvasSurface::from_canvas(&canvas(WIDTH, HEIGHT)).unwrap();
    let input = InputState::with_viewport(w, h);
    let v = build_variant(&config, w, h, StdRng::seed_from_u64(5));
    let mut animator = Animator::new(v, w, h);
    for _ in 0..3 {
        animator.frame(&input, &mut surface);
    }
    surface
}

fn alpha_at(pixels: &[u8], x: i64, y: i64) -> u8 {
    if !(0..i64::from(WIDTH)).contains(&x) || !(0..i64::from(HEIGHT)).contains(&y) {
        return 0;
    }
    pixels[((y * i64::from(WIDTH) + x) * 4 + 3) as usize]
}

/// Resolves on the browser's next animation frame.
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Counts ticks and draws nothing.
struct Counter(Rc<Cell<u64>>);

impl AnimationVariant for Counter {
    fn name(&self) -> &'static str {
        "counter"
    }
    fn resize(&mut self, _: f64, _: f64) {}
    fn observe(&mut self, _: &InputState) {}
    fn tick(&mut self) {
        self.0.set(self.0.get() + 1);
    }
    fn render(&self, _: &mut dyn Surface) {}
}

#[wasm_bindgen_test]
fn mesh_frame_restores_global_alpha() {
    let surface = run_frames(Variant::Mesh);
    assert_eq!(surface.global_alpha(), 1.0);
}

#[wasm_bindgen_test]
fn wireframe_inks_every_projected_vertex() {
    let surface = run_frames(Variant::Wireframe);
    assert_eq!(surface.global_alpha(), 1.0);
    let pixels = surface
        .context()
        .get_image_data(0.0, 0.0, f64::from(WIDTH), f64::from(HEIGHT))
        .unwrap()
        .data();

    // No scroll, so the cube is still at rest and matches a fresh projector.
    let projector = WireframeProjector::new(f64::from(WIDTH), f64::from(HEIGHT), WireframeConfig::default());
    for (x, y) in projector.projected() {
        let (x, y) = (x.round() as i64, y.round() as i64);
        let inked = (-1..=1).any(|dy| (-1..=1).any(|dx| alpha_at(&pixels, x + dx, y + dy) > 0));
        assert!(inked, "no ink around vertex ({x}, {y})");
    }
    // Face-on, the anchor sits inside both squares with no edge through it.
    assert_eq!(alpha_at(&pixels, 200, 135), 0);
}

#[wasm_bindgen_test]
async fn stopped_loop_runs_no_further_frames() {
    let ticks = Rc::new(Cell::new(0));
    let (w, h) = (f64::from(WIDTH), f64::from(HEIGHT));
    let animator = Animator::new(Box::new(Counter(ticks.clone())), w, h);
    let surface = CanvasSurface::from_canvas(&canvas(WIDTH, HEIGHT)).unwrap();
    let input = Rc::new(RefCell::new(InputState::with_viewport(w, h)));

    let frame_loop = FrameLoop::start(animator, surface, input).unwrap();
    assert!(frame_loop.is_running());
    next_frame().await;
    next_frame().await;
    assert!(ticks.get() > 0);

    frame_loop.stop();
    assert!(!frame_loop.is_running());
    let stopped_at = ticks.get();
    next_frame().await;
    next_frame().await;
    assert_eq!(ticks.get(), stopped_at);

    // Stopping twice is harmless.
    frame_loop.stop();
}

#[wasm_bindgen_test]
async fn dropping_the_loop_cancels_it() {
    let ticks = Rc::new(Cell::new(0));
    let (w, h) = (f64::from(WIDTH), f64::from(HEIGHT));
    let animator = Animator::new(Box::new(Counter(ticks.clone())), w, h);
    let surface = CanvasSurface::from_canvas(&canvas(WIDTH, HEIGHT)).unwrap();
    let input = Rc::new(RefCell::new(InputState::with_viewport(w, h)));

    drop(FrameLoop::start(animator, surface, input).unwrap());
    next_frame().await;
    next_frame().await;
    assert_eq!(ticks.get(), 0);
}
