use anyhow::anyhow;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::js_error;
use crate::surface::Surface;

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the 2D context of `canvas`. Fails if the browser refuses one.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| anyhow!("2D canvas context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("unexpected context type"))?;
        Ok(Self { ctx })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

// The setters taking `&JsValue` are deprecated in newer web-sys in favour of
// `_str` variants that older releases lack.
#[allow(deprecated)]
impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // Only fails on a negative radius.
        if let Err(e) = self.ctx.arc(x, y, radius, start, end) {
            log::trace!("arc rejected: {e:?}");
        }
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn global_alpha(&self) -> f64 {
        self.ctx.global_alpha()
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(style));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(style));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }
}
