//! Canvas 2D render target (WASM only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::commands::RenderTarget;
use crate::sim::{Color, Point};

pub struct CanvasTarget {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasTarget {
    /// Size the canvas and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self, String> {
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("{e:?}"))?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d context")?;

        Ok(Self {
            ctx,
            width: f64::from(width),
            height: f64::from(height),
        })
    }
}

impl RenderTarget for CanvasTarget {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn stroke(&mut self, from: Point, to: Point, color: &Color, dash: Option<&[f64]>) {
        self.ctx.begin_path();

        let pattern = js_sys::Array::new();
        for &d in dash.unwrap_or_default() {
            pattern.push(&JsValue::from_f64(d));
        }
        if let Err(e) = self.ctx.set_line_dash(&pattern) {
            log::warn!("set_line_dash failed: {e:?}");
        }

        self.ctx.move_to(from.x, from.y);
        self.ctx.set_stroke_style_str(color.as_str());
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
