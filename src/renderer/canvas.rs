//! Canvas 2D backend (WASM only)
//!
//! Executes draw commands on a `CanvasRenderingContext2d`. The reference
//! 800×600 space is mapped onto the canvas' backing size with one transform
//! per frame, so commands never deal with device pixels.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{DrawCommand, Paint, Shape, Stroke, Surface, TextAlign, css};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Draws to a browser canvas
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    title: Option<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        log::info!("Canvas surface {}x{}", canvas.width(), canvas.height());
        Ok(Self {
            canvas,
            ctx,
            title: None,
        })
    }

    /// Attach the title bitmap once it has loaded
    pub fn set_title_image(&mut self, image: HtmlImageElement) {
        self.title = Some(image);
    }

    /// Map the reference space onto the backing store
    fn reset_transform(&self) {
        let sx = self.canvas.width() as f64 / CANVAS_WIDTH as f64;
        let sy = self.canvas.height() as f64 / CANVAS_HEIGHT as f64;
        let _ = self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0);
    }

    fn trace(&self, shape: &Shape) {
        let ctx = &self.ctx;
        ctx.begin_path();

        match shape {
            Shape::Rect(r) => ctx.rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64),
            Shape::Circle { center, radius } => {
                let _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
            }
            Shape::Ellipse {
                center,
                radii,
                rotation,
            } => {
                let _ = ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    *rotation as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
            }
            Shape::Polygon(points) => {
                self.trace_points(points);
                ctx.close_path();
            }
            Shape::Polyline(points) => self.trace_points(points),
        }
    }

    fn trace_points(&self, points: &[Vec2]) {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
    }

    fn apply_paint(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&css(*color)),
            Paint::Linear { from, to, stops } => {
                let gradient = self
                    .ctx
                    .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
                for (offset, color) in stops {
                    if let Err(e) = gradient.add_color_stop(*offset, &css(*color)) {
                        log::warn!("Bad gradient stop: {:?}", e);
                    }
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&css(stroke.color));
        self.ctx.set_line_width(stroke.width as f64);

        let dash = js_sys::Array::new();
        if let Some([on, off]) = stroke.dash {
            dash.push(&JsValue::from_f64(on as f64));
            dash.push(&JsValue::from_f64(off as f64));
        }
        let _ = self.ctx.set_line_dash(&dash);
    }

    fn draw_title(&self, rect: &crate::ui::Rect) {
        let Some(image) = &self.title else {
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
        ) {
            log::warn!("Title image draw failed: {:?}", e);
        }
    }
}

impl Surface for CanvasSurface {
    fn execute(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;

        match command {
            DrawCommand::Clear => {
                let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
                ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
                self.reset_transform();
            }
            DrawCommand::Fill { shape, paint, glow } => {
                if let Some(glow) = glow {
                    ctx.set_shadow_color(&css(glow.color));
                    ctx.set_shadow_blur(glow.blur as f64);
                }
                self.apply_paint(paint);
                self.trace(shape);
                ctx.fill();
                if glow.is_some() {
                    ctx.set_shadow_blur(0.0);
                }
            }
            DrawCommand::Stroke { shape, stroke } => {
                self.apply_stroke(stroke);
                self.trace(shape);
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                pos,
                font,
                color,
                align,
            } => {
                ctx.set_font(&font.css());
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_fill_style_str(&css(*color));
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
            DrawCommand::TitleImage { rect } => self.draw_title(rect),
            DrawCommand::PushTransform {
                translate,
                rotate,
                scale,
            } => {
                ctx.save();
                let _ = ctx.translate(translate.x as f64, translate.y as f64);
                let _ = ctx.rotate(*rotate as f64);
                let _ = ctx.scale(*scale as f64, *scale as f64);
            }
            DrawCommand::PopTransform => ctx.restore(),
        }
    }
}
