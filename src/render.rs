use crate::constants::BACKGROUND_STYLE;
use supershape_core::FrameOutput;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Strokes engine outlines onto a 2D canvas context.
pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    pub fn draw(&self, frame: &FrameOutput) {
        let ctx = &self.ctx;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.set_fill_style_str(BACKGROUND_STYLE);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        let m = frame.view.affine();
        _ = ctx.set_transform(
            m.matrix2.x_axis.x,
            m.matrix2.x_axis.y,
            m.matrix2.y_axis.x,
            m.matrix2.y_axis.y,
            m.translation.x,
            m.translation.y,
        );
        for stroke in &frame.strokes {
            let Some((first, rest)) = stroke.points.split_first() else {
                continue;
            };
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            ctx.close_path();
            ctx.set_stroke_style_str(&stroke.color.to_hex());
            ctx.set_line_width(stroke.stroke_width);
            ctx.stroke();
        }
        ctx.restore();
    }
}
