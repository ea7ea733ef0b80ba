use pulse_core::chart::{BarChartLayout, Rect};
use pulse_core::metrics::RiskBucket;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::colors;

const BAR_RADIUS: f64 = 8.0;

/// Bar outline with rounded top corners, square at the baseline.
fn bar_path(ctx: &CanvasRenderingContext2d, bar: &Rect) {
    let r = BAR_RADIUS.min(bar.w / 2.0).min(bar.h);
    ctx.begin_path();
    ctx.move_to(bar.x, bar.bottom());
    ctx.line_to(bar.x, bar.y + r);
    ctx.quadratic_curve_to(bar.x, bar.y, bar.x + r, bar.y);
    ctx.line_to(bar.right() - r, bar.y);
    ctx.quadratic_curve_to(bar.right(), bar.y, bar.right(), bar.y + r);
    ctx.line_to(bar.right(), bar.bottom());
    ctx.close_path();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, layout: &BarChartLayout) {
    ctx.set_stroke_style_str(colors::GRID);
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0)));
    for tick in &layout.ticks {
        let y = tick.y.round() + 0.5;
        ctx.begin_path();
        ctx.move_to(layout.plot.x, y);
        ctx.line_to(layout.plot.right(), y);
        ctx.stroke();
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_axis_labels(ctx: &CanvasRenderingContext2d, layout: &BarChartLayout, buckets: &[RiskBucket]) {
    ctx.set_fill_style_str(colors::AXIS_TEXT);
    ctx.set_font("12px sans-serif");

    ctx.set_text_align("right");
    ctx.set_text_baseline("middle");
    for tick in &layout.ticks {
        let _ = ctx.fill_text(&tick.value.to_string(), layout.plot.x - 8.0, tick.y);
    }

    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    for (band, bucket) in layout.bands.iter().zip(buckets) {
        let _ = ctx.fill_text(bucket.label, band.x + band.w / 2.0, layout.plot.bottom() + 8.0);
    }
}

/// Draw the risk histogram. `hovered` highlights that bucket's band the way
/// the tooltip cursor does.
pub fn draw_risk_chart(
    ctx: &CanvasRenderingContext2d,
    layout: &BarChartLayout,
    buckets: &[RiskBucket],
    hovered: Option<usize>,
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.set_fill_style_str(colors::PANEL_BG);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    draw_grid(ctx, layout);

    if let Some(band) = hovered.and_then(|i| layout.bands.get(i)) {
        ctx.set_fill_style_str(colors::HOVER_CURSOR);
        ctx.fill_rect(band.x, band.y, band.w, band.h);
    }

    for (bar, bucket) in layout.bars.iter().zip(buckets) {
        if bar.h <= 0.0 {
            continue;
        }
        bar_path(ctx, bar);
        ctx.set_fill_style_str(bucket.color());
        ctx.fill();
    }

    draw_axis_labels(ctx, layout, buckets);
}
