use leptos::prelude::*;
use pulse_core::chart::BarChartLayout;
use pulse_core::metrics::RiskBucket;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use crate::canvas::bar_chart;

/// Size the canvas backing store to its CSS box; returns that size.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
    let rect = canvas.get_bounding_client_rect();
    let display_w = rect.width() as u32;
    let display_h = rect.height() as u32;
    if display_w == 0 || display_h == 0 {
        return None;
    }
    if canvas.width() != display_w || canvas.height() != display_h {
        canvas.set_width(display_w);
        canvas.set_height(display_h);
    }
    Some((display_w as f64, display_h as f64))
}

#[component]
pub fn RiskDistribution(buckets: [RiskBucket; 3]) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let hovered: RwSignal<Option<usize>> = RwSignal::new(None);
    let pointer = RwSignal::new((0.0f64, 0.0f64));
    let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
    let buckets = StoredValue::new(buckets);
    let counts = StoredValue::new(counts);

    Effect::new(move || {
        let hovered = hovered.get();
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let Some((w, h)) = fit_canvas(canvas) else { return };

        let Ok(Some(ctx)) = canvas.get_context("2d") else { return };
        let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else { return };

        let layout = counts.with_value(|c| BarChartLayout::new(w, h, c));
        buckets.with_value(|b| bar_chart::draw_risk_chart(&ctx, &layout, b, hovered, w, h));
    });

    let on_mousemove = move |ev: MouseEvent| {
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
        let layout = counts.with_value(|c| {
            BarChartLayout::new(canvas.width() as f64, canvas.height() as f64, c)
        });
        let hit = layout.hit_test(x, y);
        if hit != hovered.get_untracked() {
            hovered.set(hit);
        }
        pointer.set((x, y));
    };

    let tooltip = move || {
        let index = hovered.get()?;
        let bucket = buckets.with_value(|b| b.get(index).cloned())?;
        let (x, y) = pointer.get();
        Some(view! {
            <div class="chart-tooltip" style=format!("left: {}px; top: {}px", x + 12.0, y + 12.0)>
                <p class="chart-tooltip-label">{bucket.label}</p>
                <p class="chart-tooltip-count">
                    "Count: "<span>{bucket.count}</span>
                </p>
            </div>
        })
    };

    view! {
        <div class="chart-card">
            <h3>"Risk Distribution"</h3>
            <div class="chart-area">
                <canvas
                    node_ref=canvas_ref
                    on:mousemove=on_mousemove
                    on:mouseleave=move |_| hovered.set(None)
                />
                {tooltip}
            </div>
        </div>
    }
}
