//! Chart Component
//!
//! Dose line chart using HTML5 Canvas. Points are evenly spaced, oldest
//! first; the y-axis starts at zero.

use leptos::*;
use medfiles::view::DoseChart;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const SERIES_COLOR: &str = "#2563eb"; // blue-600
const GRID_COLOR: &str = "#e5e7eb"; // gray-200
const LABEL_COLOR: &str = "#6b7280"; // gray-500

/// Dose chart component
#[component]
pub fn DoseChartCanvas(chart: DoseChart) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let series_label = chart.series_label;

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &chart);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 rounded-lg"
            />

            // Legend
            <div class="flex justify-center mt-3">
                <div class="flex items-center space-x-2">
                    <div
                        class="w-3 h-3 rounded-full"
                        style=format!("background-color: {}", SERIES_COLOR)
                    />
                    <span class="text-sm text-gray-600">{series_label}</span>
                </div>
            </div>
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, chart: &DoseChart) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 30.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if chart.points.is_empty() {
        return;
    }

    // Zero-based y range with headroom
    let y_max = (chart.max_value().max(1) as f64) * 1.1;
    let to_y = |value: i64| margin_top + (1.0 - value as f64 / y_max) * chart_height;

    let step = if chart.points.len() > 1 {
        chart_width / (chart.points.len() - 1) as f64
    } else {
        0.0
    };
    let to_x = |idx: usize| {
        if chart.points.len() > 1 {
            margin_left + idx as f64 * step
        } else {
            margin_left + chart_width / 2.0
        }
    };

    // Horizontal grid lines (5 lines)
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_max;
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Series line
    ctx.set_stroke_style(&SERIES_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in chart.points.iter().enumerate() {
        let (x, y) = (to_x(i), to_y(point.value));
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Points and x-axis labels
    for (i, point) in chart.points.iter().enumerate() {
        let (x, y) = (to_x(i), to_y(point.value));
        ctx.set_fill_style(&SERIES_COLOR.into());
        ctx.begin_path();
        let _ = ctx.arc(x, y, 4.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&point.label, x - 30.0, height - 12.0);
    }
}
