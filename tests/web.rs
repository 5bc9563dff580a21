//! Browser tests for the wasm exports. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use traffic_lens::ui::chart::ChartSlot;
use traffic_lens::view_model::ChartSeries;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn extract_domain_strips_www() {
    assert_eq!(traffic_lens::extract_domain("https://www.example.com/page"), "example.com");
}

#[wasm_bindgen_test]
fn extract_domain_reports_invalid() {
    assert_eq!(traffic_lens::extract_domain("about:blank"), "invalid");
}

#[wasm_bindgen_test]
async fn handle_message_rejects_unknown_action() {
    let request = js_sys::Object::new();
    js_sys::Reflect::set(&request, &"action".into(), &"togglePopup".into()).unwrap();

    let response = traffic_lens::handle_message(JsValue::from(request)).await;

    let success = js_sys::Reflect::get(&response, &"success".into()).unwrap();
    let error = js_sys::Reflect::get(&response, &"error".into()).unwrap();
    assert_eq!(success.as_bool(), Some(false));
    assert_eq!(error.as_string().as_deref(), Some("Unknown action"));
}

/// Replace the global `Chart` with a counter so no real chart is drawn
fn install_chart_counter() {
    js_sys::eval(
        "globalThis.chartCounts = { created: 0, destroyed: 0 };
         globalThis.Chart = class {
             constructor(ctx, config) { globalThis.chartCounts.created += 1; this.config = config; }
             destroy() { globalThis.chartCounts.destroyed += 1; }
         };",
    )
    .unwrap();
}

/// (created, destroyed)
fn chart_counts() -> (u32, u32) {
    let read = |field: &str| {
        js_sys::eval(&format!("globalThis.chartCounts.{}", field))
            .unwrap()
            .as_f64()
            .unwrap() as u32
    };
    (read("created"), read("destroyed"))
}

fn canvas() -> Element {
    js_sys::eval("document.createElement('canvas')")
        .unwrap()
        .unchecked_into::<Element>()
}

fn series(values: &[f64]) -> ChartSeries {
    ChartSeries {
        labels: (1..=values.len()).map(|m| format!("Month {}", m)).collect(),
        values: values.iter().copied().map(Some).collect(),
    }
}

#[wasm_bindgen_test]
fn chart_slot_destroys_previous_chart_before_redrawing() {
    install_chart_counter();
    let canvas = canvas();
    let mut slot = ChartSlot::default();

    slot.replace(&canvas, &series(&[100.0, 150.0])).unwrap();
    assert_eq!(chart_counts(), (1, 0));

    slot.replace(&canvas, &series(&[120.0, 90.0])).unwrap();
    assert_eq!(chart_counts(), (2, 1));

    slot.release();
    assert_eq!(chart_counts(), (2, 2));

    slot.release();
    assert_eq!(chart_counts(), (2, 2));
}

#[wasm_bindgen_test]
fn chart_slot_draws_nothing_for_empty_series() {
    install_chart_counter();
    let canvas = canvas();
    let mut slot = ChartSlot::default();

    slot.replace(&canvas, &ChartSeries::default()).unwrap();
    assert_eq!(chart_counts(), (0, 0));

    slot.replace(&canvas, &series(&[100.0])).unwrap();
    slot.replace(&canvas, &ChartSeries::default()).unwrap();
    assert_eq!(chart_counts(), (1, 1));

    slot.release();
    assert_eq!(chart_counts(), (1, 1));
}

#[wasm_bindgen_test]
fn dropping_chart_slot_destroys_chart() {
    install_chart_counter();
    let canvas = canvas();
    let mut slot = ChartSlot::default();

    slot.replace(&canvas, &series(&[100.0, 150.0])).unwrap();
    drop(slot);

    assert_eq!(chart_counts(), (1, 1));
}
