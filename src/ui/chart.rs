/// Monthly visits line chart (Chart.js through a JS bridge)
///
/// The Chart.js instance is an owned resource: `ChartHandle` destroys it on
/// drop, and `ChartSlot` releases the old chart before drawing a new one on
/// the same canvas.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

use crate::format::{format_axis_tick, format_grouped};
use crate::view_model::ChartSeries;

#[wasm_bindgen(module = "/bridge/chart.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn createVisitsChart(
        canvas: &Element,
        data: JsValue,
        tick_formatter: &js_sys::Function,
        tooltip_formatter: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    fn destroyChart(chart: &JsValue);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartDataset<'a> {
    label: &'static str,
    data: &'a [Option<f64>],
    background_color: &'static str,
    border_color: &'static str,
    border_width: u8,
    point_background_color: &'static str,
    tension: f64,
    fill: bool,
}

#[derive(Serialize)]
struct ChartData<'a> {
    labels: &'a [String],
    datasets: [ChartDataset<'a>; 1],
}

impl<'a> ChartData<'a> {
    fn monthly_visits(series: &'a ChartSeries) -> Self {
        ChartData {
            labels: &series.labels,
            datasets: [ChartDataset {
                label: "Monthly Visits",
                data: &series.values,
                background_color: "rgba(54, 162, 235, 0.2)",
                border_color: "rgba(54, 162, 235, 1)",
                border_width: 2,
                point_background_color: "rgba(54, 162, 235, 1)",
                tension: 0.3,
                fill: true,
            }],
        }
    }
}

type Formatter = Closure<dyn Fn(f64) -> String>;

/// A live chart plus the Rust callbacks it calls into
pub struct ChartHandle {
    chart: JsValue,
    // Must outlive the chart
    _tick_formatter: Formatter,
    _tooltip_formatter: Formatter,
}

impl ChartHandle {
    pub fn create(canvas: &Element, series: &ChartSeries) -> Result<ChartHandle, String> {
        let tick_formatter = Closure::wrap(Box::new(format_axis_tick) as Box<dyn Fn(f64) -> String>);
        let tooltip_formatter = Closure::wrap(
            Box::new(|value: f64| format!("Visits: {}", format_grouped(value)))
                as Box<dyn Fn(f64) -> String>,
        );

        let data = ChartData::monthly_visits(series)
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| format!("Failed to serialize chart data: {:?}", e))?;

        let chart = createVisitsChart(
            canvas,
            data,
            tick_formatter.as_ref().unchecked_ref(),
            tooltip_formatter.as_ref().unchecked_ref(),
        )
        .map_err(|e| format!("Failed to create chart: {:?}", e))?;

        Ok(ChartHandle {
            chart,
            _tick_formatter: tick_formatter,
            _tooltip_formatter: tooltip_formatter,
        })
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        destroyChart(&self.chart);
    }
}

/// Holds at most one chart for a canvas
#[derive(Default)]
pub struct ChartSlot {
    current: Option<ChartHandle>,
}

impl ChartSlot {
    /// Destroy the current chart, then draw `series` (nothing for an empty series)
    pub fn replace(&mut self, canvas: &Element, series: &ChartSeries) -> Result<(), String> {
        self.release();
        if series.is_empty() {
            return Ok(());
        }

        self.current = Some(ChartHandle::create(canvas, series)?);
        Ok(())
    }

    pub fn release(&mut self) {
        if self.current.take().is_some() {
            log::debug!("Released visits chart");
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct VisitsChartProps {
    pub series: ChartSeries,
}

#[function_component(VisitsChart)]
pub fn visits_chart(props: &VisitsChartProps) -> Html {
    let canvas_ref = use_node_ref();
    let slot = use_mut_ref(ChartSlot::default);

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.series.clone(), move |series| {
            if let Some(canvas) = canvas_ref.cast::<Element>() {
                if let Err(e) = slot.borrow_mut().replace(&canvas, series) {
                    log::error!("{}", e);
                }
            }
            move || slot.borrow_mut().release()
        });
    }

    html! {
        <div class="chart-container">
            <canvas id="visits-chart" ref={canvas_ref}></canvas>
        </div>
    }
}
