/// Popup UI for Traffic Lens

use std::rc::Rc;

use patternfly_yew::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::LookupError;
use crate::metrics::SiteMetrics;
use crate::relay::{RelayRequest, RelayResponse};
use crate::storage::load_config;
use crate::tab_data::TabInfo;
use crate::ui::chart::VisitsChart;
use crate::ui::components::{
    CountryItem, EmptyNotice, KeywordItem, MetricTile, TrafficSourceBar, TrafficSourceItem,
};
use crate::view_model::{
    NO_COUNTRIES, NO_KEYWORDS, NO_TRAFFIC_SOURCES, PopupState, SiteView, Slot,
};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessage(message: JsValue) -> Result<JsValue, JsValue>;
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);

    // Look up the active tab once on mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let config = load_config().await;
                let outcome = lookup().await;

                match &outcome {
                    Ok((domain, _)) => log::info!("Loaded traffic data for {}", domain),
                    Err(e) => log::warn!("Lookup finished without data: {}", e),
                }

                state.set(PopupState::from_outcome(outcome, &config.display()));
            });
            || ()
        });
    }

    let view_id = state.view_id();

    html! {
        <div class="popup-container">
            <h1 class="popup-title">{"Traffic Lens"}</h1>

            {match &*state {
                PopupState::Loading => html! {
                    <div id={view_id} class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading traffic data..."}</p>
                    </div>
                },
                PopupState::Error(err) => html! {
                    <div id={view_id} class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Unable to load website data"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::NoData => html! {
                    <div id={view_id} class="empty-state">
                        <p>{"No data available for this website."}</p>
                        <p class="empty-state-hint">{"Small or new sites are often not ranked."}</p>
                    </div>
                },
                PopupState::Data(view) => html! {
                    <DataView view={view.clone()} />
                },
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DataViewProps {
    view: Rc<SiteView>,
}

#[function_component(DataView)]
fn data_view(props: &DataViewProps) -> Html {
    let view = &props.view;
    let tile = |slot: Slot, label: &'static str| {
        html! { <MetricTile id={slot.id()} {label} value={view.slot_text(slot)} /> }
    };

    html! {
        <div id="data-view">
            <div class="site-header">
                <h2 id={Slot::SiteName.id()} class="site-name">{&view.site_name}</h2>
                <p id={Slot::SiteDescription.id()} class="site-description">{&view.description}</p>
            </div>

            <div class="metric-grid">
                {tile(Slot::GlobalRank, "Global Rank")}
                {tile(Slot::CountryRank, "Country Rank")}
                {tile(Slot::CategoryRank, "Category Rank")}
            </div>

            <div class="metric-grid">
                <div class="metric-tile">
                    <div class="metric-label">{"Monthly Visits"}</div>
                    <div id={Slot::MonthlyVisits.id()} class="metric-value">{&view.monthly_visits}</div>
                    <TrendBadge view={view.clone()} />
                </div>
                {tile(Slot::TotalVisits, "Total Visits")}
            </div>

            <div class="metric-grid">
                {tile(Slot::BounceRate, "Bounce Rate")}
                {tile(Slot::PagesPerVisit, "Pages / Visit")}
                {tile(Slot::AvgDuration, "Avg. Duration")}
            </div>

            <h3 class="section-title">{"Visits Over Time"}</h3>
            <VisitsChart series={view.chart.clone()} />

            <h3 class="section-title">{"Traffic Sources"}</h3>
            <div id="traffic-sources-overview">
                if view.traffic_sources.is_empty() {
                    <EmptyNotice message={NO_TRAFFIC_SOURCES} />
                } else {
                    {for view.traffic_sources.iter().map(|row| html! {
                        <TrafficSourceBar row={row.clone()} />
                    })}
                }
            </div>
            <div id="traffic-sources-detailed" class="list-group">
                if view.traffic_sources.is_empty() {
                    <EmptyNotice message={NO_TRAFFIC_SOURCES} class={classes!("list-group-item")} />
                } else {
                    {for view.traffic_sources.iter().map(|row| html! {
                        <TrafficSourceItem row={row.clone()} />
                    })}
                }
            </div>

            <h3 class="section-title">{"Top Countries"}</h3>
            <div id="top-countries">
                if view.top_countries.is_empty() {
                    <EmptyNotice message={NO_COUNTRIES} />
                } else {
                    {for view.top_countries.iter().map(|row| html! {
                        <CountryItem row={row.clone()} />
                    })}
                }
            </div>

            <h3 class="section-title">{"Top Keywords"}</h3>
            <div id="top-keywords">
                if view.top_keywords.is_empty() {
                    <EmptyNotice message={NO_KEYWORDS} />
                } else {
                    {for view.top_keywords.iter().map(|row| html! {
                        <KeywordItem row={row.clone()} />
                    })}
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TrendBadgeProps {
    view: Rc<SiteView>,
}

/// Month-over-month indicator; empty when there is no meaningful trend
#[function_component(TrendBadge)]
fn trend_badge(props: &TrendBadgeProps) -> Html {
    match &props.view.trend {
        Some(trend) => html! {
            <div id={Slot::VisitsTrend.id()} class={trend.css_class()}>
                if let Some(icon) = trend.icon_class() {
                    <i class={icon}></i>{" "}
                }
                {trend.text()}
            </div>
        },
        None => html! { <div id={Slot::VisitsTrend.id()} class="small"></div> },
    }
}

// Helper functions

/// Tab lookup, relay round trip, payload check; in that order
async fn lookup() -> Result<(String, SiteMetrics), LookupError> {
    let tab = get_active_tab().await?;
    let domain = tab.domain()?;
    log::info!("Looking up {}", domain);

    let response = send_request(&RelayRequest::fetch_data(domain.clone())).await?;
    let metrics = response.into_metrics()?;

    Ok((domain, metrics))
}

async fn get_active_tab() -> Result<TabInfo, LookupError> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| LookupError::TabResolution(format!("Failed to query tabs: {:?}", e)))?;

    if tab_js.is_null() || tab_js.is_undefined() {
        return Err(LookupError::TabResolution("No active tab found".to_string()));
    }

    serde_wasm_bindgen::from_value(tab_js)
        .map_err(|e| LookupError::TabResolution(format!("Failed to parse tab: {:?}", e)))
}

async fn send_request(request: &RelayRequest) -> Result<RelayResponse, LookupError> {
    let message = request
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| LookupError::Transport(format!("Failed to serialize: {:?}", e)))?;

    let response_js = sendMessage(message)
        .await
        .map_err(|e| LookupError::Transport(format!("Message failed: {:?}", e)))?;

    if response_js.is_null() || response_js.is_undefined() {
        return Err(LookupError::Transport("No response from background".to_string()));
    }

    serde_wasm_bindgen::from_value(response_js)
        .map_err(|e| LookupError::Transport(format!("Failed to parse response: {:?}", e)))
}
