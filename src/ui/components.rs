/// Reusable UI components

use yew::prelude::*;

use crate::view_model::{CountryRow, KeywordRow, TrafficSourceRow};

#[derive(Properties, PartialEq)]
pub struct MetricTileProps {
    /// Element id of the value slot
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[function_component(MetricTile)]
pub fn metric_tile(props: &MetricTileProps) -> Html {
    html! {
        <div class="metric-tile">
            <div class="metric-label">{props.label}</div>
            <div id={props.id} class="metric-value">{&props.value}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrafficSourceBarProps {
    pub row: TrafficSourceRow,
}

#[function_component(TrafficSourceBar)]
pub fn traffic_source_bar(props: &TrafficSourceBarProps) -> Html {
    let row = &props.row;

    html! {
        <div class="traffic-source-item">
            <div class="traffic-source-label">
                <span>{row.category.label}</span>
                <span>{&row.share_text}</span>
            </div>
            <div class="traffic-source-bar">
                <div
                    class="traffic-source-fill"
                    style={format!("width: {}; background-color: {};", row.bar_width, row.category.color)}
                ></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrafficSourceItemProps {
    pub row: TrafficSourceRow,
}

#[function_component(TrafficSourceItem)]
pub fn traffic_source_item(props: &TrafficSourceItemProps) -> Html {
    let row = &props.row;

    html! {
        <div class="list-group-item d-flex justify-content-between align-items-center">
            <div class="d-flex align-items-center">
                <i class={classes!(row.category.icon, "me-2")}></i>
                <span>{row.category.label}</span>
            </div>
            <span class="badge bg-primary rounded-pill">{&row.share_text}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountryItemProps {
    pub row: CountryRow,
}

#[function_component(CountryItem)]
pub fn country_item(props: &CountryItemProps) -> Html {
    let row = &props.row;

    html! {
        <div class="country-item">
            <img src={row.flag_url.clone()} alt={row.code.clone()} class="country-flag" />
            <div class="country-name">{&row.code}</div>
            <div class="country-share">{&row.share_text}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct KeywordItemProps {
    pub row: KeywordRow,
}

#[function_component(KeywordItem)]
pub fn keyword_item(props: &KeywordItemProps) -> Html {
    let row = &props.row;

    html! {
        <div class="keyword-item">
            <div class="keyword-name">{&row.name}</div>
            <div class="keyword-stats">
                <span class="keyword-volume">{&row.volume_text}</span>
                <span class="keyword-value">{&row.value_text}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyNoticeProps {
    pub message: &'static str,
    #[prop_or_default]
    pub class: Classes,
}

/// Placeholder shown instead of an empty list container
#[function_component(EmptyNotice)]
pub fn empty_notice(props: &EmptyNoticeProps) -> Html {
    html! {
        <div class={classes!(props.class.clone(), "text-muted", "text-center")}>
            {props.message}
        </div>
    }
}
