/// View-model for the popup
///
/// `SiteView::build` is a pure transform from `SiteMetrics` to display
/// strings, sorted lists and the chart series. The Yew components only read
/// from it.
use std::rc::Rc;

use crate::config::DisplayConfig;
use crate::error::LookupError;
use crate::format::{
    format_duration, format_month_label, format_number, format_percentage, format_rank, to_fixed,
};
use crate::metrics::SiteMetrics;

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_TRAFFIC_SOURCES: &str = "No traffic source data available";
pub const NO_COUNTRIES: &str = "No country data available";
pub const NO_KEYWORDS: &str = "No keyword data available";

/// The four mutually exclusive popup views
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    Loading,
    Error(String),
    NoData,
    Data(Rc<SiteView>),
}

impl PopupState {
    pub fn from_outcome(
        outcome: Result<(String, SiteMetrics), LookupError>,
        display: &DisplayConfig,
    ) -> PopupState {
        match outcome {
            Ok((domain, metrics)) => {
                PopupState::Data(Rc::new(SiteView::build(&metrics, &domain, display)))
            }
            Err(LookupError::NoData) => PopupState::NoData,
            Err(e) => PopupState::Error(e.to_string()),
        }
    }

    /// Element id of the view container this state shows
    pub fn view_id(&self) -> &'static str {
        match self {
            PopupState::Loading => "loading",
            PopupState::Error(_) => "error",
            PopupState::NoData => "no-data",
            PopupState::Data(_) => "data-view",
        }
    }
}

/// Named text slots of the data view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    SiteName,
    SiteDescription,
    GlobalRank,
    CountryRank,
    CategoryRank,
    MonthlyVisits,
    VisitsTrend,
    BounceRate,
    PagesPerVisit,
    AvgDuration,
    TotalVisits,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::SiteName,
        Slot::SiteDescription,
        Slot::GlobalRank,
        Slot::CountryRank,
        Slot::CategoryRank,
        Slot::MonthlyVisits,
        Slot::VisitsTrend,
        Slot::BounceRate,
        Slot::PagesPerVisit,
        Slot::AvgDuration,
        Slot::TotalVisits,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Slot::SiteName => "site-name",
            Slot::SiteDescription => "site-description",
            Slot::GlobalRank => "global-rank",
            Slot::CountryRank => "country-rank",
            Slot::CategoryRank => "category-rank",
            Slot::MonthlyVisits => "monthly-visits",
            Slot::VisitsTrend => "visits-trend",
            Slot::BounceRate => "bounce-rate",
            Slot::PagesPerVisit => "pages-per-visit",
            Slot::AvgDuration => "avg-duration",
            Slot::TotalVisits => "total-visits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Month-over-month change of the two latest months
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub percent: f64,
}

impl Trend {
    /// `None` when there is no meaningful ratio (missing values, previous = 0)
    pub fn between(previous: Option<f64>, latest: Option<f64>) -> Option<Trend> {
        let (previous, latest) = (previous?, latest?);
        if previous == 0.0 {
            return None;
        }

        let percent = (latest - previous) / previous * 100.0;
        if !percent.is_finite() {
            return None;
        }

        let direction = if percent > 0.0 {
            TrendDirection::Up
        } else if percent < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        Some(Trend { direction, percent })
    }

    pub fn text(&self) -> String {
        match self.direction {
            TrendDirection::Flat => "No change".to_string(),
            _ => format!("{}%", to_fixed(self.percent.abs(), 1)),
        }
    }

    /// Icon classes, `None` for no change
    pub fn icon_class(&self) -> Option<&'static str> {
        match self.direction {
            TrendDirection::Up => Some("bi bi-arrow-up trend-up"),
            TrendDirection::Down => Some("bi bi-arrow-down trend-down"),
            TrendDirection::Flat => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.direction {
            TrendDirection::Up => "text-success small",
            TrendDirection::Down => "text-danger small",
            TrendDirection::Flat => "text-muted small",
        }
    }
}

/// One of the six fixed traffic source categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

pub const TRAFFIC_CATEGORIES: [TrafficCategory; 6] = [
    TrafficCategory { key: "Direct", label: "Direct", color: "#4e73df", icon: "bi-link-45deg" },
    TrafficCategory { key: "Search", label: "Search", color: "#1cc88a", icon: "bi-search" },
    TrafficCategory { key: "Social", label: "Social", color: "#36b9cc", icon: "bi-share" },
    TrafficCategory { key: "Referrals", label: "Referrals", color: "#f6c23e", icon: "bi-arrow-return-right" },
    TrafficCategory { key: "Mail", label: "Email", color: "#e74a3b", icon: "bi-envelope" },
    TrafficCategory { key: "Paid Referrals", label: "Paid Ads", color: "#858796", icon: "bi-cash-stack" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSourceRow {
    pub category: TrafficCategory,
    pub share: f64,
    pub share_text: String,
    /// CSS width of the overview bar fill, e.g. "40.0%"
    pub bar_width: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub code: String,
    pub flag_url: String,
    pub share_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRow {
    pub name: String,
    pub volume_text: String,
    pub value_text: String,
}

/// Monthly visits series for the line chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// `None` becomes a gap in the line
    pub values: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything the data view shows, fully formatted
#[derive(Debug, Clone, PartialEq)]
pub struct SiteView {
    pub site_name: String,
    pub description: String,
    pub global_rank: String,
    pub country_rank: String,
    pub category_rank: String,
    pub monthly_visits: String,
    pub trend: Option<Trend>,
    pub bounce_rate: String,
    pub pages_per_visit: String,
    pub avg_duration: String,
    pub total_visits: String,
    pub traffic_sources: Vec<TrafficSourceRow>,
    pub top_countries: Vec<CountryRow>,
    pub top_keywords: Vec<KeywordRow>,
    pub chart: ChartSeries,
}

impl SiteView {
    pub fn build(metrics: &SiteMetrics, fallback_name: &str, display: &DisplayConfig) -> SiteView {
        let months: Vec<(&String, Option<f64>)> = metrics
            .monthly_visits
            .iter()
            .map(|(month, visits)| (month, *visits))
            .collect();

        let latest = months.last().and_then(|(_, v)| *v);
        let trend = match months.as_slice() {
            [.., (_, previous), (_, current)] => Trend::between(*previous, *current),
            _ => None,
        };

        let engagement = &metrics.engagement;

        SiteView {
            site_name: metrics
                .site_name
                .clone()
                .unwrap_or_else(|| fallback_name.to_string()),
            description: metrics
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            global_rank: format_rank(metrics.global_rank),
            country_rank: format_rank(metrics.country_rank),
            category_rank: format_rank(metrics.category_rank),
            monthly_visits: format_number(latest, 0),
            trend,
            bounce_rate: format_percentage(engagement.bounce_rate),
            pages_per_visit: format_number(engagement.pages_per_visit, 2),
            avg_duration: format_duration(engagement.time_on_site),
            total_visits: format_number(engagement.visits, 0),
            traffic_sources: traffic_source_rows(metrics),
            top_countries: country_rows(metrics, display),
            top_keywords: keyword_rows(metrics, display),
            chart: ChartSeries {
                labels: months.iter().map(|(m, _)| format_month_label(m)).collect(),
                values: months.iter().map(|(_, v)| *v).collect(),
            },
        }
    }

    /// Text shown in a named slot; the trend slot is empty without a trend
    pub fn slot_text(&self, slot: Slot) -> String {
        match slot {
            Slot::SiteName => self.site_name.clone(),
            Slot::SiteDescription => self.description.clone(),
            Slot::GlobalRank => self.global_rank.clone(),
            Slot::CountryRank => self.country_rank.clone(),
            Slot::CategoryRank => self.category_rank.clone(),
            Slot::MonthlyVisits => self.monthly_visits.clone(),
            Slot::VisitsTrend => self.trend.as_ref().map(Trend::text).unwrap_or_default(),
            Slot::BounceRate => self.bounce_rate.clone(),
            Slot::PagesPerVisit => self.pages_per_visit.clone(),
            Slot::AvgDuration => self.avg_duration.clone(),
            Slot::TotalVisits => self.total_visits.clone(),
        }
    }
}

fn traffic_source_rows(metrics: &SiteMetrics) -> Vec<TrafficSourceRow> {
    let mut rows: Vec<TrafficSourceRow> = TRAFFIC_CATEGORIES
        .iter()
        .filter_map(|category| {
            let share = metrics
                .traffic_sources
                .get(category.key)
                .copied()
                .flatten()
                .unwrap_or(0.0);
            (share > 0.0).then(|| TrafficSourceRow {
                category: *category,
                share,
                share_text: format_percentage(Some(share)),
                bar_width: format!("{}%", to_fixed(share * 100.0, 1)),
            })
        })
        .collect();

    // Stable: ties keep category order
    rows.sort_by(|a, b| b.share.total_cmp(&a.share));
    rows
}

fn country_rows(metrics: &SiteMetrics, display: &DisplayConfig) -> Vec<CountryRow> {
    let mut countries: Vec<_> = metrics.top_countries.iter().collect();
    countries.sort_by(|a, b| b.share.unwrap_or(0.0).total_cmp(&a.share.unwrap_or(0.0)));

    countries
        .into_iter()
        .take(display.top_countries_limit)
        .map(|country| CountryRow {
            code: country.code.clone(),
            flag_url: format!("{}/{}.png", display.flag_cdn, country.code.to_lowercase()),
            share_text: format_percentage(country.share),
        })
        .collect()
}

fn keyword_rows(metrics: &SiteMetrics, display: &DisplayConfig) -> Vec<KeywordRow> {
    let mut keywords: Vec<_> = metrics.top_keywords.iter().collect();
    keywords.sort_by(|a, b| {
        b.estimated_value
            .unwrap_or(0.0)
            .total_cmp(&a.estimated_value.unwrap_or(0.0))
    });

    keywords
        .into_iter()
        .take(display.top_keywords_limit)
        .map(|keyword| KeywordRow {
            name: keyword.name.clone(),
            volume_text: format!("Volume: {}", format_number(keyword.volume, 0)),
            value_text: format!("Value: ${}", format_number(keyword.estimated_value, 0)),
        })
        .collect()
}
