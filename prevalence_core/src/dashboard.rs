use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, trace};

use crate::comparison::{disorder_comparison, ComparisonView};
use crate::correlation::{correlation_heatmap, CorrelationView};
use crate::dashboard_config::DashboardConfig;
use crate::dataset::Dataset;
use crate::filter::{FilterInputs, FilterState};
use crate::metrics::RecomputeMetrics;
use crate::regional_trends::{regional_trends, RegionalTrendsView};
use crate::summary::{summary_stats, SummaryStats, ViewError};
use crate::table_rows::{table_rows, TableRowsView};
use crate::time_series::{time_series, TimeSeriesView};
use crate::top_countries::{top_countries, TopCountriesView};
use crate::world_map::{world_map, WorldMapView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    WorldMap,
    TimeSeries,
    Comparison,
    TopCountries,
    Correlation,
    RegionalTrends,
    Summary,
    Table,
}

impl ViewKind {
    pub const COUNT: usize = 8;

    pub const ALL: [ViewKind; Self::COUNT] = [
        ViewKind::WorldMap,
        ViewKind::TimeSeries,
        ViewKind::Comparison,
        ViewKind::TopCountries,
        ViewKind::Correlation,
        ViewKind::RegionalTrends,
        ViewKind::Summary,
        ViewKind::Table,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Filter inputs this view reads. A change to any of them recomputes it.
    pub fn inputs(self) -> FilterInputs {
        match self {
            ViewKind::WorldMap => FilterInputs::DISORDER | FilterInputs::YEAR,
            ViewKind::TimeSeries => FilterInputs::COUNTRIES | FilterInputs::DISORDER,
            ViewKind::Comparison => FilterInputs::COUNTRIES | FilterInputs::YEAR,
            ViewKind::TopCountries => FilterInputs::DISORDER | FilterInputs::YEAR,
            ViewKind::Correlation => FilterInputs::YEAR,
            ViewKind::RegionalTrends => FilterInputs::DISORDER,
            ViewKind::Summary => FilterInputs::DISORDER | FilterInputs::YEAR,
            ViewKind::Table => FilterInputs::YEAR | FilterInputs::COUNTRIES,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::WorldMap => "World map",
            ViewKind::TimeSeries => "Time series",
            ViewKind::Comparison => "Disorder comparison",
            ViewKind::TopCountries => "Top 10 countries",
            ViewKind::Correlation => "Correlation",
            ViewKind::RegionalTrends => "Regional trends",
            ViewKind::Summary => "Summary",
            ViewKind::Table => "Data table",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Summary slot: either statistics or a placeholder explaining why there are
/// none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryPanel {
    Ready(SummaryStats),
    NoData { message: String },
}

impl From<Result<SummaryStats, ViewError>> for SummaryPanel {
    fn from(result: Result<SummaryStats, ViewError>) -> Self {
        match result {
            Ok(stats) => SummaryPanel::Ready(stats),
            Err(err) => SummaryPanel::NoData {
                message: err.to_string(),
            },
        }
    }
}

/// The current model of every view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub filter: FilterState,
    pub world_map: WorldMapView,
    pub time_series: TimeSeriesView,
    pub comparison: ComparisonView,
    pub top_countries: TopCountriesView,
    pub correlation: CorrelationView,
    pub regional_trends: RegionalTrendsView,
    pub summary: SummaryPanel,
    pub table: TableRowsView,
}

impl DashboardViews {
    /// Compute every view from scratch.
    pub fn compute(dataset: &Dataset, config: &DashboardConfig, filter: &FilterState) -> Self {
        let policy = config.empty_selection();
        Self {
            filter: filter.clone(),
            world_map: world_map(dataset, filter.disorder, filter.year),
            time_series: time_series(
                dataset,
                filter.countries(),
                filter.disorder,
                policy.time_series(),
            ),
            comparison: disorder_comparison(
                dataset,
                filter.countries(),
                filter.year,
                policy.comparison(),
                config.radial_headroom(),
            ),
            top_countries: top_countries(dataset, filter.disorder, filter.year, config.top_n()),
            correlation: correlation_heatmap(dataset, filter.year),
            regional_trends: regional_trends(dataset, filter.disorder),
            summary: summary_stats(dataset, filter.disorder, filter.year).into(),
            table: table_rows(dataset, filter.year, filter.countries(), policy.table()),
        }
    }

    fn recompute(
        &mut self,
        view: ViewKind,
        dataset: &Dataset,
        config: &DashboardConfig,
        filter: &FilterState,
    ) {
        let policy = config.empty_selection();
        match view {
            ViewKind::WorldMap => {
                self.world_map = world_map(dataset, filter.disorder, filter.year);
            }
            ViewKind::TimeSeries => {
                self.time_series = time_series(
                    dataset,
                    filter.countries(),
                    filter.disorder,
                    policy.time_series(),
                );
            }
            ViewKind::Comparison => {
                self.comparison = disorder_comparison(
                    dataset,
                    filter.countries(),
                    filter.year,
                    policy.comparison(),
                    config.radial_headroom(),
                );
            }
            ViewKind::TopCountries => {
                self.top_countries =
                    top_countries(dataset, filter.disorder, filter.year, config.top_n());
            }
            ViewKind::Correlation => {
                self.correlation = correlation_heatmap(dataset, filter.year);
            }
            ViewKind::RegionalTrends => {
                self.regional_trends = regional_trends(dataset, filter.disorder);
            }
            ViewKind::Summary => {
                self.summary = summary_stats(dataset, filter.disorder, filter.year).into();
            }
            ViewKind::Table => {
                self.table = table_rows(dataset, filter.year, filter.countries(), policy.table());
            }
        }
    }
}

/// Holds the dataset handle, the current filter and the views derived from
/// them.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    config: Arc<DashboardConfig>,
    views: DashboardViews,
    metrics: RecomputeMetrics,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, config: Arc<DashboardConfig>) -> Self {
        let filter = FilterState::initial(&dataset, &config);
        Self::with_filter(dataset, config, filter)
    }

    pub fn with_filter(
        dataset: Arc<Dataset>,
        config: Arc<DashboardConfig>,
        filter: FilterState,
    ) -> Self {
        let started = Instant::now();
        let views = DashboardViews::compute(&dataset, &config, &filter);
        let mut metrics = RecomputeMetrics::default();
        metrics.record(&ViewKind::ALL, started.elapsed());
        debug!(
            year = filter.year,
            disorder = filter.disorder.id(),
            countries = filter.countries().len(),
            elapsed_us = metrics.last_elapsed_us,
            "dashboard.initialised"
        );
        Self {
            dataset,
            config,
            views,
            metrics,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.views.filter
    }

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    pub fn metrics(&self) -> &RecomputeMetrics {
        &self.metrics
    }

    /// Replace the filter and recompute the views that read a changed input.
    /// Returns the recomputed views in [`ViewKind::ALL`] order.
    pub fn apply(&mut self, filter: FilterState) -> Vec<ViewKind> {
        let changed = self.views.filter.diff(&filter);
        if changed.is_empty() {
            trace!("dashboard.unchanged");
            return Vec::new();
        }

        let started = Instant::now();
        let stale: Vec<ViewKind> = ViewKind::ALL
            .into_iter()
            .filter(|view| view.inputs().intersects(changed))
            .collect();
        for view in &stale {
            self.views
                .recompute(*view, &self.dataset, &self.config, &filter);
        }
        self.views.filter = filter;
        self.metrics.record(&stale, started.elapsed());

        debug!(
            changed = ?changed,
            views = stale.len(),
            year = self.views.filter.year,
            disorder = self.views.filter.disorder.id(),
            elapsed_us = self.metrics.last_elapsed_us,
            "dashboard.recomputed"
        );
        stale
    }
}
