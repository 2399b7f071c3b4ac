//! Core crate for the mental-health prevalence dashboard.
//!
//! Loads the prevalence table once into an immutable [`Dataset`] and derives
//! every dashboard view from it with pure producer functions. [`Dashboard`]
//! ties the producers to a [`FilterState`] and recomputes only the views whose
//! inputs changed.

mod comparison;
mod correlation;
mod dashboard;
mod dashboard_config;
mod dataset;
mod disorder;
mod filter;
pub mod log_stream;
pub mod metrics;
mod region;
mod regional_trends;
pub mod stats;
mod summary;
mod table_rows;
mod time_series;
mod top_countries;
mod world_map;

#[cfg(test)]
mod test_support;

pub use comparison::{disorder_comparison, ComparisonView, DisorderProfile};
pub use correlation::{correlation_heatmap, CorrelationView};
pub use dashboard::{Dashboard, DashboardViews, SummaryPanel, ViewKind};
pub use dashboard_config::{
    DashboardConfig, DashboardConfigError, EmptySelectionConfig, BUILTIN_DASHBOARD_CONFIG,
};
pub use dataset::{DataLoadError, Dataset, Record};
pub use disorder::{Disorder, UnknownDisorder, DISORDER_COUNT};
pub use filter::{CountryFilter, EmptySelection, FilterInputs, FilterState};
pub use metrics::RecomputeMetrics;
pub use region::{region_of, Region};
pub use regional_trends::{regional_trends, RegionSeries, RegionalTrendsView};
pub use summary::{summary_stats, Extreme, SummaryStats, ViewError};
pub use table_rows::{table_rows, SortOrder, TableColumn, TablePage, TableQuery, TableRowsView};
pub use time_series::{time_series, CountrySeries, TimeSeriesView};
pub use top_countries::{top_countries, RankedCountry, TopCountriesView};
pub use world_map::{world_map, MapEntry, WorldMapView};
