use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use thiserror::Error;

use crate::disorder::Disorder;
use crate::filter::EmptySelection;

pub const BUILTIN_DASHBOARD_CONFIG: &str = include_str!("data/dashboard_config.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    data_path: PathBuf,
    default_disorder: Disorder,
    default_countries: Vec<String>,
    table_page_size: usize,
    top_n: usize,
    year_mark_step: u32,
    radial_headroom: f64,
    empty_selection: EmptySelectionConfig,
}

impl DashboardConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_DASHBOARD_CONFIG)
                .expect("builtin dashboard config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, DashboardConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| DashboardConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let config = DashboardConfig::from_json_str(&contents)?;
        Ok(config)
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn default_disorder(&self) -> Disorder {
        self.default_disorder
    }

    pub fn default_countries(&self) -> &[String] {
        &self.default_countries
    }

    pub fn table_page_size(&self) -> usize {
        self.table_page_size.max(1)
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn year_mark_step(&self) -> u32 {
        self.year_mark_step.max(1)
    }

    pub fn radial_headroom(&self) -> f64 {
        if self.radial_headroom.is_finite() && self.radial_headroom > 0.0 {
            self.radial_headroom
        } else {
            1.0
        }
    }

    pub fn empty_selection(&self) -> &EmptySelectionConfig {
        &self.empty_selection
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dataset_imputed.csv"),
            default_disorder: Disorder::Depression,
            default_countries: ["France", "United States", "China", "Brazil", "South Africa"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            table_page_size: 10,
            top_n: 10,
            year_mark_step: 5,
            radial_headroom: 1.1,
            empty_selection: EmptySelectionConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardConfigError {
    #[error("failed to parse dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read dashboard config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-view behaviour for an empty country selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmptySelectionConfig {
    time_series: EmptySelection,
    comparison: EmptySelection,
    table: EmptySelection,
}

impl EmptySelectionConfig {
    pub fn time_series(&self) -> EmptySelection {
        self.time_series
    }

    pub fn comparison(&self) -> EmptySelection {
        self.comparison
    }

    pub fn table(&self) -> EmptySelection {
        self.table
    }
}

impl Default for EmptySelectionConfig {
    fn default() -> Self {
        Self {
            time_series: EmptySelection::Nothing,
            comparison: EmptySelection::Nothing,
            table: EmptySelection::Everything,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = DashboardConfig::builtin();
        assert_eq!(config.default_disorder(), Disorder::Depression);
        assert_eq!(config.default_countries().len(), 5);
        assert_eq!(config.table_page_size(), 10);
        assert_eq!(config.top_n(), 10);
        assert_eq!(config.data_path(), Path::new("dataset_imputed.csv"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "top_n": 3, "empty_selection": { "table": "nothing" } }"#,
        )
        .expect("config parses");
        assert_eq!(config.top_n(), 3);
        assert_eq!(config.year_mark_step(), 5);
        assert_eq!(config.empty_selection().table(), EmptySelection::Nothing);
        assert_eq!(config.empty_selection().time_series(), EmptySelection::Nothing);
        assert_eq!(config.default_countries()[0], "France");
    }

    #[test]
    fn rejects_unknown_disorder() {
        assert!(DashboardConfig::from_json_str(r#"{ "default_disorder": "insomnia" }"#).is_err());
    }

    #[test]
    fn degenerate_values_are_sanitised() {
        let config = DashboardConfig::from_json_str(
            r#"{ "table_page_size": 0, "year_mark_step": 0, "radial_headroom": -2.0 }"#,
        )
        .expect("config parses");
        assert_eq!(config.table_page_size(), 1);
        assert_eq!(config.year_mark_step(), 1);
        assert_eq!(config.radial_headroom(), 1.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.json"))
            .expect_err("file is missing");
        assert!(matches!(err, DashboardConfigError::ReadFailed { .. }));
    }
}
