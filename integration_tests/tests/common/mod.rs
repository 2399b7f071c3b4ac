use std::sync::Arc;

use prevalence_core::{Dashboard, DashboardConfig, Dataset, FilterState};

pub const HEADER: &str = "Entity,Code,Year,Schizophrenia (%),Bipolar disorder (%),Eating disorders (%),Anxiety disorders (%),Drug use disorders (%),Depression (%),Alcohol use disorders (%)";

/// Parse `rows` (CSV lines without header) into a dataset.
pub fn dataset_from_rows(rows: &[&str]) -> anyhow::Result<Arc<Dataset>> {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    Ok(Arc::new(Dataset::from_reader(text.as_bytes())?))
}

pub fn dashboard_with(dataset: Arc<Dataset>, filter: FilterState) -> Dashboard {
    Dashboard::with_filter(dataset, DashboardConfig::builtin(), filter)
}

/// Four countries over two years; Japan has no 2018 row.
pub fn two_year_rows() -> Vec<&'static str> {
    vec![
        "France,FRA,2018,0.25,0.93,0.42,6.45,0.82,4.46,1.36",
        "China,CHN,2018,0.31,0.33,0.12,3.08,0.22,3.18,1.79",
        "Kenya,KEN,2018,0.18,0.55,0.10,3.40,0.40,3.90,1.10",
        "World,,2018,0.28,0.60,0.20,3.92,0.96,3.46,1.39",
        "France,FRA,2019,0.25,0.94,0.43,6.50,0.83,4.50,1.35",
        "China,CHN,2019,0.32,0.34,0.13,3.10,0.23,3.20,1.77",
        "Kenya,KEN,2019,0.18,0.56,0.11,3.42,0.41,3.95,1.12",
        "Japan,JPN,2019,0.35,0.45,0.30,4.00,0.30,2.60,0.90",
        "World,,2019,0.28,0.61,0.21,3.95,0.97,3.47,1.38",
    ]
}
