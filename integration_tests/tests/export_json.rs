mod common;

use prevalence_core::{Disorder, FilterState};
use serde_json::Value;

#[test]
fn exported_views_have_stable_shape() -> anyhow::Result<()> {
    let dataset = common::dataset_from_rows(&common::two_year_rows())?;
    let dashboard = common::dashboard_with(
        dataset,
        FilterState::new(2019, Disorder::Depression, ["France", "Kenya"]),
    );
    let json = serde_json::to_value(dashboard.views())?;

    assert_eq!(json["filter"]["year"], 2019);
    assert_eq!(json["filter"]["disorder"], "depression");
    assert_eq!(json["summary"]["status"], "ready");
    assert_eq!(json["summary"]["max"]["country"], "France");
    assert_eq!(json["top_countries"]["ranking"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["correlation"]["matrix"][0][0], 1.0);
    assert_eq!(json["world_map"]["entries"][4]["code"], Value::Null);
    Ok(())
}

#[test]
fn undefined_correlations_export_as_null() -> anyhow::Result<()> {
    let dataset = common::dataset_from_rows(&["France,FRA,2019,0.25,0.94,0.43,6.50,0.83,4.5,1.35"])?;
    let dashboard = common::dashboard_with(
        dataset,
        FilterState::new(2019, Disorder::Depression, ["France"]),
    );
    let json = serde_json::to_value(dashboard.views())?;
    let matrix = json["correlation"]["matrix"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("matrix is not an array"))?;
    assert!(matrix
        .iter()
        .flat_map(|row| row.as_array().into_iter().flatten())
        .all(Value::is_null));
    Ok(())
}
