use crate::dataset::{Dataset, Record};
use crate::disorder::{Disorder, DISORDER_COUNT};

/// Record with only the depression metric set to `depression`; the other
/// metrics are fixed non-zero values.
pub fn record(name: &str, code: Option<&str>, year: i32, depression: f64) -> Record {
    let mut metrics = [Some(1.0); DISORDER_COUNT];
    metrics[Disorder::Depression.index()] = Some(depression);
    Record::new(name, code, year, metrics)
}

pub fn full_record(name: &str, code: &str, year: i32, values: [f64; DISORDER_COUNT]) -> Record {
    Record::new(name, Some(code), year, values.map(Some))
}

const SAMPLE_COUNTRIES: [(&str, Option<&str>); 13] = [
    ("France", Some("FRA")),
    ("United States", Some("USA")),
    ("China", Some("CHN")),
    ("Brazil", Some("BRA")),
    ("South Africa", Some("ZAF")),
    ("Peru", Some("PER")),
    ("Chad", Some("TCD")),
    ("Japan", Some("JPN")),
    ("Norway", Some("NOR")),
    ("India", Some("IND")),
    ("Kenya", Some("KEN")),
    ("Mexico", Some("MEX")),
    ("World", None),
];

/// Thirteen countries over 2017..=2019 with varied, non-constant metrics and
/// one missing value (Chad, eating disorders, 2019).
pub fn sample_dataset() -> Dataset {
    let mut records = Vec::new();
    for year in 2017..=2019 {
        for (position, (name, code)) in SAMPLE_COUNTRIES.iter().enumerate() {
            let mut metrics = [None; DISORDER_COUNT];
            for (index, slot) in metrics.iter_mut().enumerate() {
                let step = (position * 7 + index * 3 + year as usize) % 13;
                *slot = Some(step as f64 * 0.5 + index as f64 * 0.1 + 0.2);
            }
            if *name == "Chad" && year == 2019 {
                metrics[Disorder::EatingDisorders.index()] = None;
            }
            records.push(Record::new(*name, *code, year, metrics));
        }
    }
    Dataset::from_records(records).expect("sample dataset is non-empty")
}
