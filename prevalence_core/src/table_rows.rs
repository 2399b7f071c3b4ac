use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Record, CODE_COLUMN, ENTITY_COLUMN, YEAR_COLUMN};
use crate::disorder::{Disorder, DISORDER_COUNT};
use crate::filter::{CountryFilter, EmptySelection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowsView {
    pub year: i32,
    pub rows: Vec<Record>,
}

/// Rows of the year, restricted to the selected countries per `when_empty`.
pub fn table_rows(
    dataset: &Dataset,
    year: i32,
    countries: &[String],
    when_empty: EmptySelection,
) -> TableRowsView {
    let filter = CountryFilter::new(countries, when_empty);
    let rows = dataset
        .rows_in_year(year)
        .filter(|record| filter.admits(&record.country_name))
        .cloned()
        .collect();
    TableRowsView { year, rows }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableColumn {
    Entity,
    Code,
    Year,
    Metric(Disorder),
}

impl TableColumn {
    pub const COUNT: usize = 3 + DISORDER_COUNT;

    pub fn all() -> impl Iterator<Item = TableColumn> {
        [TableColumn::Entity, TableColumn::Code, TableColumn::Year]
            .into_iter()
            .chain(Disorder::ALL.into_iter().map(TableColumn::Metric))
    }

    pub fn title(self) -> &'static str {
        match self {
            TableColumn::Entity => ENTITY_COLUMN,
            TableColumn::Code => CODE_COLUMN,
            TableColumn::Year => YEAR_COLUMN,
            TableColumn::Metric(disorder) => disorder.column(),
        }
    }

    fn position(self) -> usize {
        match self {
            TableColumn::Entity => 0,
            TableColumn::Code => 1,
            TableColumn::Year => 2,
            TableColumn::Metric(disorder) => 3 + disorder.index(),
        }
    }

    /// Next column left to right, wrapping.
    pub fn next(self) -> Self {
        let target = (self.position() + 1) % Self::COUNT;
        Self::all()
            .nth(target)
            .unwrap_or(TableColumn::Entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Client-side table controls: text filter, single-column sort, paging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    pub sort: Option<(TableColumn, SortOrder)>,
    pub filter: Option<String>,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<Record>,
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

impl TableQuery {
    pub fn apply(&self, rows: &[Record], page_size: usize) -> TablePage {
        let page_size = page_size.max(1);
        let needle = self
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        let mut matching: Vec<&Record> = rows
            .iter()
            .filter(|record| match &needle {
                Some(needle) => {
                    record.country_name.to_lowercase().contains(needle)
                        || record
                            .code()
                            .is_some_and(|code| code.to_lowercase().contains(needle))
                }
                None => true,
            })
            .collect();

        if let Some((column, order)) = self.sort {
            matching.sort_by(|a, b| compare_rows(a, b, column, order));
        }

        let total_rows = matching.len();
        let page_count = total_rows.div_ceil(page_size).max(1);
        let page = self.page.min(page_count - 1);
        let rows = matching
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .cloned()
            .collect();

        TablePage {
            rows,
            page,
            page_count,
            total_rows,
        }
    }
}

fn compare_rows(a: &Record, b: &Record, column: TableColumn, order: SortOrder) -> Ordering {
    let directed = |ordering: Ordering| match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    };
    match column {
        TableColumn::Entity => directed(a.country_name.cmp(&b.country_name)),
        TableColumn::Year => directed(a.year.cmp(&b.year)),
        TableColumn::Code => missing_last(a.code(), b.code(), |x, y| directed(x.cmp(y))),
        TableColumn::Metric(disorder) => {
            missing_last(a.metric(disorder), b.metric(disorder), |x, y| {
                directed(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
            })
        }
    }
}

fn missing_last<T>(a: Option<T>, b: Option<T>, present: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => present(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
