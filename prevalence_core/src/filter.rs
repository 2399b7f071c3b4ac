use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::dashboard_config::DashboardConfig;
use crate::dataset::Dataset;
use crate::disorder::Disorder;

bitflags! {
    /// Filter inputs a view depends on, or that changed between two states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FilterInputs: u8 {
        const YEAR = 0b0000_0001;
        const DISORDER = 0b0000_0010;
        const COUNTRIES = 0b0000_0100;
    }
}

/// What a country-dependent view does when no country is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelection {
    /// No countries selected selects no rows.
    Nothing,
    /// No countries selected disables the country filter.
    Everything,
}

/// Snapshot of every user-controlled input. Replaced wholesale on each
/// interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub year: i32,
    pub disorder: Disorder,
    countries: Vec<String>,
}

impl FilterState {
    pub fn new<I, S>(year: i32, disorder: Disorder, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self {
            year,
            disorder,
            countries: Vec::new(),
        };
        for country in countries {
            state.push_country(country.into());
        }
        state
    }

    /// Latest year, configured default disorder and default countries.
    pub fn initial(dataset: &Dataset, config: &DashboardConfig) -> Self {
        Self::new(
            dataset.year_range().1,
            config.default_disorder(),
            config.default_countries().iter().cloned(),
        )
    }

    /// Selected countries in selection order, without duplicates.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_selected(&self, country: &str) -> bool {
        self.countries.iter().any(|selected| selected == country)
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year,
            ..self.clone()
        }
    }

    pub fn with_disorder(&self, disorder: Disorder) -> Self {
        Self {
            disorder,
            ..self.clone()
        }
    }

    pub fn with_countries<I, S>(&self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(self.year, self.disorder, countries)
    }

    /// Copy with `country` added if absent, removed if present.
    pub fn toggling(&self, country: &str) -> Self {
        let mut next = self.clone();
        if next.is_selected(country) {
            next.countries.retain(|selected| selected != country);
        } else {
            next.countries.push(country.to_string());
        }
        next
    }

    /// Inputs that differ between `self` and `other`.
    pub fn diff(&self, other: &FilterState) -> FilterInputs {
        let mut changed = FilterInputs::empty();
        if self.year != other.year {
            changed |= FilterInputs::YEAR;
        }
        if self.disorder != other.disorder {
            changed |= FilterInputs::DISORDER;
        }
        if self.countries != other.countries {
            changed |= FilterInputs::COUNTRIES;
        }
        changed
    }

    fn push_country(&mut self, country: String) {
        if !self.is_selected(&country) {
            self.countries.push(country);
        }
    }
}

/// Country membership test honouring the empty-selection policy.
#[derive(Debug, Clone, Copy)]
pub struct CountryFilter<'a> {
    countries: &'a [String],
    when_empty: EmptySelection,
}

impl<'a> CountryFilter<'a> {
    pub fn new(countries: &'a [String], when_empty: EmptySelection) -> Self {
        Self {
            countries,
            when_empty,
        }
    }

    pub fn admits(&self, country: &str) -> bool {
        if self.countries.is_empty() {
            return self.when_empty == EmptySelection::Everything;
        }
        self.countries.iter().any(|selected| selected == country)
    }

    /// True when the filter can never admit a row.
    pub fn selects_nothing(&self) -> bool {
        self.countries.is_empty() && self.when_empty == EmptySelection::Nothing
    }
}
