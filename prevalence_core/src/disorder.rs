use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of prevalence metrics carried by every record.
pub const DISORDER_COUNT: usize = 7;

/// One of the seven prevalence metrics tracked per country and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disorder {
    Schizophrenia,
    BipolarDisorder,
    EatingDisorders,
    AnxietyDisorders,
    DrugUseDisorders,
    Depression,
    AlcoholUseDisorders,
}

impl Disorder {
    /// Canonical ordering; also the metric order inside a [`crate::Record`].
    pub const ALL: [Disorder; DISORDER_COUNT] = [
        Disorder::Schizophrenia,
        Disorder::BipolarDisorder,
        Disorder::EatingDisorders,
        Disorder::AnxietyDisorders,
        Disorder::DrugUseDisorders,
        Disorder::Depression,
        Disorder::AlcoholUseDisorders,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Exact CSV header for this metric.
    pub fn column(self) -> &'static str {
        match self {
            Disorder::Schizophrenia => "Schizophrenia (%)",
            Disorder::BipolarDisorder => "Bipolar disorder (%)",
            Disorder::EatingDisorders => "Eating disorders (%)",
            Disorder::AnxietyDisorders => "Anxiety disorders (%)",
            Disorder::DrugUseDisorders => "Drug use disorders (%)",
            Disorder::Depression => "Depression (%)",
            Disorder::AlcoholUseDisorders => "Alcohol use disorders (%)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Disorder::Schizophrenia => "Schizophrenia",
            Disorder::BipolarDisorder => "Bipolar disorder",
            Disorder::EatingDisorders => "Eating disorders",
            Disorder::AnxietyDisorders => "Anxiety disorders",
            Disorder::DrugUseDisorders => "Drug use disorders",
            Disorder::Depression => "Depression",
            Disorder::AlcoholUseDisorders => "Alcohol use disorders",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Disorder::Schizophrenia => "schizophrenia",
            Disorder::BipolarDisorder => "bipolar_disorder",
            Disorder::EatingDisorders => "eating_disorders",
            Disorder::AnxietyDisorders => "anxiety_disorders",
            Disorder::DrugUseDisorders => "drug_use_disorders",
            Disorder::Depression => "depression",
            Disorder::AlcoholUseDisorders => "alcohol_use_disorders",
        }
    }

    /// Next disorder in canonical order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % DISORDER_COUNT]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + DISORDER_COUNT - 1) % DISORDER_COUNT]
    }
}

impl fmt::Display for Disorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown disorder '{0}'")]
pub struct UnknownDisorder(pub String);

impl FromStr for Disorder {
    type Err = UnknownDisorder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|disorder| {
                needle.eq_ignore_ascii_case(disorder.column())
                    || needle.eq_ignore_ascii_case(disorder.id())
                    || needle.eq_ignore_ascii_case(disorder.label())
            })
            .ok_or_else(|| UnknownDisorder(s.to_string()))
    }
}
