//! Country-code → region heuristic.
//!
//! The partition is keyed on the first letter of the code and is not a real
//! geographic mapping. Aggregations only see [`region_of`], so a proper lookup
//! table can replace it without touching them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Unknown,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Codes shorter than this fall into [`Region::Unknown`].
const MIN_CODE_LEN: usize = 3;

/// Bucket a country code by its first character. Total: every input maps to a
/// region. Matching is case-sensitive; anything outside `A..=S` is Oceania.
pub fn region_of(code: Option<&str>) -> Region {
    let Some(code) = code else {
        return Region::Unknown;
    };
    if code.chars().count() < MIN_CODE_LEN {
        return Region::Unknown;
    }
    match code.chars().next() {
        Some('A'..='B') => Region::Africa,
        Some('C'..='G') => Region::Americas,
        Some('H'..='M') => Region::Asia,
        Some('N'..='S') => Region::Europe,
        _ => Region::Oceania,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_short_codes_are_unknown() {
        assert_eq!(region_of(None), Region::Unknown);
        assert_eq!(region_of(Some("")), Region::Unknown);
        assert_eq!(region_of(Some("FR")), Region::Unknown);
    }

    #[test]
    fn first_letter_partition_boundaries() {
        assert_eq!(region_of(Some("AFG")), Region::Africa);
        assert_eq!(region_of(Some("BRA")), Region::Africa);
        assert_eq!(region_of(Some("CHN")), Region::Americas);
        assert_eq!(region_of(Some("FRA")), Region::Americas);
        assert_eq!(region_of(Some("GBR")), Region::Americas);
        assert_eq!(region_of(Some("HUN")), Region::Asia);
        assert_eq!(region_of(Some("MEX")), Region::Asia);
        assert_eq!(region_of(Some("NOR")), Region::Europe);
        assert_eq!(region_of(Some("SWE")), Region::Europe);
        assert_eq!(region_of(Some("TUR")), Region::Oceania);
        assert_eq!(region_of(Some("ZWE")), Region::Oceania);
    }

    #[test]
    fn lowercase_and_long_codes_follow_first_character() {
        assert_eq!(region_of(Some("fra")), Region::Oceania);
        assert_eq!(region_of(Some("OWID_WRL")), Region::Europe);
    }

    #[test]
    fn alphabet_partition_snapshot() {
        let rendered: Vec<String> = ('A'..='Z')
            .map(|letter| {
                let code = format!("{letter}XX");
                format!("{letter}={}", region_of(Some(&code)).label())
            })
            .collect();
        insta::assert_snapshot!(rendered.join(" "), @"A=Africa B=Africa C=Americas D=Americas E=Americas F=Americas G=Americas H=Asia I=Asia J=Asia K=Asia L=Asia M=Asia N=Europe O=Europe P=Europe Q=Europe R=Europe S=Europe T=Oceania U=Oceania V=Oceania W=Oceania X=Oceania Y=Oceania Z=Oceania");
    }
}
