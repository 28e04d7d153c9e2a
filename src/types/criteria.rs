// src/types/criteria.rs
//! Search and filter parameters chosen by the user

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

pub const ALL: &str = "All";

/// One filter facet: either unconstrained or a single exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Absent, empty and `"All"` values mean no constraint.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => Facet::All,
            Some(v) => Facet::Only(v.to_string()),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => expected == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Facet::All => ALL,
            Facet::Only(v) => v,
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Facet::parse(Some(value))
    }
}

impl Serialize for Facet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Facet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Facet::parse(value.as_deref()))
    }
}

/// Inclusive salary bounds in thousands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryRange {
    min: u32,
    max: u32,
}

impl SalaryRange {
    pub fn new(min: u32, max: u32) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvalidSalaryRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build from optional bounds; a missing side is open.
    pub fn from_bounds(min: Option<u32>, max: Option<u32>) -> Result<Option<Self>, ValidationError> {
        match (min, max) {
            (None, None) => Ok(None),
            (min, max) => Self::new(min.unwrap_or(0), max.unwrap_or(u32::MAX)).map(Some),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, salary: u32) -> bool {
        salary >= self.min && salary <= self.max
    }
}

impl<'de> Deserialize<'de> for SalaryRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Bounds {
            min: u32,
            max: u32,
        }

        let bounds = Bounds::deserialize(deserializer)?;
        SalaryRange::new(bounds.min, bounds.max).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: Facet,
    pub location: Facet,
    pub salary_range: Option<SalaryRange>,
}

impl FilterCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<Facet>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<Facet>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_salary_range(mut self, range: SalaryRange) -> Self {
        self.salary_range = Some(range);
        self
    }

    /// True when no predicate constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty()
            && self.category == Facet::All
            && self.location == Facet::All
            && self.salary_range.is_none()
    }
}
