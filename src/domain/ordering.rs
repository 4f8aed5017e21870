//! Parsing of the `orderBy` query parameter into typed sort keys.
//!
//! The parameter is a comma-separated list of `field[ direction]` tokens such
//! as `"age desc, name"`. Fields are matched case-insensitively, the direction
//! defaults to ascending and only `desc` reverses it. Unknown fields are
//! skipped. When nothing usable remains the list falls back to ascending by
//! name.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

/// Employee properties that can be sorted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmployeeSortField {
    Name,
    Age,
    Position,
}

impl FromStr for EmployeeSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "position" => Ok(Self::Position),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}

impl Display for EmployeeSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Position => "position",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: EmployeeSortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn asc(field: EmployeeSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: EmployeeSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Ordering applied when the caller does not ask for one.
pub const DEFAULT_ORDER: SortKey = SortKey::asc(EmployeeSortField::Name);

/// Parses an `orderBy` specification into an ordered list of sort keys.
///
/// The first occurrence of a field wins; later duplicates are dropped. The
/// result is never empty.
pub fn parse_order_by(order_by: Option<&str>) -> Vec<SortKey> {
    let mut keys: Vec<SortKey> = Vec::new();

    for token in order_by.unwrap_or_default().split(',') {
        let mut parts = token.split_whitespace();
        let Some(field) = parts.next() else {
            continue;
        };
        let Ok(field) = field.parse::<EmployeeSortField>() else {
            log::debug!("Ignoring unknown sort field in orderBy: {field}");
            continue;
        };
        let direction = match parts.next() {
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        if keys.iter().any(|key| key.field == field) {
            continue;
        }
        keys.push(SortKey { field, direction });
    }

    if keys.is_empty() {
        keys.push(DEFAULT_ORDER);
    }
    keys
}
