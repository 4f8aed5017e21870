//! Query-string parameters of the employee listing.

use serde::Deserialize;

use crate::domain::ordering::{SortKey, parse_order_by};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// `GET /api/companies/{companyId}/employees` query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeParameters {
    pub page_number: usize,
    pub page_size: usize,
    pub min_age: u32,
    pub max_age: u32,
    pub search_term: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl Default for EmployeeParameters {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            min_age: 0,
            max_age: u32::MAX,
            search_term: None,
            order_by: Some("name".to_string()),
            fields: None,
        }
    }
}

impl EmployeeParameters {
    pub fn valid_age_range(&self) -> bool {
        self.min_age < self.max_age
    }

    /// Trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn sort_keys(&self) -> Vec<SortKey> {
        parse_order_by(self.order_by.as_deref())
    }

    /// Requested DTO properties, `None` when every property is wanted.
    pub fn fields(&self) -> Option<&str> {
        self.fields
            .as_deref()
            .map(str::trim)
            .filter(|fields| !fields.is_empty())
    }

    /// 1-based page number; zero is read as the first page.
    pub fn page_number(&self) -> usize {
        self.page_number.max(1)
    }

    /// Requested page size, capped at [`MAX_PAGE_SIZE`].
    pub fn page_size(&self) -> usize {
        self.page_size.min(MAX_PAGE_SIZE)
    }
}
