use serde::{Deserialize, Serialize};

use crate::domain::types::CompanyId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub address: String,
    pub country: Option<String>,
}

impl Company {
    /// Builds a company with a freshly generated identifier.
    #[must_use]
    pub fn new(name: String, address: String, country: Option<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            country: country
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Address and country joined the way the public representation shows them.
    pub fn full_address(&self) -> String {
        match &self.country {
            Some(country) => format!("{} {}", self.address, country),
            None => self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_drops_blank_country() {
        let company = Company::new(" Acme ".into(), " Main st ".into(), Some("  ".into()));
        assert_eq!(company.name, "Acme");
        assert_eq!(company.address, "Main st");
        assert_eq!(company.country, None);
        assert_eq!(company.full_address(), "Main st");
    }

    #[test]
    fn full_address_appends_country() {
        let company = Company::new("Acme".into(), "Main st 1".into(), Some("USA".into()));
        assert_eq!(company.full_address(), "Main st 1 USA");
    }
}
