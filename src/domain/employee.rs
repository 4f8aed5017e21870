use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, EmployeeId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    /// Owning company. Every employee belongs to exactly one.
    pub company_id: CompanyId,
    pub name: String,
    pub age: u32,
    pub position: String,
}

impl Employee {
    /// Builds an employee for the given company with a fresh identifier.
    #[must_use]
    pub fn new(company_id: CompanyId, name: String, age: u32, position: String) -> Self {
        Self {
            id: EmployeeId::new(),
            company_id,
            name: name.trim().to_string(),
            age,
            position: position.trim().to_string(),
        }
    }

    /// The position in the case-folded form searches compare against.
    pub fn position_search_key(&self) -> String {
        fold_case(&self.position)
    }
}

/// Unicode lowercase used on both sides of a position search.
pub fn fold_case(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_key_folds_non_ascii_letters() {
        let employee = Employee::new(CompanyId::new(), "Zoé".into(), 30, " ÉLÈVE ".into());
        assert_eq!(employee.position, "ÉLÈVE");
        assert_eq!(employee.position_search_key(), "élève");
        assert_eq!(fold_case("РАЗРАБОТЧИК"), "разработчик");
    }
}
