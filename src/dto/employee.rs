//! Public representations of employees and the payloads that create, replace
//! or patch them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::employee::Employee;
use crate::domain::types::{CompanyId, EmployeeId};
use crate::dto::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: EmployeeId,
    pub name: String,
    pub age: u32,
    pub position: String,
    pub company_id: CompanyId,
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            age: employee.age,
            position: employee.position.clone(),
            company_id: employee.company_id,
        }
    }
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self::from(&employee)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeForCreationDto {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 30, message = "Employee name is required and limited to 30 characters."),
        custom(function = "not_blank", message = "Employee name is required and limited to 30 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 18, max = 2147483647, message = "Age is required and it can't be lower than 18."))]
    pub age: u32,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 20, message = "Position is required and limited to 20 characters."),
        custom(function = "not_blank", message = "Position is required and limited to 20 characters.")
    )]
    pub position: String,
}

impl EmployeeForCreationDto {
    pub fn into_domain(self, company_id: CompanyId) -> Employee {
        Employee::new(company_id, self.name, self.age, self.position)
    }
}

/// Replacement payload for an employee. Also the document a JSON Patch is
/// applied to.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct EmployeeForUpdateDto {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 30, message = "Employee name is required and limited to 30 characters."),
        custom(function = "not_blank", message = "Employee name is required and limited to 30 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 18, max = 2147483647, message = "Age is required and it can't be lower than 18."))]
    pub age: u32,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 20, message = "Position is required and limited to 20 characters."),
        custom(function = "not_blank", message = "Position is required and limited to 20 characters.")
    )]
    pub position: String,
}

impl From<&Employee> for EmployeeForUpdateDto {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            age: employee.age,
            position: employee.position.clone(),
        }
    }
}

impl EmployeeForUpdateDto {
    /// Copies the updatable fields onto `employee`, keeping its identity and
    /// company.
    pub fn apply_to(self, employee: Employee) -> Employee {
        Employee {
            id: employee.id,
            company_id: employee.company_id,
            name: self.name.trim().to_string(),
            age: self.age,
            position: self.position.trim().to_string(),
        }
    }
}
