//! Public representations of companies and the payloads that create or
//! update them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::company::Company;
use crate::domain::types::CompanyId;
use crate::dto::employee::EmployeeForCreationDto;
use crate::dto::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: CompanyId,
    pub name: String,
    pub full_address: String,
}

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            full_address: company.full_address(),
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self::from(&company)
    }
}

/// Payload of `POST /api/companies`; may carry employees created together
/// with the company.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForCreationDto {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 30, message = "Company name is required and limited to 30 characters."),
        custom(function = "not_blank", message = "Company name is required and limited to 30 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 60, message = "Company address is required and limited to 60 characters."),
        custom(function = "not_blank", message = "Company address is required and limited to 60 characters.")
    )]
    pub address: String,
    pub country: Option<String>,
    #[validate(nested)]
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

impl CompanyForCreationDto {
    /// Splits the payload into the company entity and its initial employees.
    pub fn into_domain(self) -> (Company, Vec<EmployeeForCreationDto>) {
        let company = Company::new(self.name, self.address, self.country);
        (company, self.employees.unwrap_or_default())
    }
}

/// Payload of `PUT /api/companies/{id}`. Listed employees are added to the
/// company.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForUpdateDto {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 30, message = "Company name is required and limited to 30 characters."),
        custom(function = "not_blank", message = "Company name is required and limited to 30 characters.")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 60, message = "Company address is required and limited to 60 characters."),
        custom(function = "not_blank", message = "Company address is required and limited to 60 characters.")
    )]
    pub address: String,
    pub country: Option<String>,
    #[validate(nested)]
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

impl CompanyForUpdateDto {
    /// Copies the updatable fields onto `company`, keeping its identity.
    pub fn apply_to(self, company: Company) -> (Company, Vec<EmployeeForCreationDto>) {
        let updated = Company {
            id: company.id,
            ..Company::new(self.name, self.address, self.country)
        };
        (updated, self.employees.unwrap_or_default())
    }
}
