//! Diesel models for company records.

use diesel::prelude::*;

use crate::domain::company::Company as DomainCompany;
use crate::domain::types::{CompanyId, TypeConstraintError};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: Vec<u8>,
    pub name: String,
    pub address: String,
    pub country: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub id: &'a [u8],
    pub name: &'a str,
    pub address: &'a str,
    pub country: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Company`] record.
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub country: Option<&'a str>,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::from_bytes(&company.id)?,
            name: company.name,
            address: company.address,
            country: company.country,
        })
    }
}

impl<'a> From<&'a DomainCompany> for NewCompany<'a> {
    fn from(company: &'a DomainCompany) -> Self {
        Self {
            id: company.id.as_bytes(),
            name: company.name.as_str(),
            address: company.address.as_str(),
            country: company.country.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainCompany> for UpdateCompany<'a> {
    fn from(company: &'a DomainCompany) -> Self {
        Self {
            name: company.name.as_str(),
            address: company.address.as_str(),
            country: company.country.as_deref(),
        }
    }
}
