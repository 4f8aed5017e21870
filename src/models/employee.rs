//! Diesel models for employee records.

use diesel::prelude::*;

use crate::domain::employee::Employee as DomainEmployee;
use crate::domain::types::{CompanyId, EmployeeId, TypeConstraintError, age_from_db, age_to_db};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: Vec<u8>,
    pub company_id: Vec<u8>,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub position_search: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub id: &'a [u8],
    pub company_id: &'a [u8],
    pub name: &'a str,
    pub age: i32,
    pub position: &'a str,
    pub position_search: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
/// Data used when updating an [`Employee`] record. The owning company is
/// never reassigned.
pub struct UpdateEmployee<'a> {
    pub name: &'a str,
    pub age: i32,
    pub position: &'a str,
    pub position_search: String,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::from_bytes(&employee.id)?,
            company_id: CompanyId::from_bytes(&employee.company_id)?,
            name: employee.name,
            age: age_from_db(employee.age)?,
            position: employee.position,
        })
    }
}

impl<'a> TryFrom<&'a DomainEmployee> for NewEmployee<'a> {
    type Error = TypeConstraintError;

    fn try_from(employee: &'a DomainEmployee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: employee.id.as_bytes(),
            company_id: employee.company_id.as_bytes(),
            name: employee.name.as_str(),
            age: age_to_db(employee.age)?,
            position: employee.position.as_str(),
            position_search: employee.position_search_key(),
        })
    }
}

impl<'a> TryFrom<&'a DomainEmployee> for UpdateEmployee<'a> {
    type Error = TypeConstraintError;

    fn try_from(employee: &'a DomainEmployee) -> Result<Self, Self::Error> {
        Ok(Self {
            name: employee.name.as_str(),
            age: age_to_db(employee.age)?,
            position: employee.position.as_str(),
            position_search: employee.position_search_key(),
        })
    }
}
