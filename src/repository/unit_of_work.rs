//! Atomic commit of staged changes.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::models::company::{NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany};
use crate::models::employee::{
    NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{Change, ChangeSet, DieselRepository, UnitOfWork};
use crate::schema::{companies, employees};

/// Fails with [`RepositoryError::NotFound`] when a targeted row is gone so
/// the surrounding transaction is rolled back.
fn expect_affected(affected: usize) -> RepositoryResult<usize> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(affected)
    }
}

fn apply(conn: &mut SqliteConnection, change: &Change) -> RepositoryResult<usize> {
    match change {
        Change::CreateCompany(company) => {
            let row: DbNewCompany = company.into();
            Ok(diesel::insert_into(companies::table)
                .values(&row)
                .execute(conn)?)
        }
        Change::UpdateCompany(company) => {
            let row: DbUpdateCompany = company.into();
            let affected = diesel::update(
                companies::table.filter(companies::id.eq(company.id.as_bytes().as_slice())),
            )
            .set(&row)
            .execute(conn)?;
            expect_affected(affected)
        }
        Change::DeleteCompany(company) => {
            let affected = diesel::delete(
                companies::table.filter(companies::id.eq(company.id.as_bytes().as_slice())),
            )
            .execute(conn)?;
            expect_affected(affected)
        }
        Change::CreateEmployee(employee) => {
            let row = DbNewEmployee::try_from(employee)?;
            Ok(diesel::insert_into(employees::table)
                .values(&row)
                .execute(conn)?)
        }
        Change::UpdateEmployee(employee) => {
            let row = DbUpdateEmployee::try_from(employee)?;
            let affected = diesel::update(
                employees::table
                    .filter(employees::id.eq(employee.id.as_bytes().as_slice()))
                    .filter(employees::company_id.eq(employee.company_id.as_bytes().as_slice())),
            )
            .set(&row)
            .execute(conn)?;
            expect_affected(affected)
        }
        Change::DeleteEmployee(employee) => {
            let affected = diesel::delete(
                employees::table
                    .filter(employees::id.eq(employee.id.as_bytes().as_slice()))
                    .filter(employees::company_id.eq(employee.company_id.as_bytes().as_slice())),
            )
            .execute(conn)?;
            expect_affected(affected)
        }
    }
}

impl UnitOfWork for DieselRepository {
    fn save(&self, changes: &ChangeSet) -> RepositoryResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }
        log::debug!("Saving {} staged change(s)", changes.len());

        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut affected = 0;
            for change in changes.iter() {
                affected += apply(conn, change).inspect_err(|err| {
                    log::error!("Failed to apply staged change {change:?}: {err}");
                })?;
            }
            Ok(affected)
        })
    }
}
