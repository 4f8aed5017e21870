//! Diesel implementation of the company store and reader.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::company::Company;
use crate::domain::types::CompanyId;
use crate::models::company::Company as DbCompany;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CompanyCondition, CompanyReader, DieselRepository, Store};
use crate::schema::companies;

/// Starts a boxed query over the company set, optionally narrowed by
/// `condition`.
fn company_query(condition: Option<&CompanyCondition>) -> companies::BoxedQuery<'static, Sqlite> {
    let query = companies::table.into_boxed::<Sqlite>();
    match condition {
        None => query,
        Some(CompanyCondition::Id(id)) => query.filter(companies::id.eq(id.as_bytes().to_vec())),
        Some(CompanyCondition::Ids(ids)) => {
            let ids = ids
                .iter()
                .map(|id| id.as_bytes().to_vec())
                .collect::<Vec<_>>();
            query.filter(companies::id.eq_any(ids))
        }
    }
}

fn into_domain(rows: Vec<DbCompany>) -> RepositoryResult<Vec<Company>> {
    rows.into_iter()
        .map(|row| Company::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl Store<Company> for DieselRepository {
    type Condition = CompanyCondition;

    fn find_all(&self) -> RepositoryResult<Vec<Company>> {
        let mut conn = self.conn()?;
        let rows = company_query(None).load::<DbCompany>(&mut conn)?;
        into_domain(rows)
    }

    fn find_by_condition(&self, condition: &CompanyCondition) -> RepositoryResult<Vec<Company>> {
        let mut conn = self.conn()?;
        let rows = company_query(Some(condition)).load::<DbCompany>(&mut conn)?;
        into_domain(rows)
    }
}

impl CompanyReader for DieselRepository {
    fn list_companies(&self) -> RepositoryResult<Vec<Company>> {
        let mut conn = self.conn()?;
        let rows = company_query(None)
            .order((companies::name.asc(), companies::id.asc()))
            .load::<DbCompany>(&mut conn)?;
        into_domain(rows)
    }

    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>> {
        let mut conn = self.conn()?;
        let row = company_query(Some(&CompanyCondition::Id(id)))
            .first::<DbCompany>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(Company::try_from(row).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_companies_by_ids(&self, ids: &[CompanyId]) -> RepositoryResult<Vec<Company>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Store::<Company>::find_by_condition(self, &CompanyCondition::Ids(ids.to_vec()))
    }
}
