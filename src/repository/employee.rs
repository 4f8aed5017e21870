//! Diesel implementation of the employee store and the listing pipeline.
//!
//! A listing narrows the company's employees by age, then by position
//! search, orders the result and finally slices one page. The total is
//! counted on the narrowed set before paging.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::employee::{Employee, fold_case};
use crate::domain::ordering::{EmployeeSortField, SortDirection, SortKey};
use crate::domain::types::{CompanyId, EmployeeId};
use crate::models::employee::Employee as DbEmployee;
use crate::pagination::MetaData;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AgeRange, DieselRepository, EmployeeCondition, EmployeeListQuery, EmployeeReader, Store,
};
use crate::schema::employees;

type EmployeeQuery = employees::BoxedQuery<'static, Sqlite>;

const LIKE_ESCAPE: char = '\\';

fn employee_query(condition: Option<&EmployeeCondition>) -> EmployeeQuery {
    let query = employees::table.into_boxed::<Sqlite>();
    match condition {
        None => query,
        Some(EmployeeCondition::Company(company_id)) => {
            query.filter(employees::company_id.eq(company_id.as_bytes().to_vec()))
        }
        Some(EmployeeCondition::CompanyAndId(company_id, id)) => query
            .filter(employees::company_id.eq(company_id.as_bytes().to_vec()))
            .filter(employees::id.eq(id.as_bytes().to_vec())),
    }
}

fn filter_by_age(query: EmployeeQuery, range: &AgeRange) -> EmployeeQuery {
    let (min, max) = range.as_db_bounds();
    query.filter(employees::age.between(min, max))
}

/// Builds a `LIKE` pattern matching `term` anywhere, with the wildcard
/// characters of the term matched literally. The term is case-folded the
/// same way the stored `position_search` column is.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in fold_case(term).chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn search_position(query: EmployeeQuery, term: &str) -> EmployeeQuery {
    query.filter(
        employees::position_search
            .like(contains_pattern(term))
            .escape(LIKE_ESCAPE),
    )
}

fn sort(mut query: EmployeeQuery, keys: &[SortKey]) -> EmployeeQuery {
    for key in keys {
        query = match (key.field, key.direction) {
            (EmployeeSortField::Name, SortDirection::Ascending) => {
                query.then_order_by(employees::name.asc())
            }
            (EmployeeSortField::Name, SortDirection::Descending) => {
                query.then_order_by(employees::name.desc())
            }
            (EmployeeSortField::Age, SortDirection::Ascending) => {
                query.then_order_by(employees::age.asc())
            }
            (EmployeeSortField::Age, SortDirection::Descending) => {
                query.then_order_by(employees::age.desc())
            }
            (EmployeeSortField::Position, SortDirection::Ascending) => {
                query.then_order_by(employees::position.asc())
            }
            (EmployeeSortField::Position, SortDirection::Descending) => {
                query.then_order_by(employees::position.desc())
            }
        };
    }
    // Stable order for rows equal on every requested key.
    query.then_order_by(employees::id.asc())
}

fn into_domain(rows: Vec<DbEmployee>) -> RepositoryResult<Vec<Employee>> {
    rows.into_iter()
        .map(|row| Employee::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl Store<Employee> for DieselRepository {
    type Condition = EmployeeCondition;

    fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        let mut conn = self.conn()?;
        let rows = employee_query(None).load::<DbEmployee>(&mut conn)?;
        into_domain(rows)
    }

    fn find_by_condition(&self, condition: &EmployeeCondition) -> RepositoryResult<Vec<Employee>> {
        let mut conn = self.conn()?;
        let rows = employee_query(Some(condition)).load::<DbEmployee>(&mut conn)?;
        into_domain(rows)
    }
}

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(
        &self,
        company_id: CompanyId,
        id: EmployeeId,
    ) -> RepositoryResult<Option<Employee>> {
        let condition = EmployeeCondition::CompanyAndId(company_id, id);
        let employees = Store::<Employee>::find_by_condition(self, &condition)?;
        Ok(employees.into_iter().next())
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = employee_query(Some(&EmployeeCondition::Company(query.company_id)));
            if let Some(range) = &query.age_range {
                items = filter_by_age(items, range);
            }
            if let Some(term) = &query.search {
                items = search_position(items, term);
            }
            items
        };

        // Count the narrowed set before paging.
        let total = query_builder().count().get_result::<i64>(&mut conn)?;
        let total = usize::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count: {total}")))?;

        let mut items = sort(query_builder(), &query.order);
        if let Some(pagination) = &query.pagination {
            let page = MetaData::new(total, pagination.page, pagination.per_page);
            let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbEmployee>(&mut conn)?;
        Ok((total, into_domain(rows)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_lowercases_and_wraps() {
        assert_eq!(contains_pattern(" Dev "), "%dev%");
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
