//! Storage-facing contracts and their Diesel implementation.
//!
//! Reads go through [`Store`], a per-entity query primitive, and the
//! resource specific readers built on top of it. Writes are staged on a
//! [`ChangeSet`] and committed atomically by [`UnitOfWork::save`].

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::company::Company;
use crate::domain::employee::Employee;
use crate::domain::ordering::{DEFAULT_ORDER, SortKey};
use crate::domain::types::{CompanyId, EmployeeId};
use crate::repository::errors::RepositoryResult;

pub mod company;
pub mod employee;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod unit_of_work;

/// Diesel backed repository sharing one r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Generic read primitive over one entity set.
///
/// Implementations only start queries; ordering, filtering and paging are
/// composed on top by the resource specific readers.
pub trait Store<T> {
    /// Predicate accepted by [`Store::find_by_condition`].
    type Condition;

    fn find_all(&self) -> RepositoryResult<Vec<T>>;
    fn find_by_condition(&self, condition: &Self::Condition) -> RepositoryResult<Vec<T>>;
}

/// Conditions understood by the company store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyCondition {
    Id(CompanyId),
    Ids(Vec<CompanyId>),
}

/// Conditions understood by the employee store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeCondition {
    Company(CompanyId),
    CompanyAndId(CompanyId, EmployeeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Inclusive age bounds applied to an employee listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Bounds converted to the storage column type, saturating at `i32::MAX`.
    pub fn as_db_bounds(&self) -> (i32, i32) {
        let clamp = |value: u32| i32::try_from(value).unwrap_or(i32::MAX);
        (clamp(self.min), clamp(self.max))
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Query describing one page of a company's employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeListQuery {
    pub company_id: CompanyId,
    pub age_range: Option<AgeRange>,
    pub search: Option<String>,
    pub order: Vec<SortKey>,
    pub pagination: Option<Pagination>,
}

impl EmployeeListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            age_range: None,
            search: None,
            order: vec![DEFAULT_ORDER],
            pagination: None,
        }
    }

    pub fn age_range(mut self, min: u32, max: u32) -> Self {
        self.age_range = Some(AgeRange { min, max });
        self
    }

    /// Restricts the listing to positions containing `term`. Blank terms are
    /// ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = Some(term).filter(|t| !t.is_empty());
        self
    }

    pub fn order_by(mut self, keys: Vec<SortKey>) -> Self {
        if !keys.is_empty() {
            self.order = keys;
        }
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CompanyReader {
    /// All companies ordered by name.
    fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
    fn list_companies_by_ids(&self, ids: &[CompanyId]) -> RepositoryResult<Vec<Company>>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(
        &self,
        company_id: CompanyId,
        id: EmployeeId,
    ) -> RepositoryResult<Option<Employee>>;
    /// Returns the count of the filtered set together with the requested page.
    fn list_employees(&self, query: &EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
}

/// A single staged modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    CreateCompany(Company),
    UpdateCompany(Company),
    DeleteCompany(Company),
    CreateEmployee(Employee),
    UpdateEmployee(Employee),
    DeleteEmployee(Employee),
}

/// Inserts, updates and removals waiting for [`UnitOfWork::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_company(&mut self, company: Company) {
        self.changes.push(Change::CreateCompany(company));
    }

    pub fn update_company(&mut self, company: Company) {
        self.changes.push(Change::UpdateCompany(company));
    }

    pub fn delete_company(&mut self, company: Company) {
        self.changes.push(Change::DeleteCompany(company));
    }

    /// Stages an employee insert, attaching it to `company_id`.
    pub fn create_employee_for_company(&mut self, company_id: CompanyId, mut employee: Employee) {
        employee.company_id = company_id;
        self.changes.push(Change::CreateEmployee(employee));
    }

    pub fn update_employee(&mut self, employee: Employee) {
        self.changes.push(Change::UpdateEmployee(employee));
    }

    pub fn delete_employee(&mut self, employee: Employee) {
        self.changes.push(Change::DeleteEmployee(employee));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }
}

pub trait UnitOfWork {
    /// Commits every staged change as one unit. Nothing is persisted when any
    /// change fails. Returns the number of affected rows.
    fn save(&self, changes: &ChangeSet) -> RepositoryResult<usize>;
}
