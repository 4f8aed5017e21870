//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::company::Company;
use crate::domain::employee::Employee;
use crate::domain::types::{CompanyId, EmployeeId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ChangeSet, CompanyReader, EmployeeListQuery, EmployeeReader, UnitOfWork};

mock! {
    pub Repository {}

    impl CompanyReader for Repository {
        fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
        fn list_companies_by_ids(&self, ids: &[CompanyId]) -> RepositoryResult<Vec<Company>>;
    }

    impl EmployeeReader for Repository {
        fn get_employee_by_id(
            &self,
            company_id: CompanyId,
            id: EmployeeId,
        ) -> RepositoryResult<Option<Employee>>;
        fn list_employees(
            &self,
            query: &EmployeeListQuery,
        ) -> RepositoryResult<(usize, Vec<Employee>)>;
    }

    impl UnitOfWork for Repository {
        fn save(&self, changes: &ChangeSet) -> RepositoryResult<usize>;
    }
}
