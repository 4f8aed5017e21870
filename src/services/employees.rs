use json_patch::Patch;
use validator::Validate;

use crate::domain::employee::Employee;
use crate::domain::types::{CompanyId, EmployeeId};
use crate::dto::employee::{EmployeeDto, EmployeeForCreationDto, EmployeeForUpdateDto};
use crate::dto::parameters::EmployeeParameters;
use crate::pagination::PagedList;
use crate::repository::{ChangeSet, CompanyReader, EmployeeListQuery, EmployeeReader, UnitOfWork};
use crate::services::companies::find_company;
use crate::services::{ServiceError, ServiceResult};

/// Loads an employee of the given company. A missing company or employee is
/// [`ServiceError::NotFound`].
pub fn find_employee_for_company<R>(
    repo: &R,
    company_id: CompanyId,
    id: EmployeeId,
) -> ServiceResult<Employee>
where
    R: CompanyReader + EmployeeReader + ?Sized,
{
    find_company(repo, company_id)?;

    match repo.get_employee_by_id(company_id, id)? {
        Some(employee) => Ok(employee),
        None => {
            log::info!("Employee with id: {id} doesn't exist in the database.");
            Err(ServiceError::NotFound)
        }
    }
}

/// One page of a company's employees after age filtering, position search
/// and sorting.
pub fn list_employees<R>(
    repo: &R,
    company_id: CompanyId,
    params: &EmployeeParameters,
) -> ServiceResult<PagedList<EmployeeDto>>
where
    R: CompanyReader + EmployeeReader + ?Sized,
{
    if !params.valid_age_range() {
        return Err(ServiceError::BadRequest(
            "Max age can't be less than min age.".to_string(),
        ));
    }

    find_company(repo, company_id)?;

    let page_number = params.page_number();
    let page_size = params.page_size();

    let mut query = EmployeeListQuery::new(company_id)
        .age_range(params.min_age, params.max_age)
        .order_by(params.sort_keys())
        .paginate(page_number, page_size);
    if let Some(term) = params.search_term() {
        query = query.search(term);
    }

    let (total, employees) = repo.list_employees(&query)?;

    Ok(PagedList::new(employees, total, page_number, page_size).map(EmployeeDto::from))
}

pub fn get_employee<R>(repo: &R, company_id: CompanyId, id: EmployeeId) -> ServiceResult<EmployeeDto>
where
    R: CompanyReader + EmployeeReader + ?Sized,
{
    find_employee_for_company(repo, company_id, id).map(EmployeeDto::from)
}

pub fn create_employee<R>(
    repo: &R,
    company_id: CompanyId,
    payload: Option<EmployeeForCreationDto>,
) -> ServiceResult<EmployeeDto>
where
    R: CompanyReader + UnitOfWork + ?Sized,
{
    let Some(payload) = payload else {
        log::error!("EmployeeForCreationDto object sent from client is null.");
        return Err(ServiceError::BadRequest(
            "EmployeeForCreationDto object is null".to_string(),
        ));
    };
    payload.validate()?;

    find_company(repo, company_id)?;

    let employee = payload.into_domain(company_id);
    let mut changes = ChangeSet::new();
    changes.create_employee_for_company(company_id, employee.clone());
    repo.save(&changes)?;

    Ok(EmployeeDto::from(employee))
}

/// Replaces the employee's name, age and position.
pub fn update_employee<R>(
    repo: &R,
    company_id: CompanyId,
    id: EmployeeId,
    payload: Option<EmployeeForUpdateDto>,
) -> ServiceResult<()>
where
    R: CompanyReader + EmployeeReader + UnitOfWork + ?Sized,
{
    let Some(payload) = payload else {
        log::error!("EmployeeForUpdateDto object sent from client is null.");
        return Err(ServiceError::BadRequest(
            "EmployeeForUpdateDto object is null".to_string(),
        ));
    };
    payload.validate()?;

    let employee = find_employee_for_company(repo, company_id, id)?;

    let mut changes = ChangeSet::new();
    changes.update_employee(payload.apply_to(employee));
    repo.save(&changes)?;
    Ok(())
}

/// Applies an RFC 6902 patch to the employee's updatable fields.
///
/// The employee must exist before the document is looked at. Operations that
/// cannot be applied, and results that fail validation, are unprocessable.
pub fn patch_employee<R>(
    repo: &R,
    company_id: CompanyId,
    id: EmployeeId,
    patch: Option<Patch>,
) -> ServiceResult<()>
where
    R: CompanyReader + EmployeeReader + UnitOfWork + ?Sized,
{
    let employee = find_employee_for_company(repo, company_id, id)?;

    let Some(patch) = patch else {
        log::error!("patchDoc object sent from client is null.");
        return Err(ServiceError::BadRequest("patchDoc object is null".to_string()));
    };

    let mut document = serde_json::to_value(EmployeeForUpdateDto::from(&employee))
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    json_patch::patch(&mut document, &patch).map_err(|e| {
        log::error!("Invalid model state for the patch document: {e}");
        ServiceError::Unprocessable(e.to_string())
    })?;

    let patched: EmployeeForUpdateDto = serde_json::from_value(document).map_err(|e| {
        log::error!("Invalid model state for the patch document: {e}");
        ServiceError::Unprocessable(e.to_string())
    })?;
    patched.validate().inspect_err(|e| {
        log::error!("Invalid model state for the patch document: {e}");
    })?;

    let mut changes = ChangeSet::new();
    changes.update_employee(patched.apply_to(employee));
    repo.save(&changes)?;
    Ok(())
}

pub fn delete_employee<R>(repo: &R, company_id: CompanyId, id: EmployeeId) -> ServiceResult<()>
where
    R: CompanyReader + EmployeeReader + UnitOfWork + ?Sized,
{
    let employee = find_employee_for_company(repo, company_id, id)?;

    let mut changes = ChangeSet::new();
    changes.delete_employee(employee);
    repo.save(&changes)?;
    Ok(())
}
