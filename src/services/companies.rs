use validator::Validate;

use crate::domain::company::Company;
use crate::domain::types::CompanyId;
use crate::dto::company::{CompanyDto, CompanyForCreationDto, CompanyForUpdateDto};
use crate::dto::employee::EmployeeForCreationDto;
use crate::repository::{ChangeSet, CompanyReader, UnitOfWork};
use crate::services::{ServiceError, ServiceResult};

/// Loads a company or fails with [`ServiceError::NotFound`].
pub(crate) fn find_company<R>(repo: &R, id: CompanyId) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    match repo.get_company_by_id(id)? {
        Some(company) => Ok(company),
        None => {
            log::info!("Company with id: {id} doesn't exist in the database.");
            Err(ServiceError::NotFound)
        }
    }
}

fn stage_employees(
    changes: &mut ChangeSet,
    company_id: CompanyId,
    employees: Vec<EmployeeForCreationDto>,
) {
    for employee in employees {
        changes.create_employee_for_company(company_id, employee.into_domain(company_id));
    }
}

/// Lists every company ordered by name.
pub fn get_companies<R>(repo: &R) -> ServiceResult<Vec<CompanyDto>>
where
    R: CompanyReader + ?Sized,
{
    let companies = repo.list_companies()?;
    Ok(companies.iter().map(CompanyDto::from).collect())
}

pub fn get_company<R>(repo: &R, id: CompanyId) -> ServiceResult<CompanyDto>
where
    R: CompanyReader + ?Sized,
{
    find_company(repo, id).map(CompanyDto::from)
}

/// Creates a company together with any employees listed in the payload.
pub fn create_company<R>(repo: &R, payload: Option<CompanyForCreationDto>) -> ServiceResult<CompanyDto>
where
    R: UnitOfWork + ?Sized,
{
    let Some(payload) = payload else {
        log::error!("CompanyForCreationDto object sent from client is null.");
        return Err(ServiceError::BadRequest(
            "CompanyForCreationDto object is null".to_string(),
        ));
    };
    payload.validate()?;

    let (company, employees) = payload.into_domain();
    let mut changes = ChangeSet::new();
    changes.create_company(company.clone());
    stage_employees(&mut changes, company.id, employees);
    repo.save(&changes)?;

    Ok(CompanyDto::from(company))
}

/// Resolves every requested id. A single unresolved id fails the whole
/// request.
pub fn get_company_collection<R>(repo: &R, ids: Option<Vec<CompanyId>>) -> ServiceResult<Vec<CompanyDto>>
where
    R: CompanyReader + ?Sized,
{
    let Some(ids) = ids.filter(|ids| !ids.is_empty()) else {
        log::error!("Parameter ids is null");
        return Err(ServiceError::BadRequest("Parameter ids is null".to_string()));
    };

    let companies = repo.list_companies_by_ids(&ids)?;
    if companies.len() != ids.len() {
        log::error!("Some ids are not valid in a collection");
        return Err(ServiceError::NotFound);
    }

    Ok(companies.iter().map(CompanyDto::from).collect())
}

/// Creates several companies in one transaction. Returns the created DTOs and
/// their ids joined with commas, as used by the collection route.
pub fn create_company_collection<R>(
    repo: &R,
    payload: Option<Vec<CompanyForCreationDto>>,
) -> ServiceResult<(Vec<CompanyDto>, String)>
where
    R: UnitOfWork + ?Sized,
{
    let Some(payload) = payload else {
        log::error!("Company collection sent from client is null.");
        return Err(ServiceError::BadRequest("Company collection is null".to_string()));
    };
    for company in &payload {
        company.validate()?;
    }

    let mut changes = ChangeSet::new();
    let mut created = Vec::with_capacity(payload.len());
    for company in payload {
        let (company, employees) = company.into_domain();
        changes.create_company(company.clone());
        stage_employees(&mut changes, company.id, employees);
        created.push(CompanyDto::from(company));
    }
    repo.save(&changes)?;

    let ids = created
        .iter()
        .map(|company| company.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok((created, ids))
}

/// Replaces the company's fields and adds the listed employees.
pub fn update_company<R>(
    repo: &R,
    id: CompanyId,
    payload: Option<CompanyForUpdateDto>,
) -> ServiceResult<()>
where
    R: CompanyReader + UnitOfWork + ?Sized,
{
    let Some(payload) = payload else {
        log::error!("CompanyForUpdateDto object sent from client is null.");
        return Err(ServiceError::BadRequest(
            "CompanyForUpdateDto object is null".to_string(),
        ));
    };
    payload.validate()?;

    let company = find_company(repo, id)?;
    let (company, employees) = payload.apply_to(company);

    let mut changes = ChangeSet::new();
    changes.update_company(company.clone());
    stage_employees(&mut changes, company.id, employees);
    repo.save(&changes)?;
    Ok(())
}

/// Deletes the company. Its employees go with it.
pub fn delete_company<R>(repo: &R, id: CompanyId) -> ServiceResult<()>
where
    R: CompanyReader + UnitOfWork + ?Sized,
{
    let company = find_company(repo, id)?;
    let mut changes = ChangeSet::new();
    changes.delete_company(company);
    repo.save(&changes)?;
    Ok(())
}
