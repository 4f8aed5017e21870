use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, route, web};
use json_patch::Patch;

use crate::domain::types::{CompanyId, EmployeeId};
use crate::dto::employee::{EmployeeForCreationDto, EmployeeForUpdateDto};
use crate::dto::parameters::EmployeeParameters;
use crate::links::EmployeeLinks;
use crate::repository::DieselRepository;
use crate::routes::{PAGINATION_HEADER, internal, wants_hateoas};
use crate::services::{ServiceError, employees as employees_service};

#[route(
    "/companies/{company_id}/employees",
    method = "GET",
    method = "HEAD",
    name = "employees_for_company"
)]
pub async fn get_employees_for_company(
    req: HttpRequest,
    company_id: web::Path<CompanyId>,
    params: web::Query<EmployeeParameters>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let with_links = wants_hateoas(&req)?;
    let company_id = company_id.into_inner();

    let page = employees_service::list_employees(repo.get_ref(), company_id, &params)?;

    let metadata = serde_json::to_string(&page.meta_data).map_err(internal)?;
    let collection_url = req
        .url_for("employees_for_company", [company_id.to_string()])
        .map_err(internal)?;
    let body = EmployeeLinks::new(collection_url)
        .try_generate_links(&page.items, params.fields(), with_links)
        .map_err(internal)?;

    Ok(HttpResponse::Ok()
        .insert_header((PAGINATION_HEADER, metadata))
        .json(body))
}

#[get("/companies/{company_id}/employees/{id}", name = "employee_for_company")]
pub async fn get_employee_for_company(
    path: web::Path<(CompanyId, EmployeeId)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    let employee = employees_service::get_employee(repo.get_ref(), company_id, id)?;
    Ok(HttpResponse::Ok().json(employee))
}

#[post("/companies/{company_id}/employees")]
pub async fn create_employee_for_company(
    req: HttpRequest,
    company_id: web::Path<CompanyId>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Option<EmployeeForCreationDto>>,
) -> Result<HttpResponse, ServiceError> {
    let company_id = company_id.into_inner();
    let employee = employees_service::create_employee(repo.get_ref(), company_id, payload)?;
    let location = req
        .url_for(
            "employee_for_company",
            [company_id.to_string(), employee.id.to_string()],
        )
        .map_err(internal)?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(employee))
}

#[put("/companies/{company_id}/employees/{id}")]
pub async fn update_employee_for_company(
    path: web::Path<(CompanyId, EmployeeId)>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Option<EmployeeForUpdateDto>>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employees_service::update_employee(repo.get_ref(), company_id, id, payload)?;
    Ok(HttpResponse::NoContent().finish())
}

#[patch("/companies/{company_id}/employees/{id}")]
pub async fn partially_update_employee_for_company(
    path: web::Path<(CompanyId, EmployeeId)>,
    repo: web::Data<DieselRepository>,
    web::Json(patch): web::Json<Option<Patch>>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employees_service::patch_employee(repo.get_ref(), company_id, id, patch)?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/companies/{company_id}/employees/{id}")]
pub async fn delete_employee_for_company(
    path: web::Path<(CompanyId, EmployeeId)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employees_service::delete_employee(repo.get_ref(), company_id, id)?;
    Ok(HttpResponse::NoContent().finish())
}
