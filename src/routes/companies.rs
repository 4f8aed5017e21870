use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::types::CompanyId;
use crate::dto::company::{CompanyForCreationDto, CompanyForUpdateDto};
use crate::repository::DieselRepository;
use crate::routes::internal;
use crate::services::{ServiceError, companies as companies_service};

/// Parses `id1,id2,...`. Any malformed id invalidates the whole list.
fn parse_ids(raw: &str) -> Option<Vec<CompanyId>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::parse::<CompanyId>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Some(ids).filter(|ids| !ids.is_empty())
}

#[get("/companies")]
pub async fn get_companies(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let companies = companies_service::get_companies(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(companies))
}

#[get("/companies/{id}", name = "company_by_id")]
pub async fn get_company(
    id: web::Path<CompanyId>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let company = companies_service::get_company(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::Ok().json(company))
}

#[post("/companies")]
pub async fn create_company(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Option<CompanyForCreationDto>>,
) -> Result<HttpResponse, ServiceError> {
    let company = companies_service::create_company(repo.get_ref(), payload)?;
    let location = req
        .url_for("company_by_id", [company.id.to_string()])
        .map_err(internal)?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(company))
}

#[get("/companies/collection/({ids})", name = "company_collection")]
pub async fn get_company_collection(
    ids: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let companies = companies_service::get_company_collection(repo.get_ref(), parse_ids(&ids))?;
    Ok(HttpResponse::Ok().json(companies))
}

#[post("/companies/collection")]
pub async fn create_company_collection(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Option<Vec<CompanyForCreationDto>>>,
) -> Result<HttpResponse, ServiceError> {
    let (companies, ids) = companies_service::create_company_collection(repo.get_ref(), payload)?;
    let location = req
        .url_for("company_collection", [ids])
        .map_err(internal)?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(companies))
}

#[put("/companies/{id}")]
pub async fn update_company(
    id: web::Path<CompanyId>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Option<CompanyForUpdateDto>>,
) -> Result<HttpResponse, ServiceError> {
    companies_service::update_company(repo.get_ref(), id.into_inner(), payload)?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/companies/{id}")]
pub async fn delete_company(
    id: web::Path<CompanyId>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    companies_service::delete_company(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        let a = CompanyId::new();
        let b = CompanyId::new();
        assert_eq!(parse_ids(&format!("{a}, {b}")), Some(vec![a, b]));
    }

    #[test]
    fn rejects_empty_or_malformed_lists() {
        assert_eq!(parse_ids(""), None);
        assert_eq!(parse_ids(" , "), None);
        assert_eq!(parse_ids(&format!("{},not-a-uuid", CompanyId::new())), None);
    }
}
