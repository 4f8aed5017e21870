use actix_web::http::header::{self, Accept, Header};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;

use crate::links::accepts_hateoas;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod companies;
pub mod employees;

/// Response header carrying the paging metadata of list endpoints.
pub const PAGINATION_HEADER: &str = "X-Pagination";

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::Validation(_) | ServiceError::Unprocessable(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ServiceError::Validation(errors) => json!({
                "message": "One or more validation errors occurred.",
                "errors": errors,
            }),
            _ if status.is_server_error() => {
                log::error!("Request failed: {self}");
                json!({ "message": "Internal server error" })
            }
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(status).json(body)
    }
}

/// Whether the request's `Accept` header asks for hypermedia links. A missing
/// header means plain JSON; a malformed one is a bad request.
pub fn wants_hateoas(req: &HttpRequest) -> Result<bool, ServiceError> {
    if !req.headers().contains_key(header::ACCEPT) {
        return Ok(false);
    }

    let accept = Accept::parse(req).map_err(|e| {
        log::error!("Failed to parse Accept header: {e}");
        ServiceError::BadRequest("Accept header is not a valid media type list".to_string())
    })?;

    Ok(accepts_hateoas(
        accept.iter().map(|media_type| media_type.item.essence_str()),
    ))
}

/// Turns a serialization or URL generation failure into a 500.
pub(crate) fn internal<E: std::fmt::Display>(err: E) -> ServiceError {
    ServiceError::Internal(err.to_string())
}

/// Body extractor settings: malformed JSON becomes a 400 with a JSON message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::error!("Failed to parse request body: {err}");
        ServiceError::BadRequest(err.to_string()).into()
    })
}

/// Query extractor settings, mirroring [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::error!("Failed to parse query string: {err}");
        ServiceError::BadRequest(err.to_string()).into()
    })
}

/// Registers every API resource under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(companies::get_company_collection)
            .service(companies::create_company_collection)
            .service(companies::get_companies)
            .service(companies::create_company)
            .service(companies::get_company)
            .service(companies::update_company)
            .service(companies::delete_company)
            .service(employees::get_employees_for_company)
            .service(employees::create_employee_for_company)
            .service(employees::get_employee_for_company)
            .service(employees::update_employee_for_company)
            .service(employees::partially_update_employee_for_company)
            .service(employees::delete_employee_for_company),
    );
}
