use actix_web::http::{Method, StatusCode, header};
use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use company_employees::routes;
use serde_json::{Value, json};

mod common;

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(routes::json_config())
                .app_data(routes::query_config())
                .app_data(web::Data::new($test_db.repository()))
                .configure(routes::configure),
        )
        .await
    };
}

/// Creates the sample company and evaluates to its employees URI.
macro_rules! seed_employees {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/companies")
            .set_json(company_payload("Sample"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&$app, req).await;
        format!("/api/companies/{}/employees", created["id"].as_str().unwrap())
    }};
}

/// Path and query of an absolute URL produced by the server.
fn path_of(location: &str) -> String {
    let (_, rest) = location.split_once("/api").expect("location outside /api");
    format!("/api{rest}")
}

fn header_str<'a, B>(resp: &'a ServiceResponse<B>, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
}

fn company_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "583 Wall Dr. Gwynn Oak, MD 21207",
        "country": "USA",
        "employees": [
            { "name": "Dan", "age": 50, "position": "Operations" },
            { "name": "Cid", "age": 40, "position": "Developer" },
            { "name": "Bea", "age": 30, "position": "Senior developer" },
            { "name": "Abe", "age": 20, "position": "QA" }
        ]
    })
}

#[actix_web::test]
async fn test_create_and_fetch_company() {
    let test_db = common::TestDb::new("test_create_and_fetch_company.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies")
        .set_json(company_payload("IT_Solutions"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = path_of(header_str(&resp, "Location"));
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(location, format!("/api/companies/{}", created["id"].as_str().unwrap()));
    assert_eq!(created["fullAddress"], "583 Wall Dr. Gwynn Oak, MD 21207 USA");

    let req = test::TestRequest::get().uri(&location).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get().uri("/api/companies").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_null_company_is_bad_request_and_creates_nothing() {
    let test_db = common::TestDb::new("test_null_company.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies")
        .set_json(Value::Null)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "CompanyForCreationDto object is null");

    let req = test::TestRequest::get().uri("/api/companies").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn test_invalid_company_is_unprocessable() {
    let test_db = common::TestDb::new("test_invalid_company.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies")
        .set_json(json!({ "address": "Somewhere" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"].get("name").is_some());
}

#[actix_web::test]
async fn test_whitespace_only_fields_are_unprocessable() {
    let test_db = common::TestDb::new("test_whitespace_only_fields.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies")
        .set_json(json!({ "name": "   ", "address": "1 Main St" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"].get("name").is_some());

    let employees_uri = seed_employees!(app);
    let company_uri = employees_uri.trim_end_matches("/employees").to_string();

    let req = test::TestRequest::put()
        .uri(&company_uri)
        .set_json(json!({ "name": "Sample", "address": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri(&employees_uri)
        .set_json(json!({ "name": "Eve", "age": 28, "position": " " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get().uri(&company_uri).to_request();
    let company: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(company["name"], "Sample");
}

#[actix_web::test]
async fn test_unknown_company_is_not_found() {
    common::capture_logs();
    let test_db = common::TestDb::new("test_unknown_company.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/companies/3d490a70-94ce-4d15-9494-5248280c2ce3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let messages = common::logged(log::Level::Info, "3d490a70-94ce-4d15-9494-5248280c2ce3");
    assert_eq!(
        messages.first().map(String::as_str),
        Some("Company with id: 3d490a70-94ce-4d15-9494-5248280c2ce3 doesn't exist in the database.")
    );

    let req = test::TestRequest::get()
        .uri("/api/companies/3d490a70-94ce-4d15-9494-5248280c2ce3/employees")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_company_collection_round_trip() {
    let test_db = common::TestDb::new("test_company_collection.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies/collection")
        .set_json(json!([
            { "name": "First", "address": "1 Main St" },
            { "name": "Second", "address": "2 Main St" }
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = path_of(header_str(&resp, "Location"));
    assert!(location.starts_with("/api/companies/collection/("));

    let req = test::TestRequest::get().uri(&location).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let companies: Value = test::read_body_json(resp).await;
    assert_eq!(companies.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/companies/collection/(3d490a70-94ce-4d15-9494-5248280c2ce3)")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/companies/collection/(not-an-id)")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_and_delete_company() {
    let test_db = common::TestDb::new("test_update_and_delete_company.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/companies")
        .set_json(json!({ "name": "Old", "address": "1 Main St" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/companies/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "name": "New",
            "address": "2 Main St",
            "employees": [{ "name": "Ann", "age": 30, "position": "Dev" }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("{uri}/employees")).to_request();
    let employees: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(employees[0]["name"], "Ann");

    let req = test::TestRequest::put().uri(&uri).set_json(Value::Null).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_employee_listing_filters_and_pages() {
    let test_db = common::TestDb::new("test_employee_listing.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?minAge=25&maxAge=45"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let metadata: Value = serde_json::from_str(header_str(&resp, "X-Pagination")).unwrap();
    assert_eq!(metadata["totalCount"], 2);
    let body: Value = test::read_body_json(resp).await;
    let names: Vec<_> = body.as_array().unwrap().iter().map(|e| e["name"].clone()).collect();
    assert_eq!(names, vec![json!("Bea"), json!("Cid")]);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?searchTerm=DEVELOPER&orderBy=age%20desc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ages: Vec<_> = body.as_array().unwrap().iter().map(|e| e["age"].clone()).collect();
    assert_eq!(ages, vec![json!(40), json!(30)]);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?pageNumber=99&pageSize=2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let metadata: Value = serde_json::from_str(header_str(&resp, "X-Pagination")).unwrap();
    assert_eq!(metadata["totalPages"], 2);
    assert_eq!(metadata["hasNext"], false);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_inverted_age_range_is_bad_request() {
    let test_db = common::TestDb::new("test_inverted_age_range.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?minAge=50&maxAge=20"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Max age can't be less than min age.");
}

#[actix_web::test]
async fn test_employee_listing_shapes_fields() {
    let test_db = common::TestDb::new("test_employee_shaping.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?fields=NAME,age&pageSize=1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([{ "name": "Abe", "age": 20 }]));
}

#[actix_web::test]
async fn test_employee_listing_with_hateoas_links() {
    let test_db = common::TestDb::new("test_employee_hateoas.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::get()
        .uri(&format!("{employees_uri}?pageSize=1"))
        .insert_header((
            header::ACCEPT,
            "application/vnd.companyemployees.hateoas+json",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let employee = &body["value"][0];
    let links = employee["links"].as_array().unwrap();
    assert_eq!(links.len(), 4);
    assert!(
        links[0]["href"]
            .as_str()
            .unwrap()
            .ends_with(&format!("{employees_uri}/{}", employee["id"].as_str().unwrap()))
    );
    assert!(body["links"][0]["href"].as_str().unwrap().ends_with(&employees_uri));
}

#[actix_web::test]
async fn test_head_returns_pagination_header() {
    let test_db = common::TestDb::new("test_head_employees.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::default()
        .method(Method::HEAD)
        .uri(&employees_uri)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let metadata: Value = serde_json::from_str(header_str(&resp, "X-Pagination")).unwrap();
    assert_eq!(metadata["totalCount"], 4);
}

#[actix_web::test]
async fn test_employee_crud_and_patch() {
    let test_db = common::TestDb::new("test_employee_crud.db");
    let app = init_app!(test_db);
    let employees_uri = seed_employees!(app);

    let req = test::TestRequest::post()
        .uri(&employees_uri)
        .set_json(json!({ "name": "Eve", "age": 28, "position": "Designer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let employee_uri = path_of(header_str(&resp, "Location"));

    let patch = |body: Value| {
        test::TestRequest::patch()
            .uri(&employee_uri)
            .insert_header((header::CONTENT_TYPE, "application/json-patch+json"))
            .set_payload(body.to_string())
            .to_request()
    };

    let resp = test::call_service(
        &app,
        patch(json!([{ "op": "replace", "path": "/age", "value": 29 }])),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&employee_uri).to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(employee["age"], 29);
    assert_eq!(employee["name"], "Eve");

    let resp = test::call_service(&app, patch(json!([{ "op": "remove", "path": "/name" }]))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = test::call_service(&app, patch(Value::Null)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&employee_uri)
        .set_json(json!({ "name": "Eve Adams", "age": 30, "position": "Lead designer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::put()
        .uri(&employee_uri)
        .set_json(json!({ "name": "Eve Adams", "age": 12, "position": "Lead designer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::delete().uri(&employee_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&employee_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        patch(json!([{ "op": "replace", "path": "/age", "value": 31 }])),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
