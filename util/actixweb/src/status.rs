use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;

use healthpoint_status::HealthPoint;
use healthpoint_status::HealthResponse;
use healthpoint_status::Query;

/// Resource path status queries are served from.
pub const STATUS_RESOURCE: &str = "/status/{token}";

/// Resource for sub-paths deeper than the token; the tail is ignored.
const STATUS_NESTED_RESOURCE: &str = "/status/{token}/{tail:.*}";

/// Resource for the status root, answered as an unknown endpoint.
const STATUS_ROOT_RESOURCE: &str = "/status/";

/// Register the status resources with an Actix Web application.
///
/// The application must provide the `HealthPoint` as `web::Data`.
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(web::resource(STATUS_RESOURCE).route(web::get().to(status_query)))
        .service(web::resource(STATUS_NESTED_RESOURCE).route(web::get().to(status_query)))
        .service(web::resource(STATUS_ROOT_RESOURCE).route(web::get().to(status_query)));
}

/// Convert a protocol independent `HealthResponse` into an Actix Web response.
pub fn into_http_response(response: HealthResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type(response.content_type)
        .body(response.body)
}

/// Collapse query pairs into a map where the first value of a repeated key wins.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

async fn status_query(
    healthpoint: web::Data<HealthPoint>,
    params: web::Query<Vec<(String, String)>>,
    request: HttpRequest,
) -> HttpResponse {
    let params = first_values(params.into_inner());
    let token = request.match_info().get("token").unwrap_or("");
    let query = Query::from_request(token, &params, request.path());
    into_http_response(healthpoint.dispatch(query).await)
}
