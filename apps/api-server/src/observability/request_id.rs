//! Echo the request ID assigned by `TracingLogger` back to the client.

use actix_web::body::{self, BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};
use quill_shared::{ErrorResponse, PROBLEM_JSON};
use tracing_actix_web::RequestId;

/// Header carrying the request ID on every response.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Must sit inside `TracingLogger`, which stores the [`RequestId`] in the
/// request extensions.
///
/// Problem details responses also get the ID and the request path stamped
/// into their `request_id` and `instance` members.
pub async fn echo_request_id<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    let request_id = req.extensions().get::<RequestId>().copied();

    let res = next.call(req).await?;

    let Some(request_id) = request_id else {
        return Ok(res.map_into_boxed_body());
    };

    let mut res = if is_problem(&res) {
        stamp_problem(res, &request_id.to_string()).await?
    } else {
        res.map_into_boxed_body()
    };

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    Ok(res)
}

fn is_problem<B>(res: &ServiceResponse<B>) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value == PROBLEM_JSON)
}

async fn stamp_problem<B>(
    res: ServiceResponse<B>,
    request_id: &str,
) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    let instance = res.request().path().to_string();
    let (req, res) = res.into_parts();
    let (res, payload) = res.into_parts();

    let bytes = body::to_bytes(payload)
        .await
        .map_err(|_| actix_web::error::ErrorInternalServerError("unreadable error body"))?;

    // Bodies that do not parse as problem details pass through untouched.
    let stamped = serde_json::from_slice::<ErrorResponse>(&bytes)
        .ok()
        .map(|problem| problem.with_request_id(request_id).with_instance(instance))
        .and_then(|problem| serde_json::to_vec(&problem).ok())
        .unwrap_or_else(|| bytes.to_vec());

    Ok(ServiceResponse::new(req, res.set_body(stamped).map_into_boxed_body()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::{App, test, web};
    use serde_json::Value;
    use tracing_actix_web::TracingLogger;

    use super::*;
    use crate::handlers::configure_routes;
    use crate::state::AppState;

    #[actix_rt::test]
    async fn test_problem_body_carries_request_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(echo_request_id))
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let path = format!("/api/posts/{}", uuid::Uuid::new_v4());
        let req = test::TestRequest::get().uri(&path).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            PROBLEM_JSON
        );
        let header = resp
            .headers()
            .get(&REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["request_id"], header.as_str());
        assert_eq!(problem["instance"], path.as_str());
        assert_eq!(problem["status"], 404);
    }

    #[actix_rt::test]
    async fn test_success_body_is_left_alone() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(echo_request_id))
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(&REQUEST_ID_HEADER));
        let body: Value = test::read_body_json(resp).await;
        assert!(body.get("request_id").is_none());
        assert_eq!(body["success"], true);
    }
}
