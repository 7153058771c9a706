//! Router assembly and the middleware stack shared by every route.

mod common;
mod trivia;

pub use common::common_routes;
pub use trivia::trivia_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Full application: trivia and common routes, JSON error envelopes for unmatched
/// paths and verbs, CORS, request tracing, body limit and panic recovery.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(trivia_routes(state))
        .fallback(unmatched_route)
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(middleware::map_response(envelope_framework_errors))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

/// Any origin; headers `Content-Type, Authorization, true`; methods `GET, PATCH, POST, DELETE, OPTIONS`.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, HeaderName::from_static("true")])
        .allow_methods([Method::GET, Method::PATCH, Method::POST, Method::DELETE, Method::OPTIONS])
}

async fn unmatched_route() -> AppError {
    AppError::NotFound("no such route".into())
}

/// The router answers an unsupported verb with an empty 405 and the body limit
/// rejects an oversized `Content-Length` with a plain-text 413; give both the envelope.
async fn envelope_framework_errors(response: Response) -> Response {
    match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            let mut enveloped = AppError::MethodNotAllowed.into_response();
            if let Some(allow) = response.headers().get(header::ALLOW) {
                enveloped.headers_mut().insert(header::ALLOW, allow.clone());
            }
            enveloped
        }
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge.into_response(),
        _ => response,
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
