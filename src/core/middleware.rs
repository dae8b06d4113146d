// HTTP middleware stack

use crate::core::config::{Config, RuntimeMode};
use crate::core::error::internal_error_response;
use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::Response,
    Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-xss-protection", "0"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

/// Wrap the router with panic recovery, security headers, CORS and access logging.
///
/// Layers are added innermost first, so the access log sees the final response,
/// including 500s produced from caught panics.
pub fn apply(router: Router, config: &Config) -> Router {
    let mode = config.server.mode;

    let mut router = router.layer(CatchPanicLayer::custom(
        move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, mode),
    ));

    if config.http.security_headers {
        for (name, value) in SECURITY_HEADERS {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ));
        }
    }

    if config.http.cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods([
                    Method::GET,
                    Method::HEAD,
                    Method::PUT,
                    Method::PATCH,
                    Method::POST,
                    Method::DELETE,
                ]),
        );
    }

    // Development spans carry request headers; production keeps the access log terse
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(!mode.is_production()),
            )
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, mode: RuntimeMode) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    internal_error_response("Panic", &message, &message, mode)
}
