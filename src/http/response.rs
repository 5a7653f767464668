//! HTTP response building module
//!
//! Converts the router's envelope into a hyper response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::envelope;

/// Build a hyper response carrying the envelope's status, headers and body
pub fn build_envelope_response(env: envelope::Response) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(env.status_code);
    for (name, value) in &env.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(env.body)))
        .unwrap_or_else(|e| {
            log_build_error(env.status_code, &e);
            fallback_500()
        })
}

/// Bare 500 when even the builder rejects the envelope
fn fallback_500() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from(
        r#"{"error":"Internal Server Error"}"#,
    )));
    *resp.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

fn log_build_error(status: u16, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
