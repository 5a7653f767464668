//! Request routing dispatch module
//!
//! Maps (method, path) to an item handler and turns every outcome, including
//! handler errors and panics, into exactly one response envelope.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::envelope::{Request, Response};
use crate::error::ApiError;
use crate::items::{self, HandlerResult};
use crate::logger;

const COLLECTION: &str = "/items";
const MEMBER_PREFIX: &str = "/items/";

/// Item API router
///
/// Collaborators are passed in at construction; the router itself holds no
/// mutable state and is shared across connections by `Arc`.
#[derive(Clone)]
pub struct Router {
    clock: Arc<dyn Clock>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Router {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Handle one request; never fails
    pub fn handle(&self, req: &Request) -> Response {
        match catch_unwind(AssertUnwindSafe(|| self.dispatch(req))) {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => into_response(req, &err),
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                into_response(req, &ApiError::Internal(detail))
            }
        }
    }

    fn dispatch(&self, req: &Request) -> HandlerResult {
        let path = req.path.as_str();
        let member = path.starts_with(MEMBER_PREFIX);

        match req.method.as_str() {
            "OPTIONS" => Ok(Response::json(200, &items::Message::new("OK"))),
            "GET" if path == COLLECTION => items::list_items(),
            "GET" if member => items::get_item(req),
            "POST" if path == COLLECTION => items::create_item(req, self.clock.as_ref()),
            "PUT" if member => items::update_item(req, self.clock.as_ref()),
            "DELETE" if member => items::delete_item(req),
            _ => Ok(Response::not_found()),
        }
    }
}

/// Map a handler error to its envelope; only validation text reaches the caller
fn into_response(req: &Request, err: &ApiError) -> Response {
    match err {
        ApiError::Validation(message) => Response::error(err.status_code(), message),
        _ => {
            logger::log_error(&format!("{} {}: {err}", req.method, req.path));
            Response::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::CORS_HEADERS;
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde_json::json;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    struct PanickingClock;

    impl Clock for PanickingClock {
        fn now(&self) -> DateTime<Local> {
            panic!("clock unavailable")
        }
    }

    fn router() -> Router {
        Router::new(Arc::new(FixedClock(
            Local.timestamp_opt(1_700_000_000, 0).unwrap(),
        )))
    }

    fn call(method: &str, path: &str, body: Option<&str>) -> Response {
        let mut req = Request::new(method, path);
        req.body = body.map(String::from);
        router().handle(&req)
    }

    fn assert_cors(resp: &Response) {
        for (name, value) in CORS_HEADERS {
            assert_eq!(
                resp.headers.get(name).map(String::as_str),
                Some(value),
                "missing {name}"
            );
        }
    }

    #[test]
    fn test_options_on_any_path() {
        for path in ["/items", "/items/1", "/anything", ""] {
            let resp = call("OPTIONS", path, None);
            assert_eq!(resp.status_code, 200);
            assert_eq!(resp.body_json().unwrap(), json!({"message": "OK"}));
        }
    }

    #[test]
    fn test_list_items() {
        let resp = call("GET", "/items", None);
        assert_eq!(resp.status_code, 200);
        let body = resp.body_json().unwrap();
        let ids: Vec<_> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn test_get_item() {
        let resp = call("GET", "/items/42", None);
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body_json().unwrap()["id"], "42");
    }

    #[test]
    fn test_create_item() {
        let req = Request::new("POST", "/items").with_body(r#"{"name":"X"}"#);
        let resp = Router::default().handle(&req);
        assert_eq!(resp.status_code, 201);
        let body = resp.body_json().unwrap();
        assert_eq!(body["name"], "X");
        assert_eq!(body["description"], "");
        let id = body["id"].as_str().unwrap();
        assert!(id.contains('.'));
        assert!(id.parse::<f64>().is_ok());
        let created = body["createdAt"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(created, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn test_create_item_without_name() {
        let resp = call("POST", "/items", Some("{}"));
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.body_json().unwrap(), json!({"error": "Name is required"}));
        assert_cors(&resp);
    }

    #[test]
    fn test_update_item() {
        let resp = call("PUT", "/items/7", Some(r#"{"name":"Y","description":"Z"}"#));
        assert_eq!(resp.status_code, 200);
        let body = resp.body_json().unwrap();
        assert_eq!(body["id"], "7");
        assert_eq!(body["name"], "Y");
        assert_eq!(body["description"], "Z");
        let expected = crate::clock::iso_local(&Local.timestamp_opt(1_700_000_000, 0).unwrap());
        assert_eq!(body["updatedAt"], expected.as_str());
    }

    #[test]
    fn test_delete_item() {
        let resp = call("DELETE", "/items/5", None);
        assert_eq!(resp.status_code, 200);
        assert!(resp.body_json().unwrap()["message"].as_str().unwrap().contains('5'));
    }

    #[test]
    fn test_unmatched_routes() {
        for (method, path) in [
            ("PATCH", "/items"),
            ("POST", "/items/1"),
            ("PUT", "/items"),
            ("DELETE", "/items"),
            ("GET", "/item"),
            ("GET", "/itemsx"),
            ("get", "/items"),
        ] {
            let resp = call(method, path, None);
            assert_eq!(resp.status_code, 404, "{method} {path}");
            assert_eq!(resp.body_json().unwrap(), json!({"error": "Not Found"}));
        }
    }

    #[test]
    fn test_malformed_body_is_internal_error() {
        for body in ["{oops", "[1]", "42"] {
            let resp = call("POST", "/items", Some(body));
            assert_eq!(resp.status_code, 500);
            assert_eq!(
                resp.body_json().unwrap(),
                json!({"error": "Internal Server Error"})
            );
        }
        assert_eq!(call("PUT", "/items/1", Some("nope")).status_code, 500);
    }

    #[test]
    fn test_panic_is_internal_error() {
        let router = Router::new(Arc::new(PanickingClock));
        let resp = router.handle(&Request::new("POST", "/items").with_body(r#"{"name":"X"}"#));
        assert_eq!(resp.status_code, 500);
        assert!(!resp.body.contains("clock unavailable"));
        assert_cors(&resp);
    }

    #[test]
    fn test_every_response_has_cors_headers() {
        let cases = [
            ("OPTIONS", "/x", None),
            ("GET", "/items", None),
            ("GET", "/items/1", None),
            ("POST", "/items", Some(r#"{"name":"a"}"#)),
            ("POST", "/items", Some("{}")),
            ("POST", "/items", Some("{")),
            ("PUT", "/items/1", None),
            ("DELETE", "/items/1", None),
            ("PATCH", "/items", None),
        ];
        for (method, path, body) in cases {
            assert_cors(&call(method, path, body));
        }
    }
}
