// Item handlers module
// Mock CRUD handlers: each call fabricates its data, nothing is stored

use super::payload::{as_text, is_truthy, item_id, parse_object, text_or};
use super::types::{Item, ItemList, Message};
use crate::clock::{iso_local, timestamp_id, Clock};
use crate::envelope::{Request, Response};
use crate::error::ApiError;

pub type HandlerResult = Result<Response, ApiError>;

/// GET /items
#[allow(clippy::unnecessary_wraps)]
pub fn list_items() -> HandlerResult {
    let list = ItemList {
        items: vec![
            Item::new("1", "Item 1", "First item"),
            Item::new("2", "Item 2", "Second item"),
        ],
    };
    Ok(Response::json(200, &list))
}

/// GET /items/{id}
#[allow(clippy::unnecessary_wraps)]
pub fn get_item(req: &Request) -> HandlerResult {
    let id = item_id(&req.path);
    let item = Item::new(id, format!("Item {id}"), "Sample item");
    Ok(Response::json(200, &item))
}

/// POST /items
pub fn create_item(req: &Request, clock: &dyn Clock) -> HandlerResult {
    let body = parse_object(req.body.as_deref())?;

    let name = match body.get("name") {
        Some(value) if is_truthy(value) => as_text(value),
        _ => return Err(ApiError::Validation("Name is required".to_string())),
    };

    let now = clock.now();
    let item = Item::new(timestamp_id(&now), name, text_or(&body, "description", ""))
        .created_at(iso_local(&now));
    Ok(Response::json(201, &item))
}

/// PUT /items/{id}
pub fn update_item(req: &Request, clock: &dyn Clock) -> HandlerResult {
    let id = item_id(&req.path);
    let body = parse_object(req.body.as_deref())?;

    let item = Item::new(
        id,
        text_or(&body, "name", "Updated Item"),
        text_or(&body, "description", ""),
    )
    .updated_at(iso_local(&clock.now()));
    Ok(Response::json(200, &item))
}

/// DELETE /items/{id}
#[allow(clippy::unnecessary_wraps)]
pub fn delete_item(req: &Request) -> HandlerResult {
    let id = item_id(&req.path);
    Ok(Response::json(
        200,
        &Message::new(format!("Item {id} deleted successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use serde_json::json;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn fixed() -> FixedClock {
        FixedClock(Local.timestamp_opt(1_700_000_000, 250_000_000).unwrap())
    }

    #[test]
    fn test_list_items() {
        let resp = list_items().unwrap();
        assert_eq!(resp.status_code, 200);
        let body = resp.body_json().unwrap();
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items"][0]["id"], "1");
        assert_eq!(body["items"][1]["description"], "Second item");
    }

    #[test]
    fn test_get_item_echoes_id() {
        let resp = get_item(&Request::new("GET", "/items/abc")).unwrap();
        assert_eq!(
            resp.body_json().unwrap(),
            json!({"id": "abc", "name": "Item abc", "description": "Sample item"})
        );
    }

    #[test]
    fn test_create_item_uses_clock() {
        let req = Request::new("POST", "/items").with_body(r#"{"name":"X","description":"D"}"#);
        let resp = create_item(&req, &fixed()).unwrap();
        assert_eq!(resp.status_code, 201);
        let body = resp.body_json().unwrap();
        assert_eq!(body["id"], "1700000000.25");
        assert_eq!(body["name"], "X");
        assert_eq!(body["description"], "D");
        assert!(body["createdAt"].as_str().unwrap().ends_with(".250000"));
        assert!(body.get("updatedAt").is_none());
    }

    #[test]
    fn test_create_item_requires_truthy_name() {
        let bodies = [
            None,
            Some("{}"),
            Some(r#"{"name":""}"#),
            Some(r#"{"name":null}"#),
            Some(r#"{"name":0}"#),
        ];
        for raw in bodies {
            let mut req = Request::new("POST", "/items");
            req.body = raw.map(String::from);
            let err = create_item(&req, &fixed()).unwrap_err();
            assert!(matches!(err, ApiError::Validation(ref m) if m == "Name is required"));
        }
    }

    #[test]
    fn test_create_item_malformed_body() {
        let req = Request::new("POST", "/items").with_body("name=X");
        assert!(matches!(
            create_item(&req, &fixed()),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_update_item_defaults() {
        let req = Request::new("PUT", "/items/7").with_body("{}");
        let body = update_item(&req, &fixed()).unwrap().body_json().unwrap();
        assert_eq!(body["id"], "7");
        assert_eq!(body["name"], "Updated Item");
        assert_eq!(body["description"], "");
        assert!(body["updatedAt"].is_string());
        assert!(body.get("createdAt").is_none());
    }

    #[test]
    fn test_update_item_keeps_empty_name() {
        let req = Request::new("PUT", "/items/7").with_body(r#"{"name":""}"#);
        let body = update_item(&req, &fixed()).unwrap().body_json().unwrap();
        assert_eq!(body["name"], "");
    }

    #[test]
    fn test_delete_item_message() {
        let resp = delete_item(&Request::new("DELETE", "/items/5")).unwrap();
        assert_eq!(
            resp.body_json().unwrap()["message"],
            "Item 5 deleted successfully"
        );
    }
}
