// Item resource types
// Wire shapes returned by the item handlers

use serde::Serialize;

/// Mock item; fabricated per call, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn created_at(mut self, at: String) -> Self {
        self.created_at = Some(at);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, at: String) -> Self {
        self.updated_at = Some(at);
        self
    }
}

/// `{"items": [...]}`
#[derive(Debug, Serialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
