// Items module entry
// The single mock resource exposed by the API

mod handlers;
mod payload;
mod types;

pub use handlers::{create_item, delete_item, get_item, list_items, update_item, HandlerResult};
pub use payload::item_id;
pub use types::{Item, ItemList, Message};
