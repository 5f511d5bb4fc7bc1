//! Client Routes

use std::fmt;

use crate::models::ItemId;

/// Navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ItemList,
    NewItem,
    ItemDetail(ItemId),
    EditItem(ItemId),
    Logs,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ItemList => "/items".to_string(),
            Route::NewItem => "/items/new".to_string(),
            Route::ItemDetail(id) => format!("/items/{}", id),
            Route::EditItem(id) => format!("/items/{}/edit", id),
            Route::Logs => "/logs".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Parse the `:id` route parameter. Anything but a plain non-negative
/// integer is rejected.
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    raw.parse().ok()
}
