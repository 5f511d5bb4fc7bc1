//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod alert;
mod header;
mod item_card;
mod item_details;
mod item_form;
mod items_list;
mod loader;
mod modal;

pub use alert::Alert;
pub use header::Header;
pub use item_card::ItemCard;
pub use item_details::ItemDetails;
pub use item_form::ItemForm;
pub use items_list::ItemsList;
pub use loader::Loader;
pub use modal::Modal;
