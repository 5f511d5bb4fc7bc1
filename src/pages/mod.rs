//! Pages
//!
//! One component per route. Each page owns its state signal and a
//! controller built from the shared HTTP client.

mod create_item;
mod edit_item;
mod item_detail;
mod items_list;
mod logs;
mod not_found;

pub use create_item::CreateItemPage;
pub use edit_item::EditItemPage;
pub use item_detail::ItemDetailPage;
pub use items_list::ItemsListPage;
pub use logs::LogsPage;
pub use not_found::NotFoundPage;
