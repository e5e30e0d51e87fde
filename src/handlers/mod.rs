//! HTTP handlers for the Account Directory Gateway.

pub mod detail;
pub mod list;
pub mod purchase_orders;
pub mod rename;
pub mod update;

pub use detail::get_user_handler;
pub use list::list_users_handler;
pub use purchase_orders::purchase_order_count_handler;
pub use rename::rename_user_handler;
pub use update::update_user_handler;
