//! Input validation helpers.

pub mod email;

pub use email::is_email_shaped;
