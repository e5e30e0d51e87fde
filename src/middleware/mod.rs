//! Request middleware.

pub mod caller;

pub use caller::{caller_context, CallerContext, CALLER_HEADER};
