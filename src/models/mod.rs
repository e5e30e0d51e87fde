//! Request, response and record models for the gateway.

pub mod requests;
pub mod responses;
pub mod user;

pub use requests::{ListUsersQuery, RenameUserRequest, UpdateUserRequest};
pub use responses::{PurchaseOrderCount, RenameUserResponse, UpdateUserResponse, UserDetail};
pub use user::{RoleAssignment, UserRecord, UserSummary, MASKED_PASSWORD};
