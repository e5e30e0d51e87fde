//! Services for the gateway operations.

pub mod directory_service;

pub use directory_service::DirectoryService;
