//! HTTP request handlers for the patient registry.
//!
//! - [`create`] - Validate and register a patient
//! - [`list`] - List every patient, newest first
//! - [`read`] - Read a patient by id
//! - [`delete`] - Delete a patient by id
//! - [`health`] - Health check endpoint
//! - [`fallback`] - Unmatched routes and methods

pub mod create;
pub mod delete;
pub mod fallback;
pub mod health;
pub mod list;
pub mod read;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use fallback::route_not_found_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use read::read_handler;
