//! Common test utilities for REST API testing.
//!
//! - [`harness`] - REST API test harness over an in-memory SQLite backend
//! - [`fixtures`] - Patient payload fixtures

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
