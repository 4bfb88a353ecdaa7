//! REST API module for the catalog server
//!
//! This module provides the HTTP endpoints the browsing UI consumes: one
//! read-only list endpoint per part category, plus a health check.

pub mod catalog_routes;

pub use catalog_routes::{create_router, ApiResponse, AppState};
