//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod feed;
pub mod group;
pub mod health;
pub mod post;
