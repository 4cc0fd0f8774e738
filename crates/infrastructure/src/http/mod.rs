//! HTTP transport adapter.
//!
//! This module provides:
//! - Outbound request assembly from settings and a query descriptor
//! - The executing client owning the configured transport

mod client;
mod request;

pub use client::{ClientBuildError, HttpQueryClient};
pub use request::{RequestBuildError, build_request};
