//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models so that create and update bodies
//! can never carry `id` or timestamps.
//!
//! ## Organization
//!
//! - `requests.rs` - Incoming request bodies and list query parameters
//! - `responses.rs` - Error and status envelopes
//!
//! ## Serialization
//!
//! All models use Serde for JSON serialization/deserialization.
//! Field names stay snake_case, matching the database columns.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
