//! # REST API Module
//!
//! This module defines all HTTP endpoints for the multisig registry.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST / GET | `/multisigs` | Create / list multisigs |
//! | GET / PUT / DELETE | `/multisigs/:id` | Read / patch / delete a multisig |
//! | GET | `/multisigs/:id/vaults` | Vaults of a multisig |
//! | GET | `/multisigs/:id/members` | Members of a multisig |
//! | POST / GET | `/vaults` | Create / list vaults |
//! | GET / PUT / DELETE | `/vaults/:id` | Read / patch / delete a vault |
//! | POST / GET | `/members` | Create / list members |
//! | GET / PUT / DELETE | `/members/:id` | Read / patch / delete a member |
//!
//! ## List Parameters
//!
//! `q` (name substring), `sort` (`field` or `field:asc|desc`),
//! `page` (default 1), `page_size` (default 10).
//!
//! ## Request/Response Format
//!
//! Records are returned as plain JSON objects (or arrays of them).
//!
//! ```json
//! // Error response
//! { "error": "not found" }
//!
//! // Delete / health
//! { "status": "deleted" }
//! ```

pub mod routes;
pub mod handlers;

pub use routes::configure_routes;
