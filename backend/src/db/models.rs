//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! Each struct represents a row in a table.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `multisigs` | Multisig groups, keyed by `id`, addressed by `multisig_address` |
//! | `vaults` | Vault addresses belonging to a multisig |
//! | `members` | Signers belonging to a multisig |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │    multisigs     │        │      vaults      │
//! │                  │        │                  │
//! │ id (PK)          │        │ id (PK)          │
//! │ multisig_address │╌╌╌╌╌╌╌<│ multisig_address │
//! │ name             │   ╎    │ vault_address    │
//! └──────────────────┘   ╎    └──────────────────┘
//!                        ╎    ┌──────────────────┐
//!                        ╎    │     members      │
//!                        └╌╌╌<│ multisig_address │
//!                             │ member_address   │
//!                             │ name             │
//!                             └──────────────────┘
//! ```
//!
//! The dashed links are matched by value only. Nothing stops a vault or
//! member from naming a multisig address that has no row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// A table that can be listed, fetched and deleted through the generic
/// helpers in [`super::queries`].
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Table name.
    const TABLE: &'static str;

    /// Column list used in every SELECT / RETURNING clause.
    const COLUMNS: &'static str;

    /// Column matched by the `q` search parameter, if the table has one.
    const SEARCH_COLUMN: Option<&'static str>;
}

/// Records that carry a `multisig_address` column.
pub trait LinkedToMultisig: Record {}

/// A multisig group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Multisig {
    /// Auto-incrementing primary key.
    pub id: i64,

    /// On-chain address of the multisig. Vaults and members join on it.
    pub multisig_address: String,

    /// Display name, matched by `?q=`.
    pub name: String,

    pub description: String,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

impl Record for Multisig {
    const TABLE: &'static str = "multisigs";
    const COLUMNS: &'static str =
        "id, multisig_address, name, description, created_at, updated_at";
    const SEARCH_COLUMN: Option<&'static str> = Some("name");
}

/// A vault controlled by a multisig.
///
/// Vaults have no `name`, so `?q=` does not filter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vault {
    pub id: i64,
    pub vault_address: String,
    pub multisig_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Vault {
    const TABLE: &'static str = "vaults";
    const COLUMNS: &'static str = "id, vault_address, multisig_address, created_at, updated_at";
    const SEARCH_COLUMN: Option<&'static str> = None;
}

impl LinkedToMultisig for Vault {}

/// A signer of a multisig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i64,
    pub member_address: String,
    pub name: String,
    pub multisig_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Member {
    const TABLE: &'static str = "members";
    const COLUMNS: &'static str =
        "id, member_address, name, multisig_address, created_at, updated_at";
    const SEARCH_COLUMN: Option<&'static str> = Some("name");
}

impl LinkedToMultisig for Member {}
