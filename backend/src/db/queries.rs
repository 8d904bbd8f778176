//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs a specific database operation.
//!
//! ## Query Organization
//!
//! - Generic helpers (`list_records`, `get_record`, `delete_record`,
//!   `list_by_multisig_address`) work on any [`Record`].
//! - `insert_*` / `update_*` are per table, since their column sets differ.
//!
//! ## List Queries
//!
//! `apply_list_query` appends search, sort and pagination to a
//! `SELECT ... FROM <table>` builder:
//!
//! ```text
//! SELECT <cols> FROM members
//!   WHERE name LIKE ? ESCAPE '\'  -- ?q=
//!   ORDER BY `created_at` DESC   -- ?sort=created_at:desc
//!   LIMIT ? OFFSET ?             -- ?page= & ?page_size=
//! ```
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Lookups return
//! `Ok(None)` for a missing row; updates return `NotFound` when the row
//! disappeared before the write.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info};

use super::models::*;
use super::DatabaseError;
use crate::models::{CreateMemberRequest, CreateMultisigRequest, CreateVaultRequest, ListQuery};

// ============================================
// LIST QUERY HELPER
// ============================================

/// Parsed `sort` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    /// Parse `field` or `field:direction`.
    ///
    /// The field is not checked against the table; an unknown column is
    /// reported by SQLite when the query runs. The direction must be
    /// `asc` or `desc` (any case). Segments after the second `:` are ignored.
    pub fn parse(raw: &str) -> Result<Self, DatabaseError> {
        let mut parts = raw.split(':');
        let field = parts.next().unwrap_or_default();
        let direction = parts.next().unwrap_or("asc");

        let field = field.trim();
        if field.is_empty() {
            return Err(DatabaseError::InvalidSort(format!(
                "missing sort field in '{}'",
                raw
            )));
        }

        let descending = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => false,
            "desc" => true,
            other => {
                return Err(DatabaseError::InvalidSort(format!(
                    "unknown sort direction '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }

    /// ORDER BY fragment with the field quoted as an identifier.
    ///
    /// Backtick quoting never degrades to a string literal in SQLite, so
    /// a bad column name fails instead of silently sorting by a constant.
    fn to_sql(&self) -> String {
        format!(
            "`{}` {}",
            self.field.replace('`', "``"),
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}

/// Append search, sort and pagination for `T` to a `SELECT` over `T::TABLE`.
///
/// - `q`: `WHERE <search column> LIKE %q%`, skipped when `T` has no
///   search column. `%` and `_` in `q` match literally.
/// - `sort`: `ORDER BY <field> <dir>`, with `id` as a tiebreaker so pages
///   do not overlap. Defaults to `ORDER BY id`.
/// - `page` / `page_size`: `LIMIT page_size OFFSET (page-1)*page_size`.
pub fn apply_list_query<T: Record>(
    query: &mut QueryBuilder<'_, Sqlite>,
    params: &ListQuery,
) -> Result<(), DatabaseError> {
    if let (Some(term), Some(column)) = (params.search(), T::SEARCH_COLUMN) {
        query
            .push(format!(" WHERE {} LIKE ", column))
            .push_bind(format!("%{}%", escape_like(term)))
            .push(" ESCAPE '\\'");
    }

    match params.sort() {
        Some(raw) => {
            let sort = SortSpec::parse(raw)?;
            query.push(format!(" ORDER BY {}, id ASC", sort.to_sql()));
        }
        None => {
            query.push(" ORDER BY id ASC");
        }
    }

    query
        .push(" LIMIT ")
        .push_bind(params.page_size())
        .push(" OFFSET ")
        .push_bind(params.offset());

    Ok(())
}

/// Escape the `LIKE` wildcards in `term` with `\`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ============================================
// GENERIC RECORD QUERIES
// ============================================

/// List rows of `T` filtered, sorted and paginated by `params`.
pub async fn list_records<T: Record>(
    pool: &SqlitePool,
    params: &ListQuery,
) -> Result<Vec<T>, DatabaseError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE));
    apply_list_query::<T>(&mut query, params)?;

    debug!("List query on {}: {}", T::TABLE, query.sql());

    let rows = query.build_query_as::<T>().fetch_all(pool).await?;
    Ok(rows)
}

/// Get a row of `T` by primary key.
pub async fn get_record<T: Record>(pool: &SqlitePool, id: i64) -> Result<Option<T>, DatabaseError> {
    debug!("Fetching {} id={}", T::TABLE, id);

    let row = sqlx::query_as::<_, T>(&format!(
        "SELECT {} FROM {} WHERE id = ?",
        T::COLUMNS,
        T::TABLE
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Delete a row of `T` by primary key.
///
/// Returns the number of rows removed (0 or 1).
pub async fn delete_record<T: Record>(pool: &SqlitePool, id: i64) -> Result<u64, DatabaseError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", T::TABLE))
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted {} id={} (rows affected: {})", T::TABLE, id, result.rows_affected());
    Ok(result.rows_affected())
}

/// All rows of `T` whose `multisig_address` equals `address`, in id order.
pub async fn list_by_multisig_address<T: LinkedToMultisig>(
    pool: &SqlitePool,
    address: &str,
) -> Result<Vec<T>, DatabaseError> {
    debug!("Fetching {} for multisig address {}", T::TABLE, address);

    let rows = sqlx::query_as::<_, T>(&format!(
        "SELECT {} FROM {} WHERE multisig_address = ? ORDER BY id ASC",
        T::COLUMNS,
        T::TABLE
    ))
    .bind(address)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ============================================
// MULTISIG QUERIES
// ============================================

/// Insert a multisig and return the stored row.
pub async fn insert_multisig(
    pool: &SqlitePool,
    input: &CreateMultisigRequest,
) -> Result<Multisig, DatabaseError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Multisig>(&format!(
        "INSERT INTO multisigs (multisig_address, name, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {}",
        Multisig::COLUMNS
    ))
    .bind(&input.multisig_address)
    .bind(&input.name)
    .bind(&input.description)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    info!("Multisig created: id={} address={}", row.id, row.multisig_address);
    Ok(row)
}

/// Persist every mutable field of `multisig` and refresh `updated_at`.
pub async fn update_multisig(
    pool: &SqlitePool,
    multisig: &Multisig,
) -> Result<Multisig, DatabaseError> {
    let row = sqlx::query_as::<_, Multisig>(&format!(
        "UPDATE multisigs
         SET multisig_address = ?, name = ?, description = ?, updated_at = ?
         WHERE id = ?
         RETURNING {}",
        Multisig::COLUMNS
    ))
    .bind(&multisig.multisig_address)
    .bind(&multisig.name)
    .bind(&multisig.description)
    .bind(Utc::now())
    .bind(multisig.id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| DatabaseError::NotFound(format!("multisig {}", multisig.id)))
}

// ============================================
// VAULT QUERIES
// ============================================

/// Insert a vault and return the stored row.
pub async fn insert_vault(
    pool: &SqlitePool,
    input: &CreateVaultRequest,
) -> Result<Vault, DatabaseError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Vault>(&format!(
        "INSERT INTO vaults (vault_address, multisig_address, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         RETURNING {}",
        Vault::COLUMNS
    ))
    .bind(&input.vault_address)
    .bind(&input.multisig_address)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    info!("Vault created: id={} address={}", row.id, row.vault_address);
    Ok(row)
}

/// Persist every mutable field of `vault` and refresh `updated_at`.
pub async fn update_vault(pool: &SqlitePool, vault: &Vault) -> Result<Vault, DatabaseError> {
    let row = sqlx::query_as::<_, Vault>(&format!(
        "UPDATE vaults
         SET vault_address = ?, multisig_address = ?, updated_at = ?
         WHERE id = ?
         RETURNING {}",
        Vault::COLUMNS
    ))
    .bind(&vault.vault_address)
    .bind(&vault.multisig_address)
    .bind(Utc::now())
    .bind(vault.id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| DatabaseError::NotFound(format!("vault {}", vault.id)))
}

// ============================================
// MEMBER QUERIES
// ============================================

/// Insert a member and return the stored row.
pub async fn insert_member(
    pool: &SqlitePool,
    input: &CreateMemberRequest,
) -> Result<Member, DatabaseError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, Member>(&format!(
        "INSERT INTO members (member_address, name, multisig_address, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {}",
        Member::COLUMNS
    ))
    .bind(&input.member_address)
    .bind(&input.name)
    .bind(&input.multisig_address)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    info!("Member created: id={} address={}", row.id, row.member_address);
    Ok(row)
}

/// Persist every mutable field of `member` and refresh `updated_at`.
pub async fn update_member(pool: &SqlitePool, member: &Member) -> Result<Member, DatabaseError> {
    let row = sqlx::query_as::<_, Member>(&format!(
        "UPDATE members
         SET member_address = ?, name = ?, multisig_address = ?, updated_at = ?
         WHERE id = ?
         RETURNING {}",
        Member::COLUMNS
    ))
    .bind(&member.member_address)
    .bind(&member.name)
    .bind(&member.multisig_address)
    .bind(Utc::now())
    .bind(member.id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| DatabaseError::NotFound(format!("member {}", member.id)))
}
