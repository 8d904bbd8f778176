//! # API Request Models
//!
//! Structures for incoming API request bodies and query strings.
//! Each struct represents the expected JSON body for an endpoint.
//!
//! Create bodies fill omitted fields with empty strings. Update bodies
//! are patches: a field that is absent (or `null`) keeps its stored value.
//! `id`, `created_at` and `updated_at` are never taken from a body.

use serde::Deserialize;

use crate::db::{Member, Multisig, Vault};

/// Default page number when `page` is missing or not a number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when `page_size` is missing or not a number.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Query parameters accepted by every list endpoint.
///
/// ## Example URL
///
/// ```text
/// GET /members?q=alice&sort=created_at:desc&page=2&page_size=20
/// ```
///
/// `page` and `page_size` are kept as raw strings so that a malformed
/// number falls back to its default instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Substring matched against the `name` column.
    pub q: Option<String>,

    /// `field` or `field:asc|desc`.
    pub sort: Option<String>,

    /// 1-based page number.
    pub page: Option<String>,

    /// Rows per page.
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Build from decoded query string pairs.
    ///
    /// When a key repeats, the first value wins. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut query.q,
                "sort" => &mut query.sort,
                "page" => &mut query.page,
                "page_size" => &mut query.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Search term, if one was given and is non-empty.
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }

    /// Sort expression, if one was given and is non-empty.
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref().filter(|s| !s.is_empty())
    }

    /// Page number, floored to 1.
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE).max(1)
    }

    /// Page size, floored to 1. There is no upper bound.
    pub fn page_size(&self) -> i64 {
        parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE).max(1)
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// ============================================
// MULTISIG
// ============================================

/// Body of `POST /multisigs`.
///
/// ## Example JSON
///
/// ```json
/// {
///     "multisig_address": "addr1",
///     "name": "Treasury",
///     "description": "Main treasury multisig"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateMultisigRequest {
    pub multisig_address: String,
    pub name: String,
    pub description: String,
}

/// Body of `PUT /multisigs/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMultisigRequest {
    pub multisig_address: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateMultisigRequest {
    /// Overwrite the fields present in this patch.
    pub fn apply_to(self, multisig: &mut Multisig) {
        if let Some(address) = self.multisig_address {
            multisig.multisig_address = address;
        }
        if let Some(name) = self.name {
            multisig.name = name;
        }
        if let Some(description) = self.description {
            multisig.description = description;
        }
    }
}

// ============================================
// VAULT
// ============================================

/// Body of `POST /vaults`.
///
/// ## Example JSON
///
/// ```json
/// {
///     "vault_address": "vaddr1",
///     "multisig_address": "addr1"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateVaultRequest {
    pub vault_address: String,

    /// Not checked against existing multisigs.
    pub multisig_address: String,
}

/// Body of `PUT /vaults/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateVaultRequest {
    pub vault_address: Option<String>,
    pub multisig_address: Option<String>,
}

impl UpdateVaultRequest {
    /// Overwrite the fields present in this patch.
    pub fn apply_to(self, vault: &mut Vault) {
        if let Some(address) = self.vault_address {
            vault.vault_address = address;
        }
        if let Some(multisig_address) = self.multisig_address {
            vault.multisig_address = multisig_address;
        }
    }
}

// ============================================
// MEMBER
// ============================================

/// Body of `POST /members`.
///
/// ## Example JSON
///
/// ```json
/// {
///     "member_address": "maddr1",
///     "name": "Alice",
///     "multisig_address": "addr1"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateMemberRequest {
    pub member_address: String,
    pub name: String,

    /// Not checked against existing multisigs.
    pub multisig_address: String,
}

/// Body of `PUT /members/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMemberRequest {
    pub member_address: Option<String>,
    pub name: Option<String>,
    pub multisig_address: Option<String>,
}

impl UpdateMemberRequest {
    /// Overwrite the fields present in this patch.
    pub fn apply_to(self, member: &mut Member) {
        if let Some(address) = self.member_address {
            member.member_address = address;
        }
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(multisig_address) = self.multisig_address {
            member.multisig_address = multisig_address;
        }
    }
}
