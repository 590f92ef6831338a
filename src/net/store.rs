//! Data-store access through the `PostgREST` interface.
//!
//! DESIGN
//! ======
//! `Query` renders filters to the query-string pairs `PostgREST` expects
//! (`column=eq.value`, `order=column.asc`, `limit=n`), so the wire shape
//! is testable without a browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::supabase::{ApiCall, HttpMethod, SupabaseClient, rest_url};
use super::types::{NewSupportMessage, Profile, SupportMessage};

pub const SUPPORT_MESSAGES: &str = "support_messages";
pub const PROFILES: &str = "profiles";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Filter, ordering and paging for one table read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_owned());
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_owned(), order));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), self.select.clone().unwrap_or_else(|| "*".to_owned()))];
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, order)) = &self.order {
            let dir = match order {
                Order::Asc => "asc",
                Order::Desc => "desc",
            };
            pairs.push(("order".to_owned(), format!("{column}.{dir}")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        pairs
    }
}

/// Read rows of `table` matching `query`.
///
/// # Errors
///
/// Returns any transport, status, or decode failure.
pub async fn select<T: DeserializeOwned>(
    client: &SupabaseClient,
    token: Option<&str>,
    table: &str,
    query: &Query,
) -> Result<Vec<T>, BackendError> {
    let base = &client.config()?.supabase_url;
    let context = format!("select {table}");
    let call = ApiCall::new(HttpMethod::Get, rest_url(base, table), &context)
        .token(token)
        .query(query.to_pairs());
    client.send(call).await
}

/// Insert one row and return it as stored.
///
/// # Errors
///
/// Returns any transport, status, or decode failure, or `Decode` when the
/// backend echoes no row.
pub async fn insert<R: Serialize, T: DeserializeOwned>(
    client: &SupabaseClient,
    token: Option<&str>,
    table: &str,
    row: &R,
) -> Result<T, BackendError> {
    write_one(client, token, table, row, "return=representation").await
}

/// Insert or update one row keyed by its primary key.
///
/// # Errors
///
/// Same as [`insert`].
pub async fn upsert<R: Serialize, T: DeserializeOwned>(
    client: &SupabaseClient,
    token: Option<&str>,
    table: &str,
    row: &R,
) -> Result<T, BackendError> {
    write_one(client, token, table, row, "resolution=merge-duplicates,return=representation").await
}

async fn write_one<R: Serialize, T: DeserializeOwned>(
    client: &SupabaseClient,
    token: Option<&str>,
    table: &str,
    row: &R,
    prefer: &str,
) -> Result<T, BackendError> {
    let base = &client.config()?.supabase_url;
    let context = format!("write {table}");
    let body = serde_json::to_value(row).map_err(|e| BackendError::Decode { context: context.clone(), message: e.to_string() })?;
    let call = ApiCall::new(HttpMethod::Post, rest_url(base, table), &context)
        .token(token)
        .header("Prefer", prefer)
        .json(body);
    let rows: Vec<T> = client.send(call).await?;
    first_row(&context, rows)
}

fn first_row<T>(context: &str, rows: Vec<T>) -> Result<T, BackendError> {
    rows.into_iter().next().ok_or_else(|| BackendError::Decode {
        context: context.to_owned(),
        message: "no row returned".to_owned(),
    })
}

// =============================================================================
// TABLE HELPERS
// =============================================================================

/// Oldest-first support conversation for `user_id`.
#[must_use]
pub fn support_history_query(user_id: &str) -> Query {
    Query::new().eq("user_id", user_id).order("created_at", Order::Asc).limit(200)
}

/// # Errors
///
/// Returns any select failure.
pub async fn load_support_messages(client: &SupabaseClient, token: &str, user_id: &str) -> Result<Vec<SupportMessage>, BackendError> {
    select(client, Some(token), SUPPORT_MESSAGES, &support_history_query(user_id)).await
}

/// # Errors
///
/// Returns any insert failure.
pub async fn send_support_message(client: &SupabaseClient, token: &str, message: &NewSupportMessage) -> Result<SupportMessage, BackendError> {
    insert(client, Some(token), SUPPORT_MESSAGES, message).await
}

/// Profile row for `user_id`; `None` before the first upsert.
///
/// # Errors
///
/// Returns any select failure.
pub async fn load_profile(client: &SupabaseClient, token: &str, user_id: &str) -> Result<Option<Profile>, BackendError> {
    let rows: Vec<Profile> = select(client, Some(token), PROFILES, &Query::new().eq("id", user_id).limit(1)).await?;
    Ok(rows.into_iter().next())
}

/// # Errors
///
/// Returns any upsert failure.
pub async fn save_profile(client: &SupabaseClient, token: &str, profile: &Profile) -> Result<Profile, BackendError> {
    upsert(client, Some(token), PROFILES, profile).await
}
