//! Object storage for avatar images.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use super::error::BackendError;
use serde_json::{Value, json};

use super::supabase::{ApiCall, HttpMethod, SupabaseClient, public_object_url, storage_bucket_url, storage_object_url};

/// Largest avatar accepted for upload.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Object path for a user's avatar: `{user_id}/avatar-{version}.{ext}`.
///
/// Each upload gets a fresh `version` (upload time in millis) so the public
/// URL changes and cached copies of the old image are not reused. The
/// extension comes from the uploaded file name, lowercased, and falls back
/// to `png` when missing or not an image type.
#[must_use]
pub fn avatar_object_path(user_id: &str, file_name: &str, version: i64) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp"))
        .unwrap_or_else(|| "png".to_owned());
    format!("{user_id}/avatar-{version}.{ext}")
}

/// Public URL of an object in `bucket`.
///
/// # Errors
///
/// Returns `NotConfigured` without a project URL.
pub fn public_url(client: &SupabaseClient, bucket: &str, path: &str) -> Result<String, BackendError> {
    Ok(public_object_url(&client.config()?.supabase_url, bucket, path))
}

/// Object path inside `bucket` for a public URL issued by this project.
/// `None` for foreign URLs or other buckets.
///
/// # Errors
///
/// Returns `NotConfigured` without a project URL.
pub fn object_path_of(client: &SupabaseClient, bucket: &str, url: &str) -> Result<Option<String>, BackendError> {
    let prefix = public_object_url(&client.config()?.supabase_url, bucket, "");
    Ok(url
        .strip_prefix(&prefix)
        .map(|path| path.split(['?', '#']).next().unwrap_or(path))
        .filter(|path| !path.is_empty())
        .map(str::to_owned))
}

/// Upload `bytes` to `bucket/path`, replacing any existing object.
///
/// # Errors
///
/// Returns `Status` with the backend message for oversized or rejected
/// files, or any transport failure.
pub async fn upload(
    client: &SupabaseClient,
    token: &str,
    bucket: &str,
    path: &str,
    bytes: &[u8],
    content_type: &str,
) -> Result<(), BackendError> {
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(BackendError::Status {
            context: "upload".to_owned(),
            status: 413,
            message: "file is larger than 2 MB".to_owned(),
        });
    }
    let base = &client.config()?.supabase_url;
    let call = ApiCall::new(HttpMethod::Post, storage_object_url(base, bucket, path), "upload")
        .token(Some(token))
        .header("x-upsert", "true");
    client.send_bytes(call, bytes, content_type).await
}

/// Delete the objects at `paths` in `bucket`.
///
/// # Errors
///
/// Returns any transport or status failure.
pub async fn remove(client: &SupabaseClient, token: &str, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
    if paths.is_empty() {
        return Ok(());
    }
    let base = &client.config()?.supabase_url;
    let call = ApiCall::new(HttpMethod::Delete, storage_bucket_url(base, bucket), "remove")
        .token(Some(token))
        .json(json!({ "prefixes": paths }));
    client.send::<Value>(call).await.map(|_| ())
}
