use super::*;
use crate::config::{AppConfig, RawConfig};
use futures::executor::block_on;

fn client() -> SupabaseClient {
    let config = AppConfig::from_values(RawConfig {
        supabase_url: Some("https://p.supabase.co/"),
        supabase_anon_key: Some("k"),
        ..RawConfig::default()
    })
    .expect("config");
    SupabaseClient::new(config)
}

// =============================================================
// Avatar paths
// =============================================================

#[test]
fn avatar_path_keeps_image_extension() {
    assert_eq!(avatar_object_path("u1", "me.JPG", 7), "u1/avatar-7.jpg");
    assert_eq!(avatar_object_path("u1", "photo.final.webp", 7), "u1/avatar-7.webp");
}

#[test]
fn avatar_path_defaults_to_png() {
    assert_eq!(avatar_object_path("u1", "noext", 7), "u1/avatar-7.png");
    assert_eq!(avatar_object_path("u1", "script.exe", 7), "u1/avatar-7.png");
}

#[test]
fn each_upload_gets_a_new_avatar_url() {
    let client = client();
    let first = public_url(&client, "avatars", &avatar_object_path("u1", "me.png", 1_000)).expect("url");
    let second = public_url(&client, "avatars", &avatar_object_path("u1", "me.png", 2_000)).expect("url");
    assert_ne!(first, second);
}

#[test]
fn object_path_is_recovered_from_own_public_url() {
    let client = client();
    let url = public_url(&client, "avatars", "u1/avatar-7.jpg").expect("url");
    assert_eq!(object_path_of(&client, "avatars", &url).expect("path").as_deref(), Some("u1/avatar-7.jpg"));
    let busted = format!("{url}?t=3");
    assert_eq!(object_path_of(&client, "avatars", &busted).expect("path").as_deref(), Some("u1/avatar-7.jpg"));
}

#[test]
fn foreign_or_other_bucket_urls_have_no_object_path() {
    let client = client();
    assert_eq!(object_path_of(&client, "avatars", "https://cdn.example.com/me.png").expect("path"), None);
    let other = public_url(&client, "banners", "u1/b.png").expect("url");
    assert_eq!(object_path_of(&client, "avatars", &other).expect("path"), None);
}

#[test]
fn removing_nothing_sends_nothing() {
    let client = SupabaseClient::unconfigured(crate::config::ConfigError::Missing { var: "x" });
    assert!(block_on(remove(&client, "t", "avatars", &[])).is_ok());
}

// =============================================================
// URLs and uploads
// =============================================================

#[test]
fn public_url_uses_project_base() {
    assert_eq!(
        public_url(&client(), "avatars", "u1/avatar.png").expect("url"),
        "https://p.supabase.co/storage/v1/object/public/avatars/u1/avatar.png"
    );
}

#[test]
fn oversized_upload_is_rejected_before_sending() {
    let client = SupabaseClient::unconfigured(crate::config::ConfigError::Missing { var: "x" });
    let bytes = vec![0_u8; MAX_AVATAR_BYTES + 1];
    let err = block_on(upload(&client, "t", "avatars", "u/a.png", &bytes, "image/png")).expect_err("too big");
    assert_eq!(err.status(), Some(413));
}
