//! Media library uploads, deletion and remote URL validation.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use rouge_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "rouge-cardinal-boundary";

/// A complete 2x3 RGB PNG.
const PNG_2X3: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x08, 0x02, 0x00, 0x00, 0x00, 0x36,
    0x88, 0x49, 0xD6, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x44, 0x0C, 0x28, 0x14, 0x00, 0x44, 0xD0, 0x05, 0xFB, 0xA4, 0xCF, 0xDE,
    0x80, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn multipart_body(filename: &str, mime: &str, bytes: &[u8], alt_text: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(alt) = alt_text {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"alt_text\"\r\n\r\n{alt}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: axum::Router,
    token: &str,
    filename: &str,
    mime: &str,
    bytes: &[u8],
) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/media")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(filename, mime, bytes, Some("Affiche"))))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_file_and_metadata(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let response = upload(t.app(), &token, "Affiche Été.png", "image/png", PNG_2X3).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await["data"].clone();

    assert_eq!(item["width"], 2);
    assert_eq!(item["height"], 3);
    assert_eq!(item["alt_text"], "Affiche");
    assert_eq!(item["mime_type"], "image/png");
    let key = item["storage_path"].as_str().unwrap();
    assert!(key.starts_with("media/") && key.ends_with("-affiche-ete.png"), "{key}");
    assert!(t.storage.path().join(key).exists());

    // Served back from the static mount.
    let url = item["url"].as_str().unwrap();
    assert_eq!(url, format!("/storage/{key}"));
    assert_eq!(get(t.app(), url).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disallowed_types_are_rejected(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let response = upload(t.app(), &token, "page.html", "text/html", b"<script></script>").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = upload(t.app(), &token, "logo.svg", "image/svg+xml", b"<svg/>").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn referenced_media_needs_force_to_delete(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let item = body_json(upload(t.app(), &token, "a.png", "image/png", PNG_2X3).await).await;
    let id = item["data"]["id"].as_i64().unwrap();
    let key = item["data"]["storage_path"].as_str().unwrap().to_string();

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/shows",
        json!({ "title": "Avec média", "image_media_id": id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/admin/media/{id}");
    assert_eq!(delete_auth(t.app(), &uri, &token).await.status(), StatusCode::CONFLICT);

    let response = delete_auth(t.app(), &format!("{uri}?force=true"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!t.storage.path().join(&key).exists());
    assert_eq!(get_auth(t.app(), &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forced_delete_cannot_strip_a_public_image(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let item = body_json(upload(t.app(), &token, "c.png", "image/png", PNG_2X3).await).await;
    let id = item["data"]["id"].as_i64().unwrap();
    let key = item["data"]["storage_path"].as_str().unwrap().to_string();

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/shows",
        json!({
            "title": "Affiche seule",
            "status": "published",
            "is_public": true,
            "image_media_id": id
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let show_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/media/{id}?force=true");
    let response = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Nothing was removed.
    assert!(t.storage.path().join(&key).exists());
    let show = body_json(
        get_auth(t.app(), &format!("/api/v1/admin/shows/{show_id}"), &token).await,
    )
    .await;
    assert_eq!(show["data"]["image_media_id"], id);

    // Once the show is unpublished the forced delete goes through.
    let response = put_json_auth(
        t.app(),
        &format!("/api/v1/admin/shows/{show_id}"),
        json!({ "is_public": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forced_delete_cannot_strip_a_public_press_release_image(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let item = body_json(upload(t.app(), &token, "d.png", "image/png", PNG_2X3).await).await;
    let id = item["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/press-releases",
        json!({ "title": "Communiqué illustré", "is_public": true, "image_media_id": id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/admin/media/{id}?force=true");
    let response = delete_auth(t.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get_auth(t.app(), &format!("/api/v1/admin/media/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn folders_and_tags_organise_items(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    let body = json!({ "name": "Affiches 2025" });
    let folder =
        body_json(post_json_auth(t.app(), "/api/v1/admin/media/folders", body, &token).await).await;
    assert_eq!(folder["data"]["slug"], "affiches-2025");
    let folder_id = folder["data"]["id"].as_i64().unwrap();

    let body = json!({ "name": "Presse" });
    let tag =
        body_json(post_json_auth(t.app(), "/api/v1/admin/media/tags", body, &token).await).await;
    let tag_id = tag["data"]["id"].as_i64().unwrap();

    let item = body_json(upload(t.app(), &token, "b.png", "image/png", PNG_2X3).await).await;
    let id = item["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        t.app(),
        &format!("/api/v1/admin/media/{id}"),
        json!({ "folder_id": folder_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        t.app(),
        &format!("/api/v1/admin/media/{id}/tags"),
        json!({ "tag_ids": [tag_id] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["tags"][0]["slug"], "presse");

    let by_tag = body_json(
        get_auth(t.app(), &format!("/api/v1/admin/media?tag_id={tag_id}"), &token).await,
    )
    .await;
    assert_eq!(by_tag["data"].as_array().unwrap().len(), 1);

    let by_folder = body_json(
        get_auth(t.app(), &format!("/api/v1/admin/media?folder_id={folder_id}&q=b"), &token).await,
    )
    .await;
    assert_eq!(by_folder["data"][0]["id"], id);

    let body = json!({ "name": "presse" });
    let response = post_json_auth(t.app(), "/api/v1/admin/media/tags", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_url_applies_the_static_policy(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    for url in [
        "http://127.0.0.1/a.png",
        "http://localhost/a.png",
        "http://10.1.2.3/a.png",
        "file:///etc/passwd",
    ] {
        let body = json!({ "url": url });
        let response =
            post_json_auth(t.app(), "/api/v1/admin/media/validate-url", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{url}");
        assert_eq!(body_json(response).await["code"], "INVALID_IMAGE_URL");
    }

    // The network check is off in tests; a well-formed public URL passes.
    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/media/validate-url",
        json!({ "url": "https://images.example.com/a.webp" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["checked_remotely"], false);
}
