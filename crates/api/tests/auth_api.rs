//! Login, token refresh, invitation acceptance and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth,
    RecordingMailer, TEST_PASSWORD,
};
use rouge_core::roles::Role;
use rouge_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(app, "/api/v1/auth/login", json!({ "email": email, "password": password })).await
}

// ---------------------------------------------------------------------------
// Login and sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_role(pool: PgPool) {
    let id = common::create_user(&pool, "editor@rouge-cardinal.test", Role::Editor).await;
    let t = common::build_test_app(pool);

    let response = login(t.app(), "Editor@Rouge-Cardinal.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["id"], id);
    assert_eq!(json["user"]["role"], "editor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    common::create_user(&pool, "a@rouge-cardinal.test", Role::User).await;
    let t = common::build_test_app(pool);

    let response = login(t.app(), "a@rouge-cardinal.test", "not the password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(t.app(), "ghost@rouge-cardinal.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let id = common::create_user(&pool, "gone@rouge-cardinal.test", Role::Editor).await;
    UserRepo::deactivate(&pool, id).await.unwrap();
    let t = common::build_test_app(pool);

    let response = login(t.app(), "gone@rouge-cardinal.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    common::create_user(&pool, "r@rouge-cardinal.test", Role::User).await;
    let t = common::build_test_app(pool);

    let first = body_json(login(t.app(), "r@rouge-cardinal.test", TEST_PASSWORD).await).await;
    let old = first["refresh_token"].as_str().unwrap().to_string();

    let body = json!({ "refresh_token": old });
    let response = post_json(t.app(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_ne!(second["refresh_token"].as_str().unwrap(), old);

    // The old token was consumed by the rotation.
    let response = post_json(t.app(), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_token(pool: PgPool) {
    let (id, token) = common::user_with_token(&pool, Role::Editor).await;
    let t = common::build_test_app(pool);

    assert_eq!(get(t.app(), "/api/v1/auth/me").await.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(t.app(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["role"], "editor");
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_lower_roles(pool: PgPool) {
    let (_, editor) = common::user_with_token(&pool, Role::Editor).await;
    let (_, user) = common::user_with_token(&pool, Role::User).await;
    let t = common::build_test_app(pool);

    let response = get_auth(t.app(), "/api/v1/admin/users", &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Plain users cannot edit content either.
    let response = get_auth(t.app(), "/api/v1/admin/shows", &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(t.app(), "/api/v1/admin/shows", &editor).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_demote_or_delete_themself(pool: PgPool) {
    let (id, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/users/{id}");
    let response = put_json_auth(t.app(), &uri, json!({ "role": "editor" }), &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(t.app(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Renaming oneself is fine.
    let response =
        put_json_auth(t.app(), &uri, json!({ "display_name": "Direction" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["display_name"], "Direction");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_changes_another_users_role(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let editor_id = common::create_user(&pool, "e@rouge-cardinal.test", Role::Editor).await;
    let t = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/users/{editor_id}");
    let response = put_json_auth(t.app(), &uri, json!({ "role": "admin" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "admin");

    let response = put_json_auth(t.app(), &uri, json!({ "role": "owner" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Invitations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn invited_user_accepts_and_logs_in(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app(pool);

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "new@rouge-cardinal.test", "display_name": "Nouvelle", "role": "editor" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let invited = body_json(response).await;
    assert_eq!(invited["data"]["role"], "editor");

    let token = t.mailer.last_token().expect("invitation email sent");

    // Not usable before acceptance.
    let response = login(t.app(), "new@rouge-cardinal.test", "a long enough password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        t.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token, "password": "a long enough password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["role"], "editor");

    // Single use.
    let response = post_json(
        t.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token, "password": "another long password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = login(t.app(), "new@rouge-cardinal.test", "a long enough password").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_invitee_cannot_accept(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app(pool.clone());

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "former@rouge-cardinal.test", "role": "editor" }),
        &admin,
    )
    .await;
    let id = body_json(response).await["data"]["user_id"].as_i64().unwrap();
    let token = t.mailer.last_token().unwrap();

    let uri = format!("/api/v1/admin/users/{id}/deactivate");
    let response = post_json_auth(t.app(), &uri, json!({}), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deactivation expired the invitation.
    let response = post_json(
        t.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token, "password": "a long enough password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(user.password_hash.is_none());
    let response = login(t.app(), "former@rouge-cardinal.test", "a long enough password").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_account_with_a_pending_invitation_is_refused(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app(pool.clone());

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "paused@rouge-cardinal.test", "role": "user" }),
        &admin,
    )
    .await;
    let id = body_json(response).await["data"]["user_id"].as_i64().unwrap();
    let token = t.mailer.last_token().unwrap();

    // Deactivated without going through the admin endpoint, so the
    // invitation is still pending.
    assert!(UserRepo::deactivate(&pool, id).await.unwrap());

    let response = post_json(
        t.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token, "password": "a long enough password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_json(response).await.get("access_token").is_none());

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(user.password_hash.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accepting_with_a_short_password_is_rejected(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app(pool);

    post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "short@rouge-cardinal.test", "role": "user" }),
        &admin,
    )
    .await;
    let token = t.mailer.last_token().unwrap();

    let response = post_json(
        t.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token, "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_email_rolls_the_invitation_back(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    let t = common::build_test_app_with_mailer(
        pool.clone(),
        RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        },
    );

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "lost@rouge-cardinal.test", "role": "editor" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "EMAIL_DELIVERY_FAILED");

    assert!(UserRepo::find_by_email(&pool, "lost@rouge-cardinal.test")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inviting_an_existing_email_conflicts(pool: PgPool) {
    let (_, admin) = common::user_with_token(&pool, Role::Admin).await;
    common::create_user(&pool, "taken@rouge-cardinal.test", Role::User).await;
    let t = common::build_test_app(pool);

    let response = post_json_auth(
        t.app(),
        "/api/v1/admin/users/invite",
        json!({ "email": "taken@rouge-cardinal.test", "role": "editor" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(t.mailer.sent.lock().unwrap().is_empty());
}
