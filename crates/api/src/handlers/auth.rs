//! Handlers for `/auth`: login, refresh, logout, current user, and
//! invitation acceptance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rouge_core::error::CoreError;
use rouge_core::roles::Role;
use rouge_core::types::DbId;
use rouge_db::models::session::CreateSession;
use rouge_db::models::user::UserResponse;
use rouge_db::repositories::{InvitationRepo, ProfileRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::auth::token::{generate_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

const LOCK_DURATION_MINS: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AcceptInvitationRequest {
    pub token: String,
    pub password: String,
}

/// Returned by login, refresh and invitation acceptance.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    // Invited but never accepted.
    let Some(password_hash) = user.password_hash.as_deref() else {
        return Err(invalid_credentials());
    };

    let valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        let lock_until = (user.failed_login_count + 1 >= MAX_FAILED_ATTEMPTS)
            .then(|| Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS));
        UserRepo::record_failed_login(&state.pool, user.id, lock_until).await?;
        if lock_until.is_some() {
            tracing::warn!(user_id = user.id, "Account locked after repeated failed logins");
        }
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let response = create_auth_response(&state, user.id, &user.email).await?;

    tracing::info!(user_id = user.id, role = %response.user.role, "User logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. Each refresh token is single-use.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let session = SessionRepo::find_active_by_hash(&state.pool, &hash_token(&input.refresh_token))
        .await?
        .ok_or_else(invalid)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let (access_token, user_info) = sign_access_token(&state, user.id, &user.email).await?;
    let (refresh_plaintext, refresh_hash) = generate_token();
    let replacement = new_session(&state, user.id, refresh_hash);

    SessionRepo::rotate(&state.pool, session.id, &replacement)
        .await?
        .ok_or_else(invalid)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user_info,
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let profile = UserRepo::find_with_profile(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/auth/invitations/accept
///
/// Set the password of an invited account and sign it in.
pub async fn accept_invitation(
    State(state): State<AppState>,
    Json(input): Json<AcceptInvitationRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let token_hash = hash_token(input.token.trim());
    let invitation = InvitationRepo::find_pending_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invitation is invalid, expired or already accepted".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, invitation.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: invitation.user_id,
        }))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // Claim and password are written together; a concurrent accept or a
    // deactivation in between leaves the invitation untouched.
    if !InvitationRepo::accept(&state.pool, &invitation, &hash).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Invitation has already been accepted or the account is no longer active".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let response = create_auth_response(&state, user.id, &user.email).await?;

    tracing::info!(user_id = user.id, "Invitation accepted");
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the role from the profile; an account without a profile is a plain user.
async fn sign_access_token(
    state: &AppState,
    user_id: DbId,
    email: &str,
) -> AppResult<(String, UserInfo)> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, user_id).await?;
    let (display_name, role) = match profile {
        Some(p) => (p.display_name, p.role.parse::<Role>()?),
        None => (None, Role::User),
    };

    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok((
        access_token,
        UserInfo {
            id: user_id,
            email: email.to_string(),
            display_name,
            role,
        },
    ))
}

fn new_session(state: &AppState, user_id: DbId, refresh_token_hash: String) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash,
        expires_at: Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent: None,
        ip_address: None,
    }
}

async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    email: &str,
) -> AppResult<AuthResponse> {
    let (access_token, user) = sign_access_token(state, user_id, email).await?;
    let (refresh_plaintext, refresh_hash) = generate_token();
    SessionRepo::create(&state.pool, &new_session(state, user_id, refresh_hash)).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    })
}
