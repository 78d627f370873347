//! The user invitation saga.
//!
//! Inviting a user touches three systems: the user table, the profile table
//! and the mail server. There is no transaction spanning all three, so the
//! saga runs the steps in order and undoes the completed ones when a later
//! step fails:
//!
//! 1. create the password-less user and its invitation token;
//! 2. wait until the user row is visible;
//! 3. upsert the profile with the requested role;
//! 4. send the invitation email.
//!
//! A failure after step 1 deletes the profile (if written) and the user. The
//! caller either gets a fully invited user or no persisted state at all.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rouge_core::error::CoreError;
use rouge_core::roles::Role;
use rouge_core::types::{DbId, Timestamp};
use rouge_db::repositories::{InvitationRepo, ProfileRepo, UserRepo};
use rouge_db::DbPool;
use rouge_mail::{EmailDelivery, InvitationEmail};
use serde::Serialize;

use crate::auth::token::generate_token;
use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum InvitationError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User {user_id} did not become visible after {attempts} attempts")]
    UserNotVisible { user_id: DbId, attempts: u32 },

    #[error("Invitation email failed: {0}")]
    Mail(String),
}

/// Persistence side of the saga.
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Create a password-less user and its pending invitation. Returns the
    /// new user id, or `Conflict` if the email is taken.
    async fn create_invited_user(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: Timestamp,
        invited_by: Option<DbId>,
    ) -> Result<DbId, InvitationError>;

    async fn user_exists(&self, user_id: DbId) -> Result<bool, InvitationError>;

    async fn upsert_profile(
        &self,
        user_id: DbId,
        display_name: Option<&str>,
        role: Role,
    ) -> Result<(), InvitationError>;

    async fn delete_profile(&self, user_id: DbId) -> Result<(), InvitationError>;

    /// Delete the user; the invitation row cascades.
    async fn delete_user(&self, user_id: DbId) -> Result<(), InvitationError>;
}

#[async_trait]
pub trait InvitationMailer: Send + Sync {
    async fn send_invitation(&self, email: &InvitationEmail) -> Result<(), InvitationError>;
}

/// What the admin asked for.
#[derive(Debug, Clone)]
pub struct InvitationRequest {
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub invited_by: Option<DbId>,
}

/// A completed invitation.
#[derive(Debug, Clone, Serialize)]
pub struct InvitedUser {
    pub user_id: DbId,
    pub email: String,
    pub role: Role,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct InvitationSettings {
    pub site_url: String,
    pub expiry_hours: i64,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

impl InvitationSettings {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            site_url: config.site_url.clone(),
            expiry_hours: config.invite.expiry_hours,
            poll_attempts: config.invite.poll_attempts.max(1),
            poll_interval: Duration::from_millis(config.invite.poll_interval_ms),
        }
    }

    fn accept_link(&self, token: &str) -> String {
        format!("{}/auth/accept-invitation?token={token}", self.site_url)
    }
}

pub struct InvitationSaga {
    store: Arc<dyn InvitationStore>,
    mailer: Arc<dyn InvitationMailer>,
    settings: InvitationSettings,
}

impl InvitationSaga {
    pub fn new(
        store: Arc<dyn InvitationStore>,
        mailer: Arc<dyn InvitationMailer>,
        settings: InvitationSettings,
    ) -> Self {
        Self {
            store,
            mailer,
            settings,
        }
    }

    pub async fn run(&self, request: InvitationRequest) -> Result<InvitedUser, InvitationError> {
        let email = request.email.trim().to_lowercase();
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(self.settings.expiry_hours);
        let (token, token_hash) = generate_token();

        let user_id = self
            .store
            .create_invited_user(&email, &token_hash, expires_at, request.invited_by)
            .await?;
        tracing::debug!(user_id, "Invited user created");

        if let Err(err) = self.wait_until_visible(user_id).await {
            self.rollback(user_id, false).await;
            return Err(err);
        }

        if let Err(err) = self
            .store
            .upsert_profile(user_id, request.display_name.as_deref(), request.role)
            .await
        {
            tracing::error!(user_id, error = %err, "Profile upsert failed during invitation");
            self.rollback(user_id, false).await;
            return Err(err);
        }

        let message = InvitationEmail {
            to: email.clone(),
            display_name: request.display_name.clone(),
            role: request.role,
            link: self.settings.accept_link(&token),
            expires_at,
        };
        if let Err(err) = self.mailer.send_invitation(&message).await {
            tracing::error!(user_id, error = %err, "Invitation email failed");
            self.rollback(user_id, true).await;
            return Err(err);
        }

        tracing::info!(user_id, role = %request.role, "User invited");
        Ok(InvitedUser {
            user_id,
            email,
            role: request.role,
            expires_at,
        })
    }

    async fn wait_until_visible(&self, user_id: DbId) -> Result<(), InvitationError> {
        let attempts = self.settings.poll_attempts;
        for attempt in 1..=attempts {
            if self.store.user_exists(user_id).await? {
                return Ok(());
            }
            if attempt < attempts {
                tokio::time::sleep(self.settings.poll_interval).await;
            }
        }
        Err(InvitationError::UserNotVisible { user_id, attempts })
    }

    /// Undo completed steps. Failures here are logged; the caller reports
    /// the error that triggered the rollback.
    async fn rollback(&self, user_id: DbId, profile_written: bool) {
        if profile_written {
            if let Err(err) = self.store.delete_profile(user_id).await {
                tracing::error!(user_id, error = %err, "Rollback: profile deletion failed");
            }
        }
        match self.store.delete_user(user_id).await {
            Ok(()) => tracing::warn!(user_id, "Invitation rolled back"),
            Err(err) => tracing::error!(user_id, error = %err, "Rollback: user deletion failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Production backends
// ---------------------------------------------------------------------------

pub struct PgInvitationStore {
    pool: DbPool,
}

impl PgInvitationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for PgInvitationStore {
    async fn create_invited_user(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: Timestamp,
        invited_by: Option<DbId>,
    ) -> Result<DbId, InvitationError> {
        if UserRepo::find_by_email(&self.pool, email).await?.is_some() {
            return Err(duplicate_email(email));
        }

        let user = match UserRepo::create_invited(&self.pool, email).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
                return Err(duplicate_email(email));
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) =
            InvitationRepo::create(&self.pool, user.id, token_hash, expires_at, invited_by).await
        {
            if let Err(cleanup) = UserRepo::delete(&self.pool, user.id).await {
                tracing::error!(
                    user_id = user.id,
                    error = %cleanup,
                    "Orphan invited user left behind"
                );
            }
            return Err(e.into());
        }

        Ok(user.id)
    }

    async fn user_exists(&self, user_id: DbId) -> Result<bool, InvitationError> {
        Ok(UserRepo::find_by_id(&self.pool, user_id).await?.is_some())
    }

    async fn upsert_profile(
        &self,
        user_id: DbId,
        display_name: Option<&str>,
        role: Role,
    ) -> Result<(), InvitationError> {
        ProfileRepo::upsert(&self.pool, user_id, display_name, role.as_str()).await?;
        Ok(())
    }

    async fn delete_profile(&self, user_id: DbId) -> Result<(), InvitationError> {
        ProfileRepo::delete_by_user_id(&self.pool, user_id).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: DbId) -> Result<(), InvitationError> {
        UserRepo::delete(&self.pool, user_id).await?;
        Ok(())
    }
}

fn duplicate_email(email: &str) -> InvitationError {
    InvitationError::Core(CoreError::Conflict(format!(
        "A user with email '{email}' already exists"
    )))
}

/// Sends invitations through SMTP.
pub struct SmtpMailer {
    delivery: EmailDelivery,
}

impl SmtpMailer {
    pub fn new(delivery: EmailDelivery) -> Self {
        Self { delivery }
    }
}

#[async_trait]
impl InvitationMailer for SmtpMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> Result<(), InvitationError> {
        self.delivery
            .send_invitation(email)
            .await
            .map_err(|e| InvitationError::Mail(e.to_string()))
    }
}

/// Development mailer: logs the acceptance link instead of sending it.
pub struct LogMailer;

#[async_trait]
impl InvitationMailer for LogMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> Result<(), InvitationError> {
        tracing::warn!(
            to = %email.to,
            link = %email.link,
            "SMTP not configured; invitation link logged instead of emailed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    #[derive(Default)]
    struct FakeState {
        next_id: DbId,
        users: HashMap<DbId, String>,
        profiles: HashMap<DbId, Role>,
    }

    #[derive(Default)]
    struct FakeStore {
        state: Mutex<FakeState>,
        invisible: bool,
        fail_profile: bool,
    }

    impl FakeStore {
        fn user_count(&self) -> usize {
            self.state.lock().unwrap().users.len()
        }

        fn profile_count(&self) -> usize {
            self.state.lock().unwrap().profiles.len()
        }
    }

    #[async_trait]
    impl InvitationStore for FakeStore {
        async fn create_invited_user(
            &self,
            email: &str,
            _token_hash: &str,
            _expires_at: Timestamp,
            _invited_by: Option<DbId>,
        ) -> Result<DbId, InvitationError> {
            let mut state = self.state.lock().unwrap();
            if state.users.values().any(|e| e == email) {
                return Err(duplicate_email(email));
            }
            state.next_id += 1;
            let id = state.next_id;
            state.users.insert(id, email.to_string());
            Ok(id)
        }

        async fn user_exists(&self, user_id: DbId) -> Result<bool, InvitationError> {
            Ok(!self.invisible && self.state.lock().unwrap().users.contains_key(&user_id))
        }

        async fn upsert_profile(
            &self,
            user_id: DbId,
            _display_name: Option<&str>,
            role: Role,
        ) -> Result<(), InvitationError> {
            if self.fail_profile {
                return Err(InvitationError::Core(CoreError::Internal("profile write".into())));
            }
            self.state.lock().unwrap().profiles.insert(user_id, role);
            Ok(())
        }

        async fn delete_profile(&self, user_id: DbId) -> Result<(), InvitationError> {
            self.state.lock().unwrap().profiles.remove(&user_id);
            Ok(())
        }

        async fn delete_user(&self, user_id: DbId) -> Result<(), InvitationError> {
            let mut state = self.state.lock().unwrap();
            state.users.remove(&user_id);
            state.profiles.remove(&user_id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeMailer {
        fail: bool,
        sent: Mutex<Vec<InvitationEmail>>,
    }

    #[async_trait]
    impl InvitationMailer for FakeMailer {
        async fn send_invitation(&self, email: &InvitationEmail) -> Result<(), InvitationError> {
            if self.fail {
                return Err(InvitationError::Mail("smtp down".into()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn settings() -> InvitationSettings {
        InvitationSettings {
            site_url: "https://rouge-cardinal.fr".into(),
            expiry_hours: 72,
            poll_attempts: 3,
            poll_interval: Duration::from_millis(1),
        }
    }

    fn request(email: &str) -> InvitationRequest {
        InvitationRequest {
            email: email.into(),
            display_name: Some("Camille".into()),
            role: Role::Editor,
            invited_by: Some(1),
        }
    }

    fn saga(store: &Arc<FakeStore>, mailer: &Arc<FakeMailer>) -> InvitationSaga {
        InvitationSaga::new(store.clone(), mailer.clone(), settings())
    }

    #[tokio::test]
    async fn success_creates_user_profile_and_sends_email() {
        let store = Arc::new(FakeStore::default());
        let mailer = Arc::new(FakeMailer::default());

        let invited = saga(&store, &mailer)
            .run(request(" Camille@Example.com "))
            .await
            .unwrap();

        assert_eq!(invited.email, "camille@example.com");
        assert_eq!(invited.role, Role::Editor);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.profile_count(), 1);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "camille@example.com");
        assert!(sent[0]
            .link
            .starts_with("https://rouge-cardinal.fr/auth/accept-invitation?token="));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_creates_nothing() {
        let store = Arc::new(FakeStore::default());
        let mailer = Arc::new(FakeMailer::default());
        saga(&store, &mailer).run(request("a@example.com")).await.unwrap();

        let err = saga(&store, &mailer)
            .run(request("a@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, InvitationError::Core(CoreError::Conflict(_)));
        assert_eq!(store.user_count(), 1);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invisible_user_is_rolled_back() {
        let store = Arc::new(FakeStore {
            invisible: true,
            ..Default::default()
        });
        let mailer = Arc::new(FakeMailer::default());

        let err = saga(&store, &mailer)
            .run(request("b@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, InvitationError::UserNotVisible { attempts: 3, .. });
        assert_eq!(store.user_count(), 0);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn profile_failure_removes_user() {
        let store = Arc::new(FakeStore {
            fail_profile: true,
            ..Default::default()
        });
        let mailer = Arc::new(FakeMailer::default());

        assert!(saga(&store, &mailer).run(request("c@example.com")).await.is_err());
        assert_eq!(store.user_count(), 0);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mail_failure_removes_profile_and_user() {
        let store = Arc::new(FakeStore::default());
        let mailer = Arc::new(FakeMailer {
            fail: true,
            ..Default::default()
        });

        let err = saga(&store, &mailer)
            .run(request("d@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, InvitationError::Mail(_));
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.profile_count(), 0);
    }
}
