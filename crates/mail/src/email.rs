//! Invitation email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and the API falls back to logging
//! invitation links instead of mailing them.

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rouge_core::roles::Role;
use rouge_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@rouge-cardinal.fr";

const DEFAULT_FROM_NAME: &str = "Compagnie Rouge-Cardinal";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    /// Display name of the sender.
    pub from_name: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable         | Required | Default                      |
    /// |------------------|----------|------------------------------|
    /// | `SMTP_HOST`      | yes      | -                            |
    /// | `SMTP_PORT`      | no       | `587`                        |
    /// | `SMTP_FROM`      | no       | `noreply@rouge-cardinal.fr`  |
    /// | `SMTP_FROM_NAME` | no       | `Compagnie Rouge-Cardinal`   |
    /// | `SMTP_USER`      | no       | -                            |
    /// | `SMTP_PASSWORD`  | no       | -                            |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| DEFAULT_FROM_NAME.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Invitation content
// ---------------------------------------------------------------------------

/// Everything needed to render one invitation email.
#[derive(Debug, Clone)]
pub struct InvitationEmail {
    pub to: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub link: String,
    pub expires_at: Timestamp,
}

impl InvitationEmail {
    pub fn subject(&self) -> String {
        "Invitation à rejoindre l'espace d'administration Rouge-Cardinal".to_string()
    }

    fn greeting(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("Bonjour {name},"),
            _ => "Bonjour,".to_string(),
        }
    }

    fn role_label(&self) -> &'static str {
        match self.role {
            Role::Admin => "administrateur·rice",
            Role::Editor => "éditeur·rice",
            Role::User => "membre",
        }
    }

    fn expiry(&self) -> String {
        self.expires_at.format("%d/%m/%Y à %H:%M UTC").to_string()
    }

    pub fn text_body(&self) -> String {
        format!(
            "{greeting}\n\n\
             Vous avez été invité·e à rejoindre l'espace d'administration de la \
             compagnie Rouge-Cardinal en tant que {role}.\n\n\
             Pour activer votre compte et choisir votre mot de passe, ouvrez le lien suivant :\n\
             {link}\n\n\
             Ce lien expire le {expiry}.\n\n\
             Si vous n'attendiez pas cette invitation, vous pouvez ignorer ce message.\n",
            greeting = self.greeting(),
            role = self.role_label(),
            link = self.link,
            expiry = self.expiry(),
        )
    }

    pub fn html_body(&self) -> String {
        format!(
            "<p>{greeting}</p>\
             <p>Vous avez été invité·e à rejoindre l'espace d'administration de la \
             compagnie Rouge-Cardinal en tant que <strong>{role}</strong>.</p>\
             <p><a href=\"{link}\">Activer mon compte</a></p>\
             <p>Ce lien expire le {expiry}.</p>\
             <p>Si vous n'attendiez pas cette invitation, vous pouvez ignorer ce message.</p>",
            greeting = escape_html(&self.greeting()),
            role = self.role_label(),
            link = escape_html(&self.link),
            expiry = self.expiry(),
        )
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends invitation emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Build the SMTP transport. No connection is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Assemble the MIME message for an invitation.
    pub fn build_message(&self, invitation: &InvitationEmail) -> Result<Message, EmailError> {
        let from = Mailbox::new(
            Some(self.config.from_name.clone()),
            self.config.from_address.parse()?,
        );
        let to = Mailbox::new(invitation.display_name.clone(), invitation.to.parse()?);

        Message::builder()
            .from(from)
            .to(to)
            .subject(invitation.subject())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(invitation.text_body()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(invitation.html_body()),
                    ),
            )
            .map_err(|e| EmailError::Build(e.to_string()))
    }

    pub async fn send_invitation(&self, invitation: &InvitationEmail) -> Result<(), EmailError> {
        let message = self.build_message(invitation)?;
        self.transport.send(message).await?;

        tracing::info!(to = %invitation.to, role = %invitation.role, "Invitation email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    fn invitation(to: &str) -> InvitationEmail {
        InvitationEmail {
            to: to.to_string(),
            display_name: Some("Camille".to_string()),
            role: Role::Editor,
            link: "https://rouge-cardinal.fr/auth/accept-invitation?token=abc".to_string(),
            expires_at: chrono::Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn text_body_carries_link_role_and_expiry() {
        let body = invitation("camille@example.com").text_body();
        assert!(body.starts_with("Bonjour Camille,"));
        assert!(body.contains("https://rouge-cardinal.fr/auth/accept-invitation?token=abc"));
        assert!(body.contains("éditeur·rice"));
        assert!(body.contains("10/03/2026 à 09:30 UTC"));
    }

    #[test]
    fn html_body_escapes_user_input() {
        let mut inv = invitation("camille@example.com");
        inv.display_name = Some("<script>".to_string());
        let html = inv.html_body();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn blank_display_name_uses_plain_greeting() {
        let mut inv = invitation("camille@example.com");
        inv.display_name = Some("  ".to_string());
        assert!(inv.text_body().starts_with("Bonjour,"));
    }

    #[tokio::test]
    async fn builds_message_for_valid_address() {
        let delivery = EmailDelivery::new(config()).unwrap();
        let message = delivery
            .build_message(&invitation("camille@example.com"))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("camille@example.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[tokio::test]
    async fn rejects_invalid_recipient() {
        let delivery = EmailDelivery::new(config()).unwrap();
        let err = delivery.build_message(&invitation("not-an-email")).unwrap_err();
        assert!(matches!(err, EmailError::Address(_)));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
