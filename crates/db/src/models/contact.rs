//! Public contact form messages and newsletter subscriptions.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Reasons accepted by `chk_contact_messages_reason`.
pub const CONTACT_REASONS: &[&str] = &["booking", "press", "partnership", "education", "other"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub reason: String,
    pub subject: Option<String>,
    pub message: String,
    pub consent: bool,
    pub handled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /public/contact`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactMessage {
    #[validate(length(max = 120, message = "must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    /// Defaults to `other`.
    pub reason: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub message: String,
    pub consent: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscriber {
    pub id: DbId,
    pub email: String,
    pub source: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for both newsletter subscribe and unsubscribe.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Page the signup came from (`home`, `agenda`, `contact`).
    pub source: Option<String>,
}
