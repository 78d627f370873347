//! Publication rules for shows, events, press releases and articles.
//!
//! Status vocabularies mirror the CHECK constraints in the migrations.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status vocabularies
// ---------------------------------------------------------------------------

pub const SHOW_STATUS_DRAFT: &str = "draft";
pub const SHOW_STATUS_PUBLISHED: &str = "published";
pub const SHOW_STATUS_ARCHIVED: &str = "archived";

const VALID_SHOW_STATUSES: &[&str] = &[
    SHOW_STATUS_DRAFT,
    SHOW_STATUS_PUBLISHED,
    SHOW_STATUS_ARCHIVED,
];

pub const EVENT_STATUS_SCHEDULED: &str = "scheduled";

const VALID_EVENT_STATUSES: &[&str] =
    &[EVENT_STATUS_SCHEDULED, "sold_out", "cancelled", "postponed"];

const VALID_ARTICLE_KINDS: &[&str] = &["article", "critique", "interview", "portrait"];

pub fn validate_show_status(status: &str) -> Result<(), CoreError> {
    validate_member("show status", status, VALID_SHOW_STATUSES)
}

pub fn validate_event_status(status: &str) -> Result<(), CoreError> {
    validate_member("event status", status, VALID_EVENT_STATUSES)
}

pub fn validate_article_kind(kind: &str) -> Result<(), CoreError> {
    validate_member("article kind", kind, VALID_ARTICLE_KINDS)
}

fn validate_member(what: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {what} '{value}'. Must be one of: {valid:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Image requirement
// ---------------------------------------------------------------------------

/// The image reference of a publishable record, after merging an update
/// onto the stored row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRef<'a> {
    pub image_url: Option<&'a str>,
    pub image_media_id: Option<DbId>,
}

impl ImageRef<'_> {
    pub fn is_present(&self) -> bool {
        self.image_media_id.is_some() || self.image_url.is_some_and(|u| !u.trim().is_empty())
    }
}

/// A record visible on the public site must carry an image.
pub fn require_image_when_public(
    entity: &str,
    is_public: bool,
    image: ImageRef<'_>,
) -> Result<(), CoreError> {
    if is_public && !image.is_present() {
        return Err(CoreError::Validation(format!(
            "A public {entity} requires an image (image_url or image_media_id)"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// An event may not end before it starts.
pub fn validate_event_window(
    starts_at: Timestamp,
    ends_at: Option<Timestamp>,
) -> Result<(), CoreError> {
    match ends_at {
        Some(end) if end < starts_at => Err(CoreError::Validation(
            "Event end must not precede its start".into(),
        )),
        _ => Ok(()),
    }
}

/// Ticketing links are followed by visitors, so only web URLs are accepted.
pub fn validate_ticket_url(url: Option<&str>) -> Result<(), CoreError> {
    match url {
        Some(u) if !(u.starts_with("https://") || u.starts_with("http://")) => Err(
            CoreError::Validation("ticket_url must be an http(s) URL".into()),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    #[test]
    fn public_record_without_image_is_rejected() {
        let err = require_image_when_public("press release", true, ImageRef::default());
        assert_matches!(err, Err(CoreError::Validation(msg)) if msg.contains("press release"));
    }

    #[test]
    fn blank_url_does_not_count_as_image() {
        let image = ImageRef {
            image_url: Some("   "),
            image_media_id: None,
        };
        assert!(require_image_when_public("show", true, image).is_err());
    }

    #[test]
    fn public_record_with_url_or_media_is_accepted() {
        let by_url = ImageRef {
            image_url: Some("https://cdn.example.com/a.jpg"),
            image_media_id: None,
        };
        let by_media = ImageRef {
            image_url: None,
            image_media_id: Some(7),
        };
        assert!(require_image_when_public("show", true, by_url).is_ok());
        assert!(require_image_when_public("show", true, by_media).is_ok());
    }

    #[test]
    fn private_record_needs_no_image() {
        assert!(require_image_when_public("show", false, ImageRef::default()).is_ok());
    }

    #[test]
    fn event_window() {
        let start = Utc::now();
        assert!(validate_event_window(start, None).is_ok());
        assert!(validate_event_window(start, Some(start)).is_ok());
        assert!(validate_event_window(start, Some(start + Duration::hours(2))).is_ok());
        assert!(validate_event_window(start, Some(start - Duration::minutes(1))).is_err());
    }

    #[test]
    fn statuses() {
        assert!(validate_show_status("published").is_ok());
        assert!(validate_show_status("deleted").is_err());
        assert!(validate_event_status("sold_out").is_ok());
        assert!(validate_event_status("done").is_err());
        assert!(validate_article_kind("critique").is_ok());
        assert!(validate_article_kind("blog").is_err());
    }

    #[test]
    fn ticket_urls() {
        assert!(validate_ticket_url(None).is_ok());
        assert!(validate_ticket_url(Some("https://billetterie.example.com/x")).is_ok());
        assert!(validate_ticket_url(Some("javascript:alert(1)")).is_err());
    }
}
