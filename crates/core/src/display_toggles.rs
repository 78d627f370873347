//! Display toggles: site-settings rows that switch public sections on or off.
//!
//! Keys follow the `display_toggle_<section>` convention, where `<section>`
//! is one or more lowercase ASCII alphanumeric segments joined by `_`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Prefix shared by every display-toggle key.
pub const KEY_PREFIX: &str = "display_toggle_";

pub const HOME_HERO: &str = "display_toggle_home_hero";
pub const HOME_ABOUT: &str = "display_toggle_home_about";
pub const HOME_SHOWS: &str = "display_toggle_home_spectacles";
pub const HOME_HEADLINES: &str = "display_toggle_home_a_la_une";
pub const HOME_PARTNERS: &str = "display_toggle_home_partners";
pub const HOME_NEWSLETTER: &str = "display_toggle_home_newsletter";
pub const AGENDA_NEWSLETTER: &str = "display_toggle_agenda_newsletter";
pub const CONTACT_NEWSLETTER: &str = "display_toggle_contact_newsletter";
pub const MEDIA_KIT: &str = "display_toggle_media_kit";
pub const PRESS_ARTICLES: &str = "display_toggle_presse_articles";

/// Known toggles with their category. Must match the seed migration.
pub const KNOWN_TOGGLES: &[(&str, &str)] = &[
    (HOME_HERO, "home"),
    (HOME_ABOUT, "home"),
    (HOME_SHOWS, "home"),
    (HOME_HEADLINES, "home"),
    (HOME_PARTNERS, "home"),
    (HOME_NEWSLETTER, "home"),
    (AGENDA_NEWSLETTER, "agenda"),
    (CONTACT_NEWSLETTER, "contact"),
    (MEDIA_KIT, "presse"),
    (PRESS_ARTICLES, "presse"),
];

/// Upper bound for the optional `max_items` limit.
pub const MAX_ITEMS_LIMIT: i32 = 50;

/// JSON payload stored in `site_settings.value` for a display toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleValue {
    pub enabled: bool,
    /// Optional cap on how many items the section shows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

impl ToggleValue {
    /// Parse a stored JSON value. Anything that is not a valid toggle
    /// object is treated as disabled.
    pub fn from_json(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(ToggleValue {
            enabled: false,
            max_items: None,
        })
    }

    pub fn to_json(self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(max) = self.max_items {
            if !(1..=MAX_ITEMS_LIMIT).contains(&max) {
                return Err(CoreError::Validation(format!(
                    "max_items must be between 1 and {MAX_ITEMS_LIMIT}, got {max}"
                )));
            }
        }
        Ok(())
    }
}

/// Validate that `key` follows the display-toggle naming convention.
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    let section = key.strip_prefix(KEY_PREFIX).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid display toggle key '{key}': must start with '{KEY_PREFIX}'"
        ))
    })?;

    let well_formed = !section.is_empty()
        && section.split('_').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });

    if well_formed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid display toggle key '{key}': section must be lowercase segments joined by '_'"
        )))
    }
}

/// Category of a toggle key: the known category, or the first section
/// segment for keys not in [`KNOWN_TOGGLES`].
pub fn category_for(key: &str) -> Option<&str> {
    if let Some((_, category)) = KNOWN_TOGGLES.iter().find(|(k, _)| *k == key) {
        return Some(category);
    }
    key.strip_prefix(KEY_PREFIX)?.split('_').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_keys_are_well_formed() {
        for (key, _) in KNOWN_TOGGLES {
            validate_key(key).unwrap_or_else(|e| panic!("{key}: {e}"));
        }
    }

    #[test]
    fn rejects_bad_keys() {
        for key in [
            "home_hero",
            "display_toggle_",
            "display_toggle_Home",
            "display_toggle_home__hero",
            "display_toggle_home-hero",
            "display_toggle_home_",
        ] {
            assert_matches!(validate_key(key), Err(CoreError::Validation(_)), "{key}");
        }
    }

    #[test]
    fn categories() {
        assert_eq!(category_for(MEDIA_KIT), Some("presse"));
        assert_eq!(category_for(HOME_HERO), Some("home"));
        assert_eq!(category_for("display_toggle_footer_links"), Some("footer"));
        assert_eq!(category_for("other"), None);
    }

    #[test]
    fn value_round_trip_and_fallback() {
        let value = ToggleValue {
            enabled: true,
            max_items: Some(6),
        };
        assert_eq!(ToggleValue::from_json(&value.to_json()), value);

        let garbage = serde_json::json!("yes");
        assert!(!ToggleValue::from_json(&garbage).enabled);

        let no_limit = serde_json::json!({ "enabled": true });
        assert_eq!(ToggleValue::from_json(&no_limit).max_items, None);
    }

    #[test]
    fn max_items_bounds() {
        let ok = ToggleValue {
            enabled: true,
            max_items: Some(MAX_ITEMS_LIMIT),
        };
        assert!(ok.validate().is_ok());
        let zero = ToggleValue {
            enabled: true,
            max_items: Some(0),
        };
        assert!(zero.validate().is_err());
    }
}
