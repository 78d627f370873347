//! Remote image URL validation.
//!
//! [`ImageUrlChecker`] applies the static [`ImageUrlPolicy`], resolves the
//! host and checks every address, then issues a HEAD request pinned to the
//! address that was checked. Pinning closes the window where a second DNS
//! lookup by the HTTP client could return a different (internal) address.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use rouge_core::error::CoreError;
use rouge_core::image_url::{check_content_type, ImageUrlPolicy};
use serde::Serialize;

use crate::config::ImageCheckConfig;

#[derive(Debug, thiserror::Error)]
pub enum ImageCheckError {
    #[error("{0}")]
    Rejected(String),

    #[error("Could not resolve image host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image URL request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Image URL responded with HTTP {0}")]
    Status(u16),
}

impl From<CoreError> for ImageCheckError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ImageCheckError::Rejected(msg),
            other => ImageCheckError::Rejected(other.to_string()),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedImage {
    pub url: String,
    /// Only known when the HEAD request ran.
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub checked_remotely: bool,
}

#[derive(Debug, Clone)]
pub struct ImageUrlChecker {
    policy: ImageUrlPolicy,
    remote_check: bool,
    timeout: Duration,
}

impl ImageUrlChecker {
    pub fn new(config: &ImageCheckConfig) -> Self {
        Self {
            policy: ImageUrlPolicy::new(&config.allowed_hosts),
            remote_check: config.enabled,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn policy(&self) -> &ImageUrlPolicy {
        &self.policy
    }

    /// Validate `raw`. With the remote check disabled only the static
    /// policy runs.
    pub async fn validate(&self, raw: &str) -> Result<ValidatedImage, ImageCheckError> {
        let checked = self.policy.check_url(raw)?;

        if !self.remote_check {
            return Ok(ValidatedImage {
                url: checked.url.to_string(),
                content_type: None,
                content_length: None,
                checked_remotely: false,
            });
        }

        let mut builder = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(self.timeout);

        if !checked.allowlisted {
            let addrs = resolve(&checked.host, checked.port).await?;
            let ips: Vec<IpAddr> = addrs.iter().map(SocketAddr::ip).collect();
            self.policy.check_resolved(&checked, &ips)?;
            builder = builder.resolve(&checked.host, addrs[0]);
        }

        let client = builder.build()?;
        let response = client.head(checked.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %checked.url, status = status.as_u16(), "Image URL rejected");
            return Err(ImageCheckError::Status(status.as_u16()));
        }

        let headers = response.headers();
        let content_type =
            check_content_type(headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()))?;
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        Ok(ValidatedImage {
            url: checked.url.to_string(),
            content_type: Some(content_type),
            content_length,
            checked_remotely: true,
        })
    }

    /// Validate an optional, possibly blank `image_url` field from a write
    /// request. Blank values are treated as absent.
    pub async fn validate_field(&self, raw: Option<&str>) -> Result<(), ImageCheckError> {
        match raw.map(str::trim) {
            Some(url) if !url.is_empty() => self.validate(url).await.map(|_| ()),
            _ => Ok(()),
        }
    }
}

async fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, ImageCheckError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| ImageCheckError::Resolve {
            host: host.to_string(),
            source,
        })?
        .collect();
    if addrs.is_empty() {
        return Err(ImageCheckError::Rejected(format!(
            "Image URL host '{host}' did not resolve"
        )));
    }
    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn checker(enabled: bool) -> ImageUrlChecker {
        ImageUrlChecker::new(&ImageCheckConfig {
            enabled,
            allowed_hosts: vec!["cdn.rouge-cardinal.fr".into()],
            timeout_secs: 1,
        })
    }

    #[tokio::test]
    async fn static_rejections_happen_before_any_request() {
        for url in [
            "http://127.0.0.1/a.png",
            "http://169.254.169.254/latest/meta-data/",
            "http://[::1]/a.png",
            "file:///etc/passwd",
            "http://localhost:8080/a.png",
        ] {
            assert_matches!(
                checker(true).validate(url).await,
                Err(ImageCheckError::Rejected(_)),
                "{url}"
            );
        }
    }

    #[tokio::test]
    async fn disabled_remote_check_still_applies_policy() {
        let ok = checker(false)
            .validate("https://images.example.com/affiche.webp")
            .await
            .unwrap();
        assert!(!ok.checked_remotely);
        assert!(ok.content_type.is_none());

        assert!(checker(false).validate("http://10.1.2.3/a.png").await.is_err());
    }

    #[tokio::test]
    async fn blank_field_is_skipped() {
        checker(true).validate_field(None).await.unwrap();
        checker(true).validate_field(Some("  ")).await.unwrap();
        assert!(checker(true)
            .validate_field(Some("ftp://example.com/a.png"))
            .await
            .is_err());
    }
}
