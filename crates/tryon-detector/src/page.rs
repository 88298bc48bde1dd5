//! The parsed-page input to a detection pass.

use scraper::Html;
use url::Url;

use crate::error::DetectError;

/// An immutable snapshot of a loaded page: the parsed DOM plus the URL it
/// was loaded from. Each detection pass takes one snapshot; re-detection
/// after the page changes means building a new snapshot.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    doc: Html,
    url: Url,
    hostname: String,
}

impl PageSnapshot {
    /// Parse a snapshot from raw HTML and the page URL.
    ///
    /// HTML parsing is lenient and never fails; the only rejected input is
    /// a page URL that does not parse or has no hostname, since the cascade
    /// needs both for profile matching and relative-URL resolution.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidPageUrl`] for an unusable page URL.
    pub fn parse(html: &str, page_url: &str) -> Result<Self, DetectError> {
        let url = Url::parse(page_url).map_err(|e| DetectError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;
        let hostname = url
            .host_str()
            .ok_or_else(|| DetectError::InvalidPageUrl {
                url: page_url.to_string(),
                reason: "missing hostname".to_string(),
            })?
            .to_string();

        Ok(Self {
            doc: Html::parse_document(html),
            url,
            hostname,
        })
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn doc(&self) -> &Html {
        &self.doc
    }
}
