//! HTTP page fetching for the CLI.

use thiserror::Error;

/// Storefronts routinely vary markup by user-agent; when the configured UA
/// gets a non-2xx, a browser-like UA is tried before giving up.
pub(crate) const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Fetch the HTML body of a page, trying the supplied user-agent first and
/// the browser fallback UA second. Returns the first successful body.
pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, FetchError> {
    let mut user_agents = vec![user_agent.to_string()];
    if user_agent != BROWSER_FALLBACK_UA {
        user_agents.push(BROWSER_FALLBACK_UA.to_string());
    }

    let mut last_status = 0;
    for ua in user_agents {
        let response = client
            .get(url)
            .header(reqwest::header::USER_AGENT, &ua)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }
        last_status = status.as_u16();
        tracing::debug!(url, ua = %ua, status = last_status, "fetch attempt failed");
    }

    Err(FetchError::UnexpectedStatus {
        status: last_status,
        url: url.to_string(),
    })
}
