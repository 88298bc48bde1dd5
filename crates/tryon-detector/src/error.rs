use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid page url \"{url}\": {reason}")]
    InvalidPageUrl { url: String, reason: String },
}
