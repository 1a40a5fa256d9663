use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("could not construct http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    #[error("dictionary returned HTTP {0}")]
    Status(reqwest::StatusCode),
}
