use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("listing request to {url} failed with status {status}")]
    ListingStatus { url: String, status: u16 },

    #[error("post request to {url} failed with status {status}")]
    DetailStatus { url: String, status: u16 },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
