use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Connection error: {0}")]
    Request(String),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Decode(String),

    #[error("Missing field in market response: {0}")]
    MissingField(&'static str),

    #[error("Could not fetch all required resource prices")]
    MissingPrices,

    #[error("Amount out of range")]
    Overflow,
}

impl From<reqwest::Error> for MarketError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return MarketError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if e.is_decode() {
            return MarketError::Decode(e.to_string());
        }
        MarketError::Request(e.to_string())
    }
}
