use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriveError {
    /// Transport-level failure from the HTTP bridge
    #[error("Network error: {0}")]
    Network(#[from] bridge_http::HttpError),

    /// Backend returned a non-success status
    #[error("Drive API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Backend rejected the call for lack of a Drive authorization
    #[error("Drive authorization required")]
    AuthRequired,

    /// Response body did not match the expected shape
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, DriveError>;
