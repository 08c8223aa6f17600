//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent, or no complete response was received.
    #[error("Request failed: {0}")]
    Transport(String),
    /// The API returned a non-success status. `message` holds the response
    /// body, or the status text when the body was empty.
    #[error("API Error {status}: {message}")]
    Fetch { status: u16, message: String },
    /// The response body was not valid JSON or did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// HTTP status carried by a [`Error::Fetch`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the API reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
