//! Error types for the description service

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for description requests
pub type DescribeResult<T> = Result<T, DescribeError>;

/// Errors that can occur while fetching a description
#[derive(Error, Debug)]
pub enum DescribeError {
    /// Service answered with a non-success status
    #[error("HTTP error occurred while fetching description: {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// Could not reach the service
    #[error("Connection error occurred while fetching description: {0}")]
    Connection(String),

    /// Request did not complete within the timeout
    #[error("Timeout error occurred while fetching description: {0}")]
    Timeout(String),

    /// Any other transport failure
    #[error("An error occurred while fetching description: {0}")]
    Request(String),

    /// Body did not have the expected shape
    #[error("Unexpected response structure from the API: {0}")]
    ResponseStructure(String),
}

impl From<reqwest::Error> for DescribeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            DescribeError::Timeout(error.to_string())
        } else if error.is_connect() {
            DescribeError::Connection(error.to_string())
        } else if error.is_decode() {
            DescribeError::ResponseStructure(error.to_string())
        } else {
            DescribeError::Request(error.to_string())
        }
    }
}
