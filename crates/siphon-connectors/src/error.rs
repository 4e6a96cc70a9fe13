//! Typed errors for the connectors crate.

use std::fmt;

/// Errors that can occur in data source connectors.
#[derive(Debug)]
pub enum ConnectorError {
    /// Failed to establish a connection to the data source.
    ConnectionFailed(String),
    /// The requested table does not exist.
    TableNotFound(String),
    /// A table or column identifier is not safely embeddable in SQL.
    InvalidIdentifier(String),
    /// The URI is not a supported source URI.
    UnsupportedUri(String),
    /// A query against the data source failed.
    QueryFailed(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::ConnectionFailed(msg) => write!(f, "connection failed: {}", msg),
            ConnectorError::TableNotFound(msg) => write!(f, "table not found: {}", msg),
            ConnectorError::InvalidIdentifier(msg) => write!(f, "invalid identifier: {}", msg),
            ConnectorError::UnsupportedUri(msg) => write!(f, "unsupported URI: {}", msg),
            ConnectorError::QueryFailed(msg) => write!(f, "query failed: {}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl From<sqlx::Error> for ConnectorError {
    fn from(e: sqlx::Error) -> Self {
        ConnectorError::ConnectionFailed(e.to_string())
    }
}

impl From<url::ParseError> for ConnectorError {
    fn from(e: url::ParseError) -> Self {
        ConnectorError::UnsupportedUri(e.to_string())
    }
}
