//! Siphon Connectors - PostgreSQL source access for partition-planned reads
//!
//! Provides the `PostgresSource`: source-URI handling, the boundary probe
//! implementation, schema inference, and range fetches into Arrow record
//! batches.

pub mod error;
pub mod postgres;

pub use error::ConnectorError;
pub use postgres::{is_postgres_uri, parse_source_uri, PostgresSource};
