//! Remote record source for sheet-table
//!
//! Provides the one network operation the table view needs: a single
//! read-only `GET` of the record list. Every failure is mapped into
//! `FetchError`, so callers never see transport or decoding types.
//!
//! Fetching is blocking; async callers should run it on a blocking thread
//! (for example `tokio::task::spawn_blocking`).

mod error;
mod http;

pub use error::FetchError;
pub use http::{FetchOptions, HttpRecordSource};

use sheet_records::Record;

/// A place records can be loaded from
///
/// The application talks to this trait so the HTTP transport can be swapped
/// for an in-memory source in tests.
pub trait RecordSource: Send + Sync {
    /// Human-readable location, used for logging
    fn endpoint(&self) -> &str;

    /// Perform exactly one fetch of the full record list
    fn fetch(&self) -> Result<Vec<Record>, FetchError>;
}
