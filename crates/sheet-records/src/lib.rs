//! Record model and client-side search for sheet-table
//!
//! This crate holds the data side of the table view:
//! - `Record`: one row of source data, an `id` plus named JSON scalar fields
//! - `decode_records`: turns a response body into an ordered `Vec<Record>`
//! - `filter_records`: case-insensitive substring filter across all fields
//!
//! Nothing in here performs I/O; the filter is a pure function of its inputs.
//!
//! # Example
//!
//! ```
//! use sheet_records::{decode_records, filter_records};
//!
//! let body = br#"[
//!     {"id": 1, "name": "VLOOKUP", "usecase": "lookup", "syntax": "=VLOOKUP(a,b,c)"},
//!     {"id": 2, "name": "SUM", "usecase": "add", "syntax": "=SUM(a:b)"}
//! ]"#;
//!
//! let records = decode_records(body)?;
//! let hits = filter_records(&records, "vlook");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].text("name"), "VLOOKUP");
//! # Ok::<(), sheet_records::RecordError>(())
//! ```

mod record;
mod search;

pub use record::{Record, RecordError, RecordId, decode_records, field_text};
pub use search::{filter_records, record_matches};
