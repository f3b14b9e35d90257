use sheet_records::RecordError;
use thiserror::Error;

/// Reasons a fetch can fail
///
/// All variants end up as the same failure panel in the UI; the display
/// text is kept specific for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, TLS, timeout, read)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code
    #[error("Request failed with status code {status}{}", format_reason(.reason))]
    Http { status: u16, reason: String },

    /// The body was not a JSON array of records
    #[error("Invalid response: {0}")]
    Parse(String),

    /// The body was larger than the configured limit
    #[error("Response exceeded {limit} bytes")]
    TooLarge { limit: usize },
}

fn format_reason(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" ({})", reason)
    }
}

impl From<RecordError> for FetchError {
    fn from(err: RecordError) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = FetchError::Http {
            status: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 404 (Not Found)"
        );

        let err = FetchError::Http {
            status: 500,
            reason: String::new(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn test_record_error_becomes_parse_error() {
        let err: FetchError = RecordError::NotAnObject { index: 2 }.into();
        assert_eq!(
            err,
            FetchError::Parse("record 2 is not a JSON object".into())
        );
    }
}
