//! HTTP transport backed by a ureq agent

use log::debug;
use sheet_records::{Record, decode_records};
use std::io::{self, Read};
use std::time::Duration;

use crate::{FetchError, RecordSource};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport settings for `HttpRecordSource`
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Read/write timeout for the request
    pub timeout: Duration,
    /// Largest body accepted before the fetch is failed
    pub max_response_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Loads records with a single `GET <endpoint>`
pub struct HttpRecordSource {
    endpoint: String,
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpRecordSource {
    pub fn new(endpoint: impl Into<String>, options: FetchOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT.min(options.timeout))
            .timeout_read(options.timeout)
            .timeout_write(options.timeout)
            .build();

        Self {
            endpoint: endpoint.into(),
            agent,
            max_response_bytes: options.max_response_bytes,
        }
    }
}

impl RecordSource for HttpRecordSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        debug!("GET {}", self.endpoint);

        let response = match self
            .agent
            .get(&self.endpoint)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(FetchError::Http {
                    status,
                    reason: response.status_text().to_string(),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::Network(transport.to_string()));
            }
        };

        // ureq only reports 4xx/5xx as errors
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                status,
                reason: response.status_text().to_string(),
            });
        }

        let body = read_response_bytes(response, self.max_response_bytes)?;
        debug!("GET {} -> {} bytes", self.endpoint, body.len());

        Ok(decode_records(&body)?)
    }
}

/// Read a response into memory, enforcing a maximum byte size
fn read_response_bytes(response: ureq::Response, max_bytes: usize) -> Result<Vec<u8>, FetchError> {
    let declared = response
        .header("Content-Length")
        .and_then(|value| value.parse::<u64>().ok());
    if declared.is_some_and(|length| length > max_bytes as u64) {
        return Err(FetchError::TooLarge { limit: max_bytes });
    }

    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited
        .read_to_end(&mut bytes)
        .map_err(|err: io::Error| FetchError::Network(err.to_string()))?;

    if bytes.len() > max_bytes {
        return Err(FetchError::TooLarge { limit: max_bytes });
    }
    Ok(bytes)
}
