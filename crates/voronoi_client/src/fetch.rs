use std::io::{self, Read};
use std::time::Duration;

use thiserror::Error;

/// Upper bound on the body buffer reserved from `Content-Length`; larger
/// bodies still read in full, the buffer just grows as bytes arrive.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("server at {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed reading response body from {url}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// Blocking GET client returning whole response bodies.
pub struct Fetcher {
    agent: ureq::Agent,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }

    pub fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(key, value);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    url: url.to_owned(),
                    status,
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::Transport {
                    url: url.to_owned(),
                    source: Box::new(transport),
                })
            }
        };

        let status = response.status();
        let expected = response
            .header("Content-Length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0)
            .min(MAX_PREALLOC);

        let mut bytes = Vec::with_capacity(expected);
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| FetchError::Body {
                url: url.to_owned(),
                source,
            })?;

        tracing::info!(url, status, bytes = bytes.len(), "fetched response body");
        Ok(bytes)
    }
}
