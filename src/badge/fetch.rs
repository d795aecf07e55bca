//! Network access for badge rendering.
//!
//! Everything that talks to the badge service goes through [`Fetcher`], so
//! the render loop can be driven by an in-memory implementation in tests.

use std::io::{self, Read};
use std::time::Duration;
use url::Url;

/// Upper bound on a badge response body.
const MAX_BODY: u64 = 4 * 1024 * 1024;

/// Fetches a URL and returns the response body.
///
/// A `404` should surface as [`io::ErrorKind::NotFound`].
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> io::Result<Vec<u8>>;
}

/// Blocking HTTPS client on a shared `ureq` agent.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .build();
        Self { agent }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> io::Result<Vec<u8>> {
        let response = self.agent.request_url("GET", url).call().map_err(|err| match err {
            ureq::Error::Status(404, _) => io::Error::new(io::ErrorKind::NotFound, err),
            err => io::Error::other(err),
        })?;

        let mut body = Vec::new();
        response.into_reader().take(MAX_BODY).read_to_end(&mut body)?;
        Ok(body)
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}
