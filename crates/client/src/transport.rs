use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use smartacc_primitives::constants::client::REQUEST_TIMEOUT;
use std::time::Duration;
use tracing::debug;

/// Options of the bundler transport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportOptions {
    pub request_timeout: Duration,
    /// Number of times a failed request is retried
    pub retry_count: u32,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self { request_timeout: Duration::from_secs(REQUEST_TIMEOUT), retry_count: 0 }
    }
}

/// Builds the HTTP transport to the bundler. Requests are never retried, whatever
/// `options.retry_count` says; the returned options reflect what is in effect.
pub fn build_http_transport(
    url: &str,
    options: TransportOptions,
) -> Result<(HttpClient, TransportOptions), jsonrpsee::core::ClientError> {
    if options.retry_count > 0 {
        debug!("Ignoring retry count {} of bundler transport", options.retry_count);
    }
    let options = TransportOptions { retry_count: 0, ..options };

    let client = HttpClientBuilder::default().request_timeout(options.request_timeout).build(url)?;
    Ok((client, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn retries_are_disabled() -> eyre::Result<()> {
        let options = TransportOptions { request_timeout: Duration::from_secs(5), retry_count: 3 };
        let (_client, effective) = build_http_transport("http://127.0.0.1:3000", options)?;

        assert_eq!(effective.retry_count, 0);
        assert_eq!(effective.request_timeout, Duration::from_secs(5));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        assert!(build_http_transport("not a url", TransportOptions::default()).is_err());
    }
}
