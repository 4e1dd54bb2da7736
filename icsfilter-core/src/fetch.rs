//! Downloading remote calendars.

use std::error::Error as _;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::document::CalendarDocument;
use crate::error::{FetchError, Result};
use crate::ics::parse_calendar;

/// Outcome of fetching one calendar: the parsed document or a classified failure.
pub type FetchOutcome = std::result::Result<CalendarDocument, FetchError>;

const USER_AGENT: &str = concat!("icsfilter/", env!("CARGO_PKG_VERSION"));

/// HTTP client for calendar downloads.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn builder() -> FetcherBuilder {
        FetcherBuilder::default()
    }

    /// Fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// GET `url` once and parse the body as a calendar.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let url = parse_url(url)?;

        debug!(%url, "fetching calendar");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| classify_transport_error(&url, &err))?;

        let status = response.status();
        debug!(%url, %status, "received calendar response");

        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            other => {
                // hyper only records the phrase when it differs from the canonical one
                let reason = match response.extensions().get::<ReasonPhrase>() {
                    Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
                    None => other.canonical_reason().unwrap_or_default().to_string(),
                };
                return Err(FetchError::Upstream {
                    status: other.as_u16(),
                    reason,
                });
            }
        }

        // Decodes by the declared charset, defaulting to UTF-8, and drops a BOM
        let body = response
            .text()
            .await
            .map_err(|err| classify_transport_error(&url, &err))?;

        parse_calendar(&body).map_err(|err| {
            debug!(%url, error = %err, "response is not a calendar");
            FetchError::InvalidContent(err)
        })
    }
}

/// Builder for [`Fetcher`].
#[derive(Debug, Default)]
pub struct FetcherBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl FetcherBuilder {
    /// Total time allowed for one fetch, including reading the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Fetcher> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Fetcher {
            client: builder.build()?,
        })
    }
}

/// Only absolute http(s) URLs with a host are fetched.
fn parse_url(raw: &str) -> std::result::Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidAddress)?;
    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        return Err(FetchError::InvalidAddress);
    }
    Ok(url)
}

fn classify_transport_error(url: &Url, err: &reqwest::Error) -> FetchError {
    warn!(%url, error = %err, "calendar request failed");

    if err.is_builder() || is_dns_failure(err) {
        FetchError::InvalidAddress
    } else if err.is_timeout() {
        upstream(StatusCode::GATEWAY_TIMEOUT)
    } else {
        upstream(StatusCode::BAD_GATEWAY)
    }
}

fn upstream(status: StatusCode) -> FetchError {
    FetchError::Upstream {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// The connector reports name resolution failures as "dns error" somewhere in
/// the source chain.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.to_string().contains("dns error") {
            return true;
        }
        source = cause.source();
    }
    false
}
