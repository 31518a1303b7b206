// Evidenca HTTP client
//
// Wraps `reqwest::Client` with URL construction against the back-end origin
// and envelope unwrapping. Endpoint families (events, vehicles, projects,
// auth) are inherent methods in separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::envelope::Envelope;
use crate::error::Error;
use crate::models::RecordId;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Evidenca back end.
///
/// Every method returns the unwrapped `data` payload; the envelope is
/// stripped (and its `error` flag enforced) before the caller sees it.
#[derive(Debug, Clone)]
pub struct EvidencaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EvidencaClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The back-end origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path such as `events` or `update-event/5`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Build `path/<id>`, percent-encoding the id as a single segment.
    pub(crate) fn url_with_id(&self, path: &str, id: &RecordId) -> Result<Url, Error> {
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(&id.to_string());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_envelope(resp).await
    }

    /// Send a POST request with JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_envelope(resp).await
    }

    /// Send a PUT request with JSON body and unwrap the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        Self::parse_envelope(resp).await
    }

    /// Send a DELETE request and unwrap the envelope.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        Self::parse_envelope(resp).await
    }

    /// Read the body as text, for endpoints whose envelope is not `{error, data}`.
    pub(crate) async fn post_raw(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(reqwest::StatusCode, String), Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        Ok((status, text))
    }

    /// Parse the `{ error, message, data }` envelope.
    ///
    /// A flagged envelope wins over the HTTP status so the server's own
    /// message reaches the user; otherwise non-2xx is an error.
    async fn parse_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, len = body.len(), "response received");

        let parsed = serde_json::from_str::<Envelope<T>>(&body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = parsed
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| "session expired or invalid token".into());
            return Err(Error::Authentication { message });
        }

        match parsed {
            Ok(envelope) if envelope.is_error() || status.is_success() => envelope.into_result(),
            Ok(_) => Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body),
            }),
            Err(_) if !status.is_success() => Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body),
            }),
            Err(e) => Err(Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body,
            }),
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = EvidencaClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://example.test/api/").unwrap(),
        );
        assert_eq!(
            client.url("/events").unwrap().as_str(),
            "https://example.test/api/events"
        );
        assert_eq!(
            client.url("update-event/5").unwrap().as_str(),
            "https://example.test/api/update-event/5"
        );
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let client = EvidencaClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://example.test/api/").unwrap(),
        );
        assert_eq!(
            client
                .url_with_id("update-event", &RecordId::Number(5))
                .unwrap()
                .as_str(),
            "https://example.test/api/update-event/5"
        );
        assert_eq!(
            client
                .url_with_id("delete-event", &RecordId::Text("a/b?c#d".into()))
                .unwrap()
                .as_str(),
            "https://example.test/api/delete-event/a%2Fb%3Fc%23d"
        );
    }
}
