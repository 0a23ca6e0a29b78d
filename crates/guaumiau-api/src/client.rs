// REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL resolution and uniform response
// handling. Endpoint groups (auth, pets) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Guau&Miau backend.
///
/// Every call is a single attempt: no retries, no caching. Non-2xx
/// responses become [`Error::Http`] carrying the response body text so
/// callers can show the server's own message.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `http://localhost:8080/`). A
    /// missing trailing slash is added so relative joins keep the full path.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an endpoint path relative to the API root.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body, if any.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        let body = self.execute(self.http.get(url)).await?;
        decode(body)
    }

    /// Send a POST request with a JSON body and decode the JSON reply, if any.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);
        let body = self.execute(self.http.post(url).json(body)).await?;
        decode(body)
    }

    /// Send a POST request whose reply body is irrelevant.
    pub(crate) async fn post_discard(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);
        self.execute(self.http.post(url).json(body)).await?;
        Ok(())
    }

    /// Send a PUT request with a JSON body and decode the JSON reply, if any.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("PUT {}", url);
        let body = self.execute(self.http.put(url).json(body)).await?;
        decode(body)
    }

    /// Send a DELETE request. Any 2xx counts as success.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);
        self.execute(self.http.delete(url)).await?;
        Ok(())
    }

    /// Send the request and return the non-empty body text of a 2xx reply.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Option<String>, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, len = text.len(), "response received");

        let body = non_empty(text);
        if status.is_success() {
            Ok(body)
        } else {
            debug!(%status, "request rejected");
            Err(Error::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_owned())
    }
}

/// Decode an optional JSON body. A literal `null` reads as absent.
fn decode<T: DeserializeOwned>(body: Option<String>) -> Result<Option<T>, Error> {
    let Some(body) = body else {
        return Ok(None);
    };
    serde_json::from_str::<Option<T>>(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:8080/api").unwrap(),
        );
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.url("pets/3").unwrap().as_str(),
            "http://localhost:8080/api/pets/3"
        );
        assert_eq!(
            client.url("/auth/login").unwrap().as_str(),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn blank_bodies_are_absent() {
        assert_eq!(non_empty("  \n".into()), None);
        assert_eq!(non_empty(" oops ".into()).as_deref(), Some("oops"));
    }

    #[test]
    fn null_decodes_to_none() {
        let value: Option<Vec<i64>> = decode(Some("null".into())).unwrap();
        assert!(value.is_none());
    }
}
