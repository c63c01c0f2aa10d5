//! Remote collection client
//!
//! Thin JSON wrapper over an [`HttpTransport`]. One attempt per call: no
//! retries, no timeouts. Every failure is normalised into [`HttpError`].

use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::error::HttpError;
use crate::request::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Message for a 2xx reply whose body is not JSON.
pub const INVALID_JSON_MESSAGE: &str = "invalid JSON response";

/// Query parameters in the order they are sent.
pub type QueryParams = Vec<(String, String)>;

/// REST client for one API origin.
///
/// Cheap to clone when the transport is; pages take a fresh copy per request.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    /// Origin without a trailing slash, e.g. `https://fscape-api.onrender.com`.
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Trailing slashes on `base_url` are dropped.
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport; tests use it to inspect recorded requests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for `path` with `query` form-encoded (`+` for spaces).
    pub fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// `GET path?query`.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, HttpError> {
        let req = HttpRequest::new(&self.url(path, query), HttpMethod::Get);
        self.execute(req).await
    }

    /// `POST path` with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, HttpError> {
        let req = HttpRequest::new(&self.url(path, &[]), HttpMethod::Post).with_json_body(body);
        self.execute(req).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, HttpError> {
        let req = HttpRequest::new(&self.url(path, &[]), HttpMethod::Put).with_json_body(body);
        self.execute(req).await
    }

    /// `DELETE path`. Empty acknowledgements decode as `null`.
    pub async fn delete(&self, path: &str) -> Result<Value, HttpError> {
        let req = HttpRequest::new(&self.url(path, &[]), HttpMethod::Delete);
        self.execute(req).await
    }

    /// Adds `Accept`, sends once and decodes the reply.
    async fn execute(&self, req: HttpRequest) -> Result<Value, HttpError> {
        let req = req.with_header("Accept", "application/json");
        let method = req.method;
        let url = req.url.clone();
        debug!(%method, %url, "issuing request");

        let response = match self.transport.send(req).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, %url, error = %e, "request did not complete");
                return Err(HttpError::network());
            }
        };

        let result = decode_response(response);
        if let Err(e) = &result {
            warn!(%method, %url, status = e.status, message = %e.message, "request failed");
        }
        result
    }
}

/// Non-2xx becomes [`HttpError`]; an empty 2xx body is `null`.
fn decode_response(response: HttpResponse) -> Result<Value, HttpError> {
    if !response.is_success() {
        let message = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| error_message(&body));
        return Err(match message {
            Some(message) => HttpError::new(response.status, message),
            None => HttpError::fallback(response.status),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body)
        .map_err(|_| HttpError::new(response.status, INVALID_JSON_MESSAGE))
}

/// Reads `message`, then `error` (string or `{ message }`), from a failure body.
fn error_message(body: &Value) -> Option<String> {
    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    body.get("message").and_then(non_empty).or_else(|| {
        let error = body.get("error")?;
        non_empty(error).or_else(|| error.get("message").and_then(non_empty))
    })
}

#[cfg(test)]
mod tests;
