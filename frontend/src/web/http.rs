//! `fetch` transport for the core API client.

use async_trait::async_trait;
use fscape_admin::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use gloo_net::http::{Method, RequestBuilder};

/// Sends requests through the browser's `fetch` via `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(format!("request build failed: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("body read failed: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
