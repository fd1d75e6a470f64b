pub mod endpoints;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::CashMeConfig;
use crate::error::{CashMeError, RequestError, Result};
use crate::token_store::TokenStore;

/// HTTP client wrapper for the CashMe REST API.
///
/// Every call carries `Content-Type: application/json` and, when the token
/// store holds a credential, `Authorization: Bearer <token>`. The gateway
/// only reads the token store; reacting to specific failures is left to the
/// session layer.
#[derive(Clone)]
pub struct CashMeHttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for CashMeHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CashMeHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CashMeHttpClient {
    pub fn new(config: &CashMeConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CashMeError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Send a request and parse the JSON response.
    ///
    /// An empty 2xx body is parsed as JSON `null`, so `()` and `Option<_>`
    /// are valid targets for endpoints that return nothing.
    pub async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, path, &[], body, extra_headers).await
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, &[], None::<&()>, &[]).await
    }

    /// GET a plain-text resource.
    pub async fn get_text(&self, path: &str) -> Result<String> {
        let bytes = self
            .request_bytes(Method::GET, path, &[], None::<&()>, &[])
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// POST a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, &[], Some(body), &[]).await
    }

    /// PUT with an optional JSON body.
    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, &[], body, &[]).await
    }

    /// DELETE a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, &[], None::<&()>, &[]).await
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self
            .request_bytes(method, path, query, body, extra_headers)
            .await?;
        parse_body(&bytes)
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn request_bytes<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "request");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token.as_str());
        }
        for (name, value) in extra_headers {
            req = req.header(*name, *value);
        }
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let resp = req.send().await.map_err(|e| {
            let err = RequestError::from(e);
            warn!(%method, path, kind = ?err.kind, error = %err, "request failed");
            err
        })?;

        if !resp.status().is_success() {
            let err = error_from_response(resp).await;
            warn!(%method, path, status = ?err.status, kind = ?err.kind, error = %err, "request rejected");
            return Err(err.into());
        }

        let bytes = resp.bytes().await.map_err(RequestError::from)?;
        Ok(bytes.to_vec())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads credentials from.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

async fn error_from_response(resp: Response) -> RequestError {
    let status = resp.status().as_u16();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));
    let text = resp.text().await.unwrap_or_default();
    RequestError::http(status, error_message(status, is_json, &text))
}

/// Human-readable message for a rejected request.
///
/// JSON bodies yield `message`, then `error`. Non-JSON or unparseable bodies
/// yield the raw text. Anything else yields `HTTP error: <status>`.
fn error_message(status: u16, is_json: bool, text: &str) -> String {
    let generic = || format!("HTTP error: {status}");

    if is_json {
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            return ["message", "error"]
                .iter()
                .find_map(|field| {
                    value
                        .get(field)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(generic);
        }
    }

    let raw = text.trim();
    if raw.is_empty() {
        generic()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = r#"{"message":"Insufficient funds","error":"Bad Request"}"#;
        assert_eq!(error_message(400, true, body), "Insufficient funds");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let body = r#"{"error":"Ticket subject is required"}"#;
        assert_eq!(error_message(400, true, body), "Ticket subject is required");
    }

    #[test]
    fn test_error_message_json_without_fields_is_generic() {
        assert_eq!(error_message(418, true, r#"{"code":7}"#), "HTTP error: 418");
    }

    #[test]
    fn test_error_message_unparseable_json_uses_raw_text() {
        assert_eq!(error_message(502, true, "upstream down"), "upstream down");
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(
            error_message(500, false, "Internal Server Error"),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_error_message_empty_body() {
        assert_eq!(error_message(503, false, "  "), "HTTP error: 503");
    }

    #[test]
    fn test_parse_empty_body_as_unit() {
        parse_body::<()>(b"").unwrap();
        let none: Option<u32> = parse_body(b"\n").unwrap();
        assert!(none.is_none());
    }
}
