//! Shared upload and probe logic.
//!
//! Every endpoint funnels through [`Transport::upload`]: one multipart POST,
//! one attempt, bounded by the configured timeout and optionally aborted
//! through a [`Canceller`](crate::Canceller). Whatever goes wrong on the wire
//! comes back as either [`DocAtomError::Remote`] (the service's error body) or
//! [`DocAtomError::Transport`] (a message).

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use docatom_core::{ClientConfig, DocAtomError, DocAtomResult, ErrorCode, Logger};

use crate::cancel::{Binding, Pending};
use crate::payload::Payload;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// HTTP plumbing bound to one configuration.
#[derive(Debug)]
pub struct Transport {
    http: Client,
    config: ClientConfig,
    logger: Logger,
}

impl Transport {
    /// Create a transport for the given configuration.
    pub fn new(config: ClientConfig, logger: Logger) -> DocAtomResult<Self> {
        let http = Client::builder().build().map_err(|e| {
            DocAtomError::invalid_configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            config,
            logger,
        })
    }

    /// The configuration requests are built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub(crate) fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Upload a document to `url` and deserialize the JSON response.
    ///
    /// An empty `url` rejects with `URL cannot be null or empty` without
    /// sending anything. An empty response body is read as `{}`.
    pub fn upload<'a, T>(&'a self, url: impl Into<String>, payload: Payload) -> Pending<'a, T>
    where
        T: DeserializeOwned + Send + 'a,
    {
        let url = url.into();
        Pending::new(move |binding| Box::pin(self.execute_upload(url, payload, binding)))
    }

    /// Check that the endpoint answers a HEAD request.
    pub fn probe(&self) -> Pending<'_, bool> {
        Pending::new(move |binding| Box::pin(self.execute_probe(binding)))
    }

    async fn execute_upload<T: DeserializeOwned>(
        &self,
        url: String,
        payload: Payload,
        binding: Binding,
    ) -> DocAtomResult<T> {
        if url.is_empty() {
            return Err(DocAtomError::argument_missing("URL"));
        }

        let request = self
            .http
            .post(&url)
            .headers(self.default_headers()?)
            .multipart(Form::new().part(FILE_FIELD, file_part(payload)));

        let result = self
            .exchange(request, &binding, "POST", &url)
            .await
            .and_then(|(status, text)| {
                self.logger.debug(&format!(
                    "Success reported from POST: {}: {}",
                    url,
                    status.as_u16()
                ));
                deserialize_body(&url, &text)
            });

        self.report("POST", &url, result)
    }

    async fn execute_probe(&self, binding: Binding) -> DocAtomResult<bool> {
        let url = self.config.endpoint().to_string();
        let request = self
            .http
            .head(&url)
            .headers(self.default_headers()?);

        let result = self
            .exchange(request, &binding, "HEAD", &url)
            .await
            .map(|(status, _)| {
                self.logger.debug(&format!(
                    "Success reported from HEAD: {}: {}",
                    url,
                    status.as_u16()
                ));
                status.is_success()
            });

        self.report("HEAD", &url, result)
    }

    /// Send the request, racing it against the binding's token.
    ///
    /// The configured timeout bounds the wait for the response head; reading
    /// the body is not limited. Resolves to the status and body text of a
    /// 2xx/3xx response.
    async fn exchange(
        &self,
        request: RequestBuilder,
        binding: &Binding,
        method: &str,
        url: &str,
    ) -> DocAtomResult<(StatusCode, String)> {
        let timeout_ms = self.config.timeout_ms();
        let send = async {
            let response = tokio::time::timeout(self.config.timeout(), request.send())
                .await
                .map_err(|_| response_timeout(timeout_ms))?
                .map_err(map_reqwest_error)?;
            let status = response.status();
            let text = response.text().await.map_err(map_reqwest_error)?;
            Ok::<_, DocAtomError>((status, text))
        };

        let (status, text) = tokio::select! {
            biased;
            _ = binding.token().cancelled() => {
                self.logger
                    .debug(&format!("Request aborted to {}: {}.", method, url));
                return Err(DocAtomError::transport("Request aborted", ErrorCode::NetCancelled));
            }
            result = send => result?,
        };

        if status.is_client_error() || status.is_server_error() {
            return Err(status_error(status, &text));
        }
        Ok((status, text))
    }

    fn report<T>(&self, method: &str, url: &str, result: DocAtomResult<T>) -> DocAtomResult<T> {
        if let Err(ref err) = result {
            if !err.is_precondition() {
                self.logger.warn(&format!(
                    "Failed to retrieve object from {}: {}: {}",
                    method, url, err
                ));
            }
        }
        result
    }

    fn default_headers(&self) -> DocAtomResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.default_headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DocAtomError::invalid_configuration(format!("Invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                DocAtomError::invalid_configuration(format!(
                    "Invalid value for header '{}': {}",
                    name, e
                ))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

fn file_part(payload: Payload) -> Part {
    let file_name = payload.file_name.unwrap_or_else(|| FILE_FIELD.to_string());
    let mut part = Part::bytes(payload.bytes).file_name(file_name);

    if let Some(size) = payload.declared_size {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(size));
        part = part.headers(headers);
    }
    part
}

fn deserialize_body<T: DeserializeOwned>(url: &str, text: &str) -> DocAtomResult<T> {
    let body = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(body).map_err(|e| {
        DocAtomError::parse(format!("Failed to parse response from {}: {}", url, e))
    })
}

/// Error for a 4xx/5xx response: the JSON body if there is one, else the status line.
///
/// `null`, `false`, `0` and `""` count as no body.
fn status_error(status: StatusCode, text: &str) -> DocAtomError {
    match serde_json::from_str::<Value>(text) {
        Ok(body) if !is_blank(&body) => DocAtomError::Remote {
            status: status.as_u16(),
            body,
        },
        _ => DocAtomError::transport(status.to_string(), ErrorCode::NetHttpStatus),
    }
}

fn is_blank(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn response_timeout(timeout_ms: u64) -> DocAtomError {
    DocAtomError::transport(
        format!("Response timeout of {}ms exceeded", timeout_ms),
        ErrorCode::NetTimeout,
    )
}

fn map_reqwest_error(err: reqwest::Error) -> DocAtomError {
    DocAtomError::transport_with_source(err.to_string(), ErrorCode::NetConnectionFailed, err)
}
