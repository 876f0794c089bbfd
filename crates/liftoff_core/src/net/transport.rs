use super::middleware::RequestMiddleware;
use super::request::{MultipartForm, OutboundRequest, PartContent, RequestBody};
use log::{info, warn};
use reqwest::blocking::{multipart, Client};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Status and body of a completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Dispatch failures.
#[derive(Debug)]
pub enum TransportError {
    /// Relative URL given but no API base is configured.
    MissingBaseUrl(String),
    Encode(serde_json::Error),
    /// Multipart part carries an unparsable MIME type.
    InvalidMime(String),
    Http(reqwest::Error),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBaseUrl(url) => {
                write!(f, "relative url `{url}` requires a configured api base url")
            }
            Self::Encode(err) => write!(f, "request body encoding failed: {err}"),
            Self::InvalidMime(mime) => write!(f, "invalid multipart mime type `{mime}`"),
            Self::Http(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingBaseUrl(_) => None,
            Self::Encode(err) => Some(err),
            Self::InvalidMime(_) => None,
            Self::Http(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Sends a fully prepared request.
pub trait Transport {
    fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

/// Decorator running a middleware before every dispatch of `inner`.
pub struct TieredTransport<T: Transport, M: RequestMiddleware> {
    inner: T,
    middleware: M,
}

impl<T: Transport, M: RequestMiddleware> TieredTransport<T, M> {
    pub fn new(inner: T, middleware: M) -> Self {
        Self { inner, middleware }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport, M: RequestMiddleware> Transport for TieredTransport<T, M> {
    fn send(&self, mut request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.middleware.prepare(&mut request);
        self.inner.send(request)
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: Client,
    base_url: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    fn resolve_url(&self, url: &str) -> Result<String, TransportError> {
        if url.contains("://") {
            return Ok(url.to_string());
        }
        match &self.base_url {
            Some(base) => Ok(format!("{}/{}", base, url.trim_start_matches('/'))),
            None => Err(TransportError::MissingBaseUrl(url.to_string())),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let started_at = Instant::now();
        let url = self.resolve_url(&request.url)?;
        let method = request.method.clone();
        let builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(build_form(form)?),
        };

        let response = match builder.send() {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=http_send module=net status=error method={} duration_ms={} error={}",
                    method,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };
        let status = response.status().as_u16();
        let body = response.text()?;
        info!(
            "event=http_send module=net status=ok method={} http_status={} duration_ms={}",
            method,
            status,
            started_at.elapsed().as_millis()
        );
        Ok(TransportResponse { status, body })
    }
}

fn build_form(form: MultipartForm) -> Result<multipart::Form, TransportError> {
    let mut built = multipart::Form::new();
    for part in form.parts {
        built = match part.content {
            PartContent::Text(value) => built.text(part.name, value),
            PartContent::File {
                file_name,
                mime,
                bytes,
            } => {
                let mut file_part = multipart::Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime {
                    file_part = file_part
                        .mime_str(&mime)
                        .map_err(|_| TransportError::InvalidMime(mime.clone()))?;
                }
                built.part(part.name, file_part)
            }
        };
    }
    Ok(built)
}
