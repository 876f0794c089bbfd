use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use std::borrow::Cow;

/// Request as built by callers, before middleware and dispatch.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Absolute URL or path relative to the configured API base.
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Request payload kinds the middleware distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Plain structured body, sent as JSON.
    Json(serde_json::Value),
    Text(String),
    /// File upload; the transport owns the boundary.
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Multipart upload body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<MultipartPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub content: PartContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content: PartContent::Text(value.into()),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content: PartContent::File {
                file_name: file_name.into(),
                mime: mime.map(str::to_string),
                bytes,
            },
        });
        self
    }
}

impl OutboundRequest {
    pub fn new(method: Method, url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url, RequestBody::Empty)
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, url, RequestBody::Json(body))
    }

    pub fn post_multipart(url: impl Into<String>, form: MultipartForm) -> Self {
        Self::new(Method::POST, url, RequestBody::Multipart(form))
    }

    /// Adds a caller header. Caller headers win over middleware defaults.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Path component of `url`, without query or fragment.
    ///
    /// Absolute URLs are parsed; a URL without a path yields `/`. Relative
    /// URLs have no origin, so their raw text is cut at `?` or `#`.
    pub fn path(&self) -> Cow<'_, str> {
        match Url::parse(&self.url) {
            Ok(url) => Cow::Owned(url.path().to_string()),
            Err(_) => {
                let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
                Cow::Borrowed(&self.url[..end])
            }
        }
    }
}
