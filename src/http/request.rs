use crate::http::headers::Headers;

/// HTTP request methods the server routes.
///
/// Any other verb is kept out of the routing table entirely; the parser
/// records it as `None` and the request falls through to 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Upload a resource
    POST,
}

/// Represents a parsed HTTP request from a client.
///
/// A request whose request line could not be split into three tokens is
/// left in its default, empty state: no method, empty path and version,
/// no headers and no body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method, `None` when missing or unsupported
    pub method: Option<Method>,
    /// The request target as sent (e.g., "/echo/abc")
    pub path: String,
    /// HTTP version token, not validated
    pub version: String,
    /// Request headers in arrival order, last duplicate wins
    pub headers: Headers,
    /// Bytes following the header block, not clipped to Content-Length
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: Some(self.method.ok_or("method missing")?),
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// The upload length declared by the client, if it is a positive integer.
    pub fn declared_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
    }

    /// True for a request whose request line could not be parsed.
    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.path.is_empty() && self.version.is_empty()
    }
}
