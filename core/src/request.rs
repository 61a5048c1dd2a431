use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Content type assumed when the request carries no `Content-Type` header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// RequestView is the finalized, not-yet-sent request that signers read from.
///
/// Method, URI and body are fixed at construction. Signers may only add or
/// overwrite headers, so a signature computed over this view stays valid until
/// the request is dispatched.
#[derive(Debug, Clone)]
pub struct RequestView {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestView {
    /// Create a view over `method` and a fully resolved absolute `uri`.
    ///
    /// Only `GET`, `POST`, `PUT` and `DELETE` are accepted. The uri must carry
    /// a scheme and a host, and its path and query are kept in their raw,
    /// already percent-encoded form.
    pub fn new<T>(method: Method, uri: T) -> Result<Self>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        if !matches!(
            method,
            Method::GET | Method::POST | Method::PUT | Method::DELETE
        ) {
            return Err(Error::request_invalid(format!(
                "unsupported method {method}"
            )));
        }

        let uri = Uri::try_from(uri).map_err(|e| Error::from(e.into()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(Error::request_invalid(format!(
                "request uri {uri} must be absolute"
            )));
        }

        Ok(Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    /// Set the exact payload that will be transmitted.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a header before the view is handed to signers.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Fully resolved request uri.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Raw path followed by `?query` when a query is present.
    pub fn path_and_query(&self) -> String {
        match self.uri.query() {
            Some(q) => format!("{}?{}", self.uri.path(), q),
            None => self.uri.path().to_string(),
        }
    }

    /// Host of the request uri.
    pub fn host(&self) -> &str {
        // `new` guarantees a host.
        self.uri.host().unwrap_or_default()
    }

    /// Port of the request uri, falling back to the scheme's default port.
    pub fn port(&self) -> Result<u16> {
        if let Some(port) = self.uri.port_u16() {
            return Ok(port);
        }

        match self.uri.scheme() {
            Some(s) if *s == Scheme::HTTP => Ok(80),
            Some(s) if *s == Scheme::HTTPS => Ok(443),
            _ => Err(Error::request_invalid(format!(
                "request uri {} has no port and no known default",
                self.uri
            ))),
        }
    }

    /// Value of the `Content-Type` header, or [`DEFAULT_CONTENT_TYPE`] when unset.
    pub fn content_type(&self) -> Result<&str> {
        match self.headers.get(CONTENT_TYPE) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(DEFAULT_CONTENT_TYPE),
        }
    }

    /// The exact outgoing payload, empty if none.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Whether a non-empty payload will be transmitted.
    #[inline]
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// All headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the first value of a header as str.
    pub fn header_get(&self, name: &HeaderName) -> Result<Option<&str>> {
        match self.headers.get(name) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }

    /// Set a header, replacing every previous value of it.
    pub fn header_insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Add a header value, keeping previous values of it.
    pub fn header_append(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Convert into an `http::Request` for the transport.
    pub fn into_http_request(self) -> Result<http::Request<Bytes>> {
        let mut req = http::Request::builder()
            .method(self.method)
            .uri(self.uri)
            .body(self.body)?;
        *req.headers_mut() = self.headers;
        Ok(req)
    }
}

impl TryFrom<http::Request<Bytes>> for RequestView {
    type Error = Error;

    fn try_from(req: http::Request<Bytes>) -> Result<Self> {
        let (parts, body) = req.into_parts();
        let mut view = RequestView::new(parts.method, parts.uri)?;
        view.headers = parts.headers;
        view.body = body;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::AUTHORIZATION;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_unsupported_method() {
        let err = RequestView::new(Method::PATCH, "http://example.com/").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_rejects_relative_uri() {
        let err = RequestView::new(Method::GET, "/foo?bar=1").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_uri_components() -> Result<()> {
        let req = RequestView::new(Method::GET, "http://example.com:8000/a%20b/c?x=1%202&y")?;

        assert_eq!(req.path_and_query(), "/a%20b/c?x=1%202&y");
        assert_eq!(req.host(), "example.com");
        assert_eq!(req.port()?, 8000);
        Ok(())
    }

    #[test]
    fn test_default_ports() -> Result<()> {
        let req = RequestView::new(Method::GET, "http://example.com/foo")?;
        assert_eq!(req.port()?, 80);
        assert_eq!(req.path_and_query(), "/foo");

        let req = RequestView::new(Method::GET, "https://example.com/foo")?;
        assert_eq!(req.port()?, 443);
        Ok(())
    }

    #[test]
    fn test_content_type_default() -> Result<()> {
        let req = RequestView::new(Method::POST, "http://example.com/")?;
        assert_eq!(req.content_type()?, DEFAULT_CONTENT_TYPE);

        let req = req.with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(req.content_type()?, "application/json");
        Ok(())
    }

    #[test]
    fn test_header_insert_and_append() -> Result<()> {
        let mut req = RequestView::new(Method::GET, "http://example.com/")?;
        req.header_append(AUTHORIZATION, HeaderValue::from_static("a"));
        req.header_append(AUTHORIZATION, HeaderValue::from_static("b"));
        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["a", "b"]);

        req.header_insert(AUTHORIZATION, HeaderValue::from_static("c"));
        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["c"]);
        assert_eq!(req.header_get(&AUTHORIZATION)?, Some("c"));
        Ok(())
    }

    #[test]
    fn test_http_request_conversion() -> Result<()> {
        let req = RequestView::new(Method::PUT, "https://example.com/items/1")?
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .with_body("hello");

        let http_req = req.into_http_request()?;
        assert_eq!(http_req.method(), Method::PUT);
        assert_eq!(http_req.uri(), "https://example.com/items/1");
        assert_eq!(http_req.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(http_req.body().as_ref(), b"hello");

        let back = RequestView::try_from(http_req)?;
        assert!(back.has_body());
        assert_eq!(back.content_type()?, "text/plain");
        Ok(())
    }
}
