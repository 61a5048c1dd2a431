//! Fluent construction of a [`RequestView`].

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Method};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::request::DEFAULT_CONTENT_TYPE;
use crate::{Error, RequestView, Result};

/// AsciiSet used to encode substituted path variables.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static PATH_VARIABLE_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// How a collection of values is rendered as a single query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    /// Comma separated: `a,b,c`
    Csv,
    /// Space separated: `a b c`
    Ssv,
    /// Tab separated
    Tsv,
    /// Pipe separated: `a|b|c`
    Pipes,
    /// Repeated parameter: `k=a&k=b&k=c`
    Multi,
}

impl CollectionFormat {
    fn delimiter(self) -> Option<&'static str> {
        match self {
            CollectionFormat::Csv => Some(","),
            CollectionFormat::Ssv => Some(" "),
            CollectionFormat::Tsv => Some("\t"),
            CollectionFormat::Pipes => Some("|"),
            CollectionFormat::Multi => None,
        }
    }
}

/// Insertion ordered multimap, values kept in the order they were added.
#[derive(Debug, Clone, Default)]
struct Params(Vec<(String, Vec<String>)>);

impl Params {
    fn add(&mut self, name: &str, value: String) {
        match self.0.iter_mut().find(|(k, _)| k == name) {
            Some((_, values)) => values.push(value),
            None => self.0.push((name.to_string(), vec![value])),
        }
    }

    fn set(&mut self, name: &str, value: String) {
        if let Some((_, values)) = self.0.iter_mut().find(|(k, _)| k == name) {
            values.clear();
        }
        self.add(name, value);
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

/// RequestBuilder accumulates everything that goes into a request before it is signed.
///
/// ```
/// use http::Method;
/// use reqauth_core::{CollectionFormat, RequestBuilder};
///
/// let req = RequestBuilder::new(Method::GET, "https://api.example.com/users/{id}/orders")
///     .path("id", "42")
///     .add_query("status", "open")
///     .add_query_collection("fields", ["id", "total"], CollectionFormat::Csv)
///     .accepts("application/json")
///     .build()
///     .unwrap();
///
/// assert_eq!(req.path_and_query(), "/users/42/orders?status=open&fields=id%2Ctotal");
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    paths: Vec<(String, String)>,
    headers: Params,
    parameters: Params,
    query: Params,
    form: Params,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Create a builder for `method` on a url template such as `https://host/users/{id}`.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            paths: Vec::new(),
            headers: Params::default(),
            parameters: Params::default(),
            query: Params::default(),
            form: Params::default(),
            body: None,
        }
    }

    /// Substitute the `{name}` placeholder of the url template.
    pub fn path(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.paths.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.paths.push((name.to_string(), value)),
        }
        self
    }

    /// Add a general parameter, keeping earlier values of the same name.
    ///
    /// General parameters are sent in the query for `GET` and `DELETE`, and in
    /// the form body for `POST` and `PUT`.
    pub fn add_param(mut self, name: &str, value: impl ToString) -> Self {
        self.parameters.add(name, value.to_string());
        self
    }

    /// Set a general parameter, replacing earlier values of the same name.
    pub fn set_param(mut self, name: &str, value: impl ToString) -> Self {
        self.parameters.set(name, value.to_string());
        self
    }

    /// Add a query parameter, keeping earlier values of the same name.
    pub fn add_query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.add(name, value.to_string());
        self
    }

    /// Set a query parameter, replacing earlier values of the same name.
    pub fn set_query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.set(name, value.to_string());
        self
    }

    /// Add a collection of values as query parameter(s) rendered with `format`.
    ///
    /// Empty collections add nothing.
    pub fn add_query_collection<I>(mut self, name: &str, values: I, format: CollectionFormat) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.is_empty() {
            return self;
        }

        match format.delimiter() {
            Some(delimiter) => self.query.add(name, values.join(delimiter)),
            None => {
                for value in values {
                    self.query.add(name, value);
                }
            }
        }
        self
    }

    /// Add a form parameter, keeping earlier values of the same name.
    pub fn add_form(mut self, name: &str, value: impl ToString) -> Self {
        self.form.add(name, value.to_string());
        self
    }

    /// Set a form parameter, replacing earlier values of the same name.
    pub fn set_form(mut self, name: &str, value: impl ToString) -> Self {
        self.form.set(name, value.to_string());
        self
    }

    /// Add a header, keeping earlier values of the same name.
    ///
    /// Header names are case-insensitive.
    pub fn add_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.add(&name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Set a header, replacing earlier values of the same name.
    pub fn set_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.set(&name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Set the `Accept` header.
    pub fn accepts(self, mime_type: &str) -> Self {
        self.set_header(ACCEPT.as_str(), mime_type)
    }

    /// Set the `Content-Type` header.
    pub fn content_type(self, mime_type: &str) -> Self {
        self.set_header(CONTENT_TYPE.as_str(), mime_type)
    }

    /// Set the exact body to send. An empty body clears it.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Resolve path variables, query, body and headers into a [`RequestView`].
    pub fn build(self) -> Result<RequestView> {
        let has_entity = self.method == Method::POST || self.method == Method::PUT;

        let mut url = self.url;
        for (name, value) in &self.paths {
            let encoded = utf8_percent_encode(value, &PATH_VARIABLE_ENCODE_SET).to_string();
            url = url.replace(&format!("{{{name}}}"), &encoded);
        }

        let query = {
            let mut s = form_urlencoded::Serializer::new(String::new());
            if !has_entity {
                s.extend_pairs(self.parameters.iter());
            }
            s.extend_pairs(self.query.iter());
            s.finish()
        };
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut form_body = false;
        let body = match self.body {
            Some(body) => body,
            None if has_entity => {
                let form = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.parameters.iter())
                    .extend_pairs(self.form.iter())
                    .finish();
                if form.is_empty() {
                    return Err(Error::request_invalid(format!(
                        "no body was specified for {} {url}",
                        self.method
                    )));
                }
                form_body = true;
                Bytes::from(form)
            }
            None => Bytes::new(),
        };

        let mut req = RequestView::new(self.method, url)?.with_body(body);
        for (name, value) in self.headers.iter() {
            req.header_append(HeaderName::try_from(name)?, HeaderValue::try_from(value)?);
        }
        if form_body && !req.headers().contains_key(CONTENT_TYPE) {
            req.header_insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        }

        Ok(req)
    }
}
