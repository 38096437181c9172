use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use querywire_model::{Map, Value};
use serde::Serialize;

/// Everything outside the RFC 3986 unreserved set gets encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode(s: &str) -> String {
    utf8_percent_encode(s, UNRESERVED).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be handed to the transport. Parameter values are raw and parameter order
/// is significant. Keys may repeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query_parameters: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Map<String, Value>>,
}

impl Request {
    pub fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query_parameters: vec![],
            body: None,
        }
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_parameters.push((key.into(), value.into()));
    }

    pub(crate) fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// The value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query_parameters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The values of every parameter named `key`, in order.
    pub fn params<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query_parameters
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.query_parameters.iter().map(|(k, _)| k.as_str())
    }

    /// The percent-encoded query string, without the leading `?`. This is the one place values
    /// get encoded.
    pub fn query_string(&self) -> String {
        self.query_parameters
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .join("&")
    }

    /// The full URL of this request relative to `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let path = self.path.split('/').map(encode).join("/");
        let mut url = format!("{}/{}", base_url.trim_end_matches('/'), path);
        if !self.query_parameters.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query_parameters.is_empty() {
            let params = self
                .query_parameters
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .join("&");
            write!(f, "?{params}")?;
        }
        if let Some(body) = &self.body {
            write!(f, " {}", Value::Object(body.clone()))?;
        }
        Ok(())
    }
}
