//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an inbound HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the request target
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create an HTTP/1.1 request with no headers and an empty body.
    ///
    /// Query parameters are parsed from `path` eagerly.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let query_params = parse_query(&path);

        Self {
            method,
            path,
            version: HttpVersion::Http11,
            headers: HashMap::new(),
            body: Vec::new(),
            query_params,
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The request target without its query string.
    ///
    /// This is the part of the target the router splits into segments.
    pub fn route_path(&self) -> &str {
        match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        }
    }

    /// Get a header value, matching the name case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v))
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Parse the request body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the request declares an
    /// `application/json` content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }
}

fn parse_query(path: &str) -> HashMap<String, String> {
    path.split_once('?')
        .map(|(_, query)| query
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect())
        .unwrap_or_default()
}

/// Parse an HTTP request from a byte slice.
///
/// Everything after the blank line that ends the header section is taken as
/// the body verbatim.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let input_str = std::str::from_utf8(input)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let (head, body) = match input_str.find("\r\n\r\n") {
        Some(idx) => (&input_str[..idx], &input_str[idx + 4..]),
        None => match input_str.find("\n\n") {
            Some(idx) => (&input_str[..idx], &input_str[idx + 2..]),
            None => (input_str, ""),
        },
    };

    let mut lines = head.lines();

    let request_line = lines.next().filter(|line| !line.is_empty()).ok_or(Error::EmptyRequest)?;

    // Split the request line into method, target, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;
    let version = HttpVersion::from_str(parts[2])?;

    let mut request = HttpRequest::new(method, parts[1]);
    request.version = version;

    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;
        request.headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    if version == HttpVersion::Http11 && !request.has_header("Host") {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    request.body = body.as_bytes().to_vec();
    Ok(request)
}
