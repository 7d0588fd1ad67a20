//! HTTP request head parsing and representation.

use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// How the body following a request head is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// No body follows the head.
    Empty,
    /// Exactly this many body bytes follow the head.
    ContentLength(u64),
    /// A transfer-coded body follows; its length is only known by decoding it.
    Chunked,
}

/// Represents a parsed HTTP request head.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, as sent
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers in the order they were received
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - The request target
    /// * `version` - The HTTP version
    /// * `headers` - The HTTP headers
    pub fn new(method: Method, path: String, version: HttpVersion, headers: Vec<(String, String)>) -> Self {
        Self {
            method,
            path,
            version,
            headers,
        }
    }

    /// Get the first value of a header, matching the name case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v.as_str())
            } else {
                None
            }
        })
    }

    /// Iterate over every value of a header, in the order received.
    pub fn get_headers<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Whether the client asked for the connection to stay open after this
    /// request.
    ///
    /// An explicit `Connection: close` or `Connection: keep-alive` wins;
    /// otherwise HTTP/1.1 is persistent and HTTP/1.0 is not.
    pub fn keep_alive(&self) -> bool {
        let mut keep_alive = self.version.keep_alive_by_default();
        for token in self.get_headers("Connection").flat_map(|v| v.split(',')) {
            let token = token.trim();
            if token.eq_ignore_ascii_case("close") {
                return false;
            }
            if token.eq_ignore_ascii_case("keep-alive") {
                keep_alive = true;
            }
        }
        keep_alive
    }

    /// Work out how the request body is delimited.
    ///
    /// `Transfer-Encoding` takes precedence over `Content-Length`. Repeated or
    /// list-valued `Content-Length` headers must all agree.
    pub fn body_framing(&self) -> Result<BodyFraming, Error> {
        if self.has_header("Transfer-Encoding") {
            return Ok(BodyFraming::Chunked);
        }

        let mut length: Option<u64> = None;
        for value in self.get_headers("Content-Length").flat_map(|v| v.split(',')) {
            let value = value.trim();
            let parsed = value
                .parse::<u64>()
                .ok()
                .filter(|_| value.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| Error::InvalidContentLength(value.to_string()))?;
            match length {
                Some(previous) if previous != parsed => {
                    return Err(Error::InvalidContentLength(value.to_string()));
                }
                _ => length = Some(parsed),
            }
        }

        Ok(match length {
            None | Some(0) => BodyFraming::Empty,
            Some(n) => BodyFraming::ContentLength(n),
        })
    }
}

/// Split a head into lines on `\n`, dropping the `\r` of each CRLF.
fn head_lines(input: &[u8]) -> impl Iterator<Item = &[u8]> {
    input
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Decode a header value as ISO-8859-1, so obs-text bytes are kept rather
/// than rejected.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse an HTTP request head from a byte slice.
///
/// The input is the request line plus header lines. A trailing blank line is
/// allowed and ends the head; anything after it is ignored. Blank lines before
/// the request line are skipped.
///
/// The request line and header names must be UTF-8. Header values may carry
/// any byte and are decoded as ISO-8859-1.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let mut lines = head_lines(input);

    let request_line = lines
        .by_ref()
        .find(|line| !line.is_empty())
        .ok_or(Error::EmptyRequest)?;
    let request_line = std::str::from_utf8(request_line).map_err(|_| Error::InvalidEncoding)?;

    // Split the request line into method, target, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    // origin-form, asterisk-form, absolute-form, or authority-form for CONNECT
    let path = parts[1];
    let valid_target = path.starts_with('/')
        || path == "*"
        || path.contains("://")
        || method == Method::CONNECT;
    if !valid_target {
        return Err(Error::InvalidPath);
    }

    let version = HttpVersion::from_str(parts[2])?;

    let mut headers = Vec::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(Error::InvalidHeaderFormat)?;
        let name = std::str::from_utf8(&line[..colon]).map_err(|_| Error::InvalidEncoding)?;

        // Folded continuation lines and whitespace before the colon are rejected
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(Error::InvalidHeaderFormat);
        }

        let value = latin1(&line[colon + 1..]);
        headers.push((name.to_string(), value.trim_matches(&[' ', '\t'][..]).to_string()));
    }

    Ok(HttpRequest::new(method, path.to_string(), version, headers))
}
