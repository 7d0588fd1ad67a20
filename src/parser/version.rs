//! HTTP protocol versions.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// Supported HTTP protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    Http11,
}

impl HttpVersion {
    /// Whether connections default to persistent for this version.
    pub fn keep_alive_by_default(&self) -> bool {
        matches!(self, HttpVersion::Http11)
    }
}

impl FromStr for HttpVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(HttpVersion::Http10),
            "HTTP/1.1" => Ok(HttpVersion::Http11),
            _ => {
                // HTTP/<digit>.<digit> is well formed, just not something we speak
                let well_formed = s
                    .strip_prefix("HTTP/")
                    .and_then(|v| v.split_once('.'))
                    .is_some_and(|(major, minor)| {
                        !major.is_empty()
                            && !minor.is_empty()
                            && major.bytes().all(|b| b.is_ascii_digit())
                            && minor.bytes().all(|b| b.is_ascii_digit())
                    });
                if well_formed {
                    Err(Error::UnsupportedVersion(s.to_string()))
                } else {
                    Err(Error::InvalidVersion(s.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVersion::Http10 => write!(f, "HTTP/1.0"),
            HttpVersion::Http11 => write!(f, "HTTP/1.1"),
        }
    }
}
