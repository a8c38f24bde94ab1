//! Blocking GET over a libcurl easy handle.

use super::{FetchError, Transport};
use crate::config::FetchConfig;
use std::str;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Single-request libcurl client with a fixed `User-Agent` and total timeout.
/// Follows redirects.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self::new(cfg.user_agent.clone(), cfg.timeout())
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        let mut status_line: Option<String> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(CONNECT_TIMEOUT.min(self.timeout))?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            // With redirects this ends up holding the final response's status line.
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    if line.starts_with("HTTP/") {
                        status_line = Some(line.to_string());
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            let reason = status_line
                .as_deref()
                .and_then(reason_from_status_line)
                .unwrap_or_else(|| canonical_reason(code).to_string());
            return Err(FetchError::Http {
                status: code,
                reason,
            });
        }

        Ok(body)
    }
}

/// Reason phrase from a status line like `HTTP/1.1 404 Not Found`.
/// HTTP/2 status lines carry none.
pub fn reason_from_status_line(line: &str) -> Option<String> {
    let reason = line.splitn(3, ' ').nth(2)?.trim();
    if reason.is_empty() {
        None
    } else {
        Some(reason.to_string())
    }
}

fn canonical_reason(code: u32) -> &'static str {
    match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown",
    }
}
