//! HTTP transport for archive downloads.
//!
//! `Transport` is the seam between the fetch loop and the network; the
//! production implementation is a blocking libcurl GET (`CurlTransport`).

mod easy;
mod error;

pub use easy::{reason_from_status_line, CurlTransport};
pub use error::FetchError;

/// Blocking GET returning the full response body.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}
