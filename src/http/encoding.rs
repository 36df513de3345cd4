//! Content-Encoding negotiation.
//!
//! Only gzip is offered. The check is a case-sensitive membership test on
//! the comma-separated `Accept-Encoding` list; quality values and every
//! other coding are ignored.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::request::Request;
use crate::http::response::Response;

pub const GZIP: &str = "gzip";

/// Whether the client listed `gzip` among its acceptable encodings.
pub fn accepts_gzip(request: &Request) -> bool {
    request
        .header("Accept-Encoding")
        .map(|list| list.split(',').any(|token| token.trim() == GZIP))
        .unwrap_or(false)
}

/// Compresses `body` into a complete gzip member.
pub fn gzip(body: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

/// Applies gzip to `response` when the request allows it.
///
/// Runs for every status, including empty bodies. `Content-Length` is
/// rewritten to the compressed size.
pub fn negotiate(request: &Request, mut response: Response) -> io::Result<Response> {
    if !accepts_gzip(request) {
        return Ok(response);
    }

    let compressed = gzip(&response.body)?;

    tracing::debug!(
        original = response.body.len(),
        compressed = compressed.len(),
        "Compressed response body"
    );

    response.headers.insert("Content-Encoding", GZIP);
    response
        .headers
        .insert("Content-Length", compressed.len().to_string());
    response.body = compressed;

    Ok(response)
}
