use crate::http::headers::Headers;
use crate::http::request::{Method, Request};

const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Parses a raw request buffer.
///
/// Never fails: a request line with fewer than three space-separated tokens
/// yields an empty `Request`, header lines without a colon are skipped, and a
/// missing blank line means the whole buffer is treated as the header block.
pub fn parse_http_request(buf: &[u8]) -> Request {
    let (header_bytes, body_bytes) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + HEADERS_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    let headers_str = String::from_utf8_lossy(header_bytes);
    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split(' ').collect();

    if parts.len() < 3 {
        tracing::debug!(line = %request_line, "Could not parse request line");
        return Request::default();
    }

    let method = Method::from_str(parts[0]);
    if method.is_none() {
        tracing::debug!(method = %parts[0], "Unsupported request method");
    }

    // Headers
    let mut headers = Headers::new();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim_matches(' '), value.trim_matches(' '));
    }

    Request {
        method,
        path: parts[1].to_string(),
        version: parts[2].to_string(),
        headers,
        body: body_bytes.to_vec(),
    }
}

/// Offset of the blank line separating the header block from the body.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}

/// Total length of the message once its header block has arrived.
///
/// Counts the head, the blank line and the body promised by a valid
/// `Content-Length`. Returns `None` while the header block is incomplete.
/// The sum saturates, so an absurd `Content-Length` simply never completes.
pub fn required_length(buf: &[u8]) -> Option<usize> {
    let headers_end = find_headers_end(buf)?;
    let body_length = declared_body_length(&buf[..headers_end]);

    Some(
        headers_end
            .saturating_add(HEADERS_END.len())
            .saturating_add(body_length),
    )
}

/// `Content-Length` of a header block, 0 when missing or invalid.
///
/// Mirrors `Request::content_length` on the parsed request (last duplicate
/// wins, unparsable request line means no headers) without building it.
fn declared_body_length(head: &[u8]) -> usize {
    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let request_line = lines.next().unwrap_or_default();
    if request_line.split(' ').count() < 3 {
        return 0;
    }

    lines
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim_matches(' ') == "Content-Length")
        .last()
        .and_then(|(_, value)| value.trim_matches(' ').parse().ok())
        .unwrap_or(0)
}
