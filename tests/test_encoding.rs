use std::io::Read;

use flate2::read::GzDecoder;
use lantern::http::connection::respond;
use lantern::http::encoding::{accepts_gzip, gzip, negotiate};
use lantern::http::request::{Method, Request, RequestBuilder};
use lantern::http::response::{Response, StatusCode};
use lantern::routes::Router;
use tempfile::TempDir;

fn gunzip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
    out
}

fn request(method: Method, path: &str, headers: &[(&str, &str)], body: &[u8]) -> Request {
    let mut builder = RequestBuilder::new().method(method).path(path).body(body);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    builder.build().unwrap()
}

#[test]
fn test_gzip_round_trip() {
    let compressed = gzip(b"abc").unwrap();

    assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
    assert_eq!(gunzip(&compressed), b"abc");
}

#[test]
fn test_absent_header_passes_through() {
    let req = request(Method::GET, "/echo/abc", &[], b"");
    let original = Response::text("abc");

    assert!(!accepts_gzip(&req));
    assert_eq!(negotiate(&req, original.clone()).unwrap(), original);
}

#[test]
fn test_other_encodings_pass_through() {
    let req = request(
        Method::GET,
        "/echo/abc",
        &[("Accept-Encoding", "deflate, br")],
        b"",
    );
    let original = Response::text("abc");

    assert_eq!(negotiate(&req, original.clone()).unwrap(), original);
}

#[test]
fn test_lowercase_header_name_is_not_recognized() {
    let req = request(Method::GET, "/echo/abc", &[("accept-encoding", "gzip")], b"");

    assert!(!accepts_gzip(&req));
}

#[test]
fn test_negotiate_compresses_and_sets_headers() {
    let req = request(
        Method::GET,
        "/echo/abc",
        &[("Accept-Encoding", "invalid-encoding-1, gzip, invalid-encoding-2")],
        b"",
    );

    let response = negotiate(&req, Response::text("abc")).unwrap();

    assert_eq!(response.headers.get("Content-Encoding"), Some("gzip"));
    assert_eq!(
        response.headers.get("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(gunzip(&response.body), b"abc");

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Content-Type", "Content-Length", "Content-Encoding"]);
}

#[test]
fn test_negotiate_compresses_empty_error_bodies() {
    let req = request(Method::GET, "/nope", &[("Accept-Encoding", "gzip")], b"");

    let response = negotiate(&req, Response::not_found()).unwrap();

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(!response.body.is_empty());
    assert!(gunzip(&response.body).is_empty());
    assert_eq!(
        response.headers.get("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
}

#[tokio::test]
async fn test_every_route_decompresses_to_plain_body() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.bin"), [9u8, 8, 7, 6]).unwrap();
    let router = Router::new(Some(dir.path().to_path_buf()));

    let cases = [
        (Method::GET, "/", vec![("User-Agent", "ua")], Vec::new()),
        (Method::GET, "/echo/abc", vec![], Vec::new()),
        (Method::GET, "/user-agent", vec![("User-Agent", "ua/1")], Vec::new()),
        (Method::GET, "/files/data.bin", vec![], Vec::new()),
        (Method::GET, "/files/missing", vec![], Vec::new()),
        (Method::POST, "/files/up", vec![("Content-Length", "2")], b"hi".to_vec()),
        (Method::POST, "/files/up", vec![], b"hi".to_vec()),
        (Method::GET, "/unknown", vec![], Vec::new()),
    ];

    for (method, path, headers, body) in cases {
        let plain_req = request(method, path, &headers, &body);
        let plain = respond(&router, &plain_req).await.unwrap();

        let mut gz_headers = headers.clone();
        gz_headers.push(("Accept-Encoding", "gzip"));
        let gz_req = request(method, path, &gz_headers, &body);
        let encoded = respond(&router, &gz_req).await.unwrap();

        assert_eq!(encoded.status, plain.status, "{path}");
        assert_eq!(encoded.headers.get("Content-Encoding"), Some("gzip"), "{path}");
        assert_eq!(gunzip(&encoded.body), plain.body, "{path}");
        assert_eq!(
            encoded.headers.get("Content-Length"),
            Some(encoded.body.len().to_string().as_str()),
            "{path}"
        );
    }
}
